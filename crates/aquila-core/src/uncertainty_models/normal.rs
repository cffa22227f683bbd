//! Normal, log-normal and uniform distributions.

use std::f64::consts::PI;

use aquila_ir::{Circuit, QubitId};

use super::univariate::UnivariateDistribution;
use crate::circuits::{CircuitFactory, check_qubits};
use crate::error::AquaResult;

/// Truncated normal distribution `N(μ, σ²)` on `[low, high]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalDistribution {
    mu: f64,
    sigma: f64,
    distribution: UnivariateDistribution,
}

impl NormalDistribution {
    /// Discretize `N(mu, sigma²)` onto `2^num_target_qubits` grid values.
    pub fn new(
        num_target_qubits: usize,
        mu: f64,
        sigma: f64,
        low: f64,
        high: f64,
    ) -> AquaResult<Self> {
        let pdf = |x: f64| {
            let z = (x - mu) / sigma;
            (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
        };
        Ok(Self {
            mu,
            sigma,
            distribution: UnivariateDistribution::from_pdf(num_target_qubits, pdf, low, high)?,
        })
    }

    /// Mean of the untruncated distribution.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation of the untruncated distribution.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The discretized distribution.
    pub fn distribution(&self) -> &UnivariateDistribution {
        &self.distribution
    }
}

impl CircuitFactory for NormalDistribution {
    fn num_target_qubits(&self) -> usize {
        self.distribution.num_target_qubits()
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        self.distribution.build(qc, q, q_ancillas)
    }
}

/// Truncated log-normal distribution on `[low, high]`.
///
/// `mu` and `sigma` are the mean and standard deviation of `ln X`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogNormalDistribution {
    mu: f64,
    sigma: f64,
    distribution: UnivariateDistribution,
}

impl LogNormalDistribution {
    /// Discretize the log-normal density onto `2^num_target_qubits` grid values.
    pub fn new(
        num_target_qubits: usize,
        mu: f64,
        sigma: f64,
        low: f64,
        high: f64,
    ) -> AquaResult<Self> {
        let pdf = |x: f64| {
            if x <= 0.0 {
                return 0.0;
            }
            let z = (x.ln() - mu) / sigma;
            (-0.5 * z * z).exp() / (x * sigma * (2.0 * PI).sqrt())
        };
        Ok(Self {
            mu,
            sigma,
            distribution: UnivariateDistribution::from_pdf(num_target_qubits, pdf, low, high)?,
        })
    }

    /// Mean of `ln X`.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation of `ln X`.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The discretized distribution.
    pub fn distribution(&self) -> &UnivariateDistribution {
        &self.distribution
    }
}

impl CircuitFactory for LogNormalDistribution {
    fn num_target_qubits(&self) -> usize {
        self.distribution.num_target_qubits()
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        self.distribution.build(qc, q, q_ancillas)
    }
}

/// Uniform distribution over `2^n` grid values, loaded with Hadamards.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformDistribution {
    distribution: UnivariateDistribution,
}

impl UniformDistribution {
    /// Create the uniform distribution on `[low, high]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(num_target_qubits: usize, low: f64, high: f64) -> AquaResult<Self> {
        let num_values = 1usize << num_target_qubits;
        let probabilities = vec![1.0 / num_values as f64; num_values];
        Ok(Self {
            distribution: UnivariateDistribution::new(
                num_target_qubits,
                probabilities,
                low,
                high,
            )?,
        })
    }

    /// The discretized distribution.
    pub fn distribution(&self) -> &UnivariateDistribution {
        &self.distribution
    }
}

impl CircuitFactory for UniformDistribution {
    fn num_target_qubits(&self) -> usize {
        self.distribution.num_target_qubits()
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        for &qubit in &q[..self.num_target_qubits()] {
            qc.h(qubit)?;
        }
        Ok(())
    }
}
