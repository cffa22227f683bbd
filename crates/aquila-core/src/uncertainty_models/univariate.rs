//! Discrete univariate distributions on an equidistant grid.

use aquila_ir::{Circuit, QubitId};

use crate::circuits::state_preparation::prepare_probabilities;
use crate::circuits::{CircuitFactory, check_qubits};
use crate::error::{AquaError, AquaResult};

/// `num` equidistant points from `low` to `high` inclusive.
#[allow(clippy::cast_precision_loss)]
pub fn linspace(low: f64, high: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![low],
        _ => {
            let step = (high - low) / (num - 1) as f64;
            (0..num).map(|i| low + step * i as f64).collect()
        }
    }
}

/// Evaluate `pdf` on a grid and normalize the values to probabilities.
///
/// Returns the probabilities and the grid.
pub fn pdf_to_probabilities(
    pdf: impl Fn(f64) -> f64,
    low: f64,
    high: f64,
    num_values: usize,
) -> (Vec<f64>, Vec<f64>) {
    let values = linspace(low, high, num_values);
    let mut probabilities: Vec<f64> = values.iter().map(|&x| pdf(x)).collect();
    let total: f64 = probabilities.iter().sum();
    for p in &mut probabilities {
        *p /= total;
    }
    (probabilities, values)
}

/// A distribution over `2^n` grid values loaded into `n` qubits.
///
/// Basis state `|i⟩` stands for `values[i]`, and [`build`](CircuitFactory::build)
/// prepares `Σ_i sqrt(p_i) |i⟩`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnivariateDistribution {
    num_target_qubits: usize,
    probabilities: Vec<f64>,
    values: Vec<f64>,
    low: f64,
    high: f64,
}

impl UnivariateDistribution {
    /// Create a distribution from explicit probabilities.
    ///
    /// # Errors
    ///
    /// Fails if there are not exactly `2^num_target_qubits` probabilities.
    pub fn new(
        num_target_qubits: usize,
        probabilities: Vec<f64>,
        low: f64,
        high: f64,
    ) -> AquaResult<Self> {
        let num_values = 1usize << num_target_qubits;
        if probabilities.len() != num_values {
            return Err(AquaError::InvalidInput(format!(
                "{num_target_qubits} qubits need {num_values} probabilities, got {}",
                probabilities.len()
            )));
        }
        Ok(Self {
            num_target_qubits,
            probabilities,
            values: linspace(low, high, num_values),
            low,
            high,
        })
    }

    /// Create a distribution by discretizing a density.
    pub fn from_pdf(
        num_target_qubits: usize,
        pdf: impl Fn(f64) -> f64,
        low: f64,
        high: f64,
    ) -> AquaResult<Self> {
        let (probabilities, _) = pdf_to_probabilities(pdf, low, high, 1 << num_target_qubits);
        Self::new(num_target_qubits, probabilities, low, high)
    }

    /// Value of basis state `|0…0⟩`.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Value of basis state `|1…1⟩`.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Number of grid values.
    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// Grid values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Probability of each grid value.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
}

impl CircuitFactory for UnivariateDistribution {
    fn num_target_qubits(&self) -> usize {
        self.num_target_qubits
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        prepare_probabilities(qc, &q[..self.num_target_qubits], &self.probabilities)
    }
}
