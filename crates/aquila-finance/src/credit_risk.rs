//! Credit-risk analysis on the Gaussian conditional independence model.
//!
//! The portfolio loss `L = Σ_k λ_k · X_k` sums the loss given default
//! `λ_k` of every defaulted asset. In quantum mode the model is loaded
//! into a register, a weighted-sum operator adds up the losses and the
//! distribution is read from the sum qubits. In classical mode the same
//! discretized model is enumerated exactly.

use std::collections::BTreeMap;

use aquila_core::circuits::WeightedSumOperator;
use aquila_core::uncertainty_models::GaussianConditionalIndependenceModel;
use aquila_core::{
    AlgorithmConfiguration, AquaError, AquaResult, CircuitFactory, QuantumAlgorithm,
    QuantumInstance,
};
use aquila_ir::{Circuit, QubitId};
use aquila_sim::ExecutionResult;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{FinanceError, FinanceResult};

/// Algorithm name in configurations and logs.
pub const CREDIT_RISK_ANALYSIS: &str = "CreditRiskAnalysis";

fn default_alpha() -> f64 {
    0.95
}

/// Serializable parameters of a credit-risk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskConfig {
    /// Qubits discretizing the latent normal variable.
    pub n_normal: usize,
    /// Truncation bound of the latent variable.
    pub normal_max_value: f64,
    /// Default probability of each asset at z = 0.
    pub p_zeros: Vec<f64>,
    /// Sensitivity of each asset to the latent variable.
    pub rhos: Vec<f64>,
    /// Loss given default of each asset.
    pub lgd: Vec<u64>,
    /// Confidence level of the value at risk.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Enumerate the model classically instead of simulating it.
    #[serde(default)]
    pub classical: bool,
}

/// Loss distribution and risk measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskResult {
    /// Probability of each total loss `0..2^m`.
    pub loss_distribution: Vec<f64>,
    /// Expected total loss.
    pub expected_loss: f64,
    /// Smallest loss whose cumulative probability reaches α.
    pub value_at_risk: u64,
    /// Expected loss beyond the value at risk.
    pub conditional_value_at_risk: f64,
}

impl CreditRiskResult {
    /// Derive the risk measures from a loss distribution.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_distribution(loss_distribution: Vec<f64>, alpha: f64) -> Self {
        let expected_loss = loss_distribution
            .iter()
            .enumerate()
            .map(|(loss, p)| loss as f64 * p)
            .sum();

        let mut cumulative = 0.0;
        let mut value_at_risk = loss_distribution.len().saturating_sub(1) as u64;
        for (loss, p) in loss_distribution.iter().enumerate() {
            cumulative += p;
            // tolerate rounding in the simulated probabilities
            if cumulative >= alpha - 1e-12 {
                value_at_risk = loss as u64;
                break;
            }
        }

        let (mass, weighted) = loss_distribution
            .iter()
            .enumerate()
            .skip(value_at_risk as usize + 1)
            .fold((0.0, 0.0), |(m, w), (loss, p)| (m + p, w + loss as f64 * p));
        let conditional_value_at_risk = if mass > 0.0 {
            weighted / mass
        } else {
            value_at_risk as f64
        };

        Self {
            loss_distribution,
            expected_loss,
            value_at_risk,
            conditional_value_at_risk,
        }
    }

    /// Cumulative distribution of the loss.
    pub fn cdf(&self) -> Vec<f64> {
        self.loss_distribution
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect()
    }
}

/// Expected loss, VaR and CVaR of a credit portfolio.
#[derive(Debug)]
pub struct CreditRiskAnalysis {
    config: AlgorithmConfiguration,
    model: GaussianConditionalIndependenceModel,
    aggregator: WeightedSumOperator,
    alpha: f64,
}

impl CreditRiskAnalysis {
    /// Create the analysis for a model and per-asset losses.
    pub fn new(
        model: GaussianConditionalIndependenceModel,
        lgd: Vec<u64>,
        alpha: f64,
    ) -> FinanceResult<Self> {
        if lgd.len() != model.num_assets() {
            return Err(FinanceError::Configuration(format!(
                "{} loss values for {} assets",
                lgd.len(),
                model.num_assets()
            )));
        }
        if !(0.0..=1.0).contains(&alpha) {
            return Err(FinanceError::Configuration(format!(
                "alpha must lie in [0, 1], got {alpha}"
            )));
        }
        let aggregator = WeightedSumOperator::new(model.num_assets(), lgd)?;
        Ok(Self {
            config: AlgorithmConfiguration::new(
                CREDIT_RISK_ANALYSIS,
                "Loss distribution, value at risk and conditional value at risk",
            ),
            model,
            aggregator,
            alpha,
        })
    }

    /// Build the analysis from its serialized parameters.
    pub fn from_config(config: &CreditRiskConfig) -> FinanceResult<Self> {
        let model = GaussianConditionalIndependenceModel::new(
            config.n_normal,
            config.normal_max_value,
            config.p_zeros.clone(),
            config.rhos.clone(),
            None,
            None,
        )?;
        let mut analysis = Self::new(model, config.lgd.clone(), config.alpha)?;
        analysis.config = analysis.config.classical(config.classical);
        Ok(analysis)
    }

    /// Switch between exact enumeration and circuit simulation.
    #[must_use]
    pub fn classical(mut self, classical: bool) -> Self {
        self.config = self.config.classical(classical);
        self
    }

    pub fn model(&self) -> &GaussianConditionalIndependenceModel {
        &self.model
    }

    pub fn lgd(&self) -> &[u64] {
        self.aggregator.weights()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Qubits holding the total loss.
    pub fn num_sum_qubits(&self) -> usize {
        self.aggregator.num_sum_qubits()
    }

    /// Model and aggregation circuit, with the sum qubits measured when
    /// `measure` is set.
    ///
    /// Qubit layout: latent variable, one default qubit per asset, sum
    /// register, then the `a` ancilla register if the aggregator needs one.
    #[allow(clippy::cast_possible_truncation)]
    pub fn construct_circuit(&self, measure: bool) -> AquaResult<Circuit> {
        let n_z = self.model.n_normal();
        let k = self.model.num_assets();
        let m = self.num_sum_qubits();
        let mut qc = Circuit::new("credit_risk");
        let q = qc.add_qreg("q", (n_z + k + m) as u32)?;
        let ancillas = match self.aggregator.required_ancillas() {
            0 => vec![],
            n => qc.add_qreg("a", n as u32)?,
        };

        self.model.build(&mut qc, &q[..n_z + k], &[])?;
        self.aggregator.build(&mut qc, &q[n_z..], &ancillas)?;

        if measure {
            let c = qc.add_creg("c", m as u32)?;
            for (i, &clbit) in c.iter().enumerate() {
                qc.measure(q[n_z + k + i], clbit)?;
            }
        }
        Ok(qc)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn sum_qubits(&self) -> Vec<QubitId> {
        let offset = self.model.n_normal() + self.model.num_assets();
        (offset..offset + self.num_sum_qubits())
            .map(|i| QubitId(i as u32))
            .collect()
    }

    /// Marginal distribution of the sum register.
    #[allow(clippy::cast_precision_loss)]
    fn loss_distribution(&self, result: &ExecutionResult) -> AquaResult<Vec<f64>> {
        let m = self.num_sum_qubits();
        let mut pdf = vec![0.0; 1 << m];

        if let Some(statevector) = &result.statevector {
            let sum = self.sum_qubits();
            for (index, amp) in statevector.iter().enumerate() {
                let loss = sum
                    .iter()
                    .enumerate()
                    .fold(0, |acc, (bit, q)| acc | (((index >> q.index()) & 1) << bit));
                pdf[loss] += amp.norm_sqr();
            }
            return Ok(pdf);
        }

        let total = result.counts.total();
        if total == 0 {
            return Err(AquaError::MissingResult(
                "neither a statevector nor counts".into(),
            ));
        }
        // character i of a bitstring is classical bit i
        for (bits, count) in result.counts.iter() {
            let loss = bits
                .chars()
                .enumerate()
                .filter(|&(_, c)| c == '1')
                .fold(0, |acc, (bit, _)| acc | (1 << bit));
            pdf[loss] += count as f64 / total as f64;
        }
        Ok(pdf)
    }

    /// Exact enumeration of latent values and default patterns.
    fn classical_distribution(&self) -> Vec<f64> {
        let k = self.model.num_assets();
        let lgd = self.lgd();
        let mut pdf = vec![0.0; 1 << self.num_sum_qubits()];
        let normal = self.model.normal().distribution().probabilities();

        for (z, &p_z) in normal.iter().enumerate() {
            let p_default: Vec<f64> = (0..k)
                .map(|asset| self.model.conditional_default_probability(asset, z))
                .collect();
            for pattern in 0..1usize << k {
                let mut p = p_z;
                let mut loss = 0u64;
                for (asset, &pd) in p_default.iter().enumerate() {
                    if (pattern >> asset) & 1 == 1 {
                        p *= pd;
                        loss += lgd[asset];
                    } else {
                        p *= 1.0 - pd;
                    }
                }
                pdf[loss as usize] += p;
            }
        }
        pdf
    }
}

impl QuantumAlgorithm for CreditRiskAnalysis {
    type Output = CreditRiskResult;

    fn configuration(&self) -> &AlgorithmConfiguration {
        &self.config
    }

    #[instrument(skip_all, fields(assets = self.model.num_assets(), classical = self.config.classical))]
    fn execute(
        &mut self,
        quantum_instance: Option<&mut QuantumInstance>,
        _rng: &mut StdRng,
    ) -> AquaResult<CreditRiskResult> {
        let pdf = match quantum_instance {
            Some(qi) if !self.config.classical => {
                let circuit = self.construct_circuit(!qi.is_statevector())?;
                debug!(
                    qubits = circuit.num_qubits(),
                    ops = circuit.size(),
                    "Credit-risk circuit constructed"
                );
                let results = qi.execute(std::slice::from_ref(&circuit))?;
                let result = results.first().ok_or_else(|| {
                    AquaError::MissingResult("no result for the circuit".into())
                })?;
                self.loss_distribution(result)?
            }
            _ => self.classical_distribution(),
        };

        let result = CreditRiskResult::from_distribution(pdf, self.alpha);
        info!(
            expected_loss = result.expected_loss,
            value_at_risk = result.value_at_risk,
            conditional_value_at_risk = result.conditional_value_at_risk,
            "Credit-risk analysis complete"
        );
        Ok(result)
    }
}

/// Group a loss distribution by loss value, dropping zero-probability losses.
pub fn nonzero_losses(result: &CreditRiskResult) -> BTreeMap<u64, f64> {
    result
        .loss_distribution
        .iter()
        .enumerate()
        .filter(|(_, p)| **p > 0.0)
        .map(|(loss, &p)| (loss as u64, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_sim::Counts;

    #[test]
    fn test_empty_backend_result_is_rejected() {
        let analysis = CreditRiskAnalysis::from_config(&CreditRiskConfig {
            n_normal: 2,
            normal_max_value: 2.0,
            p_zeros: vec![0.15, 0.25],
            rhos: vec![0.1, 0.05],
            lgd: vec![1, 2],
            alpha: 0.95,
            classical: false,
        })
        .unwrap();
        let empty = ExecutionResult::new("job-0", "qasm_simulator", Counts::new(), 0);
        let err = analysis.loss_distribution(&empty).unwrap_err();
        assert!(matches!(err, AquaError::MissingResult(_)));
    }

    #[test]
    fn test_risk_measures() {
        let r = CreditRiskResult::from_distribution(vec![0.5, 0.3, 0.15, 0.05], 0.9);
        assert!((r.expected_loss - 0.75).abs() < 1e-12);
        assert_eq!(r.value_at_risk, 2);
        assert!((r.conditional_value_at_risk - 3.0).abs() < 1e-12);
        assert!((r.cdf()[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cvar_falls_back_to_var() {
        let r = CreditRiskResult::from_distribution(vec![0.2, 0.0, 0.8], 0.95);
        assert_eq!(r.value_at_risk, 2);
        assert_eq!(r.conditional_value_at_risk, 2.0);
    }

    #[test]
    fn test_lgd_length_checked() {
        let model = GaussianConditionalIndependenceModel::new(
            2,
            2.0,
            vec![0.15, 0.25],
            vec![0.1, 0.05],
            None,
            None,
        )
        .unwrap();
        assert!(matches!(
            CreditRiskAnalysis::new(model, vec![1], 0.95),
            Err(FinanceError::Configuration(_))
        ));
    }

    #[test]
    fn test_nonzero_losses() {
        let r = CreditRiskResult::from_distribution(vec![0.6, 0.0, 0.4, 0.0], 0.5);
        let losses = nonzero_losses(&r);
        assert_eq!(losses.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
    }
}
