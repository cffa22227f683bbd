//! Multivariate distributions on per-dimension equidistant grids.

use super::univariate::linspace;
use crate::error::{AquaError, AquaResult};

/// Shape of a multivariate distribution.
///
/// Dimension `d` occupies `num_qubits[d]` qubits and takes `2^num_qubits[d]`
/// values from `low[d]` to `high[d]`. Dimensions are laid out in order, so
/// the first dimension owns the lowest qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct MultivariateDistribution {
    num_qubits: Vec<usize>,
    low: Vec<f64>,
    high: Vec<f64>,
    values: Vec<Vec<f64>>,
    probabilities: Option<Vec<f64>>,
}

impl MultivariateDistribution {
    /// Create the shape without an explicit joint distribution.
    pub fn new(num_qubits: Vec<usize>, low: Vec<f64>, high: Vec<f64>) -> AquaResult<Self> {
        if low.len() != num_qubits.len() || high.len() != num_qubits.len() {
            return Err(AquaError::InvalidInput(format!(
                "{} dimensions but {} lower and {} upper bounds",
                num_qubits.len(),
                low.len(),
                high.len()
            )));
        }
        let values = num_qubits
            .iter()
            .zip(low.iter().zip(&high))
            .map(|(&n, (&lo, &hi))| linspace(lo, hi, 1 << n))
            .collect();
        Ok(Self {
            num_qubits,
            low,
            high,
            values,
            probabilities: None,
        })
    }

    /// Attach a joint distribution over all `2^Σn` basis states.
    pub fn with_probabilities(mut self, probabilities: Vec<f64>) -> AquaResult<Self> {
        let expected = 1usize << self.num_target_qubits();
        if probabilities.len() != expected {
            return Err(AquaError::InvalidInput(format!(
                "expected {expected} joint probabilities, got {}",
                probabilities.len()
            )));
        }
        self.probabilities = Some(probabilities);
        Ok(self)
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.num_qubits.len()
    }

    /// Total number of qubits over all dimensions.
    pub fn num_target_qubits(&self) -> usize {
        self.num_qubits.iter().sum()
    }

    /// Qubits per dimension.
    pub fn num_qubits(&self) -> &[usize] {
        &self.num_qubits
    }

    /// Lower bound per dimension.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Upper bound per dimension.
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Grid values per dimension.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Joint probabilities, if given.
    pub fn probabilities(&self) -> Option<&[f64]> {
        self.probabilities.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let dist =
            MultivariateDistribution::new(vec![2, 1], vec![-1.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert_eq!(dist.dimension(), 2);
        assert_eq!(dist.num_target_qubits(), 3);
        assert_eq!(dist.values()[1], vec![0.0, 1.0]);
        assert_eq!(dist.values()[0].len(), 4);
        assert!(dist.probabilities().is_none());
    }

    #[test]
    fn test_bounds_mismatch() {
        assert!(MultivariateDistribution::new(vec![2, 1], vec![0.0], vec![1.0, 1.0]).is_err());
    }

    #[test]
    fn test_joint_probability_length() {
        let dist = MultivariateDistribution::new(vec![1, 1], vec![0.0; 2], vec![1.0; 2]).unwrap();
        assert!(dist.clone().with_probabilities(vec![0.5; 2]).is_err());
        let dist = dist.with_probabilities(vec![0.25; 4]).unwrap();
        assert_eq!(dist.probabilities().map(<[f64]>::len), Some(4));
    }
}
