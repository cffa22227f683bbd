//! Weighted sum of a binary register.

use aquila_ir::{Circuit, QubitId};

use super::gates::{mcx, mcx_ancillas};
use super::{CircuitFactory, check_qubits};
use crate::error::{AquaError, AquaResult};

/// Adds `Σ_i w_i x_i` to a sum register.
///
/// Operates on `q = [state(n), sum(m)]` where `m` is the number of bits of
/// `Σ w_i`. Each set bit `j` of `w_i` adds `2^j` to the sum, controlled on
/// `x_i`, through a ripple of multi-controlled X gates from the top bit
/// down. The sum is stored little-endian and never overflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedSumOperator {
    num_state_qubits: usize,
    weights: Vec<u64>,
    num_sum_qubits: usize,
}

impl WeightedSumOperator {
    /// Create the operator for `num_state_qubits` weighted state qubits.
    pub fn new(num_state_qubits: usize, weights: Vec<u64>) -> AquaResult<Self> {
        if weights.len() != num_state_qubits {
            return Err(AquaError::InvalidInput(format!(
                "{} weights for {num_state_qubits} state qubits",
                weights.len()
            )));
        }
        let num_sum_qubits = Self::required_sum_qubits(&weights);
        Ok(Self {
            num_state_qubits,
            weights,
            num_sum_qubits,
        })
    }

    /// Number of sum qubits needed to hold `Σ weights`.
    pub fn required_sum_qubits(weights: &[u64]) -> usize {
        let total: u64 = weights.iter().sum();
        if total == 0 {
            1
        } else {
            (u64::BITS - total.leading_zeros()) as usize
        }
    }

    /// Number of state qubits.
    pub fn num_state_qubits(&self) -> usize {
        self.num_state_qubits
    }

    /// Number of sum qubits.
    pub fn num_sum_qubits(&self) -> usize {
        self.num_sum_qubits
    }

    /// The integer weights.
    pub fn weights(&self) -> &[u64] {
        &self.weights
    }
}

impl CircuitFactory for WeightedSumOperator {
    fn num_target_qubits(&self) -> usize {
        self.num_state_qubits + self.num_sum_qubits
    }

    fn required_ancillas(&self) -> usize {
        mcx_ancillas(self.num_sum_qubits)
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        let n = self.num_state_qubits;
        let m = self.num_sum_qubits;
        let sum = &q[n..n + m];

        for (i, &weight) in self.weights.iter().enumerate() {
            for j in (0..m).filter(|&j| (weight >> j) & 1 == 1) {
                for k in (j..m).rev() {
                    let mut controls = Vec::with_capacity(k - j + 1);
                    controls.push(q[i]);
                    controls.extend_from_slice(&sum[j..k]);
                    mcx(qc, &controls, sum[k], q_ancillas)?;
                }
            }
        }
        Ok(())
    }
}
