//! Comparison of a register against a fixed value.

use aquila_ir::{Circuit, QubitId};

use super::gates::logical_or;
use super::{CircuitFactory, check_qubits};
use crate::error::AquaResult;

/// Flips a result qubit if the state register compares to a fixed value.
///
/// Operates on `q = [state(n), result]` with `n - 1` ancillas. The result is
/// set when `x >= value` (or `x < value` if `geq` is false). The comparison
/// adds the two's complement of `ceil(value)` to `x` through a carry chain
/// and keeps only the final carry.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedValueComparator {
    num_state_qubits: usize,
    value: f64,
    geq: bool,
}

impl FixedValueComparator {
    /// Create a comparator over `num_state_qubits` state qubits.
    pub fn new(num_state_qubits: usize, value: f64, geq: bool) -> Self {
        Self {
            num_state_qubits,
            value,
            geq,
        }
    }

    /// The value compared against.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the result flags `x >= value`.
    pub fn geq(&self) -> bool {
        self.geq
    }

    /// Bits of `2^n - ceil(value)`, least significant first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn twos_complement(&self) -> Vec<bool> {
        let n = self.num_state_qubits;
        let tc = (1u64 << n) - self.value.ceil() as u64;
        (0..n).map(|i| (tc >> i) & 1 == 1).collect()
    }

    fn carry(
        qc: &mut Circuit,
        bit: bool,
        state: QubitId,
        prev: QubitId,
        out: QubitId,
    ) -> AquaResult<()> {
        if bit {
            logical_or(qc, &[state, prev], out, &[])
        } else {
            qc.ccx(state, prev, out)?;
            Ok(())
        }
    }
}

impl CircuitFactory for FixedValueComparator {
    fn num_target_qubits(&self) -> usize {
        self.num_state_qubits + 1
    }

    fn required_ancillas(&self) -> usize {
        self.num_state_qubits.saturating_sub(1)
    }

    #[allow(clippy::cast_precision_loss)]
    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        let n = self.num_state_qubits;
        let result = q[n];
        // integer states compare against ceil(value)
        let threshold = self.value.ceil();

        if threshold <= 0.0 {
            // every state satisfies x >= value
            if self.geq {
                qc.x(result)?;
            }
            return Ok(());
        }
        if threshold >= (1u64 << n) as f64 {
            // no state satisfies x >= value
            if !self.geq {
                qc.x(result)?;
            }
            return Ok(());
        }
        if n == 1 {
            // threshold is 1 here
            qc.cx(q[0], result)?;
            if !self.geq {
                qc.x(result)?;
            }
            return Ok(());
        }

        let tc = self.twos_complement();
        for i in 0..n {
            if i == 0 {
                if tc[0] {
                    qc.cx(q[0], q_ancillas[0])?;
                }
            } else {
                let out = if i < n - 1 { q_ancillas[i] } else { result };
                Self::carry(qc, tc[i], q[i], q_ancillas[i - 1], out)?;
            }
        }

        if !self.geq {
            qc.x(result)?;
        }

        for i in (0..n - 1).rev() {
            if i == 0 {
                if tc[0] {
                    qc.cx(q[0], q_ancillas[0])?;
                }
            } else {
                Self::carry(qc, tc[i], q[i], q_ancillas[i - 1], q_ancillas[i])?;
            }
        }
        Ok(())
    }
}
