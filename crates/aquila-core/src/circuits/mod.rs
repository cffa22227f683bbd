//! Circuit factories.
//!
//! A factory appends a fixed sub-circuit to a caller's circuit, acting on a
//! given list of target qubits plus optional ancillas. Every factory can
//! also be built controlled on an extra qubit through
//! [`CircuitFactory::build_controlled`].

pub mod fixed_value_comparator;
pub mod gates;
pub mod linear_y_rotation;
pub mod state_preparation;
pub mod weighted_sum_operator;

pub use fixed_value_comparator::FixedValueComparator;
pub use linear_y_rotation::LinearYRotation;
pub use weighted_sum_operator::WeightedSumOperator;

use aquila_ir::{Circuit, QubitId};

use crate::error::{AquaError, AquaResult};
use crate::utils::append_controlled;

/// A builder of sub-circuits over a fixed number of target qubits.
pub trait CircuitFactory {
    /// Number of target qubits the factory acts on.
    fn num_target_qubits(&self) -> usize;

    /// Number of ancillas needed by [`build`](Self::build).
    fn required_ancillas(&self) -> usize {
        0
    }

    /// Number of ancillas needed by [`build_controlled`](Self::build_controlled).
    fn required_ancillas_controlled(&self) -> usize {
        self.required_ancillas()
    }

    /// Append the factory's circuit to `qc`.
    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()>;

    /// Append the factory's circuit to `qc`, controlled on `q_control`.
    ///
    /// The uncontrolled circuit is built on a scratch copy of `qc`'s
    /// registers and then synthesized gate by gate with the control.
    fn build_controlled(
        &self,
        qc: &mut Circuit,
        q: &[QubitId],
        q_control: QubitId,
        q_ancillas: &[QubitId],
        use_basis_gates: bool,
    ) -> AquaResult<()> {
        synthesize_controlled(self, qc, q, q_control, q_ancillas, use_basis_gates)
    }
}

/// Build `factory` on a scratch copy of `qc`'s registers and append it
/// gate by gate with `q_control` as the control.
pub(crate) fn synthesize_controlled(
    factory: &(impl CircuitFactory + ?Sized),
    qc: &mut Circuit,
    q: &[QubitId],
    q_control: QubitId,
    q_ancillas: &[QubitId],
    use_basis_gates: bool,
) -> AquaResult<()> {
    let mut uncontrolled = qc.empty_like();
    uncontrolled.set_global_phase(0.0);
    factory.build(&mut uncontrolled, q, q_ancillas)?;
    let control = qc.register_bit(q_control)?;
    append_controlled(&uncontrolled, &control, qc, use_basis_gates)
}

/// Check that enough target and ancilla qubits were supplied.
pub(crate) fn check_qubits(
    factory: &(impl CircuitFactory + ?Sized),
    q: &[QubitId],
    q_ancillas: &[QubitId],
) -> AquaResult<()> {
    if q.len() < factory.num_target_qubits() {
        return Err(AquaError::InvalidInput(format!(
            "expected {} target qubits, got {}",
            factory.num_target_qubits(),
            q.len()
        )));
    }
    if q_ancillas.len() < factory.required_ancillas() {
        return Err(AquaError::InvalidInput(format!(
            "expected {} ancillas, got {}",
            factory.required_ancillas(),
            q_ancillas.len()
        )));
    }
    Ok(())
}
