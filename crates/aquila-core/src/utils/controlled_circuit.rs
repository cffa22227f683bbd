//! Controlled-circuit synthesis.
//!
//! [`controlled_circuit`] rewrites an arbitrary circuit so that every gate is
//! conditioned on one extra control qubit. The source is first unrolled into
//! the `{u1, u2, u3, cx, id}` basis, then each basis gate is replaced by its
//! controlled counterpart:
//!
//! | Basis gate | Controlled form |
//! |------------|-----------------|
//! | `id`       | `cu3(0, 0, 0)` |
//! | `u1(λ)`    | `cu1(λ)` |
//! | `u2(φ, λ)` | `cu3(π/2, φ, λ)` |
//! | `u3`       | `cu3` |
//! | `cx`       | `ccx` |
//!
//! With `use_basis_gates` every controlled form is emitted as a fixed
//! sequence of `u1`, `u2`, `u3` and `cx` gates.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use aquila_ir::{
    Circuit, ClbitId, Instruction, InstructionKind, QubitId, RegisterBit, StandardGate,
};
use tracing::{debug, instrument};

use crate::error::{AquaError, AquaResult};
use crate::utils::circuit_utils::convert_to_basis_gates;

/// Absolute tolerance below which `φ + λ` needs no phase correction.
const PHASE_ATOL: f64 = 1e-8;

/// Apply a controlled `u1(λ)`.
pub fn apply_cu1(
    circuit: &mut Circuit,
    lambda: f64,
    control: QubitId,
    target: QubitId,
    use_basis_gates: bool,
) -> AquaResult<()> {
    if use_basis_gates {
        circuit
            .u1(lambda / 2.0, control)?
            .cx(control, target)?
            .u1(-lambda / 2.0, target)?
            .cx(control, target)?
            .u1(lambda / 2.0, target)?;
    } else {
        circuit.cu1(lambda, control, target)?;
    }
    Ok(())
}

/// Apply a controlled `u3(θ, φ, λ)`.
///
/// Both the basis sequence and the native `cu3` leave a relative phase of
/// `e^{-i(φ+λ)/2}` on the control-1 subspace. A `u1((φ+λ)/2)` on the control
/// cancels it, so the emitted gates implement the exact controlled `u3`.
pub fn apply_cu3(
    circuit: &mut Circuit,
    theta: f64,
    phi: f64,
    lambda: f64,
    control: QubitId,
    target: QubitId,
    use_basis_gates: bool,
) -> AquaResult<()> {
    if use_basis_gates {
        circuit
            .u1((lambda - phi) / 2.0, target)?
            .cx(control, target)?
            .u3(-theta / 2.0, 0.0, -(phi + lambda) / 2.0, target)?
            .cx(control, target)?
            .u3(theta / 2.0, phi, 0.0, target)?;
    } else {
        circuit.cu3(theta, phi, lambda, control, target)?;
    }

    if (phi + lambda).abs() > PHASE_ATOL {
        circuit.u1((phi + lambda) / 2.0, control)?;
    }
    Ok(())
}

/// Apply a Toffoli gate with controls `a`, `b` and target `c`.
pub fn apply_ccx(
    circuit: &mut Circuit,
    a: QubitId,
    b: QubitId,
    c: QubitId,
    use_basis_gates: bool,
) -> AquaResult<()> {
    if use_basis_gates {
        circuit
            .u2(0.0, PI, c)?
            .cx(b, c)?
            .u1(-FRAC_PI_4, c)?
            .cx(a, c)?
            .u1(FRAC_PI_4, c)?
            .cx(b, c)?
            .u1(-FRAC_PI_4, c)?
            .cx(a, c)?
            .u1(FRAC_PI_4, b)?
            .u1(FRAC_PI_4, c)?
            .u2(0.0, PI, c)?
            .cx(a, b)?
            .u1(FRAC_PI_4, a)?
            .u1(-FRAC_PI_4, b)?
            .cx(a, b)?;
    } else {
        circuit.ccx(a, b, c)?;
    }
    Ok(())
}

/// Build the controlled version of `source`.
///
/// The gates are appended to `target` when one is given, otherwise to a new
/// circuit. Registers of `source` and the control's register are added to
/// the target when missing, and source bits map to target bits by
/// (register name, index).
///
/// A non-zero global phase of the unrolled source becomes a `u1(phase)` on
/// the control, so the result is exactly `|0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ U`.
///
/// # Errors
///
/// Fails if the source cannot be unrolled, or if an operation other than a
/// basis gate, measure or barrier survives unrolling (for example reset).
#[instrument(skip(source, target), fields(source = %source.name(), control = %control))]
pub fn controlled_circuit(
    source: &Circuit,
    control: &RegisterBit,
    target: Option<Circuit>,
    use_basis_gates: bool,
) -> AquaResult<Circuit> {
    let mut qc = target.unwrap_or_else(|| Circuit::new(format!("controlled_{}", source.name())));
    append_controlled(source, control, &mut qc, use_basis_gates)?;
    Ok(qc)
}

/// Append the controlled version of `source` to `qc` in place.
///
/// On error `qc` may hold a partially emitted sequence.
pub fn append_controlled(
    source: &Circuit,
    control: &RegisterBit,
    qc: &mut Circuit,
    use_basis_gates: bool,
) -> AquaResult<()> {
    for qreg in source.qregs() {
        if !qc.has_register(qreg.name()) {
            qc.add_register(qreg)?;
        }
    }
    for creg in source.cregs() {
        if !qc.has_classical_register(creg.name()) {
            qc.add_classical_register(creg)?;
        }
    }

    let unrolled = convert_to_basis_gates(source)?;

    if !qc.has_register(control.register.name()) {
        qc.add_register(&control.register)?;
    }
    let ctl = qc.resolve(control)?;

    let qubit_map = unrolled
        .qubits()
        .iter()
        .map(|q| qc.qubit(&q.register, q.index))
        .collect::<Result<Vec<_>, _>>()?;
    let clbit_map = unrolled
        .clbits()
        .iter()
        .map(|c| qc.clbit(&c.register, c.index))
        .collect::<Result<Vec<_>, _>>()?;
    let q = |id: QubitId| qubit_map[id.index()];
    let c = |id: ClbitId| clbit_map[id.index()];

    debug!(
        ops = unrolled.size(),
        use_basis_gates, "Emitting controlled operations"
    );

    for inst in unrolled.ops() {
        match inst.kind {
            InstructionKind::Gate(gate) => match gate {
                StandardGate::I => {
                    apply_cu3(qc, 0.0, 0.0, 0.0, ctl, q(inst.qubits[0]), use_basis_gates)?;
                }
                StandardGate::U1(lambda) => {
                    apply_cu1(qc, lambda, ctl, q(inst.qubits[0]), use_basis_gates)?;
                }
                StandardGate::U2(phi, lambda) => {
                    let t = q(inst.qubits[0]);
                    apply_cu3(qc, FRAC_PI_2, phi, lambda, ctl, t, use_basis_gates)?;
                }
                StandardGate::U3(theta, phi, lambda) => {
                    let t = q(inst.qubits[0]);
                    apply_cu3(qc, theta, phi, lambda, ctl, t, use_basis_gates)?;
                }
                StandardGate::CX => {
                    let (a, b) = (q(inst.qubits[0]), q(inst.qubits[1]));
                    apply_ccx(qc, ctl, a, b, use_basis_gates)?;
                }
                other => return Err(AquaError::UnexpectedOperation(other.name().into())),
            },
            InstructionKind::Measure => {
                for (&qubit, &clbit) in inst.qubits.iter().zip(&inst.clbits) {
                    qc.measure(q(qubit), c(clbit))?;
                }
            }
            InstructionKind::Barrier => {
                qc.append(Instruction::barrier(inst.qubits.iter().map(|&id| q(id))))?;
            }
            InstructionKind::Reset => {
                return Err(AquaError::UnexpectedOperation(inst.name().into()));
            }
        }
    }

    let phase = unrolled.global_phase();
    if phase.abs() > PHASE_ATOL {
        qc.u1(phase, ctl)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_ir::QuantumRegister;

    #[test]
    fn test_ccx_basis_sequence() {
        let (a, b, c) = (QubitId(2), QubitId(0), QubitId(1));
        let mut qc = Circuit::with_size("t", 3, 0);
        apply_ccx(&mut qc, a, b, c, true).unwrap();

        let h = StandardGate::U2(0.0, PI);
        let t = StandardGate::U1(FRAC_PI_4);
        let tdg = StandardGate::U1(-FRAC_PI_4);
        let expected = [
            Instruction::gate(h, [c]),
            Instruction::gate(StandardGate::CX, [b, c]),
            Instruction::gate(tdg, [c]),
            Instruction::gate(StandardGate::CX, [a, c]),
            Instruction::gate(t, [c]),
            Instruction::gate(StandardGate::CX, [b, c]),
            Instruction::gate(tdg, [c]),
            Instruction::gate(StandardGate::CX, [a, c]),
            Instruction::gate(t, [b]),
            Instruction::gate(t, [c]),
            Instruction::gate(h, [c]),
            Instruction::gate(StandardGate::CX, [a, b]),
            Instruction::gate(t, [a]),
            Instruction::gate(tdg, [b]),
            Instruction::gate(StandardGate::CX, [a, b]),
        ];
        let actual: Vec<&Instruction> = qc.ops().collect();
        assert_eq!(actual.len(), expected.len());
        for (i, (got, want)) in actual.into_iter().zip(&expected).enumerate() {
            assert_eq!(got, want, "instruction {i}");
        }

        // the unroller's Toffoli rule emits the same sequence
        let mut native = Circuit::with_size("t", 3, 0);
        native.ccx(a, b, c).unwrap();
        let unrolled = convert_to_basis_gates(&native).unwrap();
        assert!(unrolled.ops().eq(qc.ops()));
    }

    #[test]
    fn test_cu3_correction_skipped_when_phase_sum_is_zero() {
        let mut qc = Circuit::with_size("t", 2, 0);
        apply_cu3(&mut qc, 0.3, 0.5, -0.5, QubitId(0), QubitId(1), false).unwrap();
        assert_eq!(qc.size(), 1);

        let mut qc = Circuit::with_size("t", 2, 0);
        apply_cu3(&mut qc, 0.3, 0.5, 0.5, QubitId(0), QubitId(1), false).unwrap();
        assert_eq!(qc.count_ops(), vec![("cu3", 1), ("u1", 1)]);
    }

    #[test]
    fn test_controlled_circuit_adds_registers() {
        let mut source = Circuit::with_size("bell", 2, 2);
        source.h(QubitId(0)).unwrap();
        source.cx(QubitId(0), QubitId(1)).unwrap();
        source.measure(QubitId(1), ClbitId(1)).unwrap();

        let ctl = QuantumRegister::new("ctl", 1);
        let qc = controlled_circuit(&source, &ctl.bit(0), None, false).unwrap();

        assert_eq!(qc.num_qubits(), 3);
        assert_eq!(qc.num_clbits(), 2);
        assert!(qc.has_register("ctl"));
        // u2 becomes cu3 plus a phase correction, cx becomes ccx
        assert_eq!(qc.count_ops(), vec![("cu3", 1), ("u1", 1), ("ccx", 1), ("measure", 1)]);
    }

    #[test]
    fn test_controlled_circuit_uses_existing_target_registers() {
        let mut source = Circuit::with_size("src", 2, 0);
        source.x(QubitId(1)).unwrap();

        let mut target = Circuit::new("tgt");
        let ctl = QuantumRegister::new("ctl", 1);
        target.add_register(&ctl).unwrap();
        target.add_qreg("q", 2).unwrap();

        let qc = controlled_circuit(&source, &ctl.bit(0), Some(target), false).unwrap();
        assert_eq!(qc.num_qubits(), 3);
        // q[1] is id 2 in the target because ctl was allocated first
        let inst = qc.ops().next().unwrap();
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(2)]);
    }

    #[test]
    fn test_reset_is_unexpected() {
        let mut source = Circuit::with_size("src", 1, 0);
        source.reset(QubitId(0)).unwrap();
        let ctl = QuantumRegister::new("ctl", 1);
        let err = controlled_circuit(&source, &ctl.bit(0), None, true).unwrap_err();
        assert!(matches!(err, AquaError::UnexpectedOperation(ref op) if op == "reset"));
    }

    #[test]
    fn test_rz_phase_lands_on_control() {
        let mut source = Circuit::with_size("src", 1, 0);
        source.rz(0.8, QubitId(0)).unwrap();
        let ctl = QuantumRegister::new("ctl", 1);
        let qc = controlled_circuit(&source, &ctl.bit(0), None, true).unwrap();
        let last = qc.ops().last().unwrap();
        assert_eq!(last.kind, InstructionKind::Gate(StandardGate::U1(-0.4)));
        assert_eq!(last.qubits, vec![QubitId(1)]);
    }
}
