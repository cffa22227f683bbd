//! Basis-gate unrolling.

use std::f64::consts::PI;

use aquila_ir::{CircuitDag, Instruction, InstructionKind, QubitId, StandardGate};
use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Unroll every gate into a target basis.
///
/// Gates outside the basis are replaced by a fixed decomposition, and the
/// replacement is unrolled again until only basis gates remain. Measure,
/// reset and barrier are kept as they are. `rz(θ)` becomes `u1(θ)` and the
/// difference, `-θ/2`, is added to the DAG's global phase.
///
/// The basis is the one given at construction, or the `PropertySet` basis
/// when built with [`Unroller::from_properties`].
pub struct Unroller {
    basis: Option<BasisGates>,
}

impl Unroller {
    /// Unroll into the given basis.
    pub fn new(basis: BasisGates) -> Self {
        Self { basis: Some(basis) }
    }

    /// Unroll into whatever basis the `PropertySet` carries.
    pub fn from_properties() -> Self {
        Self { basis: None }
    }
}

impl Pass for Unroller {
    fn name(&self) -> &'static str {
        "Unroller"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = self
            .basis
            .as_ref()
            .or(properties.basis_gates.as_ref())
            .ok_or(CompileError::MissingBasisGates)?;

        let mut new_dag = CircuitDag::empty_like(dag);
        for inst in dag.ops() {
            unroll_into(&mut new_dag, inst.clone(), basis)?;
        }

        *dag = new_dag;
        Ok(())
    }
}

fn unroll_into(
    dag: &mut CircuitDag,
    instruction: Instruction,
    basis: &BasisGates,
) -> CompileResult<()> {
    let gate = match instruction.kind {
        InstructionKind::Gate(gate) if !basis.contains(gate.name()) => gate,
        _ => {
            dag.apply(instruction)?;
            return Ok(());
        }
    };

    let (replacement, phase) = decompose(&gate, &instruction.qubits)
        .ok_or_else(|| CompileError::GateNotInBasis(gate.name().to_string()))?;
    trace!(
        "Unrolling {} into {} instructions",
        gate.name(),
        replacement.len()
    );

    dag.add_global_phase(phase);
    for inst in replacement {
        unroll_into(dag, inst, basis)?;
    }
    Ok(())
}

/// One decomposition step for a gate, with the global phase it introduces.
///
/// Returns `None` for gates that have no rule (the basis primitives `u3`,
/// `cx` and `id`).
#[allow(clippy::too_many_lines)]
fn decompose(gate: &StandardGate, qubits: &[QubitId]) -> Option<(Vec<Instruction>, f64)> {
    let one = |g: StandardGate, q: QubitId| Instruction::single_qubit_gate(g, q);
    let cx = |c: QubitId, t: QubitId| Instruction::two_qubit_gate(StandardGate::CX, c, t);
    let q = |i: usize| qubits.get(i).copied();

    let mut phase = 0.0;
    let seq = match *gate {
        StandardGate::I | StandardGate::U3(..) | StandardGate::CX => return None,

        StandardGate::H => vec![one(StandardGate::U2(0.0, PI), q(0)?)],
        StandardGate::X => vec![one(StandardGate::U3(PI, 0.0, PI), q(0)?)],
        StandardGate::Y => vec![one(StandardGate::U3(PI, PI / 2.0, PI / 2.0), q(0)?)],
        StandardGate::Z => vec![one(StandardGate::U1(PI), q(0)?)],
        StandardGate::S => vec![one(StandardGate::U1(PI / 2.0), q(0)?)],
        StandardGate::Sdg => vec![one(StandardGate::U1(-PI / 2.0), q(0)?)],
        StandardGate::T => vec![one(StandardGate::U1(PI / 4.0), q(0)?)],
        StandardGate::Tdg => vec![one(StandardGate::U1(-PI / 4.0), q(0)?)],
        StandardGate::Rx(theta) => {
            vec![one(StandardGate::U3(theta, -PI / 2.0, PI / 2.0), q(0)?)]
        }
        StandardGate::Ry(theta) => vec![one(StandardGate::U3(theta, 0.0, 0.0), q(0)?)],
        StandardGate::Rz(theta) => {
            phase = -theta / 2.0;
            vec![one(StandardGate::U1(theta), q(0)?)]
        }
        StandardGate::P(lambda) => vec![one(StandardGate::U1(lambda), q(0)?)],
        StandardGate::U1(lambda) => vec![one(StandardGate::U3(0.0, 0.0, lambda), q(0)?)],
        StandardGate::U2(phi, lambda) => {
            vec![one(StandardGate::U3(PI / 2.0, phi, lambda), q(0)?)]
        }

        StandardGate::CZ => {
            let (a, b) = (q(0)?, q(1)?);
            vec![one(StandardGate::H, b), cx(a, b), one(StandardGate::H, b)]
        }
        StandardGate::Swap => {
            let (a, b) = (q(0)?, q(1)?);
            vec![cx(a, b), cx(b, a), cx(a, b)]
        }
        StandardGate::CU1(lambda) => {
            let (c, t) = (q(0)?, q(1)?);
            vec![
                one(StandardGate::U1(lambda / 2.0), c),
                cx(c, t),
                one(StandardGate::U1(-lambda / 2.0), t),
                cx(c, t),
                one(StandardGate::U1(lambda / 2.0), t),
            ]
        }
        StandardGate::CU3(theta, phi, lambda) => {
            let (c, t) = (q(0)?, q(1)?);
            vec![
                one(StandardGate::U1((lambda - phi) / 2.0), t),
                cx(c, t),
                one(StandardGate::U3(-theta / 2.0, 0.0, -(phi + lambda) / 2.0), t),
                cx(c, t),
                one(StandardGate::U3(theta / 2.0, phi, 0.0), t),
            ]
        }
        StandardGate::CRy(theta) => {
            let (c, t) = (q(0)?, q(1)?);
            vec![
                one(StandardGate::U3(theta / 2.0, 0.0, 0.0), t),
                cx(c, t),
                one(StandardGate::U3(-theta / 2.0, 0.0, 0.0), t),
                cx(c, t),
            ]
        }
        StandardGate::CCX => {
            let (a, b, c) = (q(0)?, q(1)?, q(2)?);
            let h = StandardGate::U2(0.0, PI);
            let t = StandardGate::U1(PI / 4.0);
            let tdg = StandardGate::U1(-PI / 4.0);
            vec![
                one(h, c),
                cx(b, c),
                one(tdg, c),
                cx(a, c),
                one(t, c),
                cx(b, c),
                one(tdg, c),
                cx(a, c),
                one(t, b),
                one(t, c),
                one(h, c),
                cx(a, b),
                one(t, a),
                one(tdg, b),
                cx(a, b),
            ]
        }
    };
    Some((seq, phase))
}
