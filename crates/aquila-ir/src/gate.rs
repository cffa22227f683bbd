//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// All angles are in radians. Single-qubit matrices follow the `u3`
/// convention
///
/// ```text
/// u3(θ, φ, λ) = [[cos(θ/2),          -e^{iλ} sin(θ/2)     ],
///                [e^{iφ} sin(θ/2),    e^{i(φ+λ)} cos(θ/2) ]]
/// ```
///
/// with `u2(φ, λ) = u3(π/2, φ, λ)` and `u1(λ) = diag(1, e^{iλ})`.
/// The first operand of a controlled gate is the control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis, `diag(e^{-iθ/2}, e^{iθ/2})`.
    Rz(f64),
    /// Phase gate, identical to `U1`.
    P(f64),
    /// One-parameter rotation `u1(λ)`.
    U1(f64),
    /// Two-parameter rotation `u2(φ, λ)`.
    U2(f64, f64),
    /// General single-qubit rotation `u3(θ, φ, λ)`.
    U3(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled `u1(λ)`, an exact controlled phase.
    CU1(f64),
    /// Controlled `u3(θ, φ, λ)`.
    ///
    /// On the control-1 subspace this applies `e^{-i(φ+λ)/2} · u3(θ, φ, λ)`,
    /// the convention of its five-gate basis definition. A `u1((φ+λ)/2)` on
    /// the control turns it into the exact controlled `u3`.
    CU3(f64, f64, f64),
    /// Controlled rotation around Y.
    CRy(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U1(_) => "u1",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CU1(_) => "cu1",
            StandardGate::CU3(_, _, _) => "cu3",
            StandardGate::CRy(_) => "cry",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U1(_)
            | StandardGate::U2(_, _)
            | StandardGate::U3(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CU1(_)
            | StandardGate::CU3(_, _, _)
            | StandardGate::CRy(_) => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Get the numeric parameters of this gate, in declaration order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::U1(p)
            | StandardGate::CU1(p)
            | StandardGate::CRy(p) => vec![p],

            StandardGate::U2(phi, lambda) => vec![phi, lambda],

            StandardGate::U3(theta, phi, lambda) | StandardGate::CU3(theta, phi, lambda) => {
                vec![theta, phi, lambda]
            }

            _ => vec![],
        }
    }
}
