//! 2x2 unitary matrices of the single-qubit standard gates.

use aquila_ir::StandardGate;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create a diagonal matrix.
    fn diag(a: Complex64, d: Complex64) -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(a, zero, zero, d)
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::diag(Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0))
    }

    /// `u3(θ, φ, λ)`.
    pub fn u3(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// `u2(φ, λ) = u3(π/2, φ, λ)`.
    pub fn u2(phi: f64, lambda: f64) -> Self {
        Self::u3(PI / 2.0, phi, lambda)
    }

    /// `u1(λ) = diag(1, e^{iλ})`.
    pub fn u1(lambda: f64) -> Self {
        Self::diag(Complex64::new(1.0, 0.0), Complex64::from_polar(1.0, lambda))
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        Self::diag(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::new(
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(-s, 0.0),
        )
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        Self::new(zero, one, one, zero)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(zero, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), zero)
    }

    /// Matrix of a single-qubit standard gate, `None` for multi-qubit gates.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        let m = match *gate {
            StandardGate::I => Self::identity(),
            StandardGate::X => Self::x(),
            StandardGate::Y => Self::y(),
            StandardGate::Z => Self::u1(PI),
            StandardGate::H => Self::h(),
            StandardGate::S => Self::u1(PI / 2.0),
            StandardGate::Sdg => Self::u1(-PI / 2.0),
            StandardGate::T => Self::u1(PI / 4.0),
            StandardGate::Tdg => Self::u1(-PI / 4.0),
            StandardGate::Rx(theta) => Self::rx(theta),
            StandardGate::Ry(theta) => Self::ry(theta),
            StandardGate::Rz(theta) => Self::rz(theta),
            StandardGate::P(lambda) | StandardGate::U1(lambda) => Self::u1(lambda),
            StandardGate::U2(phi, lambda) => Self::u2(phi, lambda),
            StandardGate::U3(theta, phi, lambda) => Self::u3(theta, phi, lambda),
            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CU1(_)
            | StandardGate::CU3(_, _, _)
            | StandardGate::CRy(_)
            | StandardGate::CCX => return None,
        };
        Some(m)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Multiply every element by `e^{iφ}`.
    #[must_use]
    pub fn with_phase(&self, phase: f64) -> Self {
        let factor = Complex64::from_polar(1.0, phase);
        Self {
            data: self.data.map(|z| z * factor),
        }
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }
        (a - d).norm() < EPSILON
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
