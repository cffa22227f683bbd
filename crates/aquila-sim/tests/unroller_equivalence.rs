//! The unroller must preserve circuit unitaries exactly, global phase
//! included, once the recorded phase is applied.

use aquila_compile::{BasisGates, transpile};
use aquila_ir::{Circuit, QubitId};
use aquila_sim::UnitarySimulator;
use ndarray::Array2;
use num_complex::Complex64;
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn max_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

fn assert_unrolled_equal(circuit: &Circuit) {
    let sim = UnitarySimulator::new();
    let original = sim.unitary(circuit).unwrap();
    let unrolled = transpile(circuit, &BasisGates::u_basis()).unwrap();
    let got = sim.unitary(&unrolled).unwrap();
    let diff = max_diff(&original, &got);
    assert!(diff < 1e-10, "{}: max deviation {diff}", circuit.name());
}

fn two_qubit(name: &str, build: impl FnOnce(&mut Circuit)) -> Circuit {
    let mut circuit = Circuit::with_size(name, 2, 0);
    build(&mut circuit);
    circuit
}

// ============================================================================
// Fixed gates
// ============================================================================

#[test]
fn test_cz_swap_ccx() {
    assert_unrolled_equal(&two_qubit("cz", |c| {
        c.cz(QubitId(0), QubitId(1)).unwrap();
    }));
    assert_unrolled_equal(&two_qubit("swap", |c| {
        c.swap(QubitId(1), QubitId(0)).unwrap();
    }));

    let mut ccx = Circuit::with_size("ccx", 3, 0);
    ccx.ccx(QubitId(2), QubitId(0), QubitId(1)).unwrap();
    assert_unrolled_equal(&ccx);
}

#[test]
fn test_mixed_circuit_with_rz_phase() {
    let mut circuit = Circuit::with_size("mixed", 3, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.rz(1.3, QubitId(1)).unwrap();
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    circuit.rx(-0.4, QubitId(2)).unwrap();
    circuit.sdg(QubitId(0)).unwrap();
    circuit.rz(-2.1, QubitId(0)).unwrap();
    circuit.cz(QubitId(2), QubitId(0)).unwrap();
    assert_unrolled_equal(&circuit);
}

// ============================================================================
// Parameterized controlled gates
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn controlled_rotations_unroll_exactly(
        theta in -3.0f64..3.0,
        phi in -3.0f64..3.0,
        lambda in -3.0f64..3.0,
    ) {
        assert_unrolled_equal(&two_qubit("cu1", |c| {
            c.cu1(lambda, QubitId(0), QubitId(1)).unwrap();
        }));
        assert_unrolled_equal(&two_qubit("cu3", |c| {
            c.cu3(theta, phi, lambda, QubitId(1), QubitId(0)).unwrap();
        }));
        assert_unrolled_equal(&two_qubit("cry", |c| {
            c.cry(theta, QubitId(0), QubitId(1)).unwrap();
        }));
    }
}
