//! Simulated behavior of the comparator and weighted sum factories.

use aquila_core::circuits::{CircuitFactory, FixedValueComparator, WeightedSumOperator};
use aquila_ir::{Circuit, QubitId};
use aquila_sim::StatevectorSimulator;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Helpers
// ============================================================================

/// A circuit with register `q` of `n` qubits and, if needed, register `a`.
fn circuit_with_ancillas(n: u32, ancillas: u32) -> (Circuit, Vec<QubitId>, Vec<QubitId>) {
    let mut qc = Circuit::new("factory");
    let q = qc.add_qreg("q", n).unwrap();
    let a = if ancillas > 0 {
        qc.add_qreg("a", ancillas).unwrap()
    } else {
        vec![]
    };
    (qc, q, a)
}

fn probabilities(qc: &Circuit) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(11);
    StatevectorSimulator::new()
        .statevector(qc, &mut rng)
        .unwrap()
        .probabilities()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn check_comparator(num_state_qubits: usize, value: f64, geq: bool) {
    let comp = FixedValueComparator::new(num_state_qubits, value, geq);
    let (mut qc, q, a) = circuit_with_ancillas(
        (num_state_qubits + 1) as u32,
        comp.required_ancillas() as u32,
    );
    for &qubit in &q[..num_state_qubits] {
        qc.h(qubit).unwrap();
    }
    comp.build(&mut qc, &q, &a).unwrap();

    let scale = (1u64 << num_state_qubits) as f64;
    let mut outcomes = 0;
    for (i, p) in probabilities(&qc).into_iter().enumerate() {
        if p <= 1e-6 {
            continue;
        }
        outcomes += 1;
        assert!((p * scale - 1.0).abs() < 1e-9, "non-uniform outcome {i:b}");
        let x = i & ((1 << num_state_qubits) - 1);
        let result = (i >> num_state_qubits) & 1 == 1;
        let ancillas = i >> (num_state_qubits + 1);
        assert_eq!(ancillas, 0, "ancillas not uncomputed for x = {x}");
        let expected = if geq {
            x as f64 >= value
        } else {
            (x as f64) < value
        };
        assert_eq!(result, expected, "n={num_state_qubits} value={value} x={x}");
    }
    assert_eq!(outcomes, 1 << num_state_qubits);
}

#[allow(clippy::cast_possible_truncation)]
fn weighted_sum(num_state_qubits: usize, weights: &[u64], input: &[u8]) -> u64 {
    let op = WeightedSumOperator::new(num_state_qubits, weights.to_vec()).unwrap();
    let m = WeightedSumOperator::required_sum_qubits(weights);
    let (mut qc, q, a) = circuit_with_ancillas(
        (num_state_qubits + m) as u32,
        op.required_ancillas() as u32,
    );
    for (i, &bit) in input.iter().enumerate() {
        if bit == 1 {
            qc.x(q[i]).unwrap();
        }
    }
    op.build(&mut qc, &q, &a).unwrap();

    let nonzero: Vec<usize> = probabilities(&qc)
        .into_iter()
        .enumerate()
        .filter(|(_, p)| *p >= 1e-6)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(nonzero.len(), 1, "sum is not a basis state");

    let index = nonzero[0];
    assert_eq!(index >> (num_state_qubits + m), 0, "ancillas not uncomputed");
    assert_eq!(index & ((1 << num_state_qubits) - 1), {
        input
            .iter()
            .enumerate()
            .map(|(i, &b)| usize::from(b) << i)
            .sum::<usize>()
    });
    ((index >> num_state_qubits) & ((1 << m) - 1)) as u64
}

// ============================================================================
// Fixed value comparator
// ============================================================================

#[test]
fn test_fixed_value_comparator_cases() {
    let cases = [
        (1, 0.0, true),
        (1, 1.0, true),
        (2, -1.0, true),
        (2, 0.0, true),
        (2, 1.0, true),
        (2, 2.0, true),
        (2, 3.0, true),
        (2, 4.0, true),
        (3, 5.0, true),
        (4, 6.0, false),
    ];
    for (n, value, geq) in cases {
        check_comparator(n, value, geq);
    }
}

#[test]
fn test_fixed_value_comparator_fractional_value() {
    check_comparator(3, 2.5, true);
    check_comparator(3, 2.5, false);
    check_comparator(1, 0.5, false);
}

#[test]
fn test_fixed_value_comparator_value_above_top_state() {
    // ceil(value) == 2^n leaves no state at or above the value
    check_comparator(1, 1.5, true);
    check_comparator(1, 1.5, false);
    check_comparator(2, 3.25, true);
    check_comparator(2, 3.25, false);
    check_comparator(3, 7.9, true);
}

// ============================================================================
// Weighted sum operator
// ============================================================================

#[test]
fn test_weighted_sum_operator_cases() {
    let cases: [(usize, &[u64], &[u8], u64); 10] = [
        (1, &[1], &[0], 0),
        (1, &[1], &[1], 1),
        (1, &[2], &[0], 0),
        (1, &[2], &[1], 2),
        (3, &[1, 2, 3], &[0, 0, 0], 0),
        (3, &[1, 2, 3], &[0, 0, 1], 3),
        (3, &[1, 2, 3], &[0, 1, 0], 2),
        (3, &[1, 2, 3], &[1, 0, 0], 1),
        (3, &[1, 2, 3], &[0, 1, 1], 5),
        (3, &[1, 2, 3], &[1, 1, 1], 6),
    ];
    for (n, weights, input, expected) in cases {
        assert_eq!(
            weighted_sum(n, weights, input),
            expected,
            "weights {weights:?} input {input:?}"
        );
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn comparator_matches_classical_comparison(
        n in 1usize..=4,
        value in -2i32..=18,
        fraction in prop::sample::select(vec![0.0, 0.25, 0.5, 0.9]),
        geq in any::<bool>(),
    ) {
        check_comparator(n, f64::from(value) + fraction, geq);
    }

    #[test]
    fn weighted_sum_is_dot_product(
        weights in prop::collection::vec(0u64..=5, 1..=3),
        bits in prop::collection::vec(0u8..=1, 3),
    ) {
        let n = weights.len();
        let input = &bits[..n];
        let expected: u64 = weights
            .iter()
            .zip(input)
            .map(|(w, &b)| w * u64::from(b))
            .sum();
        prop_assert_eq!(weighted_sum(n, &weights, input), expected);
    }
}
