//! Structural properties of circuits built from random gate sequences.

use aquila_ir::{Circuit, QubitId, StandardGate};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Single(u8, f64, u32),
    Two(u32, u32),
}

fn op_strategy(num_qubits: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, -3.0f64..3.0, 0..num_qubits).prop_map(|(k, a, q)| Op::Single(k, a, q)),
        (0..num_qubits, 0..num_qubits)
            .prop_filter("distinct operands", |(a, b)| a != b)
            .prop_map(|(a, b)| Op::Two(a, b)),
    ]
}

fn build(num_qubits: u32, ops: &[Op]) -> Circuit {
    let mut circuit = Circuit::with_size("random", num_qubits, 0);
    for op in ops {
        match *op {
            Op::Single(0, _, q) => circuit.h(QubitId(q)).unwrap(),
            Op::Single(1, a, q) => circuit.u1(a, QubitId(q)).unwrap(),
            Op::Single(2, a, q) => circuit.ry(a, QubitId(q)).unwrap(),
            Op::Single(_, a, q) => circuit.u3(a, a / 2.0, -a, QubitId(q)).unwrap(),
            Op::Two(a, b) => circuit.cx(QubitId(a), QubitId(b)).unwrap(),
        };
    }
    circuit
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn size_matches_number_of_applied_ops(ops in prop::collection::vec(op_strategy(4), 0..40)) {
        let circuit = build(4, &ops);
        prop_assert_eq!(circuit.size(), ops.len());
        prop_assert_eq!(circuit.ops().count(), ops.len());
    }

    #[test]
    fn depth_is_bounded_by_size(ops in prop::collection::vec(op_strategy(3), 0..40)) {
        let circuit = build(3, &ops);
        prop_assert!(circuit.depth() <= circuit.size());
        if !ops.is_empty() {
            prop_assert!(circuit.depth() >= 1);
        }
    }

    #[test]
    fn ops_come_back_in_program_order(ops in prop::collection::vec(op_strategy(3), 1..30)) {
        let circuit = build(3, &ops);
        for (op, inst) in ops.iter().zip(circuit.ops()) {
            match *op {
                Op::Two(a, b) => {
                    prop_assert_eq!(inst.as_gate(), Some(&StandardGate::CX));
                    prop_assert_eq!(&inst.qubits, &vec![QubitId(a), QubitId(b)]);
                }
                Op::Single(_, _, q) => prop_assert_eq!(&inst.qubits, &vec![QubitId(q)]),
            }
        }
        circuit.dag().verify_integrity().unwrap();
    }
}
