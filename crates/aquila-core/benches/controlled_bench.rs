//! Benchmarks for controlled-circuit synthesis
//!
//! Run with: cargo bench -p aquila-core

use std::f64::consts::PI;

use aquila_core::circuits::{CircuitFactory, WeightedSumOperator};
use aquila_core::utils::{controlled_circuit, convert_to_basis_gates};
use aquila_ir::{Circuit, QuantumRegister, QubitId};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Layered circuit of rotations and a CX ladder.
fn layered_circuit(num_qubits: u32, layers: usize) -> Circuit {
    let mut circuit = Circuit::with_size("layered", num_qubits, 0);
    for layer in 0..layers {
        for q in 0..num_qubits {
            circuit.h(QubitId(q)).unwrap();
            circuit
                .rz(PI / f64::from(q + 2) + layer as f64, QubitId(q))
                .unwrap();
        }
        for q in 0..num_qubits - 1 {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    circuit
}

/// Benchmark unrolling into the u basis
fn bench_convert_to_basis(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_to_basis_gates");

    for num_qubits in &[2u32, 5, 10, 20] {
        let circuit = layered_circuit(*num_qubits, 10);
        group.bench_with_input(
            BenchmarkId::new("layered", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| convert_to_basis_gates(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark controlled synthesis in both modes
fn bench_controlled_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("controlled_circuit");
    let ctl = QuantumRegister::new("ctl", 1);

    for num_qubits in &[2u32, 5, 10, 20] {
        let circuit = layered_circuit(*num_qubits, 10);
        for use_basis_gates in [true, false] {
            let label = if use_basis_gates { "basis" } else { "native" };
            group.bench_with_input(
                BenchmarkId::new(label, num_qubits),
                &circuit,
                |b, circuit| {
                    b.iter(|| {
                        controlled_circuit(black_box(circuit), &ctl.bit(0), None, use_basis_gates)
                            .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark building a controlled weighted sum
fn bench_controlled_weighted_sum(c: &mut Criterion) {
    let op = WeightedSumOperator::new(4, vec![1, 2, 3, 4]).unwrap();
    let width = op.num_target_qubits() as u32;
    let ancillas = op.required_ancillas() as u32;

    c.bench_function("weighted_sum_build_controlled", |b| {
        b.iter(|| {
            let mut qc = Circuit::new("sum");
            let q = qc.add_qreg("q", width).unwrap();
            let a = qc.add_qreg("a", ancillas).unwrap();
            let ctl = qc.add_qreg("ctl", 1).unwrap()[0];
            op.build_controlled(&mut qc, &q, ctl, &a, true).unwrap();
            qc
        });
    });
}

criterion_group!(
    benches,
    bench_convert_to_basis,
    bench_controlled_circuit,
    bench_controlled_weighted_sum
);
criterion_main!(benches);
