//! Circuit conversion and reporting helpers.

use std::fmt::Write as _;

use aquila_compile::{BasisGates, transpile};
use aquila_ir::Circuit;

use crate::error::AquaResult;

const RULE: &str =
    "============================================================================\n";

/// Unroll a circuit into the `{u1, u2, u3, cx, id}` basis.
///
/// Measure, reset and barrier pass through unchanged. An `rz` leaves its
/// phase on the returned circuit's global phase.
pub fn convert_to_basis_gates(circuit: &Circuit) -> AquaResult<Circuit> {
    Ok(transpile(circuit, &BasisGates::u_basis())?)
}

/// Summarize circuits before submission.
///
/// One line per circuit with its width, classical bits, size, depth and
/// operation counts, plus an average line when there are several circuits.
#[allow(clippy::cast_precision_loss)]
pub fn summarize_circuits(circuits: &[Circuit]) -> String {
    let mut ret = format!("Submitting {} circuits.\n", circuits.len());
    ret.push_str(RULE);

    let mut stats = [0.0f64; 4];
    for (i, circuit) in circuits.iter().enumerate() {
        let width = circuit.num_qubits();
        let clbits = circuit.num_clbits();
        let size = circuit.size();
        let depth = circuit.depth();
        stats[0] += width as f64;
        stats[1] += clbits as f64;
        stats[2] += size as f64;
        stats[3] += depth as f64;

        let counts = circuit
            .count_ops()
            .iter()
            .map(|(name, n)| format!("'{name}': {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(
            ret,
            "{i}-th circuit: {width} qubits, {clbits} classical bits and {size} operations \
             with depth {depth}\n op_counts: {{{counts}}}\n"
        );
    }

    if circuits.len() > 1 {
        let n = circuits.len() as f64;
        let _ = writeln!(
            ret,
            "Average: {:.2} qubits, {:.2} classical bits and {:.2} operations with depth {:.2}",
            stats[0] / n,
            stats[1] / n,
            stats[2] / n,
            stats[3] / n,
        );
    }
    ret.push_str(RULE);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_ir::{ClbitId, QubitId};

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();
        circuit
    }

    #[test]
    fn test_convert_to_basis_gates() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        circuit.reset(QubitId(0)).unwrap();
        let unrolled = convert_to_basis_gates(&circuit).unwrap();
        assert_eq!(unrolled.count_ops(), vec![("u2", 2), ("cx", 1), ("reset", 1)]);
    }

    #[test]
    fn test_convert_to_basis_gates_matches_transpile() {
        let mut circuit = Circuit::with_size("t", 3, 0);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        circuit.rz(0.4, QubitId(1)).unwrap();
        let converted = convert_to_basis_gates(&circuit).unwrap();
        let transpiled = transpile(&circuit, &BasisGates::u_basis()).unwrap();
        assert!(converted.ops().eq(transpiled.ops()));
        assert_eq!(converted.global_phase(), transpiled.global_phase());
    }

    #[test]
    fn test_summary_single_circuit() {
        let summary = summarize_circuits(&[bell()]);
        let expected = format!(
            "Submitting 1 circuits.\n{RULE}\
             0-th circuit: 2 qubits, 2 classical bits and 4 operations with depth 3\n \
             op_counts: {{'h': 1, 'cx': 1, 'measure': 2}}\n{RULE}"
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_average_line() {
        let summary = summarize_circuits(&[bell(), Circuit::with_size("empty", 1, 0)]);
        assert!(summary.starts_with("Submitting 2 circuits.\n"));
        assert!(summary.contains("1-th circuit: 1 qubits, 0 classical bits and 0 operations"));
        assert!(summary.contains(
            "Average: 1.50 qubits, 1.00 classical bits and 2.00 operations with depth 1.50\n"
        ));
        assert!(summary.ends_with(RULE));
    }
}
