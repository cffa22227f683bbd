//! Statevector simulation engine.
//!
//! Amplitudes are indexed little-endian: qubit `k` is bit `k` of the index.

use aquila_compile::Unitary2x2;
use aquila_ir::{Instruction, InstructionKind, StandardGate};
use num_complex::Complex64;
use rand::Rng;

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis_state(num_qubits, 0)
    }

    /// Create the computational basis state |index⟩.
    pub fn basis_state(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index % size] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Measurement probabilities of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a unitary instruction. Barriers are no-ops.
    ///
    /// Measure and reset are not unitary; backends handle them with
    /// [`measure`](Self::measure) and [`reset`](Self::reset).
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &qubits);
                Ok(())
            }
            InstructionKind::Barrier => Ok(()),
            InstructionKind::Measure | InstructionKind::Reset => {
                Err(SimError::UnsupportedInstruction {
                    instruction: instruction.name().to_string(),
                    backend: "statevector engine".into(),
                })
            }
        }
    }

    /// Multiply the whole state by `e^{iφ}`.
    pub fn apply_global_phase(&mut self, phase: f64) {
        if phase == 0.0 {
            return;
        }
        let factor = Complex64::from_polar(1.0, phase);
        for amp in &mut self.amplitudes {
            *amp *= factor;
        }
    }

    /// Apply a standard gate. Operand arity is checked by the circuit DAG.
    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cu1(qubits[0], qubits[1], std::f64::consts::PI),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            StandardGate::CU1(lambda) => self.apply_cu1(qubits[0], qubits[1], lambda),
            StandardGate::CU3(theta, phi, lambda) => {
                let m = Unitary2x2::u3(theta, phi, lambda).with_phase(-(phi + lambda) / 2.0);
                self.apply_controlled(qubits[0], qubits[1], &m);
            }
            StandardGate::CRy(theta) => {
                self.apply_controlled(qubits[0], qubits[1], &Unitary2x2::ry(theta));
            }
            StandardGate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            _ => {
                if let Some(m) = Unitary2x2::from_gate(gate) {
                    self.apply_single(qubits[0], &m);
                }
            }
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_single(&mut self, qubit: usize, m: &Unitary2x2) {
        let mask = 1 << qubit;
        let [a, b, c, d] = m.data;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let x0 = self.amplitudes[i];
                let x1 = self.amplitudes[j];
                self.amplitudes[i] = a * x0 + b * x1;
                self.amplitudes[j] = c * x0 + d * x1;
            }
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_controlled(&mut self, control: usize, target: usize, m: &Unitary2x2) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let [a, b, c, d] = m.data;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let x0 = self.amplitudes[i];
                let x1 = self.amplitudes[j];
                self.amplitudes[i] = a * x0 + b * x1;
                self.amplitudes[j] = c * x0 + d * x1;
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cu1(&mut self, control: usize, target: usize, lambda: f64) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let phase = Complex64::from_polar(1.0, lambda);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Three-qubit gate implementations
    // =========================================================================

    fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = 1 << c1;
        let c2_mask = 1 << c2;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Probability of reading 1 on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Measure `qubit`, collapse the state and return the outcome.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p1 = self.probability_one(qubit);
        let outcome = rng.r#gen::<f64>() < p1;
        self.project(qubit, outcome, if outcome { p1 } else { 1.0 - p1 });
        outcome
    }

    /// Reset `qubit` to |0⟩ by measuring and flipping a 1 outcome.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.apply_x(qubit);
        }
    }

    fn project(&mut self, qubit: usize, outcome: bool, probability: f64) {
        let mask = 1 << qubit;
        let norm = probability.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                if norm > 0.0 {
                    *amp /= norm;
                }
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
    }

    /// Sample a basis-state index from the measurement distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below r.
        self.amplitudes.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_ir::QubitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn gate(g: StandardGate, qubits: &[u32]) -> Instruction {
        Instruction::gate(g, qubits.iter().map(|&q| QubitId(q)))
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        for amp in &sv.amplitudes[1..] {
            assert!(approx_eq(*amp, Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.apply(&gate(StandardGate::CX, &[0, 1])).unwrap();

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_little_endian_indexing() {
        let mut sv = Statevector::new(3);
        sv.apply(&gate(StandardGate::X, &[1])).unwrap();
        assert!(approx_eq(sv.amplitudes[0b010], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_cu3_phase_convention() {
        // cu3(0, 0, λ) on |11⟩ gives e^{-iλ/2} e^{iλ} = e^{iλ/2}.
        let lambda = 0.6;
        let mut sv = Statevector::basis_state(2, 0b11);
        sv.apply(&gate(StandardGate::CU3(0.0, 0.0, lambda), &[0, 1]))
            .unwrap();
        assert!(approx_eq(
            sv.amplitudes[0b11],
            Complex64::from_polar(1.0, lambda / 2.0)
        ));

        // Control off: untouched.
        let mut sv = Statevector::basis_state(2, 0b10);
        sv.apply(&gate(StandardGate::CU3(1.0, 0.3, lambda), &[0, 1]))
            .unwrap();
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_cry_rotates_target() {
        let mut sv = Statevector::basis_state(2, 0b01);
        sv.apply(&gate(StandardGate::CRy(PI), &[0, 1])).unwrap();
        assert!(approx_eq(sv.amplitudes[0b11], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_measure_and_reset_rejected_by_apply() {
        let mut sv = Statevector::new(1);
        let result = sv.apply(&Instruction::reset(QubitId(0)));
        assert!(matches!(
            result,
            Err(SimError::UnsupportedInstruction { .. })
        ));
    }

    #[test]
    fn test_measure_collapses() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(2);
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.apply(&gate(StandardGate::CX, &[0, 1])).unwrap();

        let first = sv.measure(0, &mut rng);
        let second = sv.measure(1, &mut rng);
        assert_eq!(first, second);
        let total: f64 = sv.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sv = Statevector::new(1);
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.reset(0, &mut rng);
        assert!((sv.probability_one(0)).abs() < 1e-12);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();

        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }
}
