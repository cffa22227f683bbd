//! Simulator backend implementations.

use std::time::Instant;

use aquila_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId};
use ndarray::Array2;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::backend::{Backend, BackendConfig, BackendKind, Capabilities, RunConfig};
use crate::error::{SimError, SimResult};
use crate::result::{Counts, ExecutionResult};
use crate::statevector::Statevector;

/// Default qubit limit for the statevector and qasm simulators.
const DEFAULT_MAX_QUBITS: u32 = 24;

/// Default qubit limit for the unitary simulator (the matrix is 4^n entries).
const DEFAULT_MAX_UNITARY_QUBITS: u32 = 12;

fn check_size(circuit: &Circuit, max_qubits: u32) -> SimResult<()> {
    if circuit.num_qubits() > max_qubits as usize {
        return Err(SimError::CircuitTooLarge {
            num_qubits: circuit.num_qubits(),
            max_qubits,
        });
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Bitstring of classical register contents, character `i` being clbit `i`.
fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Run every instruction once, collapsing on measure and reset.
///
/// Returns the final state and the classical bits written by measurements.
fn run_once(circuit: &Circuit, rng: &mut StdRng) -> SimResult<(Statevector, Vec<bool>)> {
    let mut sv = Statevector::new(circuit.num_qubits());
    let mut clbits = vec![false; circuit.num_clbits()];
    for inst in circuit.ops() {
        match inst.kind {
            InstructionKind::Measure => {
                for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                    clbits[c.index()] = sv.measure(q.index(), rng);
                }
            }
            InstructionKind::Reset => {
                for q in &inst.qubits {
                    sv.reset(q.index(), rng);
                }
            }
            _ => sv.apply(inst)?,
        }
    }
    sv.apply_global_phase(circuit.global_phase());
    Ok((sv, clbits))
}

// ============================================================================
// Statevector simulator
// ============================================================================

/// Exact statevector backend.
///
/// Returns the final amplitudes, including the circuit's global phase.
/// Measurements and resets collapse the state once with the caller's RNG.
pub struct StatevectorSimulator {
    max_qubits: u32,
}

impl StatevectorSimulator {
    /// Backend name.
    pub const NAME: &'static str = "statevector_simulator";

    /// Create a simulator with default limits.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Simulate and return the final state directly.
    pub fn statevector(&self, circuit: &Circuit, rng: &mut StdRng) -> SimResult<Statevector> {
        check_size(circuit, self.max_qubits)?;
        Ok(run_once(circuit, rng)?.0)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for StatevectorSimulator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Statevector
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::simulator(Self::NAME, self.max_qubits, BackendKind::Statevector)
    }

    #[instrument(skip(self, circuit, _config, rng), fields(circuit = circuit.name()))]
    fn run(
        &self,
        circuit: &Circuit,
        _config: &RunConfig,
        rng: &mut StdRng,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();
        check_size(circuit, self.max_qubits)?;
        debug!(
            "Simulating statevector: {} qubits, {} operations",
            circuit.num_qubits(),
            circuit.size()
        );

        let (sv, clbits) = run_once(circuit, rng)?;
        let mut counts = Counts::new();
        if !clbits.is_empty() {
            counts.insert(bits_to_string(&clbits), 1);
        }

        Ok(
            ExecutionResult::new(Uuid::new_v4().to_string(), Self::NAME, counts, 1)
                .with_statevector(sv.into_amplitudes())
                .with_execution_time(elapsed_ms(start)),
        )
    }
}

// ============================================================================
// Qasm simulator
// ============================================================================

/// Shot-sampling backend.
///
/// When every measurement is terminal the state is simulated once and
/// outcomes are sampled from it. Otherwise each shot is simulated in full.
/// Circuits without classical bits are sampled on all qubits.
pub struct QasmSimulator {
    max_qubits: u32,
}

impl QasmSimulator {
    /// Backend name.
    pub const NAME: &'static str = "qasm_simulator";

    /// Create a simulator with default limits.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }
}

impl Default for QasmSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether no reset occurs and nothing but measures and barriers follow a
/// measurement on its qubit.
fn measurements_are_terminal(ops: &[&Instruction]) -> bool {
    let mut measured: FxHashSet<QubitId> = FxHashSet::default();
    for inst in ops {
        match inst.kind {
            InstructionKind::Reset => return false,
            InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
            InstructionKind::Barrier => {}
            InstructionKind::Gate(_) => {
                if inst.qubits.iter().any(|q| measured.contains(q)) {
                    return false;
                }
            }
        }
    }
    true
}

impl Backend for QasmSimulator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Qasm
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::simulator(Self::NAME, self.max_qubits, BackendKind::Qasm)
    }

    #[instrument(skip(self, circuit, config, rng), fields(circuit = circuit.name()))]
    fn run(
        &self,
        circuit: &Circuit,
        config: &RunConfig,
        rng: &mut StdRng,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();
        check_size(circuit, self.max_qubits)?;
        let caps = self.capabilities();
        if config.shots == 0 || config.shots > caps.max_shots {
            return Err(SimError::InvalidShots(format!(
                "{} shots requested, allowed range is 1..={}",
                config.shots, caps.max_shots
            )));
        }

        let ops: Vec<&Instruction> = circuit.ops().collect();
        let mut counts = Counts::new();

        if circuit.num_clbits() == 0 {
            let (sv, _) = run_once(circuit, rng)?;
            let n = circuit.num_qubits();
            for _ in 0..config.shots {
                let outcome = sv.sample(rng);
                let bits: Vec<bool> = (0..n).map(|k| (outcome >> k) & 1 == 1).collect();
                counts.insert(bits_to_string(&bits), 1);
            }
        } else if measurements_are_terminal(&ops) {
            debug!("Terminal measurements: sampling {} shots from one state", config.shots);
            let mut sv = Statevector::new(circuit.num_qubits());
            let mut mapping: Vec<(QubitId, ClbitId)> = vec![];
            for inst in &ops {
                if inst.is_measure() {
                    mapping.extend(inst.qubits.iter().copied().zip(inst.clbits.iter().copied()));
                } else {
                    sv.apply(inst)?;
                }
            }
            for _ in 0..config.shots {
                let outcome = sv.sample(rng);
                let mut bits = vec![false; circuit.num_clbits()];
                for &(q, c) in &mapping {
                    bits[c.index()] = (outcome >> q.index()) & 1 == 1;
                }
                counts.insert(bits_to_string(&bits), 1);
            }
        } else {
            debug!("Mid-circuit measurement: simulating {} shots", config.shots);
            for _ in 0..config.shots {
                let (_, bits) = run_once(circuit, rng)?;
                counts.insert(bits_to_string(&bits), 1);
            }
        }

        Ok(
            ExecutionResult::new(Uuid::new_v4().to_string(), Self::NAME, counts, config.shots)
                .with_execution_time(elapsed_ms(start)),
        )
    }
}

// ============================================================================
// Unitary simulator
// ============================================================================

/// Backend returning the full circuit unitary.
///
/// Column `k` is the image of basis state `|k⟩`. The circuit must be
/// unitary: measure and reset are rejected.
pub struct UnitarySimulator {
    max_qubits: u32,
}

impl UnitarySimulator {
    /// Backend name.
    pub const NAME: &'static str = "unitary_simulator";

    /// Create a simulator with default limits.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_UNITARY_QUBITS)
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Compute the unitary of a circuit.
    pub fn unitary(&self, circuit: &Circuit) -> SimResult<Array2<num_complex::Complex64>> {
        check_size(circuit, self.max_qubits)?;
        let n = circuit.num_qubits();
        let dim = 1usize << n;
        let ops: Vec<&Instruction> = circuit.ops().collect();
        if let Some(bad) = ops.iter().find(|i| i.is_measure() || i.is_reset()) {
            return Err(SimError::UnsupportedInstruction {
                instruction: bad.name().to_string(),
                backend: Self::NAME.into(),
            });
        }

        let mut unitary = Array2::zeros((dim, dim));
        for k in 0..dim {
            let mut sv = Statevector::basis_state(n, k);
            for inst in &ops {
                sv.apply(inst)?;
            }
            sv.apply_global_phase(circuit.global_phase());
            for (row, amp) in sv.amplitudes().iter().enumerate() {
                unitary[[row, k]] = *amp;
            }
        }
        Ok(unitary)
    }
}

impl Default for UnitarySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for UnitarySimulator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Unitary
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::simulator(Self::NAME, self.max_qubits, BackendKind::Unitary)
    }

    #[instrument(skip(self, circuit, _config, _rng), fields(circuit = circuit.name()))]
    fn run(
        &self,
        circuit: &Circuit,
        _config: &RunConfig,
        _rng: &mut StdRng,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();
        let unitary = self.unitary(circuit)?;
        debug!("Unitary of dimension {} computed", unitary.nrows());
        Ok(
            ExecutionResult::new(Uuid::new_v4().to_string(), Self::NAME, Counts::new(), 0)
                .with_unitary(unitary)
                .with_execution_time(elapsed_ms(start)),
        )
    }
}

// ============================================================================
// Construction from configuration
// ============================================================================

/// Build a simulator backend from its configuration.
///
/// Recognized names are `statevector_simulator`, `qasm_simulator` and
/// `unitary_simulator`. An optional `max_qubits` entry overrides the limit.
#[allow(clippy::cast_possible_truncation)]
pub fn backend_from_config(config: &BackendConfig) -> SimResult<Box<dyn Backend>> {
    let max_qubits = config
        .extra
        .get("max_qubits")
        .and_then(serde_json::Value::as_u64)
        .map(|v| v as u32);

    let backend: Box<dyn Backend> = match config.name.as_str() {
        StatevectorSimulator::NAME => Box::new(StatevectorSimulator::with_max_qubits(
            max_qubits.unwrap_or(DEFAULT_MAX_QUBITS),
        )),
        QasmSimulator::NAME => Box::new(QasmSimulator::with_max_qubits(
            max_qubits.unwrap_or(DEFAULT_MAX_QUBITS),
        )),
        UnitarySimulator::NAME => Box::new(UnitarySimulator::with_max_qubits(
            max_qubits.unwrap_or(DEFAULT_MAX_UNITARY_QUBITS),
        )),
        other => return Err(SimError::UnknownBackend(other.to_string())),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bell(measure: bool) -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, if measure { 2 } else { 0 });
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        if measure {
            circuit.measure_all().unwrap();
        }
        circuit
    }

    #[test]
    fn test_qasm_bell_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let result = QasmSimulator::new()
            .run(&bell(true), &RunConfig::new(1000), &mut rng)
            .unwrap();

        assert_eq!(result.shots, 1000);
        assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
        assert!(result.counts.get("00") > 350);
        assert!(result.counts.get("11") > 350);
    }

    #[test]
    fn test_qasm_mid_circuit_measurement() {
        // Measure, then flip: clbit 1 always records the opposite of clbit 0.
        let mut circuit = Circuit::with_size("mid", 1, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(1)).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let result = QasmSimulator::new()
            .run(&circuit, &RunConfig::new(200), &mut rng)
            .unwrap();
        assert_eq!(result.counts.get("01") + result.counts.get("10"), 200);
    }

    #[test]
    fn test_qasm_rejects_zero_shots() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = QasmSimulator::new().run(&bell(true), &RunConfig::new(0), &mut rng);
        assert!(matches!(result, Err(SimError::InvalidShots(_))));
    }

    #[test]
    fn test_statevector_result() {
        let mut rng = StdRng::seed_from_u64(0);
        let backend = StatevectorSimulator::new();
        assert!(backend.is_statevector());
        let result = backend
            .run(&bell(false), &RunConfig::default(), &mut rng)
            .unwrap();
        let sv = result.statevector.unwrap();
        assert!((sv[0].norm_sqr() - 0.5).abs() < 1e-12);
        assert!((sv[3].norm_sqr() - 0.5).abs() < 1e-12);
        assert!(result.counts.is_empty());
    }

    #[test]
    fn test_statevector_honours_global_phase() {
        let mut circuit = Circuit::with_size("phase", 1, 0);
        circuit.set_global_phase(std::f64::consts::FRAC_PI_2);
        let mut rng = StdRng::seed_from_u64(0);
        let sv = StatevectorSimulator::new().statevector(&circuit, &mut rng).unwrap();
        assert!((sv.amplitudes()[0] - num_complex::Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_unitary_of_cx() {
        let mut circuit = Circuit::with_size("cx", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let u = UnitarySimulator::new().unitary(&circuit).unwrap();
        // |01⟩ (index 1, control set) maps to |11⟩ (index 3).
        assert!((u[[3, 1]].re - 1.0).abs() < 1e-12);
        assert!((u[[0, 0]].re - 1.0).abs() < 1e-12);
        assert!(u[[1, 1]].norm() < 1e-12);
    }

    #[test]
    fn test_unitary_rejects_measure() {
        let result = UnitarySimulator::new().unitary(&bell(true));
        assert!(matches!(
            result,
            Err(SimError::UnsupportedInstruction { .. })
        ));
    }

    #[test]
    fn test_too_many_qubits() {
        let mut rng = StdRng::seed_from_u64(0);
        let circuit = Circuit::with_size("big", 10, 0);
        let result = StatevectorSimulator::with_max_qubits(5).run(
            &circuit,
            &RunConfig::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(SimError::CircuitTooLarge { .. })));
    }

    #[test]
    fn test_backend_from_config() {
        let config = BackendConfig::new("qasm_simulator").with_extra("max_qubits", 6.into());
        let backend = backend_from_config(&config).unwrap();
        assert_eq!(backend.name(), "qasm_simulator");
        assert_eq!(backend.capabilities().num_qubits, 6);

        let unknown = backend_from_config(&BackendConfig::new("ibmq_16"));
        assert!(matches!(unknown, Err(SimError::UnknownBackend(_))));
    }
}
