//! High-level circuit builder API.

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::{ClassicalRegister, QuantumRegister, RegisterBit};

/// A quantum circuit over named registers.
///
/// Bits are allocated in register order, so the qubits of the first register
/// get the lowest ids. Each register name appears at most once. Gate methods
/// return `&mut Self` for chaining.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Quantum registers in allocation order.
    qregs: Vec<QuantumRegister>,
    /// Classical registers in allocation order.
    cregs: Vec<ClassicalRegister>,
    /// Qubits, indexed by id.
    qubits: Vec<Qubit>,
    /// Classical bits, indexed by id.
    clbits: Vec<Clbit>,
    /// The underlying DAG representation.
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: vec![],
            cregs: vec![],
            qubits: vec![],
            clbits: vec![],
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a quantum register `q` and a classical register `c`.
    ///
    /// Empty registers are not created.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.push_qreg(QuantumRegister::new("q", num_qubits));
        }
        if num_clbits > 0 {
            circuit.push_creg(ClassicalRegister::new("c", num_clbits));
        }
        circuit
    }

    /// Create an empty circuit with the same name, registers and global phase.
    pub fn empty_like(&self) -> Self {
        Self {
            name: self.name.clone(),
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            dag: CircuitDag::empty_like(&self.dag),
        }
    }

    /// Create a circuit with this circuit's registers and the given DAG.
    ///
    /// The DAG must have been built over this circuit's wires, for example by
    /// a pass that started from [`CircuitDag::empty_like`].
    pub fn with_dag(&self, dag: CircuitDag) -> IrResult<Self> {
        if dag.num_qubits() != self.qubits.len() || dag.num_clbits() != self.clbits.len() {
            return Err(IrError::InvalidDag(format!(
                "DAG has {} qubits and {} clbits, circuit '{}' has {} and {}",
                dag.num_qubits(),
                dag.num_clbits(),
                self.name,
                self.qubits.len(),
                self.clbits.len(),
            )));
        }
        Ok(Self {
            dag,
            ..self.empty_like()
        })
    }

    // =========================================================================
    // Registers
    // =========================================================================

    /// Add a quantum register and return the ids of its qubits.
    ///
    /// Adding a register that is already present with the same size is a
    /// no-op returning the existing ids.
    pub fn add_register(&mut self, register: &QuantumRegister) -> IrResult<Vec<QubitId>> {
        if let Some(existing) = self.qregs.iter().find(|r| r.name() == register.name()) {
            if existing.size() != register.size() {
                return Err(IrError::RegisterConflict {
                    name: register.name().to_string(),
                    existing: existing.size(),
                    requested: register.size(),
                });
            }
            return self.register_qubits(register.name());
        }
        Ok(self.push_qreg(register.clone()))
    }

    /// Add a classical register and return the ids of its bits.
    pub fn add_classical_register(
        &mut self,
        register: &ClassicalRegister,
    ) -> IrResult<Vec<ClbitId>> {
        if let Some(existing) = self.cregs.iter().find(|r| r.name() == register.name()) {
            if existing.size() != register.size() {
                return Err(IrError::RegisterConflict {
                    name: register.name().to_string(),
                    existing: existing.size(),
                    requested: register.size(),
                });
            }
            return self.register_clbits(register.name());
        }
        Ok(self.push_creg(register.clone()))
    }

    /// Add a quantum register by name and size.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<QubitId>> {
        self.add_register(&QuantumRegister::new(name, size))
    }

    /// Add a classical register by name and size.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        self.add_classical_register(&ClassicalRegister::new(name, size))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_qreg(&mut self, register: QuantumRegister) -> Vec<QubitId> {
        let mut ids = Vec::with_capacity(register.size() as usize);
        for i in 0..register.size() {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit::new(id, register.name(), i));
            self.dag.add_qubit(id);
            ids.push(id);
        }
        self.qregs.push(register);
        ids
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_creg(&mut self, register: ClassicalRegister) -> Vec<ClbitId> {
        let mut ids = Vec::with_capacity(register.size() as usize);
        for i in 0..register.size() {
            let id = ClbitId(self.clbits.len() as u32);
            self.clbits.push(Clbit::new(id, register.name(), i));
            self.dag.add_clbit(id);
            ids.push(id);
        }
        self.cregs.push(register);
        ids
    }

    /// Check whether a quantum register with this name exists.
    pub fn has_register(&self, name: &str) -> bool {
        self.qregs.iter().any(|r| r.name() == name)
    }

    /// Check whether a classical register with this name exists.
    pub fn has_classical_register(&self, name: &str) -> bool {
        self.cregs.iter().any(|r| r.name() == name)
    }

    /// Get the quantum registers in allocation order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Get the classical registers in allocation order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up the id of `register[index]`.
    pub fn qubit(&self, register: &str, index: u32) -> IrResult<QubitId> {
        let reg = self
            .qregs
            .iter()
            .find(|r| r.name() == register)
            .ok_or_else(|| IrError::RegisterNotFound(register.to_string()))?;
        if index >= reg.size() {
            return Err(IrError::RegisterIndexOutOfRange {
                register: register.to_string(),
                index,
                size: reg.size(),
            });
        }
        self.qubits
            .iter()
            .find(|q| q.register == register && q.index == index)
            .map(|q| q.id)
            .ok_or_else(|| IrError::RegisterNotFound(register.to_string()))
    }

    /// Look up the id of classical bit `register[index]`.
    pub fn clbit(&self, register: &str, index: u32) -> IrResult<ClbitId> {
        let reg = self
            .cregs
            .iter()
            .find(|r| r.name() == register)
            .ok_or_else(|| IrError::RegisterNotFound(register.to_string()))?;
        if index >= reg.size() {
            return Err(IrError::RegisterIndexOutOfRange {
                register: register.to_string(),
                index,
                size: reg.size(),
            });
        }
        self.clbits
            .iter()
            .find(|c| c.register == register && c.index == index)
            .map(|c| c.id)
            .ok_or_else(|| IrError::RegisterNotFound(register.to_string()))
    }

    /// Resolve a register-addressed qubit to its id in this circuit.
    pub fn resolve(&self, bit: &RegisterBit) -> IrResult<QubitId> {
        self.qubit(bit.register.name(), bit.index)
    }

    /// Get all qubit ids of a register, in index order.
    pub fn register_qubits(&self, register: &str) -> IrResult<Vec<QubitId>> {
        if !self.has_register(register) {
            return Err(IrError::RegisterNotFound(register.to_string()));
        }
        Ok(self
            .qubits
            .iter()
            .filter(|q| q.register == register)
            .map(|q| q.id)
            .collect())
    }

    /// Get all classical bit ids of a register, in index order.
    pub fn register_clbits(&self, register: &str) -> IrResult<Vec<ClbitId>> {
        if !self.has_classical_register(register) {
            return Err(IrError::RegisterNotFound(register.to_string()));
        }
        Ok(self
            .clbits
            .iter()
            .filter(|c| c.register == register)
            .map(|c| c.id)
            .collect())
    }

    /// Get the register membership of a qubit.
    pub fn qubit_info(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.index())
    }

    /// Get the register membership of a classical bit.
    pub fn clbit_info(&self, id: ClbitId) -> Option<&Clbit> {
        self.clbits.get(id.index())
    }

    /// Address a qubit of this circuit by register and index.
    pub fn register_bit(&self, id: QubitId) -> IrResult<RegisterBit> {
        let qubit = self.qubit_info(id).ok_or(IrError::QubitNotFound {
            qubit: id,
            gate_name: None,
        })?;
        let register = self
            .qregs
            .iter()
            .find(|r| r.name() == qubit.register)
            .ok_or_else(|| IrError::RegisterNotFound(qubit.register.clone()))?;
        Ok(register.bit(qubit.index))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn gate1(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::I, qubit)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Rx(theta), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Ry(theta), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::Rz(theta), qubit)
    }

    /// Apply phase gate.
    pub fn p(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::P(lambda), qubit)
    }

    /// Apply `u1(λ)`.
    pub fn u1(&mut self, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::U1(lambda), qubit)
    }

    /// Apply `u2(φ, λ)`.
    pub fn u2(&mut self, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::U2(phi, lambda), qubit)
    }

    /// Apply `u3(θ, φ, λ)`.
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate1(StandardGate::U3(theta, phi, lambda), qubit)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CZ,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled `u1(λ)`.
    pub fn cu1(&mut self, lambda: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CU1(lambda),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled `u3(θ, φ, λ)` in the `e^{-i(φ+λ)/2}` convention.
    pub fn cu3(
        &mut self,
        theta: f64,
        phi: f64,
        lambda: f64,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CU3(theta, phi, lambda),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled Ry rotation.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CRy(theta),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Measure qubit `i` into classical bit `i` for every qubit.
    #[allow(clippy::cast_possible_truncation)]
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for i in 0..self.qubits.len() as u32 {
            self.dag
                .apply(Instruction::measure(QubitId(i), ClbitId(i)))?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to the given qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.barrier(qubits)
    }

    /// Append an arbitrary instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the circuit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of operations.
    pub fn size(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Count operations by name, in order of first appearance.
    pub fn count_ops(&self) -> Vec<(&'static str, usize)> {
        self.dag.count_ops()
    }

    /// Iterate over the operations in program order.
    pub fn ops(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.dag.ops()
    }

    /// Get the global phase.
    pub fn global_phase(&self) -> f64 {
        self.dag.global_phase()
    }

    /// Set the global phase.
    pub fn set_global_phase(&mut self, phase: f64) {
        self.dag.set_global_phase(phase);
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get a mutable reference to the underlying DAG.
    pub fn dag_mut(&mut self) -> &mut CircuitDag {
        &mut self.dag
    }

    /// Consume the circuit and return the DAG.
    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }
}
