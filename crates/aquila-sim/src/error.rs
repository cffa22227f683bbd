//! Error types for the simulator crate.

use aquila_ir::IrError;
use thiserror::Error;

/// Errors that can occur while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit exceeds the simulator's qubit limit.
    #[error("Circuit has {num_qubits} qubits but the simulator supports at most {max_qubits}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        num_qubits: usize,
        /// Simulator limit.
        max_qubits: u32,
    },

    /// The backend cannot execute this instruction.
    #[error("Instruction '{instruction}' is not supported by {backend}")]
    UnsupportedInstruction {
        /// Instruction name.
        instruction: String,
        /// Backend name.
        backend: String,
    },

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Unknown backend name in a configuration.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// Error from the circuit IR.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
