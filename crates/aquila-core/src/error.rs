//! Error types for algorithm components.

use aquila_compile::CompileError;
use aquila_ir::IrError;
use aquila_sim::SimError;
use thiserror::Error;

/// Errors raised by algorithm components.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AquaError {
    /// A quantum algorithm was run without a quantum instance.
    #[error("A quantum instance is needed to run quantum algorithm '{0}'")]
    QuantumInstanceRequired(String),

    /// An operation survived basis decomposition that the driver cannot control.
    #[error("Unexpected operation '{0}' after basis decomposition")]
    UnexpectedOperation(String),

    /// A backend result lacks the data an algorithm reads from it.
    #[error("Backend result is missing data: {0}")]
    MissingResult(String),

    /// Invalid parameters for a component.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from the circuit IR.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Error from compilation.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Error from a simulator backend.
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Result type for algorithm components.
pub type AquaResult<T> = Result<T, AquaError>;
