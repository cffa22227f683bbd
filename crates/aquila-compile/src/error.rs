//! Error types for the compilation crate.

use aquila_ir::IrError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A gate has no decomposition into the target basis.
    #[error("Gate '{0}' cannot be decomposed into the target basis")]
    GateNotInBasis(String),

    /// The pass needs basis gates but none were configured.
    #[error("Basis gates not set: a target basis is required for unrolling")]
    MissingBasisGates,

    /// Error from the circuit IR.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
