//! Error types for finance applications.

use aquila_core::AquaError;
use thiserror::Error;

/// Errors raised by finance algorithms and data providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FinanceError {
    /// A data source could not be reached or rejected the request.
    #[error("Cannot retrieve data: {0}")]
    Retrieval(String),

    /// A data source answered with an unexpected payload.
    #[error("Cannot parse data: {0}")]
    Parse(String),

    /// Invalid provider or algorithm configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Statistics were requested before any data was loaded.
    #[error("No data loaded; run the data provider first")]
    NoData,

    /// Error from the algorithm components.
    #[error(transparent)]
    Aqua(#[from] AquaError),

    /// HTTP transport error.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Result type for finance operations.
pub type FinanceResult<T> = Result<T, FinanceError>;
