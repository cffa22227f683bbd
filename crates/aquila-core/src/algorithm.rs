//! Base trait for quantum algorithms.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AquaError, AquaResult};
use crate::quantum_instance::QuantumInstance;

/// Static description of an algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmConfiguration {
    /// Algorithm name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Whether the algorithm runs without a quantum instance.
    #[serde(default)]
    pub classical: bool,
}

impl AlgorithmConfiguration {
    /// Create a configuration for a quantum algorithm.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            classical: false,
        }
    }

    /// Mark the algorithm as classical.
    #[must_use]
    pub fn classical(mut self, classical: bool) -> Self {
        self.classical = classical;
        self
    }
}

/// An algorithm that may run on a quantum instance.
///
/// Implementors provide [`execute`](Self::execute); callers use
/// [`run`](Self::run), which rejects a missing quantum instance for
/// non-classical algorithms before dispatching.
pub trait QuantumAlgorithm {
    /// Result of a run.
    type Output;

    /// The algorithm's configuration.
    fn configuration(&self) -> &AlgorithmConfiguration;

    /// Run the algorithm.
    fn execute(
        &mut self,
        quantum_instance: Option<&mut QuantumInstance>,
        rng: &mut StdRng,
    ) -> AquaResult<Self::Output>;

    /// Validate the quantum instance requirement and run the algorithm.
    fn run(
        &mut self,
        quantum_instance: Option<&mut QuantumInstance>,
        rng: &mut StdRng,
    ) -> AquaResult<Self::Output> {
        let config = self.configuration();
        if !config.classical && quantum_instance.is_none() {
            return Err(AquaError::QuantumInstanceRequired(config.name.clone()));
        }
        info!(algorithm = %config.name, classical = config.classical, "Running algorithm");
        self.execute(quantum_instance, rng)
    }
}
