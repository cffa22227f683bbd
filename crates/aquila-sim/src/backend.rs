//! Backend trait and configuration types.
//!
//! Backends are synchronous: a call to [`Backend::run`] simulates the circuit
//! and returns its result. Every random draw goes through the `StdRng` the
//! caller passes in.

use std::fmt;

use aquila_ir::Circuit;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::result::ExecutionResult;

/// What a backend returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Exact final amplitudes.
    Statevector,
    /// Sampled measurement counts.
    Qasm,
    /// The full circuit unitary.
    Unitary,
}

/// Capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"` or `"unitary"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a local simulator.
    pub fn simulator(name: impl Into<String>, num_qubits: u32, kind: BackendKind) -> Self {
        let feature = match kind {
            BackendKind::Statevector => "statevector",
            BackendKind::Qasm => "measurement",
            BackendKind::Unitary => "unitary",
        };
        Self {
            name: name.into(),
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec![feature.into()],
        }
    }
}

/// Per-run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of shots for sampling backends.
    pub shots: u32,
    /// Seed for the run's random generator.
    pub seed: Option<u64>,
    /// Skip unrolling into the backend basis before running.
    pub skip_unroll: bool,
}

impl RunConfig {
    /// Create a run configuration with the given shots.
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            ..Self::default()
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            skip_unroll: false,
        }
    }
}

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Authentication token, for backends that need one.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("extra", &self.extra)
            .finish()
    }
}

/// A backend that executes circuits.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get what this backend returns.
    fn kind(&self) -> BackendKind;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> Capabilities;

    /// Run a circuit and return its result.
    fn run(
        &self,
        circuit: &Circuit,
        config: &RunConfig,
        rng: &mut StdRng,
    ) -> SimResult<ExecutionResult>;

    /// Check whether this backend returns exact amplitudes.
    fn is_statevector(&self) -> bool {
        self.kind() == BackendKind::Statevector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults_from_yaml_like_json() {
        let config: RunConfig = serde_json::from_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.seed, Some(42));
        assert!(!config.skip_unroll);
    }

    #[test]
    fn test_backend_config_redacts_token() {
        let config = BackendConfig::new("qasm_simulator")
            .with_token("secret")
            .with_extra("max_qubits", serde_json::json!(12));
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
        assert!(debug.contains("max_qubits"));
    }

    #[test]
    fn test_backend_config_extra_flattened() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name": "statevector_simulator", "max_qubits": 8}"#)
                .unwrap();
        assert_eq!(config.name, "statevector_simulator");
        assert_eq!(config.extra["max_qubits"], serde_json::json!(8));
    }
}
