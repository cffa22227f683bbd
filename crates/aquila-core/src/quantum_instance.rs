//! Quantum instance: a backend plus its run settings.

use aquila_compile::{BasisGates, transpile};
use aquila_ir::Circuit;
use aquila_sim::{Backend, BackendConfig, ExecutionResult, RunConfig, backend_from_config};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::AquaResult;
use crate::utils::summarize_circuits;

/// Serializable description of a [`QuantumInstance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumInstanceConfig {
    /// Backend selection.
    pub backend: BackendConfig,
    /// Shots, seed and unrolling switch.
    #[serde(default)]
    pub run: RunConfig,
    /// Basis to unroll into before running; `None` runs circuits as given.
    #[serde(default = "default_basis")]
    pub basis_gates: Option<Vec<String>>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_basis() -> Option<Vec<String>> {
    Some(BasisGates::u_basis().gates().to_vec())
}

/// A backend, its run configuration and the random generator used for runs.
pub struct QuantumInstance {
    backend: Box<dyn Backend>,
    run_config: RunConfig,
    basis: Option<BasisGates>,
    rng: StdRng,
}

impl QuantumInstance {
    /// Wrap a backend with default run settings and the `u` basis.
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self::with_run_config(backend, RunConfig::default())
    }

    /// Wrap a backend with the given run settings.
    ///
    /// The generator is seeded from `run_config.seed` when present.
    pub fn with_run_config(backend: Box<dyn Backend>, run_config: RunConfig) -> Self {
        let rng = match run_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            backend,
            run_config,
            basis: Some(BasisGates::u_basis()),
            rng,
        }
    }

    /// Build an instance from its configuration.
    pub fn from_config(config: &QuantumInstanceConfig) -> AquaResult<Self> {
        let backend = backend_from_config(&config.backend)?;
        let mut instance = Self::with_run_config(backend, config.run.clone());
        instance.basis = config.basis_gates.clone().map(BasisGates::new);
        Ok(instance)
    }

    /// Set the basis circuits are unrolled into.
    #[must_use]
    pub fn with_basis(mut self, basis: Option<BasisGates>) -> Self {
        self.basis = basis;
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Current run settings.
    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    /// Check whether the backend returns exact amplitudes.
    pub fn is_statevector(&self) -> bool {
        self.backend.is_statevector()
    }

    /// The instance's random generator.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Unroll and run circuits, one result per circuit in input order.
    #[instrument(skip(self, circuits), fields(backend = %self.backend.name(), n = circuits.len()))]
    pub fn execute(&mut self, circuits: &[Circuit]) -> AquaResult<Vec<ExecutionResult>> {
        let prepared = match (&self.basis, self.run_config.skip_unroll) {
            (Some(basis), false) => circuits
                .iter()
                .map(|c| transpile(c, basis))
                .collect::<Result<Vec<_>, _>>()?,
            _ => circuits.to_vec(),
        };
        debug!("{}", summarize_circuits(&prepared));

        let mut results = Vec::with_capacity(prepared.len());
        for circuit in &prepared {
            results.push(self.backend.run(circuit, &self.run_config, &mut self.rng)?);
        }
        info!(circuits = results.len(), "Execution complete");
        Ok(results)
    }
}

impl std::fmt::Debug for QuantumInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantumInstance")
            .field("backend", &self.backend.name())
            .field("run_config", &self.run_config)
            .field("basis", &self.basis)
            .finish_non_exhaustive()
    }
}
