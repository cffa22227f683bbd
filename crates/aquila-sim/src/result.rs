//! Execution results.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by bitstring.
///
/// Character `i` of a key is classical bit `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring` (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The most frequent outcome, ties broken by bitstring order.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Relative frequencies, sorted by bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> Vec<(String, f64)> {
        let total = self.total() as f64;
        let mut probs: Vec<_> = self
            .counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect();
        probs.sort_by(|a, b| a.0.cmp(&b.0));
        probs
    }

    /// Iterate over `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// The result of running one circuit on a backend.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Job identifier (UUID v4).
    pub job_id: String,
    /// Name of the backend that produced the result.
    pub backend_name: String,
    /// Number of shots (0 for exact backends).
    pub shots: u32,
    /// Measurement counts.
    pub counts: Counts,
    /// Final amplitudes, from the statevector simulator.
    pub statevector: Option<Vec<Complex64>>,
    /// Full circuit unitary, from the unitary simulator.
    pub unitary: Option<Array2<Complex64>>,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result with counts only.
    pub fn new(
        job_id: impl Into<String>,
        backend_name: impl Into<String>,
        counts: Counts,
        shots: u32,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            backend_name: backend_name.into(),
            shots,
            counts,
            statevector: None,
            unitary: None,
            execution_time_ms: None,
        }
    }

    /// Attach final amplitudes.
    #[must_use]
    pub fn with_statevector(mut self, statevector: Vec<Complex64>) -> Self {
        self.statevector = Some(statevector);
        self
    }

    /// Attach the circuit unitary.
    #[must_use]
    pub fn with_unitary(mut self, unitary: Array2<Complex64>) -> Self {
        self.unitary = Some(unitary);
        self
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
