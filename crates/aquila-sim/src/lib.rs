//! Aquila Local Simulators
//!
//! This crate provides three synchronous simulator backends over a shared
//! statevector engine:
//!
//! - [`StatevectorSimulator`]: final amplitudes, including global phase
//! - [`QasmSimulator`]: sampled counts over the classical bits
//! - [`UnitarySimulator`]: the full `2^n x 2^n` circuit unitary
//!
//! All randomness comes from the `StdRng` passed to [`Backend::run`], so a
//! seeded generator gives reproducible counts.
//!
//! # Example
//!
//! ```rust
//! use aquila_ir::{Circuit, QubitId};
//! use aquila_sim::{Backend, QasmSimulator, RunConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = QasmSimulator::new()
//!     .run(&circuit, &RunConfig::new(100), &mut rng)
//!     .unwrap();
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 100);
//! ```

pub mod backend;
pub mod error;
pub mod result;
pub mod simulator;
pub mod statevector;

pub use backend::{Backend, BackendConfig, BackendKind, Capabilities, RunConfig};
pub use error::{SimError, SimResult};
pub use result::{Counts, ExecutionResult};
pub use simulator::{QasmSimulator, StatevectorSimulator, UnitarySimulator, backend_from_config};
pub use statevector::Statevector;
