//! Aquila algorithm components.
//!
//! This crate holds the building blocks shared by Aquila algorithms:
//!
//! - [`utils`]: arithmetic helpers, basis-gate conversion, circuit summaries
//!   and the controlled-circuit synthesizer;
//! - [`circuits`]: circuit factories such as the fixed-value comparator and
//!   the weighted sum operator;
//! - [`uncertainty_models`]: distributions loaded into qubits, including the
//!   Gaussian conditional independence model for credit risk;
//! - [`QuantumAlgorithm`] and [`QuantumInstance`] to run algorithms on a
//!   simulator backend.
//!
//! # Example: Controlling a circuit
//!
//! ```rust
//! use aquila_core::utils::controlled_circuit;
//! use aquila_ir::{Circuit, QuantumRegister, QubitId};
//!
//! let mut bell = Circuit::with_size("bell", 2, 0);
//! bell.h(QubitId(0)).unwrap();
//! bell.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let ctl = QuantumRegister::new("ctl", 1);
//! let controlled = controlled_circuit(&bell, &ctl.bit(0), None, true).unwrap();
//!
//! assert_eq!(controlled.num_qubits(), 3);
//! assert!(controlled
//!     .count_ops()
//!     .iter()
//!     .all(|(name, _)| ["u1", "u2", "u3", "cx"].contains(name)));
//! ```
//!
//! # Example: Comparing against a value
//!
//! ```rust
//! use aquila_core::circuits::{CircuitFactory, FixedValueComparator};
//! use aquila_ir::{Circuit, QubitId};
//!
//! // q = [x0, x1, result], one ancilla
//! let comparator = FixedValueComparator::new(2, 2.0, true);
//! let mut qc = Circuit::with_size("cmp", 4, 0);
//! let q = [QubitId(0), QubitId(1), QubitId(2)];
//! comparator.build(&mut qc, &q, &[QubitId(3)]).unwrap();
//! ```

pub mod algorithm;
pub mod circuits;
pub mod error;
pub mod quantum_instance;
pub mod special;
pub mod uncertainty_models;
pub mod utils;

pub use algorithm::{AlgorithmConfiguration, QuantumAlgorithm};
pub use circuits::CircuitFactory;
pub use error::{AquaError, AquaResult};
pub use quantum_instance::{QuantumInstance, QuantumInstanceConfig};
