//! Aquila Compilation Framework
//!
//! This crate rewrites circuits with a pass-based architecture. Passes run
//! in order on a [`CircuitDag`](aquila_ir::CircuitDag) and share data
//! through a [`PropertySet`].
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +-------------+
//! | PassManager | <-- PropertySet (basis gates, custom values)
//! +-------------+
//!       |
//!       +-- Unroller
//!       |
//!       v
//! Output Circuit (basis gates only)
//! ```
//!
//! # Example: Unrolling into the `u` basis
//!
//! ```rust
//! use aquila_compile::{transpile, BasisGates};
//! use aquila_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let unrolled = transpile(&circuit, &BasisGates::u_basis()).unwrap();
//! assert_eq!(unrolled.count_ops(), vec![("u2", 1), ("cx", 1)]);
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use aquila_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use aquila_ir::CircuitDag;
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, _dag: &mut CircuitDag, _props: &mut PropertySet) -> CompileResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod unitary;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::{transpile, PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::Unroller;
pub use property::{BasisGates, PropertySet};
pub use unitary::Unitary2x2;
