//! Aquila Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures shared by the Aquila
//! workspace: named registers, a closed set of standard gates, instructions
//! and a DAG-backed [`Circuit`].
//!
//! # Overview
//!
//! Operations are stored in a DAG whose insertion order is the program order.
//! Qubit ids are dense and allocated in register order, so `QubitId(k)` is
//! bit `k` of a little-endian basis index.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use aquila_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Example: Registers across circuits
//!
//! ```rust
//! use aquila_ir::{Circuit, QuantumRegister};
//!
//! let ctl = QuantumRegister::new("ctl", 1);
//! let mut a = Circuit::with_size("a", 2, 0);
//! let mut b = Circuit::new("b");
//! a.add_register(&ctl).unwrap();
//! b.add_register(&ctl).unwrap();
//!
//! // Same register bit, different ids per circuit.
//! assert_eq!(a.resolve(&ctl.bit(0)).unwrap().0, 2);
//! assert_eq!(b.resolve(&ctl.bit(0)).unwrap().0, 0);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z`, `H` | 1 | Identity, Pauli and Hadamard |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation gates |
//! | `U1`, `U2`, `U3` | 1 | Basis single-qubit rotations |
//! | `CX`, `CZ`, `Swap` | 2 | Two-qubit Clifford gates |
//! | `CU1`, `CU3`, `CRy` | 2 | Controlled rotations |
//! | `CCX` | 3 | Toffoli gate |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
pub use register::{ClassicalRegister, QuantumRegister, RegisterBit};
