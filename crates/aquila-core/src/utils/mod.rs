//! Arithmetic and circuit utilities.

pub mod arithmetic;
pub mod circuit_utils;
pub mod controlled_circuit;

pub use arithmetic::{is_power, is_power_of_2, log2, normalize_complex_vector, normalize_vector};
pub use circuit_utils::{convert_to_basis_gates, summarize_circuits};
pub use controlled_circuit::{
    append_controlled, apply_ccx, apply_cu1, apply_cu3, controlled_circuit,
};
