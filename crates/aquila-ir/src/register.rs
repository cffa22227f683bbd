//! Named quantum and classical registers.
//!
//! Registers are value types identified by name. The same register can be
//! added to several circuits; each circuit allocates its own ids for the
//! register's bits, and bits are matched across circuits by
//! (register name, index).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named quantum register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    size: u32,
}

impl QuantumRegister {
    /// Create a quantum register.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Address a single qubit of this register.
    pub fn bit(&self, index: u32) -> RegisterBit {
        RegisterBit {
            register: self.clone(),
            index,
        }
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qreg {}[{}]", self.name, self.size)
    }
}

/// A named classical register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    size: u32,
}

impl ClassicalRegister {
    /// Create a classical register.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits.
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creg {}[{}]", self.name, self.size)
    }
}

/// A qubit addressed by register and index, independent of any circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterBit {
    /// The owning register.
    pub register: QuantumRegister,
    /// Index within the register.
    pub index: u32,
}

impl fmt::Display for RegisterBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register.name(), self.index)
    }
}
