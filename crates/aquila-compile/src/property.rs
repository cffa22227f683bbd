//! `PropertySet` and related types for pass communication.
//!
//! The [`PropertySet`] is the shared context handed to every pass. It carries
//! the target [`BasisGates`] and any typed values a pass wants to leave for
//! later passes.
//!
//! ```
//! use aquila_compile::{BasisGates, PropertySet};
//!
//! let props = PropertySet::new().with_basis(BasisGates::u_basis());
//! assert!(props.basis_gates.as_ref().unwrap().contains("u3"));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

/// Basis gates for the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(std::convert::Into::into).collect(),
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// The `{u1, u2, u3, cx, id}` basis used for controlled-circuit synthesis.
    pub fn u_basis() -> Self {
        Self::new(["u1", "u2", "u3", "cx", "id"])
    }
}

impl Default for BasisGates {
    fn default() -> Self {
        Self::u_basis()
    }
}

/// Properties shared between compilation passes.
///
/// Custom values are stored by type; each type can have at most one value.
///
/// ```
/// use aquila_compile::PropertySet;
///
/// #[derive(Debug, PartialEq)]
/// struct UnrolledOps(usize);
///
/// let mut props = PropertySet::new();
/// props.insert(UnrolledOps(15));
/// assert_eq!(props.get::<UnrolledOps>(), Some(&UnrolledOps(15)));
/// ```
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target basis gates for gate decomposition.
    pub basis_gates: Option<BasisGates>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u_basis() {
        let basis = BasisGates::u_basis();
        for gate in ["u1", "u2", "u3", "cx", "id"] {
            assert!(basis.contains(gate));
        }
        assert!(!basis.contains("h"));
        assert!(!basis.contains("ccx"));
        assert_eq!(BasisGates::default(), basis);
    }

    #[test]
    #[allow(clippy::items_after_statements)]
    fn test_property_set_custom() {
        let mut props = PropertySet::new();

        #[derive(Debug, PartialEq)]
        struct CustomData(i32);

        props.insert(CustomData(42));
        assert_eq!(props.get::<CustomData>(), Some(&CustomData(42)));

        if let Some(data) = props.get_mut::<CustomData>() {
            data.0 += 1;
        }

        let removed = props.remove::<CustomData>();
        assert_eq!(removed, Some(CustomData(43)));
        assert_eq!(props.get::<CustomData>(), None);
    }
}
