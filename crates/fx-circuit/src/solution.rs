//! The outcome of one circuit solve.

use std::collections::HashMap;

use fx_core::{ComponentId, Real};

/// Per-component current magnitudes plus, for every voltage source, the
/// equivalent resistance the rest of the circuit presented to it.
///
/// Components no enumerated path touches (and sources left floating) are
/// absent from `currents`; read absence as zero current.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitSolution {
    pub currents: HashMap<ComponentId, Real>,
    pub equivalent_resistances: HashMap<ComponentId, Real>,
}

impl CircuitSolution {
    /// Current magnitude through a component, zero when untouched.
    pub fn current(&self, component: ComponentId) -> Real {
        self.currents.get(&component).copied().unwrap_or(0.0)
    }
}
