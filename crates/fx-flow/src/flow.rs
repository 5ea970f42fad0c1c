//! Per-source flow: enumeration, solve and reduction bundled together.

use std::collections::{HashMap, HashSet};

use fx_core::{EdgeId, Real, VertexId};
use fx_graph::Network;
use tracing::debug;

use crate::error::FlowResult;
use crate::reduce::equivalent_resistance;
use crate::solve::solve_unit;
use crate::trace::{Trace, TraceLimits, trace};

/// The steady-state response of the network to one pressure source.
///
/// Holds unit-pressure currents; the configured pressure only scales them
/// on the way out, so rebuilding is never needed for a pure drive change.
/// Everything else is a snapshot: edits to the underlying domain after
/// construction are invisible until a new flow is built.
#[derive(Debug, Clone)]
pub struct Flow {
    source: EdgeId,
    touched: Vec<EdgeId>,
    touched_set: HashSet<EdgeId>,
    /// Canonical-direction signed unit currents, source edge included.
    unit: HashMap<EdgeId, Real>,
    equivalent_resistance: Real,
    pressure: Real,
}

impl Flow {
    /// Enumerate, solve and reduce one source.
    pub(crate) fn build(
        network: &Network,
        source: EdgeId,
        positive: VertexId,
        pressure: Real,
        limits: &TraceLimits,
    ) -> FlowResult<Flow> {
        let traced: Trace = trace(network, source, positive, limits)?;
        let solved = solve_unit(network, &traced)?;
        let equivalent =
            equivalent_resistance(&traced.automaton, &|e| network.resistance(e))?;

        let mut touched = traced.edges.clone();
        let mut unit = solved.per_edge;

        // The source edge was excluded from traversal; conservation gives
        // its current as everything leaving the start state. Sign it as
        // flowing sink -> start inside the source so it aggregates
        // coherently when another source rides the same edge.
        let sink_vertex = network.across(positive, source)?;
        let source_sign = if network.edge(source).inlet == sink_vertex {
            1.0
        } else {
            -1.0
        };
        touched.push(source);
        unit.insert(source, solved.source_total * source_sign);

        debug!(
            source = source.index(),
            equivalent, "flow constructed"
        );

        Ok(Flow {
            source,
            touched_set: touched.iter().copied().collect(),
            touched,
            unit,
            equivalent_resistance: equivalent,
            pressure,
        })
    }

    /// The edge driving this flow.
    pub fn source(&self) -> EdgeId {
        self.source
    }

    /// Does any enumerated path ride `edge` (or is it the source itself)?
    pub fn touches(&self, edge: EdgeId) -> bool {
        self.touched_set.contains(&edge)
    }

    /// Edges carrying current, in first-traversal order, source last.
    pub fn touched_edges(&self) -> &[EdgeId] {
        &self.touched
    }

    /// Signed current through `edge` under the configured pressure,
    /// relative to the edge's canonical direction. Zero for edges the
    /// flow never touches.
    pub fn current(&self, edge: EdgeId) -> Real {
        self.unit.get(&edge).map_or(0.0, |u| u * self.pressure)
    }

    /// Equivalent resistance of the network seen from the source.
    pub fn equivalent_resistance(&self) -> Real {
        self.equivalent_resistance
    }

    pub fn pressure(&self) -> Real {
        self.pressure
    }
}
