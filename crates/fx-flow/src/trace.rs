//! Cycle-excluding path enumeration.
//!
//! Walks the cloned network depth-first from a source's positive terminal
//! to the vertex on the far side of the source edge, collecting every
//! simple path plus the shared-state automaton skeleton. Worst case is
//! exponential in the branching factor; the optional budget in
//! [`TraceLimits`] turns a runaway enumeration into an error instead of a
//! hang.

use std::collections::{HashMap, HashSet};

use fx_core::{EdgeId, StateId, VertexId};
use fx_graph::Network;
use tracing::debug;

use crate::automaton::{Automaton, State};
use crate::error::{FlowError, FlowResult};

/// Caps on the enumeration. The default imposes none, which is the right
/// call for small hand-built topologies and the wrong one for anything
/// untrusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceLimits {
    /// Abort with a topology error once more than this many paths exist.
    pub max_paths: Option<usize>,
}

/// Everything the walk discovered about one source.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Shared-state path automaton, renumbered start-first/sink-last.
    pub automaton: Automaton,
    /// Every simple path, as edge sequences, in discovery order.
    pub paths: Vec<Vec<EdgeId>>,
    /// Edges ridden by at least one path, in first-traversal order.
    pub edges: Vec<EdgeId>,
    /// Direction sign per used edge: `+1` when its first traversal ran
    /// inlet -> outlet, `-1` otherwise. Fixed by the first traversal.
    pub signs: HashMap<EdgeId, i8>,
}

/// Enumerate all simple paths driven by `source`, starting from its
/// `positive` terminal.
pub fn trace(
    network: &Network,
    source: EdgeId,
    positive: VertexId,
    limits: &TraceLimits,
) -> FlowResult<Trace> {
    let sink_vertex = network.across(positive, source)?;
    if sink_vertex == positive {
        return Err(FlowError::Topology {
            what: "source edge is a self-loop".into(),
        });
    }

    let mut walker = Walker {
        network,
        source,
        sink_vertex,
        max_paths: limits.max_paths,
        state_of: HashMap::new(),
        states: Vec::new(),
        chain: Vec::new(),
        edge_path: Vec::new(),
        paths: Vec::new(),
        edges: Vec::new(),
        used: HashSet::new(),
        signs: HashMap::new(),
    };

    let reached = walker.explore(positive)?;
    if !reached {
        return Err(FlowError::Topology {
            what: "no path joins the source terminals".into(),
        });
    }

    let start = walker.state_of[&positive];
    let sink = walker.state_of[&sink_vertex];
    let automaton = Automaton::assemble(walker.states, start, sink)?;

    debug!(
        paths = walker.paths.len(),
        states = automaton.len(),
        edges = walker.edges.len(),
        "path enumeration finished"
    );

    Ok(Trace {
        automaton,
        paths: walker.paths,
        edges: walker.edges,
        signs: walker.signs,
    })
}

struct Walker<'a> {
    network: &'a Network,
    source: EdgeId,
    sink_vertex: VertexId,
    max_paths: Option<usize>,

    /// Vertex -> raw state index; first visit creates, later visits reuse.
    state_of: HashMap<VertexId, usize>,
    states: Vec<State>,
    /// Vertices on the current traversal chain (the explicit visited set).
    chain: Vec<VertexId>,
    /// Edges ridden so far on the current chain.
    edge_path: Vec<EdgeId>,

    paths: Vec<Vec<EdgeId>>,
    edges: Vec<EdgeId>,
    used: HashSet<EdgeId>,
    signs: HashMap<EdgeId, i8>,
}

impl Walker<'_> {
    fn state_index(&mut self, vertex: VertexId) -> usize {
        if let Some(&i) = self.state_of.get(&vertex) {
            return i;
        }
        let i = self.states.len();
        self.states.push(State::default());
        self.state_of.insert(vertex, i);
        i
    }

    /// Expand `vertex`, returning whether any path below it reached the
    /// sink. Transitions, used edges and signs are recorded only for
    /// successful branches, so dead ends leave no trace.
    fn explore(&mut self, vertex: VertexId) -> FlowResult<bool> {
        let state = self.state_index(vertex);

        if vertex == self.sink_vertex {
            if let Some(cap) = self.max_paths
                && self.paths.len() >= cap
            {
                return Err(FlowError::Topology {
                    what: format!("path budget of {cap} exceeded"),
                });
            }
            self.paths.push(self.edge_path.clone());
            return Ok(true);
        }

        self.chain.push(vertex);
        let mut reached = false;

        for &edge in self.network.incident(vertex) {
            if edge == self.source {
                continue;
            }
            let next = self.network.across(vertex, edge)?;
            if self.chain.contains(&next) {
                continue;
            }

            self.edge_path.push(edge);
            let hit = self.explore(next)?;
            self.edge_path.pop();

            if hit {
                reached = true;
                let child = self.state_of[&next];
                let child_id = StateId::from_index(child as u32);
                let state_id = StateId::from_index(state as u32);
                if self.states[state].push_outgoing(edge, child_id) {
                    self.states[child].push_incoming(edge, state_id);
                }
                if self.used.insert(edge) {
                    self.edges.push(edge);
                    let sign = if self.network.edge(edge).inlet == vertex { 1 } else { -1 };
                    self.signs.insert(edge, sign);
                }
            }
        }

        self.chain.pop();
        Ok(reached)
    }
}
