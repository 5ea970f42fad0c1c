//! The engine's cloned vertex/edge arena.

use fx_core::{EdgeId, Real, VertexId};

use crate::error::GraphError;

/// One resistive edge of the cloned network.
///
/// `inlet` and `outlet` fix the edge's canonical direction at clone time;
/// every direction sign downstream is expressed relative to it. The
/// resistance is a snapshot: later edits on the caller's side do not
/// reach a network that has already been cloned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub inlet: VertexId,
    pub outlet: VertexId,
    pub resistance: Real,
}

/// Immutable arena of vertices and edges addressed by integer ids.
///
/// Vertices own nothing beyond their incident-edge lists; all edge state
/// lives in `EdgeData`. Built exclusively by [`crate::clone::clone_from`].
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) incident: Vec<Vec<EdgeId>>,
    pub(crate) edges: Vec<EdgeData>,
}

impl Network {
    pub fn vertex_count(&self) -> usize {
        self.incident.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges incident to a vertex, in clone order.
    pub fn incident(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incident[vertex.idx()]
    }

    pub fn edge(&self, edge: EdgeId) -> &EdgeData {
        &self.edges[edge.idx()]
    }

    pub fn resistance(&self, edge: EdgeId) -> Real {
        self.edges[edge.idx()].resistance
    }

    /// Both endpoints in canonical order (inlet, outlet).
    pub fn endpoints(&self, edge: EdgeId) -> (VertexId, VertexId) {
        let data = &self.edges[edge.idx()];
        (data.inlet, data.outlet)
    }

    pub fn is_endpoint(&self, vertex: VertexId, edge: EdgeId) -> bool {
        let data = &self.edges[edge.idx()];
        data.inlet == vertex || data.outlet == vertex
    }

    /// The vertex on the far side of `edge` as seen from `vertex`.
    pub fn across(&self, vertex: VertexId, edge: EdgeId) -> Result<VertexId, GraphError> {
        let data = &self.edges[edge.idx()];
        if data.inlet == vertex {
            Ok(data.outlet)
        } else if data.outlet == vertex {
            Ok(data.inlet)
        } else {
            Err(GraphError::NotAnEndpoint {
                vertex: vertex.index(),
                edge: edge.index(),
            })
        }
    }
}
