//! Snapshotting a caller graph into the engine arena.

use std::collections::HashMap;

use fx_core::{EdgeId, Real, VertexId, ensure_finite};

use crate::capability::SourceGraph;
use crate::error::GraphError;
use crate::network::{EdgeData, Network};

/// A cloned [`Network`] plus the maps joining it to the caller's handles.
#[derive(Debug, Clone)]
pub struct ClonedNetwork<V, E> {
    pub network: Network,
    /// Caller vertex handle -> internal id.
    pub vertex_ids: HashMap<V, VertexId>,
    /// Caller edge handle -> internal id.
    pub edge_ids: HashMap<E, EdgeId>,
    /// Internal edge id (by index) -> caller edge handle.
    pub edge_tokens: Vec<E>,
}

/// Clone `graph` into an immutable arena, pricing each edge once through
/// `resistance_of`.
///
/// Vertices are numbered in `graph.vertices()` order. Each edge token is
/// registered the first time any vertex reports it; that vertex becomes
/// the edge's canonical `inlet` and the vertex across it the `outlet`.
/// The caller's enumeration order therefore fully determines the internal
/// ids, which keeps every downstream computation reproducible.
pub fn clone_from<G, F>(
    graph: &G,
    resistance_of: F,
) -> Result<ClonedNetwork<G::Vertex, G::Edge>, GraphError>
where
    G: SourceGraph,
    F: Fn(G::Edge) -> Real,
{
    let vertices = graph.vertices();

    let mut vertex_ids: HashMap<G::Vertex, VertexId> = HashMap::with_capacity(vertices.len());
    for (i, &v) in vertices.iter().enumerate() {
        vertex_ids.insert(v, VertexId::from_index(i as u32));
    }

    let mut edge_ids: HashMap<G::Edge, EdgeId> = HashMap::new();
    let mut edge_tokens: Vec<G::Edge> = Vec::new();
    let mut edges: Vec<EdgeData> = Vec::new();
    let mut incident: Vec<Vec<EdgeId>> = vec![Vec::new(); vertices.len()];

    for &v in &vertices {
        let inlet = vertex_ids[&v];
        for token in graph.incident_edges(v) {
            if edge_ids.contains_key(&token) {
                continue;
            }
            let far = graph.across(v, token).ok_or(GraphError::MissingIncidence)?;
            let outlet = *vertex_ids.get(&far).ok_or(GraphError::ForeignVertex)?;

            let resistance = resistance_of(token);
            ensure_finite(resistance, "edge resistance")
                .map_err(|_| GraphError::NonFiniteResistance { value: resistance })?;

            let id = EdgeId::from_index(edges.len() as u32);
            edges.push(EdgeData {
                inlet,
                outlet,
                resistance,
            });
            edge_ids.insert(token, id);
            edge_tokens.push(token);

            incident[inlet.idx()].push(id);
            if outlet != inlet {
                incident[outlet.idx()].push(id);
            }
        }
    }

    Ok(ClonedNetwork {
        network: Network { incident, edges },
        vertex_ids,
        edge_ids,
        edge_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MeshGraph;

    #[test]
    fn clone_assigns_ids_in_enumeration_order() {
        let mut mesh = MeshGraph::new(3);
        let e0 = mesh.link(0, 1);
        let e1 = mesh.link(1, 2);

        let cloned = clone_from(&mesh, |e| if e == e0 { 3.0 } else { 6.0 }).unwrap();
        let net = &cloned.network;

        assert_eq!(net.vertex_count(), 3);
        assert_eq!(net.edge_count(), 2);
        assert_eq!(cloned.edge_tokens, vec![e0, e1]);

        // First reporter becomes the inlet.
        let first = net.edge(cloned.edge_ids[&e0]);
        assert_eq!(first.inlet, cloned.vertex_ids[&0]);
        assert_eq!(first.outlet, cloned.vertex_ids[&1]);
        assert_eq!(first.resistance, 3.0);
    }

    #[test]
    fn parallel_edges_stay_distinct() {
        let mut mesh = MeshGraph::new(2);
        let e0 = mesh.link(0, 1);
        let e1 = mesh.link(0, 1);

        let cloned = clone_from(&mesh, |_| 5.0).unwrap();
        assert_eq!(cloned.network.edge_count(), 2);
        assert_ne!(cloned.edge_ids[&e0], cloned.edge_ids[&e1]);

        // Both endpoints list both edges.
        assert_eq!(cloned.network.incident(cloned.vertex_ids[&0]).len(), 2);
        assert_eq!(cloned.network.incident(cloned.vertex_ids[&1]).len(), 2);
    }

    #[test]
    fn self_loop_listed_once() {
        let mut mesh = MeshGraph::new(1);
        mesh.link(0, 0);

        let cloned = clone_from(&mesh, |_| 1.0).unwrap();
        assert_eq!(cloned.network.incident(cloned.vertex_ids[&0]).len(), 1);
    }

    #[test]
    fn non_finite_resistance_rejected() {
        let mut mesh = MeshGraph::new(2);
        mesh.link(0, 1);

        let err = clone_from(&mesh, |_| f64::NAN).unwrap_err();
        assert!(matches!(err, GraphError::NonFiniteResistance { .. }));
    }
}
