//! Shared fixture: build a cloned network from a flat edge list.

use fx_core::{EdgeId, Real};
use fx_graph::{MeshGraph, Network, clone_from};

/// Clone a network of `vertices` junctions from `(a, b, resistance)`
/// triples, returning the internal edge ids in declaration order.
/// Vertex `i` maps to internal id `i`; by convention the tests use edge 0
/// as the source.
pub(crate) fn build(vertices: usize, links: &[(usize, usize, Real)]) -> (Network, Vec<EdgeId>) {
    let mut mesh = MeshGraph::new(vertices);
    for &(a, b, _) in links {
        mesh.link(a, b);
    }
    let cloned = clone_from(&mesh, |e| links[e].2).unwrap();

    let edge_ids = (0..links.len())
        .map(|e| cloned.edge_ids[&e])
        .collect();
    (cloned.network, edge_ids)
}
