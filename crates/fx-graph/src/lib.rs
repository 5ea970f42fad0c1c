//! fx-graph: graph boundary for the fluxnet engine.
//!
//! Provides:
//! - `SourceGraph`, the minimal capability a caller's graph must expose
//! - `Network`, the engine's immutable cloned vertex/edge arena
//! - `clone_from`, which snapshots a caller graph into a `Network` plus
//!   bidirectional maps back to the caller's own handles
//!
//! The engine never walks the caller's structures after cloning: every
//! recalculation starts from a fresh snapshot, so edits on the caller's
//! side can never bleed into a solve already in flight.
//!
//! # Example
//!
//! ```
//! use fx_graph::{MeshGraph, clone_from};
//!
//! // Two vertices joined by a pair of parallel edges.
//! let mut mesh = MeshGraph::new(2);
//! mesh.link(0, 1);
//! mesh.link(0, 1);
//! let cloned = clone_from(&mesh, |_| 10.0).unwrap();
//!
//! assert_eq!(cloned.network.vertex_count(), 2);
//! assert_eq!(cloned.network.edge_count(), 2);
//! ```

pub mod capability;
pub mod clone;
pub mod error;
pub mod network;

// Re-exports for ergonomics
pub use capability::{MeshGraph, SourceGraph};
pub use clone::{ClonedNetwork, clone_from};
pub use error::GraphError;
pub use network::{EdgeData, Network};
