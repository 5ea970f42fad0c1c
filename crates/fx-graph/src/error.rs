//! Graph cloning and lookup errors.

use fx_core::FxError;
use thiserror::Error;

/// Errors raised while cloning a caller graph or querying the arena.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge reported by a vertex is not incident to it.
    #[error("caller graph is inconsistent: an edge is not incident to the vertex that reported it")]
    MissingIncidence,

    /// An edge leads to a vertex outside the set being cloned.
    #[error("caller graph is inconsistent: an edge leads outside the cloned vertex set")]
    ForeignVertex,

    /// A vertex passed to an arena query is not an endpoint of the edge.
    #[error("vertex {vertex} is not an endpoint of edge {edge}")]
    NotAnEndpoint { vertex: u32, edge: u32 },

    /// A resistance came back non-finite from the caller's pricing function.
    #[error("non-finite resistance {value} for a cloned edge")]
    NonFiniteResistance { value: f64 },
}

impl From<GraphError> for FxError {
    fn from(err: GraphError) -> Self {
        FxError::InvalidArg {
            what: err.to_string(),
        }
    }
}
