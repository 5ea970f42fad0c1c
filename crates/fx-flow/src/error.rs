//! Error types for the flow engine.

use fx_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while registering a source or solving a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Caller asked for something the network does not contain.
    #[error("configuration error: {what}")]
    Config { what: String },

    /// The network shape defeats the algorithm (no path, budget blown,
    /// not series/parallel-reducible).
    #[error("degenerate topology: {what}")]
    Topology { what: String },

    /// The assembled linear system has no unique consistent solution.
    #[error("numeric failure: {what}")]
    Numeric { what: String },

    /// A lookup that must succeed did not. Not recoverable by the caller.
    #[error("internal invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type FlowResult<T> = Result<T, FlowError>;
