//! fx-flow: steady-state flow solver for resistive networks.
//!
//! Given a cloned graph of junctions and resistive edges plus one or more
//! pressure sources, the engine computes per-edge current and the
//! equivalent resistance each source sees. Per source it runs three
//! stages:
//!
//! 1. enumerate every simple path between the source's terminals,
//!    building a shared-state automaton along the way ([`trace`])
//! 2. reduce the automaton symbolically to a closed-form equivalent
//!    resistance (series/parallel elimination)
//! 3. assemble and solve the Kirchhoff loop/junction system for unit
//!    currents, then scale by the configured pressure
//!
//! Path enumeration is exponential in the worst case; this engine is
//! built for small, hand-assembled topologies.

pub mod automaton;
pub mod error;
pub mod flow;
pub mod network;
pub mod trace;

mod expr;
mod reduce;
mod solve;

#[cfg(test)]
pub(crate) mod testnet;

// Re-exports for ergonomics
pub use automaton::{Automaton, State, Transition};
pub use error::{FlowError, FlowResult};
pub use flow::Flow;
pub use network::{FlowNetwork, SourceSpec};
pub use trace::{Trace, TraceLimits, trace};
