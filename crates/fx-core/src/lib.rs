//! fx-core: stable foundation for fluxnet.
//!
//! Contains:
//! - ids (compact arena handles shared by the graph and engine crates)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error type)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FxError, FxResult};
pub use ids::*;
pub use numeric::*;
