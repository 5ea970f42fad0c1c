use thiserror::Error;

pub type FxResult<T> = Result<T, FxError>;

/// Shared error type for the foundation layer.
///
/// Crate-specific errors (graph cloning, flow solving, circuit editing)
/// live in their own crates and convert into or wrap this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("invariant violated: {what}")]
    Invariant { what: String },
}
