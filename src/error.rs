use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Construction is the only fallible operation: once a `Simulation` exists,
/// every per-frame computation is total. Numeric edge cases inside a frame
/// (e.g. limiting a zero-length velocity) are handled locally and never
/// surface as errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid simulation configuration (zero population, non-finite or
    /// negative scalar parameter).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
