//! Typed failures of the ranking pipeline.

/// Errors produced while ranking packages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankError {
    /// The request was malformed and the operation did not start.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The user does not exist or has no packages.
    #[error("not found: {0}")]
    NotFound(String),

    /// A call to the registry or the downloads API failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A download series is too short to compute the requested statistic.
    #[error("insufficient data: need at least {required} days of downloads, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}
