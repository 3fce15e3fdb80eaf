use thiserror::Error;

/// Error types for the ensemble-ts library.
#[derive(Error, Debug)]
pub enum EnsembleError {
    /// Error indicating a mismatch in array or series dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error indicating that two series cannot be aligned on a common time grid.
    #[error("Mismatched time grids: {0}")]
    MismatchedTimeGrid(String),

    /// Error for an unsupported method, statistic, axis or option value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error indicating an ensemble with no members.
    #[error("Empty ensemble: {0}")]
    EmptyEnsemble(String),

    /// Error during numerical computation (undefined statistics, zero variance, ...).
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for ensemble-ts operations.
pub type Result<T> = std::result::Result<T, EnsembleError>;
