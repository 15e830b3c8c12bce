//! Error types for pad operations.

use thiserror::Error;

/// Result type for pad operations.
pub type PadResult<T> = Result<T, PadError>;

/// Errors that can occur in pad core operations.
#[derive(Debug, Error)]
pub enum PadError {
    /// Prediction value outside its documented range.
    #[error("Invalid prediction: {0}")]
    InvalidPrediction(String),

    /// Surface dimensions or bounds are unusable.
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// Event or prediction serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
