//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while drawing or exporting.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The raster could not be allocated; the surface is unusable.
    #[error("Surface initialization failed: {0}")]
    SurfaceInit(String),

    /// Requested export size cannot be produced.
    #[error("Invalid export target: {0}")]
    InvalidTarget(String),

    /// Encoding produced no payload.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// An encoded payload could not be read back.
    #[error("Decoding failed: {0}")]
    Decode(String),
}
