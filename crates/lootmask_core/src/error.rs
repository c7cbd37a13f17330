//! Error types for mask generation.

use thiserror::Error;

/// Result type alias using [`MaskError`].
pub type Result<T> = std::result::Result<T, MaskError>;

/// Top-level error type for the core transformation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// World size must be a positive number of world units.
    #[error("Invalid world size: {0} (must be greater than zero)")]
    InvalidWorldSize(u32),

    /// Layer size must be a positive number of pixels.
    #[error("Invalid layer size: {0} (must be greater than zero)")]
    InvalidLayerSize(u32),
}
