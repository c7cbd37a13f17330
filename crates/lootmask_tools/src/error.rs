//! Error types for the mask generation tool.

use lootmask_core::error::MaskError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that abort a tool run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// One or more input files are missing.
    #[error("Setup incomplete, please add: {}", .0.join("; "))]
    MissingInputs(Vec<String>),

    /// Failed to read or write a file or directory.
    #[error("IO error on '{path}': {source}")]
    Io {
        /// Path being accessed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to deserialize an XML input document.
    #[error("Failed to parse XML document '{path}': {source}")]
    Xml {
        /// Path to the document.
        path: String,
        /// Underlying deserialization error.
        #[source]
        source: quick_xml::DeError,
    },

    /// Failed to parse a RON settings file.
    #[error("Failed to parse settings file '{path}': {source}")]
    Settings {
        /// Path to the settings file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to encode or write a mask image.
    #[error("Failed to write mask '{path}': {source}")]
    Image {
        /// Output path.
        path: String,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Mask buffer did not match its declared dimensions.
    #[error("Mask buffer for layer '{0}' does not match its size")]
    MaskBuffer(String),

    /// Failed to serialize the run summary.
    #[error("Failed to write report '{path}': {source}")]
    Report {
        /// Output path.
        path: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to build the worker pool.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid raster geometry or layer reference.
    #[error(transparent)]
    Mask(#[from] MaskError),
}

impl ToolError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
