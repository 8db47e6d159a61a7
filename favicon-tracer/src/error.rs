//! Error types for the tracing pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tracer operations
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors that can occur while turning a raster image into an SVG document
#[derive(Error, Debug)]
pub enum TraceError {
    /// Input missing, unreadable or undecodable
    #[error("Failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Pixel grid whose rows or buffer do not match its declared dimensions
    #[error("Malformed image: {0}")]
    MalformedImage(String),

    /// Negative or out-of-range canvas size
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Destination not writable
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
