//! Error types for synthscan

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors that can occur while validating, analyzing or calibrating
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Invalid dimensions {width}x{height}: each side must be within [{min}, {max}]")]
    InvalidDimensions {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    #[error("Corrupt pixel buffer: expected {expected} bytes, got {actual}")]
    CorruptBuffer { expected: usize, actual: usize },

    #[error("Invalid label '{0}': expected 'positive' or 'negative'")]
    InvalidLabel(String),

    #[error("Corpus full: '{label}' already holds the maximum of {max} samples")]
    CorpusFull { label: String, max: usize },

    #[error("Malformed model: {0}")]
    MalformedModel(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetectError {
    /// Whether this error rejects the caller's input (as opposed to an I/O failure)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DetectError::InvalidSample(_)
                | DetectError::InvalidDimensions { .. }
                | DetectError::CorruptBuffer { .. }
                | DetectError::InvalidLabel(_)
                | DetectError::MalformedModel(_)
        )
    }
}
