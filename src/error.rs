//! Error types for the slide collator library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the slide collator library
///
/// Missing slides and missing encoders are not errors; they are reported
/// through [`crate::collate::Outcome`]. Everything here aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[cfg(feature = "raster")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File is not a well-formed PNG
    #[error("Invalid PNG {}: {reason}", .path.display())]
    InvalidPng { path: PathBuf, reason: String },

    /// PNG is valid but cannot be embedded without re-encoding
    #[error("Cannot embed {} losslessly: {reason} (try --encoder raster)", .path.display())]
    UnsupportedPng { path: PathBuf, reason: String },

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// General error
    #[error("{0}")]
    General(String),
}
