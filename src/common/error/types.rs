//! Unified error types for slidedeck.
//!
//! Every fallible operation in the crate reports through this one enum, from
//! content validation up to the backend rendering calls.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for slidedeck operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong value shape for a title, bullet, footnote or exhibit
    #[error("Validation error: {0}")]
    Validation(String),

    /// Exhibit is not a PNG or JPEG image
    #[error("Unsupported image format for {path}: {format} (exhibits must be PNG or JPEG)")]
    UnsupportedImageFormat { path: PathBuf, format: String },

    /// Markup does not start with a recognized paragraph marker
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// No layout can host the slide and no override was given
    #[error("No conforming layout: {0}")]
    LayoutNotFound(String),

    /// Index-based operation given an index outside the collection
    #[error("Index {index} out of range for {what} (length {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The backend could not apply a slide, text body or image
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Configuration could not be read or written
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for slidedeck operations.
pub type Result<T> = std::result::Result<T, Error>;
