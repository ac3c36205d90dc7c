//! File format detection utilities.
//!
//! Detection is based on file signatures (magic numbers), reading only the
//! minimal amount of data required for identification.

// Submodule declarations
pub mod image;

// Re-exports
pub use image::{ImageFormat, sniff_image, validate_exhibit_image};
