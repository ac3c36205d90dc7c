//! Common types and utilities shared across the crate.
//!
//! This module provides the unified error type, image format detection and
//! the XML text helpers used wherever content ends up in DrawingML.

// Submodule declarations
pub mod detection;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use detection::{ImageFormat, sniff_image, validate_exhibit_image};
pub use error::{Error, Result};
