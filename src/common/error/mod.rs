//! Unified error types for slidedeck.
//!
//! This module provides the single error type shared by layout resolution,
//! markup compilation, slide validation and rendering.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
