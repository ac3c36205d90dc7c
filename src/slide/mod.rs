//! Slide content.
//!
//! [`SlideContent`] holds what goes on one slide and checks each piece as it
//! arrives: titles and markup must be valid XML text, exhibits must be PNG or
//! JPEG files and markup must compile. Its [`requirement`](SlideContent::requirement)
//! is what layout resolution works from.

// Submodule declarations
mod content;
pub mod validate;

// Re-exports
pub use content::{SlideContent, SlideContentBuilder};
