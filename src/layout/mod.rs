//! Slide layouts and layout resolution.
//!
//! A [`LayoutCatalog`] lists the layouts a presentation template offers. Each
//! [`Layout`] owns named placeholder slots whose [`Role`] comes from the name
//! prefix. [`resolve`] picks the layouts able to host a slide's
//! [`ContentRequirement`].
//!
//! # Example
//!
//! ```rust
//! use slidedeck::layout::{ContentRequirement, Layout, LayoutCatalog, resolve};
//!
//! let catalog = LayoutCatalog::new(vec![
//!     Layout::new("Title").with_placeholder("Title 1", 0),
//!     Layout::new("Two Pictures")
//!         .with_placeholder("Title 1", 0)
//!         .with_placeholder("Pic 1", 13)
//!         .with_placeholder("Pic 2", 14),
//! ]);
//!
//! let needs = ContentRequirement { title: true, exhibits: 2, ..Default::default() };
//! assert_eq!(resolve(&needs, &catalog).canonical(), Some(1));
//! ```

// Submodule declarations
mod catalog;
#[cfg(feature = "pptx")]
mod pptx;
mod resolver;
mod role;
mod stack;

// Re-exports
pub use catalog::{Layout, LayoutCatalog, Placeholder};
pub use resolver::{ContentRequirement, Resolution, resolve};
pub use role::Role;
pub use stack::PlaceholderStack;
