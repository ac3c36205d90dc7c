//! Slidedeck - assemble presentations from structured slide content
//!
//! This library turns slide content (a title, exhibit images, bulleted text
//! and footnotes) into rendered slides by choosing a layout able to host the
//! content and compiling a small markup language into formatted text runs.
//!
//! # Features
//!
//! - **Layout resolution**: Match what a slide needs against the placeholders
//!   every layout offers, and fill placeholders in a fixed order
//! - **Slide markup**: `+`/`-`/`^` paragraphs routed to the main, margin and
//!   footnote channels, with `*` italic, `**` bold, `*14` sizes and
//!   `*Georgia` font names
//! - **Validated content**: Exhibits must be PNG or JPEG, text must be valid
//!   XML text, and a failed edit never leaves a slide half-changed
//! - **Pluggable backends**: Rendering goes through the
//!   [`PresentationBackend`] trait; [`MemoryBackend`] records the result and
//!   saves a YAML manifest
//! - **Template layouts** (feature `pptx`): Read the layout catalog of a
//!   `.pptx` template
//!
//! # Example - Building a deck
//!
//! ```rust
//! use slidedeck::{Deck, Layout, LayoutCatalog, MemoryBackend, SlideContent};
//!
//! # fn main() -> slidedeck::Result<()> {
//! let catalog = LayoutCatalog::new(vec![
//!     Layout::new("Title Only").with_placeholder("Title 1", 0),
//!     Layout::new("Title, Text and Notes")
//!         .with_placeholder("Title 1", 0)
//!         .with_placeholder("Main Text", 1)
//!         .with_placeholder("Footer", 2),
//! ]);
//! let mut deck = Deck::new(MemoryBackend::new(catalog))?;
//!
//! let mut slide = SlideContent::new("results")?;
//! slide.set_title("Results")?;
//! slide.add_main_bullets("+ Revenue ** up 12% ++ services led")?;
//! slide.add_footnotes("^ *9 Source: internal reporting")?;
//! deck.add_slide(slide, None)?;
//!
//! let index = deck.find_layout(deck.slide("results").unwrap()).canonical();
//! assert_eq!(index, Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a template
//!
//! ```no_run
//! use slidedeck::{Deck, MemoryBackend};
//!
//! # fn main() -> slidedeck::Result<()> {
//! let backend = MemoryBackend::from_pptx("template.pptx")?;
//! print!("{}", backend.catalog().summary());
//!
//! let mut deck = Deck::new(backend)?;
//! deck.save("deck.yaml")?;
//! # Ok(())
//! # }
//! ```

/// Shared error type, image sniffing and XML text helpers
pub mod common;

/// Layout catalogs, placeholder roles and layout resolution
pub mod layout;

/// Slide markup compiler and DrawingML text output
pub mod markup;

/// Validated slide content
pub mod slide;

/// Decks and presentation backends
pub mod presentation;

// Re-export commonly used types for convenience
pub use common::{Error, ImageFormat, Result};
pub use layout::{ContentRequirement, Layout, LayoutCatalog, Placeholder, Resolution, Role, resolve};
pub use markup::{Channel, CompileOptions, FontState, MarkupCompiler, RunStream, RunToken};
pub use presentation::{Deck, MemoryBackend, PresentationBackend, SlideHandle};
pub use slide::SlideContent;
