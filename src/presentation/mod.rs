//! Decks and the documents they render into.
//!
//! A [`Deck`] orders slides and renders them through a
//! [`PresentationBackend`], which owns the actual document. Rendering a slide
//! creates it from a layout and fills that layout's placeholders: the title,
//! then each exhibit, then the main, margin and footnote text.
//!
//! [`MemoryBackend`] is a complete backend that records what was rendered and
//! saves a YAML manifest instead of a presentation file.
//!
//! # Example
//!
//! ```rust
//! use slidedeck::layout::{Layout, LayoutCatalog};
//! use slidedeck::presentation::{Deck, MemoryBackend, PlaceholderFill};
//! use slidedeck::slide::SlideContent;
//!
//! let backend = MemoryBackend::new(LayoutCatalog::new(vec![
//!     Layout::new("Title Only").with_placeholder("Title 1", 0),
//!     Layout::new("Title and Text")
//!         .with_placeholder("Title 1", 0)
//!         .with_placeholder("Main Text", 1),
//! ]));
//! let mut deck = Deck::new(backend)?;
//!
//! let slide = SlideContent::builder("agenda")
//!     .title("Agenda")
//!     .main_bullets("+ Results + Outlook")
//!     .build()?;
//! let handle = deck.render_slide(&slide, None)?;
//!
//! let rendered = &deck.backend().slides()[handle.0];
//! assert_eq!(rendered.layout_name, "Title and Text");
//! assert!(matches!(rendered.fill(1), Some(PlaceholderFill::Text { .. })));
//! # Ok::<(), slidedeck::Error>(())
//! ```

// Submodule declarations
mod backend;
mod deck;
mod memory;

// Re-exports
pub use backend::{PresentationBackend, SlideHandle};
pub use deck::Deck;
pub use memory::{MemoryBackend, PlaceholderFill, RenderedSlide};
