//! The seam between a deck and the document it renders into.

use crate::common::Result;
use crate::layout::LayoutCatalog;
use crate::markup::RunStream;
use std::fmt;
use std::path::Path;

/// Opaque reference to a slide created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideHandle(pub usize);

impl fmt::Display for SlideHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide #{}", self.0)
    }
}

/// A presentation document that slides can be rendered into.
///
/// Placeholders are addressed by the slot index the layout declares for
/// them (`ph@idx` in a `.pptx` layout), never by position.
pub trait PresentationBackend {
    /// Layouts the document offers, in layout order.
    fn layouts(&self) -> Result<LayoutCatalog>;

    /// Append a new slide based on a layout.
    fn create_slide(&mut self, layout: usize) -> Result<SlideHandle>;

    /// Put plain title text into a placeholder.
    fn set_title(&mut self, slide: SlideHandle, placeholder: u32, text: &str) -> Result<()>;

    /// Replace a placeholder's text with formatted runs.
    ///
    /// Paragraph levels and font name, size, bold and italic must be applied
    /// exactly; a combination the document cannot express is an
    /// [`Error::Render`](crate::Error::Render).
    fn set_text(&mut self, slide: SlideHandle, placeholder: u32, runs: &RunStream) -> Result<()>;

    /// Insert an image into a picture placeholder.
    fn insert_image(&mut self, slide: SlideHandle, placeholder: u32, path: &Path) -> Result<()>;

    /// Write the document.
    fn save(&mut self, path: &Path) -> Result<()>;
}
