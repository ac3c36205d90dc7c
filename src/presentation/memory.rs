//! A backend that keeps rendered slides in memory.

use super::{PresentationBackend, SlideHandle};
use crate::common::{Error, Result, sniff_image};
use crate::layout::{Layout, LayoutCatalog};
use crate::markup::{RunStream, drawingml};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a placeholder was filled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceholderFill {
    Title { text: String },
    /// A DrawingML `<p:txBody>` and the runs it was written from.
    Text { body: String, runs: RunStream },
    Image { path: PathBuf, mime: String },
}

/// One slide as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlide {
    pub layout: usize,
    pub layout_name: String,
    /// Fills keyed by placeholder slot index
    pub placeholders: BTreeMap<u32, PlaceholderFill>,
}

impl RenderedSlide {
    pub fn fill(&self, placeholder: u32) -> Option<&PlaceholderFill> {
        self.placeholders.get(&placeholder)
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    layouts: Vec<&'a str>,
    slides: &'a [RenderedSlide],
}

/// Records slides and placeholder fills instead of writing a document.
///
/// Fills are checked against the slide's layout: a slot the layout does not
/// declare, or one that is already filled, is a render error. `save` writes
/// a YAML manifest of everything rendered, which makes the backend usable as
/// a dry run of a deck.
///
/// # Examples
///
/// ```rust
/// use slidedeck::layout::{Layout, LayoutCatalog};
/// use slidedeck::presentation::{MemoryBackend, PresentationBackend};
///
/// let mut backend = MemoryBackend::new(LayoutCatalog::new(vec![
///     Layout::new("Title Only").with_placeholder("Title 1", 0),
/// ]));
/// let slide = backend.create_slide(0)?;
/// backend.set_title(slide, 0, "Hello")?;
/// assert!(backend.set_title(slide, 7, "nowhere").is_err());
/// assert_eq!(backend.slides().len(), 1);
/// # Ok::<(), slidedeck::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    catalog: LayoutCatalog,
    slides: Vec<RenderedSlide>,
}

impl MemoryBackend {
    pub fn new(catalog: LayoutCatalog) -> Self {
        Self {
            catalog,
            slides: Vec::new(),
        }
    }

    /// Use the layouts of a `.pptx` template.
    #[cfg(feature = "pptx")]
    pub fn from_pptx<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LayoutCatalog::from_pptx(path)?))
    }

    #[inline]
    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Slides rendered so far, in creation order.
    #[inline]
    pub fn slides(&self) -> &[RenderedSlide] {
        &self.slides
    }

    /// The manifest `save` writes.
    pub fn to_yaml(&self) -> Result<String> {
        let manifest = Manifest {
            layouts: self.catalog.iter().map(Layout::name).collect(),
            slides: &self.slides,
        };
        serde_saphyr::to_string(&manifest)
            .map_err(|e| Error::Render(format!("Failed to serialize deck manifest: {}", e)))
    }

    fn fill(&mut self, slide: SlideHandle, placeholder: u32, fill: PlaceholderFill) -> Result<()> {
        let rendered = self
            .slides
            .get_mut(slide.0)
            .ok_or_else(|| Error::Render(format!("{} was never created", slide)))?;

        let declared = self
            .catalog
            .get(rendered.layout)
            .is_some_and(|layout| layout.has_slot(placeholder));
        if !declared {
            return Err(Error::Render(format!(
                "layout {} ({}) has no placeholder {} for {}",
                rendered.layout, rendered.layout_name, placeholder, slide
            )));
        }
        if rendered.placeholders.contains_key(&placeholder) {
            return Err(Error::Render(format!(
                "placeholder {} on {} is already filled",
                placeholder, slide
            )));
        }

        debug!(%slide, placeholder, "filled placeholder");
        rendered.placeholders.insert(placeholder, fill);
        Ok(())
    }
}

impl PresentationBackend for MemoryBackend {
    fn layouts(&self) -> Result<LayoutCatalog> {
        Ok(self.catalog.clone())
    }

    fn create_slide(&mut self, layout: usize) -> Result<SlideHandle> {
        let layout_name = self
            .catalog
            .get(layout)
            .map(|l| l.name().to_string())
            .ok_or_else(|| Error::IndexOutOfRange {
                what: "layouts",
                index: layout,
                len: self.catalog.len(),
            })?;
        self.slides.push(RenderedSlide {
            layout,
            layout_name,
            placeholders: BTreeMap::new(),
        });
        Ok(SlideHandle(self.slides.len() - 1))
    }

    fn set_title(&mut self, slide: SlideHandle, placeholder: u32, text: &str) -> Result<()> {
        self.fill(
            slide,
            placeholder,
            PlaceholderFill::Title {
                text: text.to_string(),
            },
        )
    }

    fn set_text(&mut self, slide: SlideHandle, placeholder: u32, runs: &RunStream) -> Result<()> {
        let body = drawingml::write_text_body(runs)?;
        self.fill(
            slide,
            placeholder,
            PlaceholderFill::Text {
                body,
                runs: runs.clone(),
            },
        )
    }

    fn insert_image(&mut self, slide: SlideHandle, placeholder: u32, path: &Path) -> Result<()> {
        let format = sniff_image(path)?.ok_or_else(|| {
            Error::Render(format!("{} is not a recognizable image", path.display()))
        })?;
        self.fill(
            slide,
            placeholder,
            PlaceholderFill::Image {
                path: path.to_path_buf(),
                mime: format.mime_type().to_string(),
            },
        )
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml)?;
        info!(path = %path.display(), slides = self.slides.len(), "wrote deck manifest");
        Ok(())
    }
}
