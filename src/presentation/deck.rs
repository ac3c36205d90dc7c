//! An ordered deck of slides rendered through a backend.

use super::{PresentationBackend, SlideHandle};
use crate::common::{Error, Result};
use crate::layout::{Layout, LayoutCatalog, Resolution, Role, resolve};
use crate::markup::{Channel, RunStream, drawingml};
use crate::slide::SlideContent;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct DeckSlide {
    content: SlideContent,
    /// Layout chosen by the caller instead of the resolved one
    layout: Option<usize>,
}

/// A placeholder fill decided before the backend is touched.
enum Fill<'a> {
    Title(&'a str),
    Image(&'a Path),
    Text(RunStream),
}

/// A presentation under construction.
///
/// The deck keeps slides in rendering order and owns the backend they are
/// rendered into. Adding a slide only checks that some layout can host it;
/// nothing reaches the backend until [`render_slide`](Self::render_slide) or
/// [`save`](Self::save).
///
/// # Examples
///
/// ```rust
/// use slidedeck::layout::{Layout, LayoutCatalog};
/// use slidedeck::presentation::{Deck, MemoryBackend};
/// use slidedeck::slide::SlideContent;
///
/// let backend = MemoryBackend::new(LayoutCatalog::new(vec![
///     Layout::new("Title and Text")
///         .with_placeholder("Title 1", 0)
///         .with_placeholder("Main Text", 1),
/// ]));
/// let mut deck = Deck::new(backend)?;
///
/// let mut slide = SlideContent::new("intro")?;
/// slide.set_title("Welcome")?;
/// slide.add_main_bullets("+ First point ++ detail")?;
/// deck.add_slide(slide, None)?;
///
/// assert_eq!(deck.num_slides(), 1);
/// assert_eq!(deck.slide_names(), vec!["intro"]);
/// # Ok::<(), slidedeck::Error>(())
/// ```
pub struct Deck<B: PresentationBackend> {
    backend: B,
    catalog: LayoutCatalog,
    slides: Vec<DeckSlide>,
}

impl<B: PresentationBackend> Deck<B> {
    /// Create an empty deck over a backend, reading its layouts once.
    pub fn new(backend: B) -> Result<Self> {
        let catalog = backend.layouts()?;
        debug!(layouts = catalog.len(), "opened deck");
        Ok(Self {
            backend,
            catalog,
            slides: Vec::new(),
        })
    }

    #[inline]
    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    // ---- slide collection ----

    #[inline]
    pub fn num_slides(&self) -> usize {
        self.slides.len()
    }

    /// Slides in rendering order.
    pub fn slides(&self) -> impl Iterator<Item = &SlideContent> + '_ {
        self.slides.iter().map(|s| &s.content)
    }

    /// The first slide with the given name.
    pub fn slide(&self, name: &str) -> Option<&SlideContent> {
        self.slides().find(|s| s.name() == name)
    }

    /// Mutable access to the first slide with the given name.
    pub fn slide_mut(&mut self, name: &str) -> Option<&mut SlideContent> {
        self.slides
            .iter_mut()
            .map(|s| &mut s.content)
            .find(|s| s.name() == name)
    }

    pub fn slide_names(&self) -> Vec<&str> {
        self.slides().map(SlideContent::name).collect()
    }

    /// Layouts able to host a slide, best first.
    pub fn find_layout(&self, slide: &SlideContent) -> Resolution {
        resolve(&slide.requirement(), &self.catalog)
    }

    /// Add a slide, checking that some layout can host it.
    ///
    /// With `index` the slide is inserted at that position (`index` equal to
    /// the number of slides appends); without it the slide is appended.
    /// Returns the slide's position.
    pub fn add_slide(&mut self, slide: SlideContent, index: Option<usize>) -> Result<usize> {
        let layout = self.find_layout(&slide).into_layout()?;
        debug!(slide = slide.name(), layout, "slide fits layout");
        self.insert(
            DeckSlide {
                content: slide,
                layout: None,
            },
            index,
        )
    }

    /// Add a slide that will always render with the given layout.
    pub fn add_slide_with_layout(
        &mut self,
        slide: SlideContent,
        layout: usize,
        index: Option<usize>,
    ) -> Result<usize> {
        self.layout(layout)?;
        self.insert(
            DeckSlide {
                content: slide,
                layout: Some(layout),
            },
            index,
        )
    }

    /// Remove the first slide with the given name.
    ///
    /// Returns `false` when no slide has that name.
    pub fn del_slide(&mut self, name: &str) -> bool {
        match self.slides.iter().position(|s| s.content.name() == name) {
            Some(position) => {
                self.slides.remove(position);
                debug!(slide = name, position, "deleted slide");
                true
            },
            None => {
                warn!(slide = name, "no slide with this name to delete");
                false
            },
        }
    }

    // ---- rendering ----

    /// Render one slide into the backend.
    ///
    /// Placeholders are filled title first, then exhibits, then main, margin
    /// and footnote text. Without `layout` the first conforming layout is
    /// used and a slide no layout can host fails with
    /// [`Error::LayoutNotFound`]. Every placeholder is assigned and every
    /// text fill checked before the backend creates the slide, so a layout
    /// lacking a needed placeholder or text the backend cannot write fails
    /// without leaving a half-filled slide behind.
    pub fn render_slide(
        &mut self,
        slide: &SlideContent,
        layout: Option<usize>,
    ) -> Result<SlideHandle> {
        let plan = plan_slide(&self.catalog, slide, layout)?;
        commit(&mut self.backend, &plan)
    }

    /// Render every slide in order, then save the backend's document.
    ///
    /// All slides are planned before the first one is rendered, so a slide
    /// that cannot be rendered fails the save with nothing sent to the
    /// backend.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let plans = self
            .slides
            .iter()
            .map(|entry| plan_slide(&self.catalog, &entry.content, entry.layout))
            .collect::<Result<Vec<_>>>()?;
        for plan in &plans {
            commit(&mut self.backend, plan)?;
        }
        self.backend.save(path)?;
        info!(path = %path.display(), slides = self.slides.len(), "saved deck");
        Ok(())
    }

    fn layout(&self, index: usize) -> Result<&Layout> {
        self.catalog.get(index).ok_or_else(|| Error::IndexOutOfRange {
            what: "layouts",
            index,
            len: self.catalog.len(),
        })
    }

    fn insert(&mut self, entry: DeckSlide, index: Option<usize>) -> Result<usize> {
        let len = self.slides.len();
        let position = match index {
            Some(index) if index > len => {
                return Err(Error::IndexOutOfRange {
                    what: "slides",
                    index,
                    len,
                });
            },
            Some(index) => index,
            None => len,
        };
        self.slides.insert(position, entry);
        Ok(position)
    }
}

/// A slide whose layout and placeholder fills are settled.
struct SlidePlan<'a> {
    slide: &'a SlideContent,
    layout: usize,
    fills: Vec<(u32, Fill<'a>)>,
}

/// Choose the layout and check every fill without touching the backend.
fn plan_slide<'a>(
    catalog: &LayoutCatalog,
    slide: &'a SlideContent,
    layout: Option<usize>,
) -> Result<SlidePlan<'a>> {
    let index = match layout {
        Some(index) => index,
        None => resolve(&slide.requirement(), catalog).into_layout()?,
    };
    let chosen = catalog.get(index).ok_or_else(|| Error::IndexOutOfRange {
        what: "layouts",
        index,
        len: catalog.len(),
    })?;
    Ok(SlidePlan {
        slide,
        layout: index,
        fills: plan_fills(slide, chosen)?,
    })
}

fn commit<B: PresentationBackend>(backend: &mut B, plan: &SlidePlan<'_>) -> Result<SlideHandle> {
    let handle = backend.create_slide(plan.layout)?;
    for (placeholder, fill) in &plan.fills {
        match fill {
            Fill::Title(text) => backend.set_title(handle, *placeholder, text)?,
            Fill::Image(path) => backend.insert_image(handle, *placeholder, path)?,
            Fill::Text(runs) => backend.set_text(handle, *placeholder, runs)?,
        }
    }

    info!(
        slide = plan.slide.name(),
        layout = plan.layout,
        placeholders = plan.fills.len(),
        %handle,
        "rendered slide"
    );
    Ok(handle)
}

/// Assign slide content to placeholder slots in rendering order.
///
/// Text is checked against what the backend can write, so paragraph levels
/// and font states that cannot be rendered fail here.
fn plan_fills<'a>(slide: &'a SlideContent, layout: &Layout) -> Result<Vec<(u32, Fill<'a>)>> {
    let index = layout.index();
    let mut fills = Vec::new();

    if let Some(title) = slide.title() {
        let slot = layout.placeholder_stack(Role::Title).take_required(index)?;
        fills.push((slot, Fill::Title(title)));
    }

    if let Some(exhibits) = slide.exhibits() {
        let mut pictures = layout.placeholder_stack(Role::Picture);
        for path in exhibits {
            fills.push((pictures.take_required(index)?, Fill::Image(path)));
        }
    }

    for channel in Channel::ALL {
        if slide.num_bullets(channel) == 0 {
            continue;
        }
        if let Some(runs) = slide.runs(channel) {
            drawingml::check_runs(&runs)?;
            let slot = layout.placeholder_stack(channel.role()).take_required(index)?;
            fills.push((slot, Fill::Text(runs)));
        }
    }

    Ok(fills)
}

impl<B: PresentationBackend> fmt::Display for Deck<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deck: {} slide(s), {} layout(s)",
            self.slides.len(),
            self.catalog.len()
        )?;
        for (i, entry) in self.slides.iter().enumerate() {
            write!(f, "  {}. {}", i + 1, entry.content)?;
            if let Some(layout) = entry.layout {
                write!(f, " [layout {}]", layout)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
