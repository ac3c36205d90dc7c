//! Validated content of one slide.

use super::validate::{validate_exhibit, validate_markup, validate_name, validate_title};
use crate::common::{Error, Result};
use crate::layout::ContentRequirement;
use crate::markup::{Channel, CompileOptions, MarkupCompiler, Paragraph, RunStream, runs_of};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The content of one slide: title, exhibits and three text channels.
///
/// Every mutator validates before it touches the slide, so a failed call
/// leaves the slide exactly as it was. A channel is absent until markup is
/// first added through it; absent and present-but-empty channels are
/// distinguishable through the `Option` returned by the accessors.
///
/// # Examples
///
/// ```rust
/// use slidedeck::slide::SlideContent;
///
/// let mut slide = SlideContent::new("overview")?;
/// slide.set_title("Quarterly overview")?;
/// slide.add_main_bullets("+ Revenue up ++ mostly services - Preliminary")?;
///
/// assert_eq!(slide.main_bullets(), Some(vec!["Revenue up", "mostly services"]));
/// assert_eq!(slide.margin_bullets(), Some(vec!["Preliminary"]));
/// assert_eq!(slide.footnotes(), None);
/// # Ok::<(), slidedeck::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SlideContent {
    name: String,
    title: Option<String>,
    exhibits: Option<Vec<PathBuf>>,
    main: Option<Vec<Paragraph>>,
    margin: Option<Vec<Paragraph>>,
    footnotes: Option<Vec<Paragraph>>,
    compiler: MarkupCompiler,
}

impl SlideContent {
    /// An empty slide compiled with the default options.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_options(name, CompileOptions::default())
    }

    /// An empty slide whose paragraphs start from the given font defaults.
    ///
    /// Defaults that could not be rendered fail with [`Error::Config`].
    pub fn with_options(name: impl Into<String>, options: CompileOptions) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let compiler = MarkupCompiler::with_options(options)?;
        Ok(Self {
            name,
            title: None,
            exhibits: None,
            main: None,
            margin: None,
            footnotes: None,
            compiler,
        })
    }

    /// Start building a slide whose content is validated in one step.
    pub fn builder(name: impl Into<String>) -> SlideContentBuilder {
        SlideContentBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn options(&self) -> &CompileOptions {
        self.compiler.options()
    }

    // ---- title ----

    /// Set or change the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = Some(title);
        Ok(())
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    // ---- exhibits ----

    /// Append an exhibit image. Only PNG and JPEG files are accepted.
    pub fn add_exhibit(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        validate_exhibit(path)?;
        self.exhibits
            .get_or_insert_with(Vec::new)
            .push(path.to_path_buf());
        Ok(())
    }

    #[inline]
    pub fn exhibits(&self) -> Option<&[PathBuf]> {
        self.exhibits.as_deref()
    }

    #[inline]
    pub fn num_exhibits(&self) -> usize {
        self.exhibits.as_ref().map_or(0, Vec::len)
    }

    /// Swap the exhibit at `index` for another image.
    pub fn replace_exhibit(&mut self, index: usize, path: impl AsRef<Path>) -> Result<()> {
        let len = self.num_exhibits();
        if index >= len {
            return Err(Error::IndexOutOfRange {
                what: "exhibits",
                index,
                len,
            });
        }
        let path = path.as_ref();
        validate_exhibit(path)?;
        if let Some(exhibits) = self.exhibits.as_mut() {
            exhibits[index] = path.to_path_buf();
        }
        Ok(())
    }

    // ---- text channels ----

    /// Compile markup and append its paragraphs.
    ///
    /// Markers decide where each paragraph goes, so a call may extend
    /// several channels. The `invoked` channel is marked present even when
    /// nothing lands in it.
    pub fn add_markup(&mut self, invoked: Channel, markup: &str) -> Result<()> {
        validate_markup(markup)?;
        let compiled = self.compiler.compile(markup)?;

        self.channel_mut(invoked).get_or_insert_with(Vec::new);
        for paragraph in compiled.into_paragraphs() {
            self.channel_mut(paragraph.channel())
                .get_or_insert_with(Vec::new)
                .push(paragraph);
        }
        debug!(
            slide = %self.name,
            channel = %invoked,
            main = self.num_bullets(Channel::Main),
            margin = self.num_bullets(Channel::Margin),
            footnotes = self.num_bullets(Channel::Footnote),
            "added markup"
        );
        Ok(())
    }

    pub fn add_main_bullets(&mut self, markup: &str) -> Result<()> {
        self.add_markup(Channel::Main, markup)
    }

    pub fn add_margin_bullets(&mut self, markup: &str) -> Result<()> {
        self.add_markup(Channel::Margin, markup)
    }

    pub fn add_footnotes(&mut self, markup: &str) -> Result<()> {
        self.add_markup(Channel::Footnote, markup)
    }

    /// Compiled paragraphs of a channel, empty ones included.
    pub fn paragraphs(&self, channel: Channel) -> Option<&[Paragraph]> {
        self.channel(channel).map(Vec::as_slice)
    }

    /// Plain text of every paragraph that carries words.
    pub fn bullets(&self, channel: Channel) -> Option<Vec<&str>> {
        self.channel(channel).map(|paragraphs| {
            paragraphs
                .iter()
                .filter(|p| p.has_text())
                .map(Paragraph::text)
                .collect()
        })
    }

    pub fn main_bullets(&self) -> Option<Vec<&str>> {
        self.bullets(Channel::Main)
    }

    pub fn margin_bullets(&self) -> Option<Vec<&str>> {
        self.bullets(Channel::Margin)
    }

    pub fn footnotes(&self) -> Option<Vec<&str>> {
        self.bullets(Channel::Footnote)
    }

    /// Number of paragraphs with words in a channel.
    pub fn num_bullets(&self, channel: Channel) -> usize {
        self.channel(channel)
            .map_or(0, |paragraphs| paragraphs.iter().filter(|p| p.has_text()).count())
    }

    pub fn num_main_bullets(&self) -> usize {
        self.num_bullets(Channel::Main)
    }

    pub fn num_margin_bullets(&self) -> usize {
        self.num_bullets(Channel::Margin)
    }

    pub fn num_footnotes(&self) -> usize {
        self.num_bullets(Channel::Footnote)
    }

    /// Run stream of a channel, derived from its current paragraphs.
    pub fn runs(&self, channel: Channel) -> Option<RunStream> {
        self.channel(channel).map(|paragraphs| runs_of(paragraphs.iter()))
    }

    pub fn main_runs(&self) -> Option<RunStream> {
        self.runs(Channel::Main)
    }

    pub fn margin_runs(&self) -> Option<RunStream> {
        self.runs(Channel::Margin)
    }

    pub fn footnote_runs(&self) -> Option<RunStream> {
        self.runs(Channel::Footnote)
    }

    /// Replace the `index`-th bullet of a channel with newly compiled markup.
    ///
    /// The markup must compile to exactly one paragraph with words, routed to
    /// the same channel.
    pub fn replace_bullet(&mut self, channel: Channel, index: usize, markup: &str) -> Result<()> {
        let position = self.bullet_position(channel, index)?;
        validate_markup(markup)?;

        let mut paragraphs = self.compiler.compile(markup)?.into_paragraphs();
        let replacement = match paragraphs.pop() {
            Some(p) if paragraphs.is_empty() && p.channel() == channel && p.has_text() => p,
            _ => {
                return Err(Error::Validation(format!(
                    "replacement for {} {} must be exactly one {} paragraph with text",
                    channel_items(channel),
                    index,
                    channel
                )));
            },
        };

        if let Some(paragraphs) = self.channel_mut(channel).as_mut() {
            paragraphs[position] = replacement;
        }
        Ok(())
    }

    pub fn replace_main_bullet(&mut self, index: usize, markup: &str) -> Result<()> {
        self.replace_bullet(Channel::Main, index, markup)
    }

    pub fn replace_margin_bullet(&mut self, index: usize, markup: &str) -> Result<()> {
        self.replace_bullet(Channel::Margin, index, markup)
    }

    pub fn replace_footnote(&mut self, index: usize, markup: &str) -> Result<()> {
        self.replace_bullet(Channel::Footnote, index, markup)
    }

    // ---- layout ----

    /// What a layout must offer to host this slide.
    pub fn requirement(&self) -> ContentRequirement {
        ContentRequirement {
            title: self.title.is_some(),
            exhibits: self.num_exhibits(),
            main: self.num_main_bullets() > 0,
            margin: self.num_margin_bullets() > 0,
            footnotes: self.num_footnotes() > 0,
        }
    }

    fn channel(&self, channel: Channel) -> Option<&Vec<Paragraph>> {
        match channel {
            Channel::Main => self.main.as_ref(),
            Channel::Margin => self.margin.as_ref(),
            Channel::Footnote => self.footnotes.as_ref(),
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut Option<Vec<Paragraph>> {
        match channel {
            Channel::Main => &mut self.main,
            Channel::Margin => &mut self.margin,
            Channel::Footnote => &mut self.footnotes,
        }
    }

    /// Position in the channel of the `index`-th paragraph with words.
    fn bullet_position(&self, channel: Channel, index: usize) -> Result<usize> {
        let paragraphs = self.channel(channel).map(Vec::as_slice).unwrap_or_default();
        paragraphs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_text())
            .nth(index)
            .map(|(position, _)| position)
            .ok_or_else(|| Error::IndexOutOfRange {
                what: channel_items(channel),
                index,
                len: self.num_bullets(channel),
            })
    }
}

fn channel_items(channel: Channel) -> &'static str {
    match channel {
        Channel::Main => "main bullets",
        Channel::Margin => "margin bullets",
        Channel::Footnote => "footnotes",
    }
}

impl fmt::Display for SlideContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: exhibits={}, main bullets={}, margin bullets={}, footnotes={}",
            self.name,
            self.title.as_deref().unwrap_or("(untitled)"),
            self.num_exhibits(),
            self.num_main_bullets(),
            self.num_margin_bullets(),
            self.num_footnotes()
        )
    }
}

/// Collects slide content and validates it all in [`build`](Self::build).
///
/// ```rust
/// use slidedeck::slide::SlideContent;
///
/// let slide = SlideContent::builder("summary")
///     .title("Summary")
///     .main_bullets("+ One + Two")
///     .footnotes("^ Source: annual report")
///     .build()?;
/// assert_eq!(slide.num_main_bullets(), 2);
/// assert!(slide.requirement().footnotes);
/// # Ok::<(), slidedeck::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SlideContentBuilder {
    name: String,
    options: CompileOptions,
    title: Option<String>,
    exhibits: Vec<PathBuf>,
    markup: Vec<(Channel, String)>,
}

impl SlideContentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: CompileOptions::default(),
            title: None,
            exhibits: Vec::new(),
            markup: Vec::new(),
        }
    }

    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn exhibit(mut self, path: impl Into<PathBuf>) -> Self {
        self.exhibits.push(path.into());
        self
    }

    pub fn main_bullets(mut self, markup: impl Into<String>) -> Self {
        self.markup.push((Channel::Main, markup.into()));
        self
    }

    pub fn margin_bullets(mut self, markup: impl Into<String>) -> Self {
        self.markup.push((Channel::Margin, markup.into()));
        self
    }

    pub fn footnotes(mut self, markup: impl Into<String>) -> Self {
        self.markup.push((Channel::Footnote, markup.into()));
        self
    }

    /// Validate everything and produce the slide, or the first error found.
    pub fn build(self) -> Result<SlideContent> {
        let mut slide = SlideContent::with_options(self.name, self.options)?;
        if let Some(title) = self.title {
            slide.set_title(title)?;
        }
        for path in &self.exhibits {
            slide.add_exhibit(path)?;
        }
        for (channel, markup) in &self.markup {
            slide.add_markup(*channel, markup)?;
        }
        Ok(slide)
    }
}
