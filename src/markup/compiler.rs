//! The markup-to-runs compiler.

use super::token::{Directive, Token, Tokenizer};
use super::{Channel, CompileOptions, FontState, Paragraph, RunStream, RunToken, runs_of};
use crate::common::{Error, Result};
use tracing::{debug, warn};

/// Paragraphs produced by compiling one markup string, in source order.
///
/// Markers route each paragraph to its channel, so one string may feed
/// several channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledMarkup {
    paragraphs: Vec<Paragraph>,
}

impl CompiledMarkup {
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraphs routed to one channel.
    pub fn paragraphs_for(&self, channel: Channel) -> impl Iterator<Item = &Paragraph> + '_ {
        self.paragraphs.iter().filter(move |p| p.channel == channel)
    }

    /// Run stream of one channel.
    pub fn runs(&self, channel: Channel) -> RunStream {
        runs_of(self.paragraphs_for(channel))
    }

    /// Whether any paragraph went to the channel.
    pub fn touches(&self, channel: Channel) -> bool {
        self.paragraphs_for(channel).next().is_some()
    }

    pub fn into_paragraphs(self) -> Vec<Paragraph> {
        self.paragraphs
    }
}

/// Compiles slide markup into run streams.
///
/// # Examples
///
/// ```rust
/// use slidedeck::markup::{Channel, FontState, MarkupCompiler, RunToken};
///
/// let compiler = MarkupCompiler::new();
/// let runs = compiler.compile_channel("+ Hello world", Channel::Main)?;
/// assert_eq!(
///     runs.tokens(),
///     &[
///         RunToken::ParagraphStart { level: 1 },
///         RunToken::FontState(FontState::default()),
///         RunToken::TextSegment { text: "Hello world".to_string() },
///     ]
/// );
/// # Ok::<(), slidedeck::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkupCompiler {
    options: CompileOptions,
}

impl MarkupCompiler {
    /// Compiler with Arial 11pt paragraph defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with custom paragraph defaults.
    ///
    /// Fails with [`Error::Config`] when the defaults could not be rendered.
    pub fn with_options(options: CompileOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    #[inline]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a markup string.
    ///
    /// The first token must open a paragraph (`+`, `-` or `^`); otherwise the
    /// markup is rejected with [`Error::MalformedMarkup`].
    pub fn compile(&self, markup: &str) -> Result<CompiledMarkup> {
        let mut tokens = Tokenizer::new(markup);

        let mut state = match tokens.next().transpose()? {
            Some(Token::Marker { channel, level }) => {
                CompileState::new(self.options.default_font(), channel, level)
            },
            Some(_) => {
                return Err(Error::MalformedMarkup(format!(
                    "must start with one or more \"+\" (main), \"-\" (margin) or \"^\" (footnote): {:?}",
                    markup.trim()
                )));
            },
            None => return Err(Error::MalformedMarkup("markup is empty".to_string())),
        };

        for token in tokens {
            match token? {
                Token::Marker { channel, level } => state.open_paragraph(channel, level),
                Token::Directive(directive) => state.apply(directive),
                Token::Word(word) => state.push_word(word),
            }
        }

        Ok(state.finish())
    }

    /// Compile a markup string and keep only one channel's runs.
    pub fn compile_channel(&self, markup: &str, channel: Channel) -> Result<RunStream> {
        Ok(self.compile(markup)?.runs(channel))
    }
}

/// Compile with the default options.
pub fn compile(markup: &str) -> Result<CompiledMarkup> {
    MarkupCompiler::new().compile(markup)
}

struct CompileState {
    defaults: FontState,
    font: FontState,
    current: Paragraph,
    pending: String,
    done: Vec<Paragraph>,
}

impl CompileState {
    fn new(defaults: FontState, channel: Channel, level: usize) -> Self {
        Self {
            font: defaults.clone(),
            current: Paragraph::start(channel, level, defaults.clone()),
            defaults,
            pending: String::new(),
            done: Vec::new(),
        }
    }

    /// Emit the pending words as one segment under the current font.
    fn flush_segment(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.current.tokens.push(RunToken::TextSegment { text });
        }
    }

    fn open_paragraph(&mut self, channel: Channel, level: usize) {
        self.flush_segment();
        self.font = self.defaults.clone();
        let next = Paragraph::start(channel, level, self.font.clone());
        let finished = std::mem::replace(&mut self.current, next);
        self.done.push(finished);
    }

    fn apply(&mut self, directive: Directive<'_>) {
        self.flush_segment();
        self.font = match directive {
            Directive::ToggleItalic => self.font.toggled_italic(),
            Directive::ToggleBold => self.font.toggled_bold(),
            Directive::FontSize(size) => self.font.with_size(size),
            Directive::FontName(name) => self.font.with_name(name),
            Directive::Unrecognized(raw) => {
                warn!(directive = raw, "unrecognized formatting directive left font unchanged");
                self.font.clone()
            },
        };
        debug!(?directive, font = %self.font, "applied directive");
        self.current.tokens.push(RunToken::FontState(self.font.clone()));
    }

    fn push_word(&mut self, word: &str) {
        for buffer in [&mut self.pending, &mut self.current.text] {
            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(word);
        }
    }

    fn finish(mut self) -> CompiledMarkup {
        self.flush_segment();
        self.done.push(self.current);
        CompiledMarkup {
            paragraphs: self.done,
        }
    }
}
