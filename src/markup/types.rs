//! Run tokens, run streams and compiled paragraphs.

use crate::layout::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default font family applied at every paragraph start.
pub const DEFAULT_FONT_NAME: &str = "Arial";
/// Default font size in points applied at every paragraph start.
pub const DEFAULT_FONT_SIZE_PT: u32 = 11;

/// One of the three independent text streams on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Main,
    Margin,
    Footnote,
}

impl Channel {
    /// All channels in rendering order.
    pub const ALL: [Channel; 3] = [Channel::Main, Channel::Margin, Channel::Footnote];

    /// The channel a paragraph marker character selects.
    #[inline]
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '+' => Some(Channel::Main),
            '-' => Some(Channel::Margin),
            '^' => Some(Channel::Footnote),
            _ => None,
        }
    }

    /// Marker character that opens a paragraph in this channel.
    #[inline]
    pub fn marker(self) -> char {
        match self {
            Channel::Main => '+',
            Channel::Margin => '-',
            Channel::Footnote => '^',
        }
    }

    /// Placeholder role that receives this channel's text.
    #[inline]
    pub fn role(self) -> Role {
        match self {
            Channel::Main => Role::Main,
            Channel::Margin => Role::Margin,
            Channel::Footnote => Role::Footer,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Main => "main",
            Channel::Margin => "margin",
            Channel::Footnote => "footnote",
        })
    }
}

/// Active character formatting for the text that follows it.
///
/// Values are never modified in place; each change derives a new state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontState {
    pub name: String,
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontState {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE_PT)
    }
}

impl FontState {
    /// Plain (not bold, not italic) state for a font and size.
    pub fn new(name: impl Into<String>, size_pt: u32) -> Self {
        Self {
            name: name.into(),
            size_pt,
            bold: false,
            italic: false,
        }
    }

    pub fn toggled_bold(&self) -> Self {
        Self {
            bold: !self.bold,
            ..self.clone()
        }
    }

    pub fn toggled_italic(&self) -> Self {
        Self {
            italic: !self.italic,
            ..self.clone()
        }
    }

    pub fn with_size(&self, size_pt: u32) -> Self {
        Self {
            size_pt,
            ..self.clone()
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for FontState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.name, self.size_pt)?;
        if self.bold {
            f.write_str(" bold")?;
        }
        if self.italic {
            f.write_str(" italic")?;
        }
        Ok(())
    }
}

/// A single compiled directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunToken {
    /// Start a new paragraph at the given indentation level.
    ParagraphStart { level: usize },
    /// Formatting for the text segments that follow.
    FontState(FontState),
    /// Literal text appended to the current paragraph.
    TextSegment { text: String },
}

impl fmt::Display for RunToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunToken::ParagraphStart { level } => write!(f, "paragraph (level {})", level),
            RunToken::FontState(font) => write!(f, "font {}", font),
            RunToken::TextSegment { text } => write!(f, "text {:?}", text),
        }
    }
}

/// Ordered run tokens of one channel of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunStream {
    tokens: Vec<RunToken>,
}

impl RunStream {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn tokens(&self) -> &[RunToken] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RunToken> {
        self.tokens.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// A new stream holding this stream's tokens followed by `other`'s.
    pub fn concat(&self, other: &RunStream) -> RunStream {
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// Number of paragraph starts in the stream.
    pub fn paragraph_count(&self) -> usize {
        self.iter()
            .filter(|t| matches!(t, RunToken::ParagraphStart { .. }))
            .count()
    }

    /// Iterate over the literal text segments.
    pub fn text_segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter_map(|t| match t {
            RunToken::TextSegment { text } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl FromIterator<RunToken> for RunStream {
    fn from_iter<I: IntoIterator<Item = RunToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RunStream {
    type Item = &'a RunToken;
    type IntoIter = std::slice::Iter<'a, RunToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for RunStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            writeln!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// One compiled paragraph: its channel, level, tokens and plain text.
///
/// `tokens` always begins with the `ParagraphStart` of the paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub(crate) channel: Channel,
    pub(crate) level: usize,
    pub(crate) tokens: Vec<RunToken>,
    pub(crate) text: String,
}

impl Paragraph {
    pub(crate) fn start(channel: Channel, level: usize, font: FontState) -> Self {
        Self {
            channel,
            level,
            tokens: vec![RunToken::ParagraphStart { level }, RunToken::FontState(font)],
            text: String::new(),
        }
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn tokens(&self) -> &[RunToken] {
        &self.tokens
    }

    /// The paragraph's words joined by single spaces, without directives.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the paragraph carries any words.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Flatten paragraphs into a run stream.
pub fn runs_of<'a>(paragraphs: impl IntoIterator<Item = &'a Paragraph>) -> RunStream {
    paragraphs
        .into_iter()
        .flat_map(|p| p.tokens.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_markers() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_marker(channel.marker()), Some(channel));
        }
        assert_eq!(Channel::from_marker('*'), None);
        assert_eq!(Channel::Footnote.role(), Role::Footer);
    }

    #[test]
    fn test_font_state_derivation() {
        let base = FontState::default();
        assert_eq!(base, FontState::new("Arial", 11));
        let bold = base.toggled_bold();
        assert!(bold.bold);
        assert!(!base.bold);
        assert_eq!(bold.toggled_bold(), base);
        assert_eq!(base.with_size(24).size_pt, 24);
        assert_eq!(base.with_name("Georgia").name, "Georgia");
        assert_eq!(base.toggled_italic().toggled_bold().to_string(), "Arial 11pt bold italic");
    }

    #[test]
    fn test_stream_concat_and_counts() {
        let a: RunStream = vec![
            RunToken::ParagraphStart { level: 1 },
            RunToken::FontState(FontState::default()),
            RunToken::TextSegment {
                text: "one".into(),
            },
        ]
        .into_iter()
        .collect();
        let b = a.concat(&a);
        assert_eq!(b.len(), 6);
        assert_eq!(b.paragraph_count(), 2);
        assert_eq!(b.text_segments().collect::<Vec<_>>(), vec!["one", "one"]);
        assert!(a.to_string().starts_with("paragraph (level 1)\nfont Arial 11pt\n"));
    }
}
