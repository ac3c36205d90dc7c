//! Whitespace tokenizer for slide markup.
//!
//! Tokens are classified once, here, into marker runs, asterisk directives
//! and words. The compiler only ever sees typed tokens.

use super::Channel;
use crate::common::{Error, Result};
use std::collections::VecDeque;
use std::str::SplitWhitespace;

/// A formatting directive (asterisk run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `*`
    ToggleItalic,
    /// `**`
    ToggleBold,
    /// `*` followed by digits
    FontSize(u32),
    /// `*` followed by a word starting with a letter
    FontName(&'a str),
    /// Any other asterisk run, such as `***` or `*#1`
    Unrecognized(&'a str),
}

/// A classified markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of `+`, `-` or `^` opening a paragraph.
    Marker { channel: Channel, level: usize },
    Directive(Directive<'a>),
    Word(&'a str),
}

/// Splits markup on whitespace and classifies each piece.
///
/// - A marker run is the longest prefix made of marker characters; its first
///   character picks the channel and its length is the level, so `+-` opens
///   a level-2 main paragraph. Whatever follows the run in the same piece
///   (`+Intro`) is classified on its own.
/// - `*` and `**` toggle italic and bold; `*14` sets the size and `*Georgia`
///   the font name.
/// - A piece that opens with `*` or `**` and wraps a word (`**Bold**`,
///   `*note*`, `**Lead`) toggles around the word. When the star runs on
///   either side differ (`**a*`) the piece is a literal word.
/// - Everything else is a literal word.
pub struct Tokenizer<'a> {
    pieces: SplitWhitespace<'a>,
    queued: VecDeque<Result<Token<'a>>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(markup: &'a str) -> Self {
        Self {
            pieces: markup.split_whitespace(),
            queued: VecDeque::new(),
        }
    }

    fn classify(&mut self, piece: &'a str) {
        let run = piece
            .bytes()
            .take_while(|b| matches!(b, b'+' | b'-' | b'^'))
            .count();
        if run > 0 {
            if let Some(channel) = piece.chars().next().and_then(Channel::from_marker) {
                self.queued.push_back(Ok(Token::Marker { channel, level: run }));
            }
            let rest = &piece[run..];
            if !rest.is_empty() {
                self.classify_body(rest);
            }
        } else {
            self.classify_body(piece);
        }
    }

    fn classify_body(&mut self, piece: &'a str) {
        if !piece.starts_with('*') {
            self.queued.push_back(Ok(Token::Word(piece)));
            return;
        }

        let leading = piece.bytes().take_while(|&b| b == b'*').count();
        let inner = &piece[leading..];
        if inner.is_empty() {
            self.queued
                .push_back(Ok(Token::Directive(toggle_for(piece, leading))));
            return;
        }

        let trailing = inner.bytes().rev().take_while(|&b| b == b'*').count();
        let body = &inner[..inner.len() - trailing];

        if leading == 1 && trailing == 0 {
            self.queued.push_back(size_or_name(piece, body).map(Token::Directive));
            return;
        }
        if leading > 2 {
            self.queued
                .push_back(Ok(Token::Directive(Directive::Unrecognized(piece))));
            return;
        }
        if trailing > 0 && trailing != leading {
            self.queued.push_back(Ok(Token::Word(piece)));
            return;
        }

        self.queued
            .push_back(Ok(Token::Directive(toggle_for(&piece[..leading], leading))));
        self.queued.push_back(Ok(Token::Word(body)));
        if trailing > 0 {
            let stars = &inner[inner.len() - trailing..];
            self.queued
                .push_back(Ok(Token::Directive(toggle_for(stars, trailing))));
        }
    }
}

fn toggle_for(stars: &str, count: usize) -> Directive<'_> {
    match count {
        1 => Directive::ToggleItalic,
        2 => Directive::ToggleBold,
        _ => Directive::Unrecognized(stars),
    }
}

fn size_or_name<'a>(piece: &'a str, body: &'a str) -> Result<Directive<'a>> {
    if body.bytes().all(|b| b.is_ascii_digit()) {
        return body.parse::<u32>().map(Directive::FontSize).map_err(|_| {
            Error::MalformedMarkup(format!("font size '{}' is out of range", body))
        });
    }
    if body.chars().next().is_some_and(char::is_alphabetic) {
        return Ok(Directive::FontName(body));
    }
    Ok(Directive::Unrecognized(piece))
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.queued.is_empty() {
            let piece = self.pieces.next()?;
            self.classify(piece);
        }
        self.queued.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(markup: &str) -> Vec<Token<'_>> {
        Tokenizer::new(markup)
            .collect::<Result<Vec<_>>>()
            .expect("tokenize")
    }

    fn marker(channel: Channel, level: usize) -> Token<'static> {
        Token::Marker { channel, level }
    }

    #[test]
    fn test_marker_levels() {
        assert_eq!(
            tokens("+ a ++ b ^^^ c"),
            vec![
                marker(Channel::Main, 1),
                Token::Word("a"),
                marker(Channel::Main, 2),
                Token::Word("b"),
                marker(Channel::Footnote, 3),
                Token::Word("c"),
            ]
        );
    }

    #[test]
    fn test_mixed_marker_uses_first_char() {
        assert_eq!(tokens("-+ x"), vec![marker(Channel::Margin, 2), Token::Word("x")]);
        assert_eq!(tokens("+-^"), vec![marker(Channel::Main, 3)]);
    }

    #[test]
    fn test_glued_marker_text() {
        assert_eq!(
            tokens("+Intro text"),
            vec![marker(Channel::Main, 1), Token::Word("Intro"), Token::Word("text")]
        );
        assert_eq!(
            tokens("^**Source**"),
            vec![
                marker(Channel::Footnote, 1),
                Token::Directive(Directive::ToggleBold),
                Token::Word("Source"),
                Token::Directive(Directive::ToggleBold),
            ]
        );
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            tokens("* ** *14 *Georgia *** *#1"),
            vec![
                Token::Directive(Directive::ToggleItalic),
                Token::Directive(Directive::ToggleBold),
                Token::Directive(Directive::FontSize(14)),
                Token::Directive(Directive::FontName("Georgia")),
                Token::Directive(Directive::Unrecognized("***")),
                Token::Directive(Directive::Unrecognized("*#1")),
            ]
        );
    }

    #[test]
    fn test_wrapped_words() {
        assert_eq!(
            tokens("**Bold** *soft* **Lead"),
            vec![
                Token::Directive(Directive::ToggleBold),
                Token::Word("Bold"),
                Token::Directive(Directive::ToggleBold),
                Token::Directive(Directive::ToggleItalic),
                Token::Word("soft"),
                Token::Directive(Directive::ToggleItalic),
                Token::Directive(Directive::ToggleBold),
                Token::Word("Lead"),
            ]
        );
    }

    #[test]
    fn test_trailing_stars_on_plain_words_are_literal() {
        assert_eq!(tokens("p<0.05* 5*3"), vec![Token::Word("p<0.05*"), Token::Word("5*3")]);
    }

    #[test]
    fn test_unbalanced_wraps_are_literal() {
        assert_eq!(
            tokens("**a* *b** **c**"),
            vec![
                Token::Word("**a*"),
                Token::Word("*b**"),
                Token::Directive(Directive::ToggleBold),
                Token::Word("c"),
                Token::Directive(Directive::ToggleBold),
            ]
        );
    }

    #[test]
    fn test_size_overflow() {
        let result: Result<Vec<_>> = Tokenizer::new("+ *99999999999").collect();
        assert!(matches!(result, Err(Error::MalformedMarkup(_))));
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(
            tokens("  +\tword\n\nother  "),
            vec![marker(Channel::Main, 1), Token::Word("word"), Token::Word("other")]
        );
        assert!(tokens("   ").is_empty());
    }
}
