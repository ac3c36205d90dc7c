//! Slide text markup.
//!
//! Slide text is written in a small whitespace-separated markup. Marker runs
//! open paragraphs and route them to a channel:
//!
//! | Marker | Channel  | Placeholder role |
//! |--------|----------|------------------|
//! | `+`    | main     | `Main...`        |
//! | `-`    | margin   | `Margin...`      |
//! | `^`    | footnote | `Footer...`      |
//!
//! The length of the run is the paragraph level (`++` is level 2). Inside a
//! paragraph `*` toggles italic, `**` toggles bold, `*14` sets the size in
//! points and `*Georgia` sets the font. Every paragraph starts from the
//! defaults in [`CompileOptions`] (Arial 11pt).
//!
//! [`MarkupCompiler`] turns markup into [`Paragraph`]s whose tokens flatten
//! into a [`RunStream`]; [`drawingml`] writes a run stream as a DrawingML
//! text body.
//!
//! # Example
//!
//! ```rust
//! use slidedeck::markup::{Channel, compile};
//!
//! let compiled = compile("+ Revenue grew ** fast ++ in Q3 ^ Source: filings")?;
//! assert_eq!(compiled.runs(Channel::Main).paragraph_count(), 2);
//! assert_eq!(compiled.paragraphs()[2].text(), "Source: filings");
//! # Ok::<(), slidedeck::Error>(())
//! ```

// Submodule declarations
mod compiler;
mod config;
pub mod drawingml;
mod token;
mod types;

// Re-exports
pub use compiler::{CompiledMarkup, MarkupCompiler, compile};
pub use config::CompileOptions;
pub use token::{Directive, Token, Tokenizer};
pub use types::{
    Channel, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE_PT, FontState, Paragraph, RunStream, RunToken,
    runs_of,
};
