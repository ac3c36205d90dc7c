//! Configuration types for markup compilation.

use super::drawingml::FONT_SIZE_RANGE_PT;
use super::{DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE_PT, FontState};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for markup compilation.
///
/// Controls the formatting every paragraph starts from. Options can be built
/// in code or read from YAML.
///
/// # Examples
///
/// ```rust
/// use slidedeck::markup::CompileOptions;
///
/// // Arial 11pt
/// let options = CompileOptions::default();
///
/// // Or customize
/// let options = CompileOptions::new()
///     .with_font_name("Calibri")
///     .with_font_size(14);
///
/// // Or load from YAML
/// let options = CompileOptions::from_yaml_str("font_name: Georgia\nfont_size: 12\n")?;
/// assert_eq!(options.font_size, 12);
/// # Ok::<(), slidedeck::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Font family every paragraph starts with
    pub font_name: String,
    /// Font size in points every paragraph starts with
    pub font_size: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE_PT,
        }
    }
}

impl CompileOptions {
    /// Create `CompileOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font family.
    #[inline]
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the default font size in points.
    #[inline]
    pub fn with_font_size(mut self, size_pt: u32) -> Self {
        self.font_size = size_pt;
        self
    }

    /// The formatting state a new paragraph starts with.
    pub fn default_font(&self) -> FontState {
        FontState::new(self.font_name.clone(), self.font_size)
    }

    /// Parse options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse compile options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Serialize options to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize compile options: {}", e)))
    }

    /// Check that every paragraph could be rendered with these defaults.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(Error::Config("font_name must not be empty".to_string()));
        }
        if !FONT_SIZE_RANGE_PT.contains(&self.font_size) {
            return Err(Error::Config(format!(
                "font_size must be within {}..={}pt, got {}",
                FONT_SIZE_RANGE_PT.start(),
                FONT_SIZE_RANGE_PT.end(),
                self.font_size
            )));
        }
        Ok(())
    }
}
