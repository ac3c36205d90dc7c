//! Validation for each kind of slide content.

use crate::common::xml::find_invalid_xml_char;
use crate::common::{Error, ImageFormat, Result, validate_exhibit_image};
use std::path::Path;
use tracing::debug;

/// Slide names identify slides in a deck and must not be blank.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("slide name must not be empty".to_string()));
    }
    Ok(())
}

/// Titles end up in XML text and may only hold XML 1.0 characters.
pub fn validate_title(title: &str) -> Result<()> {
    validate_text("title", title)
}

/// Markup follows the same character rules as titles.
pub fn validate_markup(markup: &str) -> Result<()> {
    validate_text("markup", markup)
}

/// Exhibits must sniff as PNG or JPEG.
pub fn validate_exhibit(path: &Path) -> Result<ImageFormat> {
    let format = validate_exhibit_image(path)?;
    debug!(path = %path.display(), mime = format.mime_type(), "accepted exhibit");
    Ok(format)
}

fn validate_text(what: &str, text: &str) -> Result<()> {
    match find_invalid_xml_char(text) {
        None => Ok(()),
        Some((offset, c)) => Err(Error::Validation(format!(
            "{} contains character U+{:04X} at byte {}, which XML text cannot hold",
            what, c as u32, offset
        ))),
    }
}
