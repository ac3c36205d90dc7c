//! Image format sniffing for slide exhibits.
//!
//! Only the file header is read; nothing is decoded.

use crate::common::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of header bytes needed to tell the supported signatures apart.
const SNIFF_LEN: u64 = 16;

/// Image formats recognized from their magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Webp,
}

impl ImageFormat {
    /// Get the MIME type for this image format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Webp => "image/webp",
        }
    }

    /// Get the file extension for this image format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
        }
    }

    /// Whether a picture placeholder accepts this format as an exhibit.
    #[inline]
    pub fn is_exhibit_format(&self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF: 47 49 46 38 (GIF8)
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // BMP: 42 4D (BM)
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF: little-endian or big-endian byte order mark
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        // WebP: RIFF....WEBP
        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }

        None
    }
}

/// Sniff the image format of a file by reading its header.
///
/// Returns `Ok(None)` when the header matches no known image signature, and an
/// IO error when the file cannot be opened or read.
pub fn sniff_image<P: AsRef<Path>>(path: P) -> Result<Option<ImageFormat>> {
    let file = File::open(path.as_ref())?;
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut header)?;
    Ok(ImageFormat::detect_from_bytes(&header))
}

/// Check that a file is usable as a slide exhibit (PNG or JPEG).
pub fn validate_exhibit_image<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let path = path.as_ref();
    match sniff_image(path)? {
        Some(format) if format.is_exhibit_format() => Ok(format),
        other => Err(Error::UnsupportedImageFormat {
            path: path.to_path_buf(),
            format: other
                .map(|f| f.extension().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        }),
    }
}
