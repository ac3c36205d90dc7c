//! XML text helpers shared by the template loader and the DrawingML writer.

mod escape;

pub use escape::{escape_xml, find_invalid_xml_char, is_xml_char, unescape_xml};
