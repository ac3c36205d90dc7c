//! Loading a layout catalog from a `.pptx` template.
//!
//! The catalog lists the layouts of the first slide master in the order of
//! its `p:sldLayoutIdLst`. Each placeholder shape contributes its
//! `p:cNvPr@name` and `p:ph@idx` (0 when absent).

use super::{Layout, LayoutCatalog};
use crate::common::xml::unescape_xml;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;

const MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const MASTER_RELS_PART: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
const LAYOUT_DIR: &str = "ppt/slideLayouts/";

impl LayoutCatalog {
    /// Read the layout catalog of a `.pptx` file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use slidedeck::LayoutCatalog;
    ///
    /// let catalog = LayoutCatalog::from_pptx("template.pptx")?;
    /// println!("{}", catalog.summary());
    /// # Ok::<(), slidedeck::Error>(())
    /// ```
    pub fn from_pptx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_pptx_reader(BufReader::new(file))
    }

    /// Read the layout catalog from any seekable `.pptx` byte source.
    pub fn from_pptx_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|_| Error::InvalidFormat("Invalid ZIP archive".to_string()))?;

        let layout_parts = match read_part(&mut archive, MASTER_PART)? {
            Some(master) => {
                let rels = read_part(&mut archive, MASTER_RELS_PART)?.ok_or_else(|| {
                    Error::InvalidFormat(format!("{} is missing", MASTER_RELS_PART))
                })?;
                master_layout_parts(&master, &rels)?
            },
            None => numbered_layout_parts(archive.file_names()),
        };

        let mut layouts = Vec::with_capacity(layout_parts.len());
        for part_name in &layout_parts {
            let xml = read_part(&mut archive, part_name)?.ok_or_else(|| {
                Error::InvalidFormat(format!("layout part {} is missing", part_name))
            })?;
            layouts.push(parse_layout_xml(&xml)?);
        }

        debug!(layouts = layouts.len(), "loaded layout catalog from template");
        Ok(LayoutCatalog::new(layouts))
    }
}

/// Read a part from the archive, `None` when the package does not have it.
fn read_part<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

fn attr_str(value: &[u8]) -> Result<String> {
    let raw = std::str::from_utf8(value).map_err(|e| Error::XmlError(e.to_string()))?;
    Ok(unescape_xml(raw))
}

/// Layout part names in the order the master lists them.
fn master_layout_parts(master_xml: &[u8], rels_xml: &[u8]) -> Result<Vec<String>> {
    let targets = relationship_targets(rels_xml)?;
    let mut parts = Vec::new();

    let mut reader = Reader::from_reader(master_xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldLayoutId" => {
                for attr in e.attributes().flatten() {
                    let is_rel_id = attr.key.as_ref() == b"r:id"
                        || (attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id");
                    if !is_rel_id {
                        continue;
                    }
                    let rid = attr_str(&attr.value)?;
                    let target = targets.get(&rid).ok_or_else(|| {
                        Error::InvalidFormat(format!("slide master relationship {} not found", rid))
                    })?;
                    parts.push(resolve_target("ppt/slideMasters/", target));
                    break;
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(parts)
}

/// Map of relationship id to target from a `.rels` part.
fn relationship_targets(rels_xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut targets = HashMap::new();
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr_str(&attr.value)?),
                        b"Target" => target = Some(attr_str(&attr.value)?),
                        _ => {},
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }
    Ok(targets)
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// `slideLayoutN.xml` parts sorted by N, for packages without a master.
fn numbered_layout_parts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut numbered: Vec<(u32, String)> = names
        .filter_map(|name| {
            let number = name
                .strip_prefix(LAYOUT_DIR)?
                .strip_prefix("slideLayout")?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort();
    numbered.into_iter().map(|(_, name)| name).collect()
}

/// Shape under construction while scanning a layout.
#[derive(Default)]
struct PendingShape {
    name: Option<String>,
    idx: Option<u32>,
}

fn is_shape_element(local_name: &[u8]) -> bool {
    matches!(local_name, b"sp" | b"pic" | b"graphicFrame")
}

fn placeholder_idx(e: &BytesStart<'_>) -> Result<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"idx" {
            let raw = attr_str(&attr.value)?;
            return raw
                .parse::<u32>()
                .map_err(|_| Error::InvalidFormat(format!("invalid placeholder idx '{}'", raw)));
        }
    }
    Ok(0)
}

/// Parse one `slideLayoutN.xml` part into a layout.
pub(crate) fn parse_layout_xml(xml: &[u8]) -> Result<Layout> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut layout = Layout::new("");
    let mut shape: Option<PendingShape> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name();
                if is_shape_element(local.as_ref()) {
                    shape = Some(PendingShape::default());
                } else {
                    scan_element(&e, &mut layout, shape.as_mut())?;
                }
            },
            Event::Empty(e) => scan_element(&e, &mut layout, shape.as_mut())?,
            Event::End(e) if is_shape_element(e.local_name().as_ref()) => {
                if let Some(PendingShape {
                    name: Some(name),
                    idx: Some(idx),
                }) = shape.take()
                {
                    layout.insert_placeholder(name, idx);
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(layout)
}

fn scan_element(
    e: &BytesStart<'_>,
    layout: &mut Layout,
    shape: Option<&mut PendingShape>,
) -> Result<()> {
    match (e.local_name().as_ref(), shape) {
        (b"cSld", _) => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"name" {
                    *layout = Layout::new(attr_str(&attr.value)?);
                }
            }
        },
        (b"cNvPr", Some(shape)) => {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"name" {
                    shape.name = Some(attr_str(&attr.value)?);
                }
            }
        },
        (b"ph", Some(shape)) => shape.idx = Some(placeholder_idx(e)?),
        _ => {},
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Role;
    use std::io::{Cursor, Write};
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn layout_xml(name: &str, shapes: &[(&str, Option<u32>)]) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
        );
        xml.push_str(&format!(r#"<p:cSld name="{}"><p:spTree>"#, name));
        xml.push_str(
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        );
        for (i, (shape_name, idx)) in shapes.iter().enumerate() {
            let ph = match idx {
                Some(0) => r#"<p:ph type="title"/>"#.to_string(),
                Some(idx) => format!(r#"<p:ph idx="{}"/>"#, idx),
                None => String::new(),
            };
            xml.push_str(&format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
                i + 2,
                shape_name,
                ph
            ));
        }
        xml.push_str("</p:spTree></p:cSld></p:sldLayout>");
        xml
    }

    fn package(parts: &[(&str, String)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in parts {
            zip.start_file(*name, options).expect("start part");
            zip.write_all(content.as_bytes()).expect("write part");
        }
        let mut cursor = zip.finish().expect("finish package");
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_parse_layout_placeholders() {
        let xml = layout_xml(
            "Picture &amp; Caption",
            &[
                ("Title 1", Some(0)),
                ("Pic 2", Some(13)),
                ("Decoration", None),
                ("Main Text 3", Some(1)),
            ],
        );
        let layout = parse_layout_xml(xml.as_bytes()).expect("parse layout");
        assert_eq!(layout.name(), "Picture & Caption");
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.count(Role::Title), 1);
        assert_eq!(layout.count(Role::Picture), 1);
        assert_eq!(layout.placeholders()[1].idx(), 13);
        assert_eq!(layout.placeholders()[0].idx(), 0);
    }

    #[test]
    fn test_catalog_follows_master_order() {
        let master = r#"<p:sldMaster xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId2"/><p:sldLayoutId id="2147483650" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/></Relationships>"#;
        let cursor = package(&[
            (MASTER_PART, master.to_string()),
            (MASTER_RELS_PART, rels.to_string()),
            ("ppt/slideLayouts/slideLayout1.xml", layout_xml("First", &[("Title 1", Some(0))])),
            (
                "ppt/slideLayouts/slideLayout2.xml",
                layout_xml("Second", &[("Title 1", Some(0)), ("Footer 4", Some(11))]),
            ),
        ]);

        let catalog = LayoutCatalog::from_pptx_reader(cursor).expect("load catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).map(Layout::name), Some("Second"));
        assert_eq!(catalog.get(1).map(Layout::name), Some("First"));
        assert_eq!(catalog.get(0).map(|l| l.count(Role::Footer)), Some(1));
    }

    #[test]
    fn test_catalog_without_master_uses_numbering() {
        let cursor = package(&[
            ("ppt/slideLayouts/slideLayout10.xml", layout_xml("Ten", &[])),
            ("ppt/slideLayouts/slideLayout2.xml", layout_xml("Two", &[])),
            ("ppt/slideLayouts/_rels/slideLayout2.xml.rels", String::from("<Relationships/>")),
        ]);
        let catalog = LayoutCatalog::from_pptx_reader(cursor).expect("load catalog");
        let names: Vec<&str> = catalog.iter().map(Layout::name).collect();
        assert_eq!(names, vec!["Two", "Ten"]);
    }

    #[test]
    fn test_not_a_zip() {
        let result = LayoutCatalog::from_pptx_reader(Cursor::new(b"not a package".to_vec()));
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/slideMasters/", "../slideLayouts/slideLayout3.xml"),
            "ppt/slideLayouts/slideLayout3.xml"
        );
        assert_eq!(
            resolve_target("ppt/slideMasters/", "/ppt/slideLayouts/slideLayout1.xml"),
            "ppt/slideLayouts/slideLayout1.xml"
        );
    }
}
