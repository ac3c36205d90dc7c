//! DrawingML text body writer for compiled run streams.
use super::{FontState, RunStream, RunToken};
use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use std::fmt::Write as FmtWrite;

/// Deepest paragraph level DrawingML accepts (`a:pPr@lvl`).
pub const MAX_PARAGRAPH_LEVEL: usize = 8;
/// Font size range DrawingML accepts, in points.
pub const FONT_SIZE_RANGE_PT: std::ops::RangeInclusive<u32> = 1..=4000;

/// Check that a font state can be expressed as run properties.
pub fn check_font(font: &FontState) -> Result<()> {
    if !FONT_SIZE_RANGE_PT.contains(&font.size_pt) {
        return Err(Error::Render(format!(
            "font size {}pt is outside {}..={}pt",
            font.size_pt,
            FONT_SIZE_RANGE_PT.start(),
            FONT_SIZE_RANGE_PT.end()
        )));
    }
    if font.name.trim().is_empty() {
        return Err(Error::Render("font name is empty".to_string()));
    }
    Ok(())
}

fn check_level(level: usize) -> Result<()> {
    if level > MAX_PARAGRAPH_LEVEL {
        return Err(Error::Render(format!(
            "paragraph level {} exceeds {}",
            level, MAX_PARAGRAPH_LEVEL
        )));
    }
    Ok(())
}

/// Check that every paragraph level and font state of a run stream can be
/// written, without writing anything.
pub fn check_runs(runs: &RunStream) -> Result<()> {
    for token in runs {
        match token {
            RunToken::ParagraphStart { level } => check_level(*level)?,
            RunToken::FontState(state) => check_font(state)?,
            RunToken::TextSegment { .. } => {},
        }
    }
    Ok(())
}

/// Append `<a:p>` elements for a run stream.
///
/// Each text segment becomes one `<a:r>` carrying the most recent font state.
/// Paragraphs are left aligned.
pub fn write_paragraphs(runs: &RunStream, xml: &mut String) -> Result<()> {
    let mut open = false;
    let mut font: Option<&FontState> = None;

    for token in runs {
        match token {
            RunToken::ParagraphStart { level } => {
                check_level(*level)?;
                if open {
                    xml.push_str("</a:p>");
                }
                xml.push_str("<a:p>");
                write!(xml, r#"<a:pPr lvl="{}" algn="l"/>"#, level)?;
                open = true;
                font = None;
            },
            RunToken::FontState(state) => {
                check_font(state)?;
                font = Some(state);
            },
            RunToken::TextSegment { text } => {
                if !open {
                    return Err(Error::Render(
                        "text segment appears before any paragraph".to_string(),
                    ));
                }
                let Some(state) = font else {
                    return Err(Error::Render(
                        "text segment has no font state".to_string(),
                    ));
                };
                if text.is_empty() {
                    continue;
                }
                write_run(state, text, xml)?;
            },
        }
    }

    if open {
        xml.push_str("</a:p>");
    }
    Ok(())
}

fn write_run(font: &FontState, text: &str, xml: &mut String) -> Result<()> {
    xml.push_str("<a:r>");
    write!(
        xml,
        r#"<a:rPr lang="en-US" sz="{}" b="{}" i="{}" dirty="0">"#,
        font.size_pt * 100,
        u8::from(font.bold),
        u8::from(font.italic)
    )?;
    write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(&font.name))?;
    xml.push_str("</a:rPr>");
    write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
    xml.push_str("</a:r>");
    Ok(())
}

/// Render a run stream as a complete `<p:txBody>`.
///
/// The body has no left inset, is anchored at the top and grows to fit its
/// text.
pub fn write_text_body(runs: &RunStream) -> Result<String> {
    let mut xml = String::with_capacity(128 + runs.len() * 96);
    xml.push_str("<p:txBody>");
    xml.push_str(r#"<a:bodyPr wrap="square" lIns="0" anchor="t">"#);
    xml.push_str("<a:spAutoFit/>");
    xml.push_str("</a:bodyPr>");
    xml.push_str("<a:lstStyle/>");
    write_paragraphs(runs, &mut xml)?;
    xml.push_str("</p:txBody>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{Channel, compile};

    #[test]
    fn test_body_shape() {
        let runs = compile("+ Hello").unwrap().runs(Channel::Main);
        let xml = write_text_body(&runs).unwrap();
        assert_eq!(
            xml,
            concat!(
                "<p:txBody>",
                r#"<a:bodyPr wrap="square" lIns="0" anchor="t"><a:spAutoFit/></a:bodyPr>"#,
                "<a:lstStyle/>",
                r#"<a:p><a:pPr lvl="1" algn="l"/>"#,
                r#"<a:r><a:rPr lang="en-US" sz="1100" b="0" i="0" dirty="0">"#,
                r#"<a:latin typeface="Arial"/></a:rPr><a:t>Hello</a:t></a:r>"#,
                "</a:p>",
                "</p:txBody>"
            )
        );
    }

    #[test]
    fn test_formatting_and_escaping() {
        let runs = compile("++ R&D ** <wins> *Courier *20 big")
            .unwrap()
            .runs(Channel::Main);
        let mut xml = String::new();
        write_paragraphs(&runs, &mut xml).unwrap();
        assert!(xml.starts_with(r#"<a:p><a:pPr lvl="2" algn="l"/>"#));
        assert!(xml.contains("<a:t>R&amp;D</a:t>"));
        assert!(xml.contains(r#"b="1" i="0""#));
        assert!(xml.contains("<a:t>&lt;wins&gt;</a:t>"));
        assert!(xml.contains(r#"sz="2000""#));
        assert!(xml.contains(r#"<a:latin typeface="Courier"/>"#));
        assert_eq!(xml.matches("<a:p>").count(), 1);
    }

    #[test]
    fn test_empty_paragraph_has_no_runs() {
        let runs = compile("+ ** + next").unwrap().runs(Channel::Main);
        let mut xml = String::new();
        write_paragraphs(&runs, &mut xml).unwrap();
        assert_eq!(xml.matches("<a:p>").count(), 2);
        assert_eq!(xml.matches("<a:r>").count(), 1);
    }

    #[test]
    fn test_rejects_unrenderable_fonts() {
        let runs = compile("+ *0 tiny").unwrap().runs(Channel::Main);
        assert!(matches!(write_text_body(&runs), Err(Error::Render(_))));

        let runs = compile("+ *4001 huge").unwrap().runs(Channel::Main);
        assert!(matches!(write_text_body(&runs), Err(Error::Render(_))));

        assert!(check_font(&FontState::new(" ", 11)).is_err());
        assert!(check_font(&FontState::new("Arial", 4000)).is_ok());
    }

    #[test]
    fn test_rejects_deep_levels() {
        let runs = compile("+++++++++ nine").unwrap().runs(Channel::Main);
        assert!(matches!(write_text_body(&runs), Err(Error::Render(_))));

        let runs = compile("++++++++ eight").unwrap().runs(Channel::Main);
        assert!(write_text_body(&runs).is_ok());
    }

    #[test]
    fn test_check_runs_matches_writer() {
        for markup in ["+ *0 tiny", "+ *4001 huge", "+++++++++ nine"] {
            let runs = compile(markup).unwrap().runs(Channel::Main);
            assert!(matches!(check_runs(&runs), Err(Error::Render(_))), "{:?}", markup);
        }
        let runs = compile("++++++++ *4000 *Georgia fine").unwrap().runs(Channel::Main);
        assert!(check_runs(&runs).is_ok());
    }

    #[test]
    fn test_rejects_orphan_text() {
        let runs: RunStream = vec![RunToken::TextSegment {
            text: "loose".into(),
        }]
        .into_iter()
        .collect();
        assert!(matches!(write_text_body(&runs), Err(Error::Render(_))));

        let runs: RunStream = vec![
            RunToken::ParagraphStart { level: 1 },
            RunToken::TextSegment {
                text: "no font".into(),
            },
        ]
        .into_iter()
        .collect();
        assert!(matches!(write_text_body(&runs), Err(Error::Render(_))));
    }

    #[test]
    fn test_empty_stream() {
        let xml = write_text_body(&RunStream::new()).unwrap();
        assert!(xml.ends_with("<a:lstStyle/></p:txBody>"));
    }
}
