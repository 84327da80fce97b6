//! Small markup writers shared by the part renderers.
//!
//! Everything appends to a caller-owned buffer.

use crate::common::error::Result;
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::layout::geometry::Geometry;
use crate::slide::content::{TextFormat, TextRun};
use std::fmt::Write as FmtWrite;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_PRESENTATION: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Append an integer without going through `fmt`.
#[inline]
pub(crate) fn write_int<I: itoa::Integer>(buf: &mut String, value: I) {
    let mut digits = itoa::Buffer::new();
    buf.push_str(digits.format(value));
}

/// ` name="value"` for an integer attribute.
#[inline]
pub(crate) fn write_int_attr<I: itoa::Integer>(buf: &mut String, name: &str, value: I) {
    buf.push(' ');
    buf.push_str(name);
    buf.push_str("=\"");
    write_int(buf, value);
    buf.push('"');
}

/// `<a:xfrm>` with offset and extent. `tag` selects `a:xfrm` or `p:xfrm`.
pub(crate) fn write_xfrm(buf: &mut String, tag: &str, geometry: &Geometry) {
    buf.push('<');
    buf.push_str(tag);
    buf.push_str("><a:off");
    write_int_attr(buf, "x", geometry.x);
    write_int_attr(buf, "y", geometry.y);
    buf.push_str("/><a:ext");
    write_int_attr(buf, "cx", geometry.cx);
    write_int_attr(buf, "cy", geometry.cy);
    buf.push_str("/></");
    buf.push_str(tag);
    buf.push('>');
}

pub(crate) fn write_solid_fill(buf: &mut String, color: &str) -> Result<()> {
    write!(
        buf,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        escape_xml(color)
    )?;
    Ok(())
}

/// The fixed `nvGrpSpPr`/`grpSpPr` header every shape tree starts with.
pub(crate) fn write_group_header(buf: &mut String) {
    buf.push_str("<p:nvGrpSpPr>");
    buf.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    buf.push_str("<p:cNvGrpSpPr/>");
    buf.push_str("<p:nvPr/>");
    buf.push_str("</p:nvGrpSpPr>");
    buf.push_str("<p:grpSpPr>");
    buf.push_str("<a:xfrm>");
    buf.push_str(r#"<a:off x="0" y="0"/>"#);
    buf.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    buf.push_str(r#"<a:chOff x="0" y="0"/>"#);
    buf.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    buf.push_str("</a:xfrm>");
    buf.push_str("</p:grpSpPr>");
}

pub(crate) fn write_background(buf: &mut String, color: &str) -> Result<()> {
    buf.push_str("<p:bg><p:bgPr>");
    write_solid_fill(buf, color)?;
    buf.push_str("<a:effectLst/></p:bgPr></p:bg>");
    Ok(())
}

/// `<a:rPr>` for a run. Child order follows the schema: fill before font.
pub(crate) fn write_run_props(buf: &mut String, tag: &str, format: &TextFormat) -> Result<()> {
    buf.push('<');
    buf.push_str(tag);
    buf.push_str(r#" lang="en-US" dirty="0""#);
    if let Some(size) = format.size {
        write_int_attr(buf, "sz", pt_to_centipoints(size));
    }
    if let Some(true) = format.bold {
        buf.push_str(r#" b="1""#);
    }
    if let Some(true) = format.italic {
        buf.push_str(r#" i="1""#);
    }
    if let Some(true) = format.underline {
        buf.push_str(r#" u="sng""#);
    }

    if format.color.is_none() && format.font.is_none() {
        buf.push_str("/>");
        return Ok(());
    }

    buf.push('>');
    if let Some(ref color) = format.color {
        write_solid_fill(buf, color)?;
    }
    if let Some(ref font) = format.font {
        write!(buf, r#"<a:latin typeface="{}"/>"#, escape_xml(font))?;
    }
    buf.push_str("</");
    buf.push_str(tag);
    buf.push('>');
    Ok(())
}

/// Paragraphs for a list of runs. A run with `break_after` closes its
/// paragraph.
pub(crate) fn write_paragraphs(buf: &mut String, runs: &[TextRun]) -> Result<()> {
    if runs.is_empty() {
        buf.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        return Ok(());
    }

    let mut open = false;
    for run in runs {
        if !open {
            buf.push_str("<a:p>");
            open = true;
        }
        buf.push_str("<a:r>");
        write_run_props(buf, "a:rPr", &run.format)?;
        write!(buf, "<a:t>{}</a:t>", escape_xml(&run.text))?;
        buf.push_str("</a:r>");
        if run.break_after {
            buf.push_str("</a:p>");
            open = false;
        }
    }
    if open {
        buf.push_str("</a:p>");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_xfrm() {
        let mut buf = String::new();
        write_xfrm(&mut buf, "a:xfrm", &Geometry::new(1, 2, 3, 4));
        assert_eq!(
            buf,
            r#"<a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm>"#
        );
    }

    #[test]
    fn test_run_props_order() {
        let mut buf = String::new();
        let format = TextFormat {
            font: Some("Arial".into()),
            size: Some(12.0),
            bold: Some(true),
            color: Some("FF0000".into()),
            ..Default::default()
        };
        write_run_props(&mut buf, "a:rPr", &format).unwrap();
        assert!(buf.starts_with(r#"<a:rPr lang="en-US" dirty="0" sz="1200" b="1">"#));
        let fill = buf.find("solidFill").unwrap();
        let latin = buf.find("latin").unwrap();
        assert!(fill < latin);
    }

    #[test]
    fn test_paragraph_breaks() {
        let mut buf = String::new();
        let runs = vec![
            TextRun::new("a").paragraph_end(),
            TextRun::new("b"),
            TextRun::new("c"),
        ];
        write_paragraphs(&mut buf, &runs).unwrap();
        assert_eq!(buf.matches("<a:p>").count(), 2);
        assert_eq!(buf.matches("<a:r>").count(), 3);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut buf = String::new();
        write_paragraphs(&mut buf, &[TextRun::new("R&D <2024>")]).unwrap();
        assert!(buf.contains("R&amp;D &lt;2024&gt;"));
    }
}
