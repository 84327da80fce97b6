//! Shape markup for content objects.
//!
//! One content object becomes one element of a shape tree: `p:sp` for text,
//! drawn shapes and empty placeholders, `p:pic` for images and
//! `p:graphicFrame` for tables and charts. Objects bound to a layout slot
//! carry a `<p:ph>` reference; their geometry is written only when it
//! differs from what the layout would supply.

use super::xml::{write_int_attr, write_paragraphs, write_run_props, write_solid_fill, write_xfrm};
use crate::common::error::Result;
use crate::common::xml::escape_xml;
use crate::layout::definition::LayoutDef;
use crate::layout::geometry::Geometry;
use crate::layout::role::PlaceholderRole;
use crate::layout::slot::SlotKey;
use crate::slide::content::{
    ChartPart, ContentKind, ContentObject, ImageData, TableData, TextFormat, TextRun,
};
use std::fmt::Write as FmtWrite;

const SLIDE_NUMBER_FIELD_ID: &str = "{B6F15528-21DE-4FAA-801E-634DDDAF4B2B}";

/// Per-object inputs the shape writer needs from the enclosing part.
pub(crate) struct ShapeContext<'a> {
    /// Unique within the part. Id 1 belongs to the shape tree itself.
    pub id: u32,
    /// Layout the object's slot belongs to.
    pub layout: &'a LayoutDef,
    /// Relationship id of the object's image or chart part.
    pub rel_id: Option<&'a str>,
    /// Slide number shown by slide-number fields.
    pub slide_number: Option<usize>,
}

impl ShapeContext<'_> {
    fn name(&self, object: &ContentObject) -> String {
        if let Some(slot) = object.slot() {
            return self.layout.slot_name(slot);
        }
        let base = match &object.kind {
            ContentKind::Placeholder | ContentKind::Text(_) => "TextBox",
            ContentKind::Image(_) => "Picture",
            ContentKind::Table(_) => "Table",
            ContentKind::Chart(chart) => {
                if let Some(title) = &chart.title {
                    return title.clone();
                }
                "Chart"
            },
            ContentKind::Shape { kind, .. } => kind.display_name(),
        };
        format!("{} {}", base, self.id - 1)
    }

    /// Geometry to write into `spPr`, or `None` when the layout supplies it.
    fn own_geometry(&self, object: &ContentObject) -> Option<Geometry> {
        let geometry = object.geometry?;
        match object.slot() {
            Some(slot) if self.layout.slots().geometry(&slot) == Some(geometry) => None,
            _ => Some(geometry),
        }
    }

    /// Geometry for elements that must always carry one.
    fn effective_geometry(&self, object: &ContentObject) -> Geometry {
        object
            .geometry
            .or_else(|| object.slot().and_then(|slot| self.layout.slots().geometry(&slot)))
            .unwrap_or_default()
    }
}

pub(crate) fn write_ph(xml: &mut String, slot: SlotKey) {
    xml.push_str("<p:ph type=\"");
    xml.push_str(slot.role.token());
    xml.push('"');
    if let Some(idx) = slot.index {
        write_int_attr(xml, "idx", idx);
    }
    xml.push_str("/>");
}

fn write_nv_pr(xml: &mut String, object: &ContentObject) {
    match object.slot() {
        Some(slot) => {
            xml.push_str("<p:nvPr>");
            write_ph(xml, slot);
            xml.push_str("</p:nvPr>");
        },
        None => xml.push_str("<p:nvPr/>"),
    }
}

pub(crate) fn write_c_nv_pr(xml: &mut String, id: u32, name: &str, descr: Option<&str>) -> Result<()> {
    xml.push_str("<p:cNvPr");
    write_int_attr(xml, "id", id);
    write!(xml, r#" name="{}""#, escape_xml(name))?;
    if let Some(descr) = descr.filter(|d| !d.is_empty()) {
        write!(xml, r#" descr="{}""#, escape_xml(descr))?;
    }
    xml.push_str("/>");
    Ok(())
}

/// Write `object` as a shape-tree element.
pub(crate) fn write_object(xml: &mut String, object: &ContentObject, ctx: &ShapeContext) -> Result<()> {
    match &object.kind {
        ContentKind::Placeholder => write_text_shape(xml, object, ctx, None),
        ContentKind::Text(runs) => write_text_shape(xml, object, ctx, Some(runs.as_slice())),
        ContentKind::Image(image) => write_picture(xml, object, ctx, image),
        ContentKind::Table(table) => write_table(xml, object, ctx, table),
        ContentKind::Chart(chart) => write_chart(xml, object, ctx, chart),
        ContentKind::Shape { kind, fill, text } => {
            let name = ctx.name(object);
            xml.push_str("<p:sp><p:nvSpPr>");
            write_c_nv_pr(xml, ctx.id, &name, None)?;
            xml.push_str("<p:cNvSpPr/>");
            write_nv_pr(xml, object);
            xml.push_str("</p:nvSpPr>");

            xml.push_str("<p:spPr>");
            write_xfrm(xml, "a:xfrm", &ctx.effective_geometry(object));
            write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, kind.preset())?;
            match (kind.preset(), fill) {
                ("line", Some(color)) => {
                    xml.push_str("<a:ln>");
                    write_solid_fill(xml, color)?;
                    xml.push_str("</a:ln>");
                },
                (_, Some(color)) => write_solid_fill(xml, color)?,
                _ => {},
            }
            xml.push_str("</p:spPr>");

            if !text.is_empty() {
                xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
                write_paragraphs(xml, text)?;
                xml.push_str("</p:txBody>");
            }
            xml.push_str("</p:sp>");
            Ok(())
        },
    }
}

fn write_text_shape(
    xml: &mut String,
    object: &ContentObject,
    ctx: &ShapeContext,
    runs: Option<&[TextRun]>,
) -> Result<()> {
    let slot = object.slot();
    let name = ctx.name(object);

    xml.push_str("<p:sp><p:nvSpPr>");
    write_c_nv_pr(xml, ctx.id, &name, None)?;
    if slot.is_some() {
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    } else {
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    }
    write_nv_pr(xml, object);
    xml.push_str("</p:nvSpPr>");

    match ctx.own_geometry(object) {
        Some(geometry) => {
            xml.push_str("<p:spPr>");
            write_xfrm(xml, "a:xfrm", &geometry);
            if slot.is_none() {
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
            }
            xml.push_str("</p:spPr>");
        },
        None => xml.push_str("<p:spPr/>"),
    }

    let is_slide_number = slot.is_some_and(|s| s.role == PlaceholderRole::SlideNumber);
    match runs {
        Some(runs) => {
            if slot.is_some() {
                xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
            } else {
                xml.push_str(r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#);
            }
            write_paragraphs(xml, runs)?;
            xml.push_str("</p:txBody>");
        },
        None if is_slide_number => {
            xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/><a:p>");
            write_slide_number_field(xml, ctx.slide_number, &TextFormat::default())?;
            xml.push_str("</a:p></p:txBody>");
        },
        None => {},
    }

    xml.push_str("</p:sp>");
    Ok(())
}

/// `<a:fld type="slidenum">` showing `number`, or the `‹#›` token used in
/// layouts.
pub(crate) fn write_slide_number_field(
    xml: &mut String,
    number: Option<usize>,
    format: &TextFormat,
) -> Result<()> {
    write!(xml, r#"<a:fld id="{}" type="slidenum">"#, SLIDE_NUMBER_FIELD_ID)?;
    write_run_props(xml, "a:rPr", format)?;
    xml.push_str("<a:t>");
    match number {
        Some(n) => write!(xml, "{}", n)?,
        None => xml.push_str("\u{2039}#\u{203A}"),
    }
    xml.push_str("</a:t></a:fld>");
    Ok(())
}

/// Free-standing text box holding a slide-number field, for layouts without
/// a `sldNum` slot.
pub(crate) fn write_slide_number_box(
    xml: &mut String,
    id: u32,
    geometry: &Geometry,
    format: &TextFormat,
    number: Option<usize>,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write_c_nv_pr(xml, id, &format!("Slide Number {}", id - 1), None)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>"#);
    write_xfrm(xml, "a:xfrm", geometry);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr wrap="none" rtlCol="0"/><a:lstStyle/><a:p>"#);
    write_slide_number_field(xml, number, format)?;
    xml.push_str("</a:p></p:txBody></p:sp>");
    Ok(())
}

fn write_picture(
    xml: &mut String,
    object: &ContentObject,
    ctx: &ShapeContext,
    image: &ImageData,
) -> Result<()> {
    let name = ctx.name(object);
    xml.push_str("<p:pic><p:nvPicPr>");
    write_c_nv_pr(xml, ctx.id, &name, Some(&image.description))?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
    write_nv_pr(xml, object);
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    let rid = ctx.rel_id.unwrap_or_default();
    write!(xml, r#"<a:blip r:embed="{}"/>"#, escape_xml(rid))?;
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    match ctx.own_geometry(object) {
        Some(geometry) => {
            xml.push_str("<p:spPr>");
            write_xfrm(xml, "a:xfrm", &geometry);
            xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
            xml.push_str("</p:spPr>");
        },
        None => xml.push_str("<p:spPr/>"),
    }
    xml.push_str("</p:pic>");
    Ok(())
}

fn write_frame_start(xml: &mut String, object: &ContentObject, ctx: &ShapeContext) -> Result<()> {
    let name = ctx.name(object);
    xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
    write_c_nv_pr(xml, ctx.id, &name, None)?;
    xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
    write_nv_pr(xml, object);
    xml.push_str("</p:nvGraphicFramePr>");
    write_xfrm(xml, "p:xfrm", &ctx.effective_geometry(object));
    Ok(())
}

fn write_table(
    xml: &mut String,
    object: &ContentObject,
    ctx: &ShapeContext,
    table: &TableData,
) -> Result<()> {
    let geometry = ctx.effective_geometry(object);
    let columns = table.column_count().max(1);
    let rows = table.rows.len().max(1);
    let col_width = geometry.cx / columns as i64;
    let row_height = geometry.cy / rows as i64;

    write_frame_start(xml, object, ctx)?;
    xml.push_str(r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#);
    xml.push_str(r#"<a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>"#);
    for _ in 0..columns {
        xml.push_str("<a:gridCol");
        write_int_attr(xml, "w", col_width);
        xml.push_str("/>");
    }
    xml.push_str("</a:tblGrid>");

    for row in &table.rows {
        xml.push_str("<a:tr");
        write_int_attr(xml, "h", row_height);
        xml.push('>');
        for col in 0..columns {
            let text = row.get(col).map(String::as_str).unwrap_or_default();
            let run = TextRun::new(text).with_format(table.format.clone());
            xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
            write_paragraphs(xml, std::slice::from_ref(&run))?;
            xml.push_str("</a:txBody><a:tcPr/></a:tc>");
        }
        xml.push_str("</a:tr>");
    }

    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    Ok(())
}

fn write_chart(
    xml: &mut String,
    object: &ContentObject,
    ctx: &ShapeContext,
    _chart: &ChartPart,
) -> Result<()> {
    write_frame_start(xml, object, ctx)?;
    xml.push_str(r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#);
    write!(
        xml,
        r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="{}"/>"#,
        escape_xml(ctx.rel_id.unwrap_or_default())
    )?;
    xml.push_str("</a:graphicData></a:graphic></p:graphicFrame>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::content::{ImageFormat, PlaceholderBinding, ShapeKind};

    fn layout() -> LayoutDef {
        LayoutDef::builder("Test")
            .slot(SlotKey::TITLE, Some(Geometry::new(1, 1, 10, 10)))
            .slot(SlotKey::body(16), None)
            .slot(SlotKey::new(PlaceholderRole::SlideNumber, 12), None)
            .label("Title 6", SlotKey::TITLE)
            .build()
            .unwrap()
    }

    fn bound(slot: SlotKey, kind: ContentKind, geometry: Option<Geometry>) -> ContentObject {
        ContentObject {
            kind,
            geometry,
            binding: Some(PlaceholderBinding {
                slot,
                requested_name: None,
                matched_label: None,
                synthesized: false,
            }),
        }
    }

    fn render(object: &ContentObject, rel_id: Option<&str>) -> String {
        let layout = layout();
        let ctx = ShapeContext {
            id: 5,
            layout: &layout,
            rel_id,
            slide_number: Some(3),
        };
        let mut xml = String::new();
        write_object(&mut xml, object, &ctx).unwrap();
        xml
    }

    #[test]
    fn test_inherited_geometry_is_omitted() {
        let object = bound(
            SlotKey::TITLE,
            ContentKind::Text(vec![TextRun::new("Hi")]),
            Some(Geometry::new(1, 1, 10, 10)),
        );
        let xml = render(&object, None);
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains("<p:spPr/>"));
        assert!(xml.contains(r#"name="Title 6""#));
    }

    #[test]
    fn test_moved_placeholder_writes_xfrm() {
        let object = bound(
            SlotKey::body(16),
            ContentKind::Text(vec![TextRun::new("x")]),
            Some(Geometry::new(5, 6, 7, 8)),
        );
        let xml = render(&object, None);
        assert!(xml.contains(r#"<p:ph type="body" idx="16"/>"#));
        assert!(xml.contains(r#"<a:off x="5" y="6"/>"#));
        assert!(xml.contains(r#"name="Text Placeholder 16""#));
    }

    #[test]
    fn test_empty_slide_number_placeholder_gets_field() {
        let slot = SlotKey::new(PlaceholderRole::SlideNumber, 12);
        let xml = render(&bound(slot, ContentKind::Placeholder, None), None);
        assert!(xml.contains(r#"type="slidenum""#));
        assert!(xml.contains("<a:t>3</a:t>"));
    }

    #[test]
    fn test_slide_number_box() {
        let mut xml = String::new();
        let format = TextFormat {
            size: Some(10.0),
            ..Default::default()
        };
        write_slide_number_box(&mut xml, 9, &Geometry::new(1, 2, 3, 4), &format, None).unwrap();
        assert!(xml.contains(r#"name="Slide Number 8""#));
        assert!(xml.contains(r#"sz="1000""#));
        assert!(xml.contains("\u{2039}#\u{203A}"));
    }

    #[test]
    fn test_free_text_box() {
        let object = ContentObject {
            kind: ContentKind::Text(vec![TextRun::new("loose")]),
            geometry: Some(Geometry::new(1, 2, 3, 4)),
            binding: None,
        };
        let xml = render(&object, None);
        assert!(xml.contains(r#"txBox="1""#));
        assert!(xml.contains("<p:nvPr/>"));
        assert!(xml.contains(r#"name="TextBox 4""#));
    }

    #[test]
    fn test_picture_uses_rel_id() {
        let object = ContentObject {
            kind: ContentKind::Image(ImageData {
                bytes: vec![0x89, b'P', b'N', b'G'],
                format: ImageFormat::Png,
                description: "logo".into(),
            }),
            geometry: Some(Geometry::new(0, 0, 10, 10)),
            binding: None,
        };
        let xml = render(&object, Some("rId2"));
        assert!(xml.starts_with("<p:pic>"));
        assert!(xml.contains(r#"r:embed="rId2""#));
        assert!(xml.contains(r#"descr="logo""#));
    }

    #[test]
    fn test_table_grid() {
        let object = ContentObject {
            kind: ContentKind::Table(TableData::new(vec![
                vec!["a".into(), "b".into()],
                vec!["c".into()],
            ])),
            geometry: Some(Geometry::new(0, 0, 200, 100)),
            binding: None,
        };
        let xml = render(&object, None);
        assert_eq!(xml.matches(r#"<a:gridCol w="100"/>"#).count(), 2);
        assert_eq!(xml.matches(r#"<a:tr h="50">"#).count(), 2);
        assert_eq!(xml.matches("<a:tc>").count(), 4);
    }

    #[test]
    fn test_chart_frame() {
        let object = ContentObject {
            kind: ContentKind::Chart(ChartPart {
                xml: String::new(),
                title: Some("Revenue".into()),
            }),
            geometry: Some(Geometry::new(0, 0, 10, 10)),
            binding: None,
        };
        let xml = render(&object, Some("rId3"));
        assert!(xml.contains(r#"<c:chart xmlns:c="#));
        assert!(xml.contains(r#"r:id="rId3""#));
        assert!(xml.contains(r#"name="Revenue""#));
        assert!(xml.contains("<p:xfrm>"));
    }

    #[test]
    fn test_line_fill_goes_to_outline() {
        let object = ContentObject {
            kind: ContentKind::Shape {
                kind: ShapeKind::Line,
                fill: Some("00FF00".into()),
                text: Vec::new(),
            },
            geometry: Some(Geometry::new(0, 0, 10, 0)),
            binding: None,
        };
        let xml = render(&object, None);
        assert!(xml.contains(r#"prst="line""#));
        assert!(xml.contains(r#"<a:ln><a:solidFill><a:srgbClr val="00FF00"/></a:solidFill></a:ln>"#));
    }
}
