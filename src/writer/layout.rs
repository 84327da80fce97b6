//! Slide layout part markup.
//!
//! Every declared slot becomes an empty placeholder shape so that slides
//! referencing the layout inherit its position. Decorations follow the slots.

use super::relmap::RelationshipMapper;
use super::shape::{
    ShapeContext, write_c_nv_pr, write_object, write_ph, write_slide_number_box,
    write_slide_number_field,
};
use super::xml::{
    NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS, XML_DECLARATION, write_background,
    write_group_header, write_xfrm,
};
use crate::common::error::Result;
use crate::common::xml::escape_xml;
use crate::layout::catalog::Layout;
use crate::layout::geometry::SlideSize;
use crate::layout::role::PlaceholderRole;
use crate::layout::slot::SlotDecl;
use crate::slide::composer::free_form_geometry;
use std::fmt::Write as FmtWrite;

fn write_slot(xml: &mut String, id: u32, layout: &Layout, slot: &SlotDecl) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write_c_nv_pr(xml, id, &layout.def().slot_name(slot.key), None)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>"#);
    write_ph(xml, slot.key);
    xml.push_str("</p:nvPr></p:nvSpPr>");

    match &slot.geometry {
        Some(geometry) => {
            xml.push_str("<p:spPr>");
            write_xfrm(xml, "a:xfrm", geometry);
            xml.push_str("</p:spPr>");
        },
        None => xml.push_str("<p:spPr/>"),
    }

    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    if slot.key.role == PlaceholderRole::SlideNumber {
        let format = layout
            .slide_number()
            .map(|props| props.format.clone())
            .unwrap_or_default();
        xml.push_str("<a:p>");
        write_slide_number_field(xml, None, &format)?;
        xml.push_str("</a:p>");
    } else {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

/// Render `<p:sldLayout>` for the layout at catalog position `ordinal`.
pub(crate) fn render_layout(
    layout: &Layout,
    ordinal: usize,
    slide_size: SlideSize,
    rel_ids: &RelationshipMapper,
) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" preserve="1">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )?;
    write!(xml, r#"<p:cSld name="{}">"#, escape_xml(layout.name()))?;
    if let Some(color) = layout.background() {
        write_background(&mut xml, color)?;
    }
    xml.push_str("<p:spTree>");
    write_group_header(&mut xml);

    let mut next_id = 2u32;
    for slot in layout.def().slots().iter() {
        write_slot(&mut xml, next_id, layout, slot)?;
        next_id += 1;
    }

    for (index, object) in layout.decorations().iter().enumerate() {
        let shape = ShapeContext {
            id: next_id,
            layout: layout.def(),
            rel_id: rel_ids.get(index),
            slide_number: None,
        };
        write_object(&mut xml, object, &shape)?;
        next_id += 1;
    }

    if let Some(props) = layout.slide_number()
        && !layout.def().slots().has_role(PlaceholderRole::SlideNumber)
    {
        let geometry = free_form_geometry(slide_size, props.geometry);
        write_slide_number_box(&mut xml, next_id, &geometry, &props.format, None)?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    log::debug!("rendered layout {} '{}'", ordinal, layout.name());
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::catalog::LayoutCatalog;
    use crate::layout::registry::LayoutRegistry;
    use crate::slide::content::SlideNumberProps;

    fn catalog() -> LayoutCatalog {
        LayoutCatalog::from_registry(LayoutRegistry::builtin().unwrap(), None)
    }

    fn size() -> SlideSize {
        SlideSize::from_inches(13.333, 7.5)
    }

    #[test]
    fn test_every_slot_is_listed() {
        let catalog = catalog();
        let id = catalog.find("Two Content + Subtitles ").unwrap();
        let layout = catalog.layout(id);
        let xml = render_layout(layout, id.ordinal(), size(), &RelationshipMapper::new()).unwrap();

        assert!(xml.contains(r#"<p:cSld name="Two Content + Subtitles ">"#));
        assert_eq!(xml.matches("<p:ph ").count(), layout.def().slots().len());
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains("\u{2039}#\u{203A}"));
        for slot in layout.def().slots().iter().filter(|s| s.geometry.is_some()) {
            let name = escape_xml(&layout.def().slot_name(slot.key));
            assert!(xml.contains(&format!(r#"name="{}""#, name)));
        }
    }

    #[test]
    fn test_spacer_renders_empty_tree() {
        let catalog = catalog();
        let spacer = catalog.list_layouts().iter().find(|l| l.is_spacer()).unwrap();
        let xml = render_layout(spacer, 1, size(), &RelationshipMapper::new()).unwrap();
        assert!(!xml.contains("<p:sp>"));
        assert!(xml.ends_with("</p:sldLayout>"));
    }

    #[test]
    fn test_free_slide_number_on_layout() {
        let mut catalog = catalog();
        let id = catalog
            .ids()
            .find(|&id| !catalog.layout(id).def().slots().has_role(PlaceholderRole::SlideNumber))
            .unwrap();
        catalog.layout_mut(id).slide_number = Some(SlideNumberProps::default());
        let xml = render_layout(catalog.layout(id), id.ordinal(), size(), &RelationshipMapper::new())
            .unwrap();
        assert!(xml.contains(r#"type="slidenum""#));
        assert!(xml.contains(r#"txBox="1""#));
    }
}
