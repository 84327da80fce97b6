//! Slide part markup.

use super::relmap::RelationshipMapper;
use super::shape::{ShapeContext, write_object, write_slide_number_box};
use super::xml::{
    NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS, XML_DECLARATION, write_background,
    write_group_header,
};
use crate::common::error::Result;
use crate::layout::catalog::Layout;
use crate::layout::geometry::SlideSize;
use crate::layout::role::PlaceholderRole;
use crate::slide::Slide;
use crate::slide::composer::free_form_geometry;
use crate::slide::content::SlideNumberProps;
use std::fmt::Write as FmtWrite;

/// What the slide renderer needs beyond the slide and its layout.
pub(crate) struct SlideContext<'a> {
    pub slide_size: SlideSize,
    /// Slide-number settings in force for this slide.
    pub slide_number: Option<&'a SlideNumberProps>,
    /// Relationship ids of image and chart objects, by object position.
    pub rel_ids: &'a RelationshipMapper,
}

/// Render `<p:sld>` for `slide`.
///
/// Objects are written in insertion order with shape ids from 2. When slide
/// numbers are on and the layout has no `sldNum` slot, a free-standing
/// number field is appended.
pub(crate) fn render_slide(slide: &Slide, layout: &Layout, ctx: &SlideContext) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )?;
    xml.push_str("<p:cSld>");
    if let Some(color) = slide.background() {
        write_background(&mut xml, color)?;
    }
    xml.push_str("<p:spTree>");
    write_group_header(&mut xml);

    let mut next_id = 2u32;
    for (index, object) in slide.objects().iter().enumerate() {
        let shape = ShapeContext {
            id: next_id,
            layout: layout.def(),
            rel_id: ctx.rel_ids.get(index),
            slide_number: Some(slide.number()),
        };
        write_object(&mut xml, object, &shape)?;
        next_id += 1;
    }

    if let Some(props) = ctx.slide_number
        && !layout.def().slots().has_role(PlaceholderRole::SlideNumber)
    {
        let geometry = free_form_geometry(ctx.slide_size, props.geometry);
        write_slide_number_box(&mut xml, next_id, &geometry, &props.format, Some(slide.number()))?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}
