/// Presentation part markup.
use super::xml::{NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS, XML_DECLARATION, write_int_attr};
use crate::common::error::{Error, Result};
use crate::presentation::Presentation;
use std::fmt::Write as FmtWrite;

/// Id of the single slide master in `sldMasterIdLst`.
const MASTER_ID: u32 = 2_147_483_648;

/// Render `presentation.xml`.
///
/// `master_rel_id` and `slide_rel_ids` are the relationship ids assigned in
/// `presentation.xml.rels`, one per slide in order.
pub(crate) fn render_presentation(
    pres: &Presentation,
    master_rel_id: &str,
    slide_rel_ids: &[String],
) -> Result<String> {
    if slide_rel_ids.len() != pres.slide_count() {
        return Err(Error::XmlError(format!(
            "{} slide relationship id(s) for {} slide(s)",
            slide_rel_ids.len(),
            pres.slide_count()
        )));
    }

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )?;

    xml.push_str("<p:sldMasterIdLst><p:sldMasterId");
    write_int_attr(&mut xml, "id", MASTER_ID);
    write!(xml, r#" r:id="{}"/>"#, master_rel_id)?;
    xml.push_str("</p:sldMasterIdLst>");

    if !pres.slides().is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (slide, rel_id) in pres.slides().iter().zip(slide_rel_ids) {
            xml.push_str("<p:sldId");
            write_int_attr(&mut xml, "id", slide.slide_id());
            write!(xml, r#" r:id="{}"/>"#, rel_id)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    let size = pres.slide_size();
    xml.push_str("<p:sldSz");
    write_int_attr(&mut xml, "cx", size.cx);
    write_int_attr(&mut xml, "cy", size.cy);
    xml.push_str("/>");
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);

    xml.push_str(&pres.sections().to_xml()?);
    xml.push_str("</p:presentation>");

    Ok(xml)
}
