/// Relationship bookkeeping for rendered parts.
///
/// Relationships are created before the part's markup is generated, so the
/// shape writer can reference real ids.
use super::xml::XML_DECLARATION;
use crate::common::error::Result;
use crate::common::xml::escape_xml;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship type, as the suffix of the officeDocument URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelKind {
    SlideMaster,
    SlideLayout,
    Slide,
    Image,
    Chart,
}

impl RelKind {
    fn suffix(self) -> &'static str {
        match self {
            RelKind::SlideMaster => "slideMaster",
            RelKind::SlideLayout => "slideLayout",
            RelKind::Slide => "slide",
            RelKind::Image => "image",
            RelKind::Chart => "chart",
        }
    }
}

/// The relationships of one part, numbered `rId1`, `rId2`, ... in insertion
/// order.
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    entries: Vec<(RelKind, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id.
    pub fn add(&mut self, kind: RelKind, target: impl Into<String>) -> String {
        self.entries.push((kind, target.into()));
        format!("rId{}", self.entries.len())
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        for (i, (kind, target)) in self.entries.iter().enumerate() {
            write!(
                xml,
                r#"<Relationship Id="rId{}" Type="{}/{}" Target="{}"/>"#,
                i + 1,
                REL_BASE,
                kind.suffix(),
                escape_xml(target)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Maps object positions within a shape tree to relationship ids.
#[derive(Debug, Default)]
pub(crate) struct RelationshipMapper {
    ids: HashMap<usize, String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object_index: usize, rel_id: String) {
        self.ids.insert(object_index, rel_id);
    }

    pub fn get(&self, object_index: usize) -> Option<&str> {
        self.ids.get(&object_index).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(RelKind::SlideLayout, "../slideLayouts/slideLayout3.xml"), "rId1");
        assert_eq!(rels.add(RelKind::Image, "../media/image1.png"), "rId2");

        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>"#
        ));
    }

    #[test]
    fn test_mapper() {
        let mut mapper = RelationshipMapper::new();
        mapper.add(3, "rId2".into());
        assert_eq!(mapper.get(3), Some("rId2"));
        assert_eq!(mapper.get(0), None);
    }
}
