//! Presentation sections.
//!
//! Sections group slides in the slide sorter. They are written as the
//! `p14:sectionLst` extension of `presentation.xml`.

use crate::common::error::Result;
use crate::common::xml::escape_xml;
use crate::writer::xml::write_int_attr;
use std::fmt::Write as FmtWrite;

/// A named group of slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// GUID in braces, unique within the presentation.
    pub id: String,
    pub slide_ids: Vec<u32>,
    /// Created implicitly to hold slides added after a user section.
    pub is_default: bool,
}

impl Section {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            slide_ids: Vec::new(),
            is_default: false,
        }
    }

    pub fn add_slide(&mut self, slide_id: u32) {
        self.slide_ids.push(slide_id);
    }

    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256);

        write!(
            xml,
            r#"<p14:section name="{}" id="{}">"#,
            escape_xml(&self.name),
            escape_xml(&self.id)
        )?;

        xml.push_str("<p14:sldIdLst>");
        for &slide_id in &self.slide_ids {
            xml.push_str("<p14:sldId");
            write_int_attr(&mut xml, "id", slide_id);
            xml.push_str("/>");
        }
        xml.push_str("</p14:sldIdLst>");
        xml.push_str("</p14:section>");

        Ok(xml)
    }
}

/// Ordered sections of one presentation.
#[derive(Debug, Clone, Default)]
pub struct SectionList {
    sections: Vec<Section>,
    /// Sections ever created, for id generation.
    created: u32,
}

impl SectionList {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.created += 1;
        format!("{{5EC7A000-0000-4000-8000-{:012X}}}", self.created)
    }

    /// Add a user section at `position` (clamped), or at the end.
    pub fn add_section(&mut self, name: &str, position: Option<usize>) {
        let section = Section::new(name, self.next_id());
        match position {
            Some(pos) => self.sections.insert(pos.min(self.sections.len()), section),
            None => self.sections.push(section),
        }
    }

    /// Put `slide_id` into the first section called `name`. Returns false
    /// when there is no such section.
    pub fn assign(&mut self, name: &str, slide_id: u32) -> bool {
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => {
                section.add_slide(slide_id);
                true
            },
            None => false,
        }
    }

    /// Put `slide_id` into the trailing default section, opening a new
    /// `Default-N` section when the last one was user-defined. Returns the
    /// section name, or `None` when there are no sections at all.
    pub fn assign_default(&mut self, slide_id: u32) -> Option<String> {
        let last_is_default = self.sections.last()?.is_default;
        if !last_is_default {
            let count = self.sections.iter().filter(|s| s.is_default).count();
            let mut section = Section::new(format!("Default-{}", count + 1), self.next_id());
            section.is_default = true;
            self.sections.push(section);
        }
        let section = self.sections.last_mut()?;
        section.add_slide(slide_id);
        Some(section.name.clone())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The `<p:extLst>` carrying the section list, or an empty string.
    pub fn to_xml(&self) -> Result<String> {
        if self.sections.is_empty() {
            return Ok(String::new());
        }

        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<p:extLst>"#);
        xml.push_str(r#"<p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}">"#);
        xml.push_str(r#"<p14:sectionLst xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main">"#);
        for section in &self.sections {
            xml.push_str(&section.to_xml()?);
        }
        xml.push_str("</p14:sectionLst>");
        xml.push_str("</p:ext>");
        xml.push_str("</p:extLst>");

        Ok(xml)
    }
}
