//! Content placement requests.

use super::content::{ChartPart, ContentKind, ImageData, ShapeKind, TableData, TextRun};
use crate::common::unit::inches_to_emu;
use crate::layout::geometry::{Geometry, GeometryOverride};

/// A request to place one object on a slide.
///
/// With a `placeholder` name the object is bound to the layout slot that name
/// resolves to. Without one, or when the name does not resolve, the object
/// is placed free-form using `geometry`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSpec {
    pub placeholder: Option<String>,
    pub geometry: GeometryOverride,
    pub kind: ContentKind,
}

impl ContentSpec {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            placeholder: None,
            geometry: GeometryOverride::default(),
            kind,
        }
    }

    /// Plain text. Each line becomes its own paragraph.
    pub fn text(text: &str) -> Self {
        let mut runs: Vec<TextRun> = text
            .split('\n')
            .map(|line| TextRun::new(line).paragraph_end())
            .collect();
        if let Some(last) = runs.last_mut() {
            last.break_after = false;
        }
        Self::new(ContentKind::Text(runs))
    }

    pub fn runs(runs: Vec<TextRun>) -> Self {
        Self::new(ContentKind::Text(runs))
    }

    pub fn image(image: ImageData) -> Self {
        Self::new(ContentKind::Image(image))
    }

    pub fn table(table: TableData) -> Self {
        Self::new(ContentKind::Table(table))
    }

    pub fn chart(chart: ChartPart) -> Self {
        Self::new(ContentKind::Chart(chart))
    }

    pub fn shape(kind: ShapeKind, fill: Option<&str>) -> Self {
        Self::new(ContentKind::Shape {
            kind,
            fill: fill.map(str::to_string),
            text: Vec::new(),
        })
    }

    /// Bare placeholder with no payload.
    pub fn empty() -> Self {
        Self::new(ContentKind::Placeholder)
    }

    pub fn placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder = Some(name.into());
        self
    }

    pub fn geometry(mut self, geometry: impl Into<GeometryOverride>) -> Self {
        self.geometry = geometry.into();
        self
    }

    /// Full geometry in inches.
    pub fn at_inches(self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.geometry(Geometry::from_inches(x, y, w, h))
    }

    pub fn position_inches(mut self, x: f64, y: f64) -> Self {
        self.geometry.x = Some(inches_to_emu(x));
        self.geometry.y = Some(inches_to_emu(y));
        self
    }

    pub fn size_inches(mut self, w: f64, h: f64) -> Self {
        self.geometry.cx = Some(inches_to_emu(w));
        self.geometry.cy = Some(inches_to_emu(h));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lines_become_paragraphs() {
        let spec = ContentSpec::text("one\ntwo");
        let ContentKind::Text(runs) = spec.kind else {
            panic!("expected text");
        };
        assert_eq!(runs.len(), 2);
        assert!(runs[0].break_after);
        assert!(!runs[1].break_after);
    }

    #[test]
    fn test_partial_geometry() {
        let spec = ContentSpec::empty().position_inches(1.0, 2.0);
        assert_eq!(spec.geometry.x, Some(914_400));
        assert_eq!(spec.geometry.y, Some(1_828_800));
        assert!(!spec.geometry.is_complete());
        assert!(ContentSpec::empty().at_inches(0.0, 0.0, 1.0, 1.0).geometry.is_complete());
    }
}
