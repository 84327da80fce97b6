//! Content objects and their payloads.

use crate::common::error::{Error, Result};
use crate::layout::geometry::{Geometry, GeometryOverride};
use crate::layout::slot::SlotKey;
use base64::Engine as _;

/// Image formats that can be embedded in a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
        }
    }

    /// Extension used for the media part name.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Sniff the format from leading magic bytes.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        const SIGNATURES: [(&[u8], ImageFormat); 6] = [
            (&[0x89, b'P', b'N', b'G'], ImageFormat::Png),
            (&[0xFF, 0xD8, 0xFF], ImageFormat::Jpeg),
            (b"GIF8", ImageFormat::Gif),
            (b"BM", ImageFormat::Bmp),
            (&[b'I', b'I', 0x2A, 0x00], ImageFormat::Tiff),
            (&[b'M', b'M', 0x00, 0x2A], ImageFormat::Tiff),
        ];
        if bytes.len() < 4 {
            return None;
        }
        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|(_, format)| *format)
    }
}

/// Where image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw file bytes.
    Bytes(Vec<u8>),
    /// A `data:` URI, or bare base64 text.
    Encoded(String),
}

impl ImageSource {
    /// Decode to raw bytes and detect the format.
    pub fn decode(self) -> Result<ImageData> {
        let bytes = match self {
            Self::Bytes(bytes) => bytes,
            Self::Encoded(text) => decode_base64_image(&text)?,
        };
        let format = ImageFormat::detect_from_bytes(&bytes)
            .ok_or_else(|| Error::InvalidImage("unrecognized image format".to_string()))?;
        Ok(ImageData {
            bytes,
            format,
            description: String::new(),
        })
    }
}

fn decode_base64_image(text: &str) -> Result<Vec<u8>> {
    let payload = match text.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| Error::InvalidImage("data URI has no payload".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(Error::InvalidImage(format!(
                    "data URI '{}' is not base64 encoded",
                    header
                )));
            }
            data
        },
        None => text,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(cleaned)?)
}

/// Decoded image ready to be written as a media part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Alternative text.
    pub description: String,
}

/// Run-level text formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormat {
    pub font: Option<String>,
    /// Size in points.
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Hex RGB, e.g. `"FF0000"`.
    pub color: Option<String>,
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub format: TextFormat,
    /// End the paragraph after this run.
    pub break_after: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn paragraph_end(mut self) -> Self {
        self.break_after = true;
        self
    }
}

/// Table payload: rows of cell text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub rows: Vec<Vec<String>>,
    pub format: TextFormat,
}

impl TableData {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            format: TextFormat::default(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A chart part produced by an external chart encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPart {
    /// Complete `<c:chartSpace>` document.
    pub xml: String,
    /// Shape name shown in the selection pane.
    pub title: Option<String>,
}

/// Preset geometry for drawn shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
}

impl ShapeKind {
    pub fn preset(&self) -> &'static str {
        match self {
            Self::Rectangle => "rect",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
        }
    }

    pub(crate) fn display_name(&self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Line => "Straight Connector",
        }
    }
}

/// What a content object carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    /// Bare placeholder reference with no payload; inherits everything from
    /// the layout.
    Placeholder,
    Text(Vec<TextRun>),
    Image(ImageData),
    Table(TableData),
    Chart(ChartPart),
    Shape {
        kind: ShapeKind,
        fill: Option<String>,
        text: Vec<TextRun>,
    },
}

impl ContentKind {
    /// Kind name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Table(_) => "table",
            Self::Chart(_) => "chart",
            Self::Shape { .. } => "shape",
        }
    }
}

/// Slot binding metadata attached to a placed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderBinding {
    pub slot: SlotKey,
    /// Name the caller asked for. `None` for synthesized objects.
    pub requested_name: Option<String>,
    pub matched_label: Option<String>,
    /// Created by the inheritance merger rather than by a caller.
    pub synthesized: bool,
}

/// One object on a slide or layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentObject {
    pub kind: ContentKind,
    /// Explicit geometry. `None` means the position is inherited from the
    /// layout slot.
    pub geometry: Option<Geometry>,
    pub binding: Option<PlaceholderBinding>,
}

impl ContentObject {
    pub fn slot(&self) -> Option<SlotKey> {
        self.binding.as_ref().map(|b| b.slot)
    }

    pub fn is_synthesized(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.synthesized)
    }

    pub fn image(&self) -> Option<&ImageData> {
        match &self.kind {
            ContentKind::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn chart(&self) -> Option<&ChartPart> {
        match &self.kind {
            ContentKind::Chart(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Slide-number field settings for a layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideNumberProps {
    pub geometry: GeometryOverride,
    pub format: TextFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_detect_formats() {
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D]),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::detect_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::detect_from_bytes(b"BM\0\0"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::detect_from_bytes(b"MM\0*"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::detect_from_bytes(b"abc"), None);
        assert_eq!(ImageFormat::detect_from_bytes(b"%PDF"), None);
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_decode_data_uri() {
        let uri = format!("data:image/png;base64,{}", PNG_1X1);
        let image = ImageSource::Encoded(uri).decode().unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.format.extension(), "png");
    }

    #[test]
    fn test_decode_bare_base64() {
        let image = ImageSource::Encoded(PNG_1X1.to_string()).decode().unwrap();
        assert_eq!(image.format, ImageFormat::Png);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(
            ImageSource::Encoded("data:image/png,abc".to_string()).decode(),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            ImageSource::Encoded("!!!not base64!!!".to_string()).decode(),
            Err(Error::InvalidImage(_))
        ));
        assert!(matches!(
            ImageSource::Bytes(b"plain text".to_vec()).decode(),
            Err(Error::InvalidImage(_))
        ));
    }

    #[test]
    fn test_table_column_count() {
        let table = TableData::new(vec![
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into(), "e".into()],
        ]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(TableData::default().column_count(), 0);
    }
}
