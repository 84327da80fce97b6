//! Part rendering.
//!
//! [`render_package`] turns a merged presentation into the parts this crate
//! owns: `presentation.xml` and its relationships, one part per slide
//! layout, one per slide, and the media and chart parts they reference.
//! Nothing is written to a sink here, so a failure leaves no partial
//! output behind.

mod layout;
pub mod package;
mod pres;
mod relmap;
mod shape;
mod slide;
pub(crate) mod xml;

pub use package::{MemoryPackage, PackageSink, ZipPackage};

use crate::common::error::Result;
use crate::presentation::Presentation;
use crate::slide::content::{ContentKind, ContentObject};
use relmap::{RelKind, RelationshipMapper, Relationships};
use slide::SlideContext;

/// A rendered package part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Path from the package root.
    pub path: String,
    pub data: Vec<u8>,
}

impl Part {
    fn xml(path: String, xml: String) -> Self {
        Self {
            path,
            data: xml.into_bytes(),
        }
    }
}

/// Media and chart parts, numbered across the whole package.
#[derive(Debug, Default)]
struct MediaStore {
    images: usize,
    charts: usize,
    parts: Vec<Part>,
}

impl MediaStore {
    /// Store the media an object needs and return the relationship to it,
    /// relative to a part one directory below `ppt/`.
    fn add(&mut self, object: &ContentObject) -> Option<(RelKind, String)> {
        match &object.kind {
            ContentKind::Image(image) => {
                self.images += 1;
                let name = format!("image{}.{}", self.images, image.format.extension());
                self.parts.push(Part {
                    path: format!("ppt/media/{}", name),
                    data: image.bytes.clone(),
                });
                Some((RelKind::Image, format!("../media/{}", name)))
            },
            ContentKind::Chart(chart) => {
                self.charts += 1;
                let name = format!("chart{}.xml", self.charts);
                self.parts.push(Part {
                    path: format!("ppt/charts/{}", name),
                    data: chart.xml.clone().into_bytes(),
                });
                Some((RelKind::Chart, format!("../charts/{}", name)))
            },
            _ => None,
        }
    }

    /// Relationships for `objects`, registered after whatever `rels`
    /// already holds.
    fn relate(
        &mut self,
        objects: &[ContentObject],
        rels: &mut Relationships,
    ) -> RelationshipMapper {
        let mut mapper = RelationshipMapper::new();
        for (index, object) in objects.iter().enumerate() {
            if let Some((kind, target)) = self.add(object) {
                mapper.add(index, rels.add(kind, target));
            }
        }
        mapper
    }
}

/// Render every part of `pres`.
///
/// Slides must already have their inherited slots materialized; see
/// [`Presentation::export`].
pub fn render_package(pres: &Presentation) -> Result<Vec<Part>> {
    let catalog = pres.catalog();
    let mut media = MediaStore::default();
    let mut parts = Vec::with_capacity(2 + 2 * (catalog.len() + pres.slide_count()));

    let mut pres_rels = Relationships::new();
    let master_rel_id = pres_rels.add(RelKind::SlideMaster, "slideMasters/slideMaster1.xml");
    let slide_rel_ids: Vec<String> = (1..=pres.slide_count())
        .map(|n| pres_rels.add(RelKind::Slide, format!("slides/slide{}.xml", n)))
        .collect();
    parts.push(Part::xml(
        "ppt/presentation.xml".into(),
        pres::render_presentation(pres, &master_rel_id, &slide_rel_ids)?,
    ));
    parts.push(Part::xml(
        "ppt/_rels/presentation.xml.rels".into(),
        pres_rels.to_xml()?,
    ));

    for id in catalog.ids() {
        let layout = catalog.layout(id);
        let n = id.ordinal();
        let mut rels = Relationships::new();
        rels.add(RelKind::SlideMaster, "../slideMasters/slideMaster1.xml");
        let rel_ids = media.relate(layout.decorations(), &mut rels);
        parts.push(Part::xml(
            format!("ppt/slideLayouts/slideLayout{}.xml", n),
            layout::render_layout(layout, n, pres.slide_size(), &rel_ids)?,
        ));
        parts.push(Part::xml(
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
            rels.to_xml()?,
        ));
    }

    for s in pres.slides() {
        let layout = catalog.layout(s.layout());
        let mut rels = Relationships::new();
        rels.add(
            RelKind::SlideLayout,
            format!("../slideLayouts/slideLayout{}.xml", s.layout().ordinal()),
        );
        let rel_ids = media.relate(s.objects(), &mut rels);
        let ctx = SlideContext {
            slide_size: pres.slide_size(),
            slide_number: pres.effective_slide_number(s),
            rel_ids: &rel_ids,
        };
        parts.push(Part::xml(
            format!("ppt/slides/slide{}.xml", s.number()),
            slide::render_slide(s, layout, &ctx)?,
        ));
        parts.push(Part::xml(
            format!("ppt/slides/_rels/slide{}.xml.rels", s.number()),
            rels.to_xml()?,
        ));
    }

    parts.append(&mut media.parts);
    log::debug!(
        "rendered {} part(s) ({} image(s), {} chart(s))",
        parts.len(),
        media.images,
        media.charts
    );
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use crate::layout::geometry::Geometry;
    use crate::presentation::{AddSlideOptions, PlaceholderDecl, SlideMasterProps};
    use crate::slide::SlideState;
    use crate::slide::content::{ChartPart, ImageSource, ShapeKind, TableData};
    use crate::slide::spec::ContentSpec;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::collections::HashSet;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    /// Parse `xml` fully and return the `(type, idx)` of every `p:ph`.
    fn placeholders(xml: &str) -> Vec<(String, Option<String>)> {
        let mut reader = Reader::from_str(xml);
        let mut found = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Eof => break,
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"p:ph" => {
                    let mut kind = String::new();
                    let mut idx = None;
                    for attr in e.attributes() {
                        let attr = attr.unwrap();
                        let value = String::from_utf8(attr.value.to_vec()).unwrap();
                        match attr.key.as_ref() {
                            b"type" => kind = value,
                            b"idx" => idx = Some(value),
                            _ => {},
                        }
                    }
                    found.push((kind, idx));
                },
                _ => {},
            }
        }
        found
    }

    fn part<'a>(package: &'a MemoryPackage, path: &str) -> &'a str {
        package
            .get_str(path)
            .unwrap_or_else(|| panic!("missing part {}", path))
    }

    #[test]
    fn test_placeholders_are_unique_per_slide() {
        let mut pres = Presentation::new().unwrap();
        {
            let mut slide = pres.add_slide(AddSlideOptions::layout("Two Content + Subtitles "));
            slide.add_text("Heading", "headline").unwrap();
            slide.add_text("Heading again", "Title 6").unwrap();
            slide.add_text("Left", "leftSubtitle").unwrap();
            slide.add_text("Source: internal", "source").unwrap();
        }
        let mut package = MemoryPackage::new();
        pres.export(&mut package).unwrap();

        let xml = part(&package, "ppt/slides/slide1.xml");
        let found = placeholders(xml);
        let unique: HashSet<_> = found.iter().collect();
        assert_eq!(found.len(), unique.len());
        let layout = pres.catalog().layout(pres.slide(1).unwrap().layout());
        assert_eq!(found.len(), layout.def().slots().len());
        assert!(found.iter().all(|(kind, _)| !kind.is_empty()));
        assert!(xml.contains("<a:t>Heading again</a:t>"));
        assert!(!xml.contains("<a:t>Heading</a:t>"));
    }

    #[test]
    fn test_every_part_is_well_formed() {
        let mut pres = Presentation::new().unwrap();
        pres.add_section("Intro", None);
        {
            let mut slide = pres.add_slide(AddSlideOptions::layout("Content w/Sub-headline"));
            slide.add_text("Title", "headline").unwrap();
            slide
                .add_image(ImageSource::Encoded(format!("data:image/png;base64,{}", PNG_1X1)), Geometry::from_inches(1.0, 1.0, 1.0, 1.0))
                .unwrap();
            slide
                .add_table(
                    TableData::new(vec![vec!["a".into(), "b & c".into()]]),
                    Geometry::from_inches(1.0, 3.0, 4.0, 1.0),
                )
                .unwrap();
            slide
                .add_chart(
                    ChartPart {
                        xml: "<c:chartSpace/>".into(),
                        title: None,
                    },
                    Geometry::from_inches(6.0, 3.0, 4.0, 3.0),
                )
                .unwrap();
            slide
                .add_shape(ShapeKind::Ellipse, Some("FF0000"), Geometry::from_inches(0.0, 0.0, 1.0, 1.0))
                .unwrap();
        }
        pres.add_slide(AddSlideOptions::default());

        let mut package = MemoryPackage::new();
        pres.export(&mut package).unwrap();

        for path in package.paths().filter(|p| p.ends_with(".xml") || p.ends_with(".rels")) {
            if path.starts_with("ppt/charts/") {
                continue;
            }
            let mut reader = Reader::from_str(package.get_str(path).unwrap());
            loop {
                match reader.read_event() {
                    Ok(Event::Eof) => break,
                    Ok(_) => {},
                    Err(e) => panic!("{} is not well-formed: {}", path, e),
                }
            }
        }

        assert!(package.get("ppt/media/image1.png").is_some());
        assert_eq!(part(&package, "ppt/charts/chart1.xml"), "<c:chartSpace/>");
        let rels = part(&package, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Target="../media/image1.png""#));
        assert!(rels.contains(r#"Target="../charts/chart1.xml""#));
        let layout = pres.slide(1).unwrap().layout().ordinal();
        assert!(rels.contains(&format!(r#"Target="../slideLayouts/slideLayout{}.xml""#, layout)));

        let pres_xml = part(&package, "ppt/presentation.xml");
        assert!(pres_xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(pres_xml.contains("Default-1"));
    }

    #[test]
    fn test_every_layout_has_a_part() {
        let mut pres = Presentation::new().unwrap();
        let mut package = MemoryPackage::new();
        pres.export(&mut package).unwrap();
        for layout in pres.catalog().ids() {
            let path = format!("ppt/slideLayouts/slideLayout{}.xml", layout.ordinal());
            assert!(package.get(&path).is_some(), "{}", path);
        }
        assert!(package.get("ppt/slides/slide1.xml").is_none());
    }

    #[test]
    fn test_defined_layout_is_rendered() {
        let mut pres = Presentation::new().unwrap();
        let id = pres
            .define_slide_master(SlideMasterProps {
                title: "Branded".into(),
                background: Some("003366".into()),
                objects: vec![
                    ContentSpec::image(ImageSource::Encoded(PNG_1X1.into()).decode().unwrap())
                        .at_inches(12.0, 0.2, 1.0, 0.5),
                ],
                placeholders: vec![PlaceholderDecl::new("Heading", "title", None)
                    .at(Geometry::from_inches(0.5, 0.5, 12.0, 1.0))],
                slide_number: None,
            })
            .unwrap();
        pres.add_slide(AddSlideOptions::layout("Branded"))
            .add_text("Hello", "Heading")
            .unwrap();

        let mut package = MemoryPackage::new();
        pres.export(&mut package).unwrap();

        let n = id.ordinal();
        let layout_xml = part(&package, &format!("ppt/slideLayouts/slideLayout{}.xml", n));
        assert!(layout_xml.contains(r#"<p:cSld name="Branded">"#));
        assert!(layout_xml.contains(r#"val="003366""#));
        assert!(layout_xml.contains(r#"r:embed="rId2""#));
        let layout_rels = part(&package, &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n));
        assert!(layout_rels.contains("slideMaster1.xml"));
        assert!(layout_rels.contains("../media/image1.png"));

        let slide_xml = part(&package, "ppt/slides/slide1.xml");
        assert_eq!(placeholders(slide_xml), vec![("title".to_string(), None)]);
        assert!(slide_xml.contains("<p:spPr/>"));
    }

    struct FailingSink {
        fail_on: &'static str,
        written: usize,
    }

    impl PackageSink for FailingSink {
        fn write_part(&mut self, path: &str, _data: &[u8]) -> Result<()> {
            if path == self.fail_on {
                return Err(Error::Io(std::io::Error::other("disk full")));
            }
            self.written += 1;
            Ok(())
        }
    }

    #[test]
    fn test_failed_export_can_be_retried() {
        let mut pres = Presentation::new().unwrap();
        pres.add_slide(AddSlideOptions::layout("Title Only"))
            .add_text("Draft", "headline")
            .unwrap();

        let mut sink = FailingSink {
            fail_on: "ppt/slides/slide1.xml",
            written: 0,
        };
        assert!(pres.export(&mut sink).is_err());
        assert_eq!(pres.slide(1).unwrap().state(), SlideState::Merged);
        let objects = pres.slide(1).unwrap().objects().len();

        pres.slide_mut(1)
            .unwrap()
            .add_text("Final", "headline")
            .unwrap();
        assert_eq!(pres.slide(1).unwrap().state(), SlideState::Created);
        assert_eq!(pres.slide(1).unwrap().objects().len(), objects);

        let mut package = MemoryPackage::new();
        pres.export(&mut package).unwrap();
        assert_eq!(pres.slide(1).unwrap().state(), SlideState::Serialized);
        let xml = part(&package, "ppt/slides/slide1.xml");
        assert!(xml.contains("<a:t>Final</a:t>"));
        assert_eq!(placeholders(xml).len(), objects);
    }

    #[test]
    fn test_export_to_zip_file() {
        use std::io::{Read, Seek, SeekFrom};

        let mut pres = Presentation::new().unwrap();
        pres.add_slide(AddSlideOptions::layout("Two Content"))
            .add_text("Left column", "leftContent")
            .unwrap();

        let mut zip = ZipPackage::new(tempfile::tempfile().unwrap());
        pres.export(&mut zip).unwrap();
        let mut file = zip.finish().unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("<a:t>Left column</a:t>"));
        assert!(archive.by_name("ppt/presentation.xml").is_ok());
    }
}
