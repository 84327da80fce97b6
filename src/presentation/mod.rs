//! Presentation container.
//!
//! A [`Presentation`] owns a per-instance [`LayoutCatalog`], the slides and
//! the section list, and drives export. Layout selection and placeholder
//! problems are recovered with a warning; only malformed layout definitions
//! and export failures are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidekit::{AddSlideOptions, MemoryPackage, Presentation};
//!
//! let mut pres = Presentation::new()?;
//! let mut slide = pres.add_slide(AddSlideOptions::layout("Two Content + Subtitles "));
//! slide.add_text("Quarterly results", "headline")?;
//! slide.add_text("Revenue", "leftSubtitle")?;
//! slide.add_text("Costs", "rightSubtitle")?;
//!
//! let mut package = MemoryPackage::new();
//! pres.export(&mut package)?;
//! assert!(package.get("ppt/slides/slide1.xml").is_some());
//! # Ok::<(), slidekit::Error>(())
//! ```

pub mod master;
pub mod sections;

pub use master::{PlaceholderDecl, SlideMasterProps};
pub use sections::{Section, SectionList};

use crate::common::error::{Error, Result};
use crate::layout::catalog::{Layout, LayoutCatalog, LayoutId};
use crate::layout::geometry::SlideSize;
use crate::layout::registry::LayoutRegistry;
use crate::slide::composer::SlideComposer;
use crate::slide::content::SlideNumberProps;
use crate::slide::merge::materialize_inherited_slots;
use crate::slide::{Slide, SlideState};
use crate::writer::package::PackageSink;
use std::collections::HashMap;
use std::sync::Arc;

pub const LAYOUT_4X3: &str = "LAYOUT_4x3";
pub const LAYOUT_16X9: &str = "LAYOUT_16x9";
pub const LAYOUT_16X10: &str = "LAYOUT_16x10";
pub const LAYOUT_WIDE: &str = "LAYOUT_WIDE";

/// Built-in size presets, in EMUs.
const SIZE_PRESETS: [(&str, SlideSize); 4] = [
    (LAYOUT_4X3, SlideSize { cx: 9_144_000, cy: 6_858_000 }),
    (LAYOUT_16X9, SlideSize { cx: 9_144_000, cy: 5_143_500 }),
    (LAYOUT_16X10, SlideSize { cx: 9_144_000, cy: 5_715_000 }),
    (LAYOUT_WIDE, SlideSize { cx: 12_192_000, cy: 6_858_000 }),
];

/// Construction-time settings.
#[derive(Debug, Clone, Default)]
pub struct PresentationOptions {
    /// Size preset; `LAYOUT_WIDE` when unset.
    pub layout_size: Option<String>,
    /// Template division whose tagged layouts should be included.
    pub division: Option<String>,
    /// Registry to use instead of the built-in one.
    pub registry: Option<Arc<LayoutRegistry>>,
}

/// Options for [`Presentation::add_slide`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSlideOptions {
    /// Exact layout name. The default layout is used when unset or unknown.
    pub layout: Option<String>,
    /// Section title the slide joins.
    pub section: Option<String>,
}

impl AddSlideOptions {
    pub fn layout(name: impl Into<String>) -> Self {
        Self {
            layout: Some(name.into()),
            section: None,
        }
    }

    pub fn in_section(mut self, title: impl Into<String>) -> Self {
        self.section = Some(title.into());
        self
    }
}

/// An in-memory presentation under construction.
#[derive(Debug, Clone)]
pub struct Presentation {
    catalog: LayoutCatalog,
    slides: Vec<Slide>,
    sections: SectionList,
    layout_size: String,
    slide_size: SlideSize,
    custom_sizes: HashMap<String, SlideSize>,
    master_slide_number: Option<SlideNumberProps>,
}

impl Presentation {
    /// A presentation on the built-in registry with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(PresentationOptions::default())
    }

    pub fn with_options(options: PresentationOptions) -> Result<Self> {
        let catalog = match &options.registry {
            Some(registry) => LayoutCatalog::from_registry(registry, options.division.as_deref()),
            None => LayoutCatalog::from_registry(
                LayoutRegistry::builtin()?,
                options.division.as_deref(),
            ),
        };
        let mut pres = Self {
            catalog,
            slides: Vec::new(),
            sections: SectionList::new(),
            layout_size: LAYOUT_WIDE.to_string(),
            slide_size: SIZE_PRESETS[3].1,
            custom_sizes: HashMap::new(),
            master_slide_number: None,
        };
        if let Some(size) = &options.layout_size {
            pres.set_layout_size(size)?;
        }
        Ok(pres)
    }

    /// Select a size preset or a size registered with
    /// [`define_layout_size`](Self::define_layout_size).
    pub fn set_layout_size(&mut self, name: &str) -> Result<()> {
        let size = self
            .custom_sizes
            .get(name)
            .copied()
            .or_else(|| {
                SIZE_PRESETS
                    .iter()
                    .find(|(preset, _)| *preset == name)
                    .map(|(_, size)| *size)
            })
            .ok_or_else(|| Error::UnknownLayoutSize(name.to_string()))?;
        self.layout_size = name.to_string();
        self.slide_size = size;
        Ok(())
    }

    /// Register a custom size preset, in inches.
    pub fn define_layout_size(&mut self, name: &str, width: f64, height: f64) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidLayoutSize {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if !width.is_finite() || !height.is_finite() {
            return Err(invalid("dimensions must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid("dimensions must be positive"));
        }
        self.custom_sizes
            .insert(name.to_string(), SlideSize::from_inches(width, height));
        Ok(())
    }

    pub fn layout_size(&self) -> &str {
        &self.layout_size
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Exact-name layout lookup.
    pub fn get_layout(&self, name: &str) -> Option<&Layout> {
        self.catalog.get_layout(name)
    }

    pub fn list_layouts(&self) -> &[Layout] {
        self.catalog.list_layouts()
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn master_slide_number(&self) -> Option<&SlideNumberProps> {
        self.master_slide_number.as_ref()
    }

    /// Add a named section, optionally at a position in the section list.
    pub fn add_section(&mut self, title: &str, order: Option<usize>) {
        if title.is_empty() {
            log::warn!("ignoring section with empty title");
            return;
        }
        self.sections.add_section(title, order);
    }

    /// Create a slide and return a composer for it.
    ///
    /// An unknown or spacer layout name falls back to the default layout
    /// with a warning.
    pub fn add_slide(&mut self, options: AddSlideOptions) -> SlideComposer<'_> {
        let layout = self.select_layout(options.layout.as_deref());
        let number = self.slides.len() + 1;
        let mut slide = Slide::new(number, layout);

        match options.section.as_deref() {
            Some(title) => {
                if self.sections.assign(title, slide.slide_id()) {
                    slide.section = Some(title.to_string());
                } else {
                    log::warn!("slide {}: no section titled '{}'", number, title);
                }
            },
            None => slide.section = self.sections.assign_default(slide.slide_id()),
        }

        self.slides.push(slide);
        let slide = &mut self.slides[number - 1];
        SlideComposer::new(slide, self.catalog.layout(layout), self.slide_size)
    }

    fn select_layout(&self, name: Option<&str>) -> LayoutId {
        let fallback = self.catalog.default_layout();
        let Some(name) = name else {
            return fallback;
        };
        match self.catalog.find(name) {
            Some(id) if !self.catalog.layout(id).is_spacer() => id,
            Some(_) => {
                log::warn!("layout '{}' is a spacer; using the default layout", name);
                fallback
            },
            None => {
                log::warn!("unknown layout '{}'; using the default layout", name);
                fallback
            },
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide by 1-based number.
    pub fn slide(&self, number: usize) -> Option<&Slide> {
        number.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    /// Composer for the slide with this 1-based number.
    pub fn slide_mut(&mut self, number: usize) -> Option<SlideComposer<'_>> {
        let slide = self.slides.get_mut(number.checked_sub(1)?)?;
        let layout = self.catalog.layout(slide.layout());
        Some(SlideComposer::new(slide, layout, self.slide_size))
    }

    /// Define a new layout or restyle an existing one.
    pub fn define_slide_master(&mut self, props: SlideMasterProps) -> Result<LayoutId> {
        let id = master::define(&mut self.catalog, &props, self.slide_size)?;
        if self.master_slide_number.is_none()
            && let Some(slide_number) = props.slide_number
        {
            log::debug!("master takes slide-number settings from '{}'", props.title);
            self.master_slide_number = Some(slide_number);
        }
        Ok(id)
    }

    /// Show slide numbers on the first layout and the master.
    pub fn set_slide_number(&mut self, props: SlideNumberProps) {
        let first = self
            .catalog
            .ids()
            .next()
            .unwrap_or_else(|| self.catalog.default_layout());
        self.catalog.layout_mut(first).slide_number = Some(props.clone());
        self.master_slide_number = Some(props);
    }

    /// Slide-number settings in force for a slide: its own, its layout's,
    /// then the master's.
    pub fn effective_slide_number<'a>(&'a self, slide: &'a Slide) -> Option<&'a SlideNumberProps> {
        slide
            .slide_number()
            .or_else(|| self.catalog.layout(slide.layout()).slide_number())
            .or(self.master_slide_number.as_ref())
    }

    /// Materialize inherited slots, render every part and hand them to
    /// `sink`.
    ///
    /// Slides are marked serialized only once the sink has accepted every
    /// part; after a failure the presentation can be exported again.
    pub fn export<S: PackageSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        for slide in &mut self.slides {
            materialize_inherited_slots(slide, self.catalog.layout(slide.layout()).def());
        }

        let parts = crate::writer::render_package(self)?;
        for part in &parts {
            sink.write_part(&part.path, &part.data)?;
        }

        for slide in &mut self.slides {
            slide.set_state(SlideState::Serialized);
        }
        log::debug!(
            "exported {} slide(s) and {} layout(s) as {} part(s)",
            self.slides.len(),
            self.catalog.len(),
            parts.len()
        );
        Ok(())
    }
}
