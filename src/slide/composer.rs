//! Slide composition.
//!
//! [`SlideComposer`] places content on one slide. A placement that names a
//! placeholder is resolved against the slide's layout and bound to a slot;
//! each slot holds at most one object, so a second placement into the same
//! slot (under the same name or an alias) updates the existing object.
//! Placements that do not resolve degrade to free-form shapes.

use super::content::{
    ChartPart, ContentKind, ContentObject, ImageSource, PlaceholderBinding, ShapeKind,
    SlideNumberProps, TableData,
};
use super::spec::ContentSpec;
use super::Slide;
use crate::common::error::Result;
use crate::common::unit::EMUS_PER_INCH;
use crate::layout::catalog::Layout;
use crate::layout::geometry::{Geometry, GeometryOverride, SlideSize};
use crate::layout::resolver::ResolvedBinding;

/// Where a convenience call puts its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placeholder(String),
    Free(GeometryOverride),
}

impl From<&str> for Placement {
    fn from(name: &str) -> Self {
        Self::Placeholder(name.to_string())
    }
}

impl From<String> for Placement {
    fn from(name: String) -> Self {
        Self::Placeholder(name)
    }
}

impl From<Geometry> for Placement {
    fn from(geometry: Geometry) -> Self {
        Self::Free(geometry.into())
    }
}

impl From<GeometryOverride> for Placement {
    fn from(geometry: GeometryOverride) -> Self {
        Self::Free(geometry)
    }
}

/// Mutable view of a slide together with the layout it was created from.
pub struct SlideComposer<'a> {
    slide: &'a mut Slide,
    layout: &'a Layout,
    slide_size: SlideSize,
}

impl<'a> SlideComposer<'a> {
    pub(crate) fn new(slide: &'a mut Slide, layout: &'a Layout, slide_size: SlideSize) -> Self {
        Self {
            slide,
            layout,
            slide_size,
        }
    }

    pub fn slide(&self) -> &Slide {
        self.slide
    }

    pub fn layout(&self) -> &Layout {
        self.layout
    }

    /// Place one object on the slide.
    ///
    /// Unresolvable placeholder names are logged and placed free-form; the
    /// only error is adding to a slide that has already been written out.
    pub fn add_content(&mut self, spec: ContentSpec) -> Result<&ContentObject> {
        self.slide.reopen()?;
        let ContentSpec {
            placeholder,
            geometry,
            kind,
        } = spec;

        if let Some(name) = placeholder {
            match self.layout.def().resolve(&name) {
                Ok(binding) => {
                    let pos = self.place_bound(name, binding, geometry, kind);
                    return Ok(&self.slide.objects()[pos]);
                },
                Err(reason) => log::warn!(
                    "slide {}: {}; placing {} free-form",
                    self.slide.number(),
                    reason,
                    kind.name()
                ),
            }
        }

        let geometry = free_form_geometry(self.slide_size, geometry);
        let pos = self.slide.push(ContentObject {
            kind,
            geometry: Some(geometry),
            binding: None,
        });
        Ok(&self.slide.objects()[pos])
    }

    fn place_bound(
        &mut self,
        requested: String,
        binding: ResolvedBinding,
        geometry: GeometryOverride,
        kind: ContentKind,
    ) -> usize {
        let number = self.slide.number();
        let slide_size = self.slide_size;
        let slot_geometry = self.layout.def().slots().geometry(&binding.slot);
        let place = |base: Option<Geometry>| bound_geometry(slide_size, number, geometry, base);

        if let Some(pos) = self.slide.bound_position(binding.slot) {
            let object = self.slide.object_mut(pos);
            if object.is_synthesized() {
                log::debug!("slide {}: filling inherited slot {}", number, binding.slot);
                *object = bound_object(requested, binding, place(slot_geometry), kind);
            } else {
                log::debug!(
                    "slide {}: '{}' continues slot {}",
                    number,
                    requested,
                    binding.slot
                );
                object.kind = kind;
                if !geometry.is_empty() {
                    object.geometry = place(object.geometry.or(slot_geometry));
                }
            }
            return pos;
        }

        let object = bound_object(requested, binding, place(slot_geometry), kind);
        self.slide.push(object)
    }

    fn add_at(&mut self, spec: ContentSpec, at: Placement) -> Result<&ContentObject> {
        let spec = match at {
            Placement::Placeholder(name) => spec.placeholder(name),
            Placement::Free(geometry) => spec.geometry(geometry),
        };
        self.add_content(spec)
    }

    pub fn add_text(&mut self, text: &str, at: impl Into<Placement>) -> Result<&ContentObject> {
        self.add_at(ContentSpec::text(text), at.into())
    }

    /// Decode and place an image.
    pub fn add_image(
        &mut self,
        source: ImageSource,
        at: impl Into<Placement>,
    ) -> Result<&ContentObject> {
        let image = source.decode()?;
        self.add_at(ContentSpec::image(image), at.into())
    }

    pub fn add_table(&mut self, table: TableData, at: impl Into<Placement>) -> Result<&ContentObject> {
        self.add_at(ContentSpec::table(table), at.into())
    }

    pub fn add_chart(&mut self, chart: ChartPart, at: impl Into<Placement>) -> Result<&ContentObject> {
        self.add_at(ContentSpec::chart(chart), at.into())
    }

    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        fill: Option<&str>,
        at: impl Into<Placement>,
    ) -> Result<&ContentObject> {
        self.add_at(ContentSpec::shape(kind, fill), at.into())
    }

    /// Solid background colour (hex RGB) for this slide only.
    pub fn set_background(&mut self, color: &str) -> Result<()> {
        self.slide.reopen()?;
        self.slide.background = Some(color.to_string());
        Ok(())
    }

    /// Slide-number field for this slide only, overriding the layout's.
    pub fn set_slide_number(&mut self, props: SlideNumberProps) -> Result<()> {
        self.slide.reopen()?;
        self.slide.slide_number = Some(props);
        Ok(())
    }
}

/// Complete a partial geometry for an object that has no slot to inherit
/// from: x and y default to one inch, the width runs to one inch short of
/// the right edge (never below one inch), the height is one inch.
pub(crate) fn free_form_geometry(slide_size: SlideSize, geometry: GeometryOverride) -> Geometry {
    let x = geometry.x.unwrap_or(EMUS_PER_INCH);
    let y = geometry.y.unwrap_or(EMUS_PER_INCH);
    let cx = geometry
        .cx
        .unwrap_or_else(|| (slide_size.cx - x - EMUS_PER_INCH).max(EMUS_PER_INCH));
    let cy = geometry.cy.unwrap_or(EMUS_PER_INCH);
    Geometry::new(x, y, cx, cy)
}

/// Geometry of a bound object: the override applied over `base`. A partial
/// override with no base to complete it is completed like a free-form
/// object.
fn bound_geometry(
    slide_size: SlideSize,
    number: usize,
    geometry: GeometryOverride,
    base: Option<Geometry>,
) -> Option<Geometry> {
    match geometry.over(base) {
        None if !geometry.is_empty() => {
            log::warn!(
                "slide {}: slot has no geometry to complete a partial position, using defaults",
                number
            );
            Some(free_form_geometry(slide_size, geometry))
        },
        resolved => resolved,
    }
}

fn bound_object(
    requested: String,
    binding: ResolvedBinding,
    geometry: Option<Geometry>,
    kind: ContentKind,
) -> ContentObject {
    ContentObject {
        kind,
        geometry,
        binding: Some(PlaceholderBinding {
            slot: binding.slot,
            requested_name: Some(requested),
            matched_label: binding.matched_label,
            synthesized: false,
        }),
    }
}
