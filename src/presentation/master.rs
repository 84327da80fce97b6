//! Layout definition calls.
//!
//! [`SlideMasterProps`] describes a layout an application defines or
//! restyles: decorations drawn on every slide, extra placeholders, a
//! background and slide-number settings. Restyling replaces all three
//! presentation-scoped settings. Validation problems are authoring errors
//! and fail the call.

use crate::common::error::{Error, Result};
use crate::layout::catalog::{LayoutCatalog, LayoutId};
use crate::layout::definition::LayoutDef;
use crate::layout::geometry::{Geometry, SlideSize};
use crate::layout::role::PlaceholderRole;
use crate::layout::slot::{SlotKey, SlotSet};
use crate::slide::composer::free_form_geometry;
use crate::slide::content::{ContentObject, SlideNumberProps};
use crate::slide::spec::ContentSpec;

/// A placeholder declared by a layout definition call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderDecl {
    /// Name content placements use to target this slot.
    pub label: String,
    /// PresentationML type token: `body`, `title`, `pic`, `ftr`, `sldNum`
    /// or `dt`.
    pub role: String,
    pub index: Option<u32>,
    pub geometry: Option<Geometry>,
}

impl PlaceholderDecl {
    pub fn new(label: impl Into<String>, role: impl Into<String>, index: Option<u32>) -> Self {
        Self {
            label: label.into(),
            role: role.into(),
            index,
            geometry: None,
        }
    }

    pub fn at(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

/// Input to [`Presentation::define_slide_master`].
///
/// [`Presentation::define_slide_master`]: super::Presentation::define_slide_master
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideMasterProps {
    /// Layout name. Required; matched exactly against existing layouts.
    pub title: String,
    /// Hex RGB background colour.
    pub background: Option<String>,
    /// Decorations. These are free-form objects; placeholder names are not
    /// allowed here.
    pub objects: Vec<ContentSpec>,
    pub placeholders: Vec<PlaceholderDecl>,
    pub slide_number: Option<SlideNumberProps>,
}

impl SlideMasterProps {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

fn malformed(layout: &str, reason: impl Into<String>) -> Error {
    Error::malformed(layout, reason)
}

/// Checked slot and label list for the declared placeholders.
fn check_placeholders(props: &SlideMasterProps) -> Result<Vec<(String, SlotKey, Option<Geometry>)>> {
    let mut seen = SlotSet::new();
    let mut checked = Vec::with_capacity(props.placeholders.len());
    for decl in &props.placeholders {
        if decl.label.is_empty() {
            return Err(malformed(&props.title, "placeholder label is empty"));
        }
        let role = PlaceholderRole::from_token(&decl.role).ok_or_else(|| {
            malformed(
                &props.title,
                format!("placeholder '{}' has unknown type '{}'", decl.label, decl.role),
            )
        })?;
        let key = SlotKey::checked(role, decl.index)
            .map_err(|reason| malformed(&props.title, format!("placeholder '{}': {}", decl.label, reason)))?;
        seen.declare(key, decl.geometry)
            .map_err(|reason| malformed(&props.title, reason))?;
        checked.push((decl.label.clone(), key, decl.geometry));
    }
    Ok(checked)
}

/// Standard purpose rows for a layout defined at run time: the first slot
/// of each structural role answers to its purpose name.
fn default_purposes(slots: &[(String, SlotKey, Option<Geometry>)]) -> Vec<(&'static str, SlotKey)> {
    const PURPOSES: [(&str, PlaceholderRole); 4] = [
        ("headline", PlaceholderRole::Title),
        ("footer", PlaceholderRole::Footer),
        ("slideNumber", PlaceholderRole::SlideNumber),
        ("date", PlaceholderRole::Date),
    ];
    PURPOSES
        .iter()
        .filter_map(|&(purpose, role)| {
            slots
                .iter()
                .find(|(_, key, _)| key.role == role)
                .map(|(_, key, _)| (purpose, *key))
        })
        .collect()
}

fn build_decorations(props: &SlideMasterProps, slide_size: SlideSize) -> Result<Vec<ContentObject>> {
    props
        .objects
        .iter()
        .map(|spec| {
            if let Some(name) = &spec.placeholder {
                return Err(malformed(
                    &props.title,
                    format!("decoration refers to placeholder '{}'; declare it under placeholders", name),
                ));
            }
            Ok(ContentObject {
                kind: spec.kind.clone(),
                geometry: Some(free_form_geometry(slide_size, spec.geometry)),
                binding: None,
            })
        })
        .collect()
}

/// Apply a layout definition call to `catalog`.
pub(crate) fn define(
    catalog: &mut LayoutCatalog,
    props: &SlideMasterProps,
    slide_size: SlideSize,
) -> Result<LayoutId> {
    if props.title.is_empty() {
        return Err(malformed("", "missing title"));
    }
    let placeholders = check_placeholders(props)?;
    let decorations = build_decorations(props, slide_size)?;

    let mut def = match catalog.get_layout(&props.title) {
        Some(existing) => {
            let slots: Vec<_> = placeholders.iter().map(|(_, key, g)| (*key, *g)).collect();
            let labels: Vec<_> = placeholders
                .iter()
                .map(|(label, key, _)| (label.clone(), *key))
                .collect();
            existing
                .def()
                .extended(&slots, &labels)
                .map_err(|reason| malformed(&props.title, reason))?
        },
        None => {
            let mut builder = LayoutDef::builder(props.title.clone());
            for (label, key, geometry) in &placeholders {
                builder = builder.slot(*key, *geometry).label(label.clone(), *key);
            }
            for (purpose, key) in default_purposes(&placeholders) {
                builder = builder.purpose(purpose, key);
            }
            builder.build().map_err(|reason| malformed(&props.title, reason))?
        },
    };

    def.slots_mut().inherit_geometry(catalog.master());

    let id = catalog.upsert(def);
    let layout = catalog.layout_mut(id);
    layout.decorations = decorations;
    layout.background = props.background.clone();
    layout.slide_number = props.slide_number.clone();
    log::debug!(
        "defined layout '{}' at position {} with {} slot(s)",
        props.title,
        id.ordinal(),
        catalog.layout(id).def().slots().len()
    );
    Ok(id)
}
