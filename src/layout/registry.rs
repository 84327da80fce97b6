//! Static layout registry.
//!
//! The built-in registry is YAML data compiled into the crate and parsed once
//! per process. Alternative registries can be loaded from a string or file
//! with the same validation. A registry is immutable once built; per-
//! presentation changes go through [`LayoutCatalog`](super::LayoutCatalog).

use super::definition::LayoutDef;
use super::geometry::{Geometry, SlideSize};
use super::role::PlaceholderRole;
use super::slot::SlotKey;
use crate::common::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

static BUILTIN_YAML: &str = include_str!("../../resources/layouts.yaml");

static BUILTIN: Lazy<std::result::Result<LayoutRegistry, String>> =
    Lazy::new(|| LayoutRegistry::from_yaml_str(BUILTIN_YAML).map_err(|e| e.to_string()));

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegistry {
    slide_size: RawSize,
    #[serde(default)]
    master: Vec<RawSlot>,
    #[serde(default)]
    layouts: Vec<RawLayout>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSize {
    width: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSlot {
    #[serde(rename = "type")]
    role: String,
    #[serde(default)]
    idx: Option<u32>,
    #[serde(default)]
    geometry: Option<[f64; 4]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    name: String,
    #[serde(default)]
    division: Option<String>,
    #[serde(default)]
    slots: Vec<RawSlot>,
    #[serde(default)]
    labels: Vec<RawName>,
    #[serde(default)]
    purposes: Vec<RawName>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawName {
    #[serde(alias = "label", alias = "purpose")]
    name: String,
    #[serde(rename = "type")]
    role: String,
    #[serde(default)]
    idx: Option<u32>,
}

fn parse_role(token: &str) -> std::result::Result<PlaceholderRole, String> {
    PlaceholderRole::from_token(token).ok_or_else(|| format!("unknown placeholder type '{}'", token))
}

fn parse_key(role: &str, idx: Option<u32>) -> std::result::Result<SlotKey, String> {
    SlotKey::checked(parse_role(role)?, idx)
}

fn parse_geometry(raw: &[f64; 4]) -> std::result::Result<Geometry, String> {
    if raw.iter().any(|v| !v.is_finite()) || raw[2] < 0.0 || raw[3] < 0.0 {
        return Err(format!("invalid geometry {:?}", raw));
    }
    Ok(Geometry::from_inches(raw[0], raw[1], raw[2], raw[3]))
}

/// Immutable, ordered set of layout definitions plus template-level data.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    slide_size: SlideSize,
    master: HashMap<PlaceholderRole, Geometry>,
    layouts: Vec<Arc<LayoutDef>>,
    by_name: HashMap<String, usize>,
}

impl LayoutRegistry {
    /// The registry compiled into the crate.
    pub fn builtin() -> Result<&'static LayoutRegistry> {
        BUILTIN
            .as_ref()
            .map_err(|reason| Error::InvalidRegistry(reason.clone()))
    }

    /// Parse and validate a registry from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawRegistry =
            serde_saphyr::from_str(yaml).map_err(|e| Error::InvalidRegistry(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Parse and validate a registry from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    fn from_raw(raw: RawRegistry) -> Result<Self> {
        if !(raw.slide_size.width > 0.0 && raw.slide_size.height > 0.0)
            || !raw.slide_size.width.is_finite()
            || !raw.slide_size.height.is_finite()
        {
            return Err(Error::InvalidRegistry(format!(
                "invalid slide size {}x{}",
                raw.slide_size.width, raw.slide_size.height
            )));
        }

        let mut master = HashMap::new();
        for slot in &raw.master {
            let role = parse_role(&slot.role).map_err(Error::InvalidRegistry)?;
            let geometry = slot
                .geometry
                .as_ref()
                .ok_or_else(|| {
                    Error::InvalidRegistry(format!("master slot '{}' has no geometry", slot.role))
                })
                .and_then(|g| parse_geometry(g).map_err(Error::InvalidRegistry))?;
            if master.insert(role, geometry).is_some() {
                return Err(Error::InvalidRegistry(format!(
                    "master declares '{}' more than once",
                    slot.role
                )));
            }
        }

        let mut layouts = Vec::with_capacity(raw.layouts.len());
        let mut by_name = HashMap::with_capacity(raw.layouts.len());
        for raw_layout in raw.layouts {
            let name = raw_layout.name.clone();
            let mut def = build_layout(raw_layout)
                .map_err(|reason| Error::InvalidRegistry(format!("layout '{}': {}", name, reason)))?;
            def.slots_mut().inherit_geometry(&master);

            if by_name.insert(name.clone(), layouts.len()).is_some() {
                return Err(Error::InvalidRegistry(format!(
                    "layout '{}' is defined more than once",
                    name
                )));
            }
            layouts.push(Arc::new(def));
        }

        Ok(Self {
            slide_size: SlideSize::from_inches(raw.slide_size.width, raw.slide_size.height),
            master,
            layouts,
            by_name,
        })
    }

    /// Slide size the layout geometry was authored for.
    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    /// Master-level geometry for a role, inherited by slots that declare none.
    pub fn master_geometry(&self, role: PlaceholderRole) -> Option<Geometry> {
        self.master.get(&role).copied()
    }

    pub(crate) fn master(&self) -> &HashMap<PlaceholderRole, Geometry> {
        &self.master
    }

    /// All layouts, in registration order.
    pub fn layouts(&self) -> &[Arc<LayoutDef>] {
        &self.layouts
    }

    /// Exact-name lookup. No trimming or case folding is applied.
    pub fn get(&self, name: &str) -> Option<&Arc<LayoutDef>> {
        self.by_name.get(name).map(|&pos| &self.layouts[pos])
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

fn build_layout(raw: RawLayout) -> std::result::Result<LayoutDef, String> {
    let mut builder = LayoutDef::builder(raw.name);
    if let Some(division) = raw.division {
        builder = builder.division(division);
    }
    for slot in &raw.slots {
        let key = parse_key(&slot.role, slot.idx)?;
        let geometry = slot.geometry.as_ref().map(parse_geometry).transpose()?;
        builder = builder.slot(key, geometry);
    }
    for label in &raw.labels {
        builder = builder.label(label.name.clone(), parse_key(&label.role, label.idx)?);
    }
    for purpose in &raw.purposes {
        builder = builder.purpose(purpose.name.clone(), parse_key(&purpose.role, purpose.idx)?);
    }
    builder.build()
}
