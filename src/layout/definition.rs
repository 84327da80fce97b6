//! Layout definitions.
//!
//! A [`LayoutDef`] is the immutable structural part of a layout: its name,
//! the slots it declares, and the two name tables (labels and purposes) that
//! resolve caller-facing names onto those slots. Definitions are built once,
//! either from registry data or from an explicit layout-definition call, and
//! shared read-only by every slide that uses them.

use super::geometry::Geometry;
use super::resolver::{self, Resolution};
use super::slot::{NameMap, SlotKey, SlotSet};

/// Whether `name` denotes a spacer entry.
///
/// Spacers separate groups of layouts in a template. Their names are
/// non-empty and made only of whitespace and punctuation (`"~        "`).
pub fn is_spacer_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Structural definition of one layout.
#[derive(Debug, Clone)]
pub struct LayoutDef {
    name: String,
    division: Option<String>,
    slots: SlotSet,
    labels: NameMap,
    purposes: NameMap,
}

impl LayoutDef {
    /// Start building a definition with the given name.
    ///
    /// The name is kept verbatim, including leading or trailing whitespace.
    pub fn builder(name: impl Into<String>) -> LayoutDefBuilder {
        LayoutDefBuilder::new(name.into())
    }

    /// A definition with no slots and no names.
    pub(crate) fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            division: None,
            slots: SlotSet::new(),
            labels: NameMap::new(),
            purposes: NameMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Division tag, for layouts that only ship with a particular template
    /// variant.
    pub fn division(&self) -> Option<&str> {
        self.division.as_deref()
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    pub fn labels(&self) -> &NameMap {
        &self.labels
    }

    pub fn purposes(&self) -> &NameMap {
        &self.purposes
    }

    pub fn is_spacer(&self) -> bool {
        is_spacer_name(&self.name)
    }

    /// Resolve a requested placeholder name against this layout.
    pub fn resolve(&self, requested: &str) -> Resolution {
        resolver::resolve(self, requested)
    }

    /// Shape name written for a slot: its first label, or a generated name
    /// built from the role.
    pub fn slot_name(&self, key: SlotKey) -> String {
        match self.labels.names_for(key).next() {
            Some(label) => label.to_string(),
            None => match key.index {
                Some(idx) => format!("{} {}", key.role.display_name(), idx),
                None => key.role.display_name().to_string(),
            },
        }
    }

    /// A copy of this definition that additionally declares `extra` slots and
    /// binds `extra_labels`. Used to extend a shared definition for a single
    /// presentation without touching the shared copy.
    ///
    /// Slots that already exist keep their geometry.
    pub(crate) fn extended(
        &self,
        extra: &[(SlotKey, Option<Geometry>)],
        extra_labels: &[(String, SlotKey)],
    ) -> Result<LayoutDef, String> {
        if self.is_spacer() && !(extra.is_empty() && extra_labels.is_empty()) {
            return Err("spacer layouts cannot declare slots or labels".to_string());
        }
        let mut def = self.clone();
        for (key, geometry) in extra {
            if def.slots.contains(key) {
                if let Some(geometry) = geometry
                    && def.slots.geometry(key) != Some(*geometry)
                {
                    log::warn!(
                        "layout '{}': slot {} is already declared, ignoring new geometry",
                        def.name,
                        key
                    );
                }
                continue;
            }
            def.slots.declare(*key, *geometry)?;
        }
        for (label, key) in extra_labels {
            bind_checked(&mut def.labels, &def.slots, label, *key, "label")?;
        }
        Ok(def)
    }

    pub(crate) fn slots_mut(&mut self) -> &mut SlotSet {
        &mut self.slots
    }
}

fn bind_checked(
    map: &mut NameMap,
    slots: &SlotSet,
    name: &str,
    key: SlotKey,
    what: &str,
) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("empty {} for {}", what, key));
    }
    if !slots.contains(&key) {
        return Err(format!("{} '{}' targets undeclared slot {}", what, name, key));
    }
    map.bind(name, key)
}

/// Builder for [`LayoutDef`]. Validation is deferred to [`build`].
///
/// [`build`]: LayoutDefBuilder::build
#[derive(Debug, Clone)]
pub struct LayoutDefBuilder {
    name: String,
    division: Option<String>,
    slots: Vec<(SlotKey, Option<Geometry>)>,
    labels: Vec<(String, SlotKey)>,
    purposes: Vec<(String, SlotKey)>,
}

impl LayoutDefBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            division: None,
            slots: Vec::new(),
            labels: Vec::new(),
            purposes: Vec::new(),
        }
    }

    pub fn division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn slot(mut self, key: SlotKey, geometry: Option<Geometry>) -> Self {
        self.slots.push((key, geometry));
        self
    }

    pub fn label(mut self, label: impl Into<String>, key: SlotKey) -> Self {
        self.labels.push((label.into(), key));
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>, key: SlotKey) -> Self {
        self.purposes.push((purpose.into(), key));
        self
    }

    /// Validate and build the definition.
    ///
    /// Errors carry a human-readable reason; callers wrap it in the error
    /// variant appropriate to where the definition came from.
    pub fn build(self) -> Result<LayoutDef, String> {
        if self.name.is_empty() {
            return Err("layout name is empty".to_string());
        }
        let spacer = is_spacer_name(&self.name);
        if spacer && !(self.slots.is_empty() && self.labels.is_empty()) {
            return Err("spacer layouts cannot declare slots or labels".to_string());
        }

        let mut slots = SlotSet::new();
        for (key, geometry) in self.slots {
            SlotKey::checked(key.role, key.index)?;
            slots.declare(key, geometry)?;
        }

        let mut labels = NameMap::new();
        for (label, key) in &self.labels {
            bind_checked(&mut labels, &slots, label, *key, "label")?;
        }

        let mut purposes = NameMap::new();
        for (purpose, key) in &self.purposes {
            bind_checked(&mut purposes, &slots, purpose, *key, "purpose")?;
        }

        Ok(LayoutDef {
            name: self.name,
            division: self.division,
            slots,
            labels,
            purposes,
        })
    }
}
