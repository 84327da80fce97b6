//! Per-presentation layout catalog.
//!
//! The catalog is the overlay a presentation keeps on top of the shared
//! registry: it references registry definitions through `Arc`, adds any
//! layouts defined by the application, and carries the mutable,
//! presentation-scoped parts of a layout (decorations, background,
//! slide-number settings). Registry data itself is never modified.

use super::definition::LayoutDef;
use super::geometry::Geometry;
use super::registry::LayoutRegistry;
use super::role::PlaceholderRole;
use crate::slide::content::{ContentObject, SlideNumberProps};
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the layout added when a catalog would otherwise have nothing a
/// slide could use.
pub const DEFAULT_LAYOUT_NAME: &str = "DEFAULT";

/// Stable handle to a layout in one catalog.
///
/// Layouts are never removed, so a handle stays valid for the catalog's
/// lifetime. The ordinal is the 1-based position used for part names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(usize);

impl LayoutId {
    pub fn ordinal(&self) -> usize {
        self.0 + 1
    }
}

/// A layout as seen by one presentation.
#[derive(Debug, Clone)]
pub struct Layout {
    def: Arc<LayoutDef>,
    pub(crate) decorations: Vec<ContentObject>,
    pub(crate) background: Option<String>,
    pub(crate) slide_number: Option<SlideNumberProps>,
}

impl Layout {
    fn new(def: Arc<LayoutDef>) -> Self {
        Self {
            def,
            decorations: Vec::new(),
            background: None,
            slide_number: None,
        }
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    pub fn def(&self) -> &LayoutDef {
        &self.def
    }

    pub fn is_spacer(&self) -> bool {
        self.def.is_spacer()
    }

    /// Objects drawn on every slide using this layout.
    pub fn decorations(&self) -> &[ContentObject] {
        &self.decorations
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn slide_number(&self) -> Option<&SlideNumberProps> {
        self.slide_number.as_ref()
    }
}

/// Ordered layouts available to one presentation.
#[derive(Debug, Clone)]
pub struct LayoutCatalog {
    layouts: Vec<Layout>,
    by_name: HashMap<String, usize>,
    master: HashMap<PlaceholderRole, Geometry>,
}

impl LayoutCatalog {
    /// Build a catalog from registry data.
    ///
    /// Layouts tagged with a division are kept only when `division` names it.
    /// Filtering happens before positions are assigned, so ordinals are
    /// contiguous.
    pub fn from_registry(registry: &LayoutRegistry, division: Option<&str>) -> Self {
        let mut catalog = Self {
            layouts: Vec::with_capacity(registry.len()),
            by_name: HashMap::with_capacity(registry.len()),
            master: registry.master().clone(),
        };
        for def in registry.layouts() {
            match def.division() {
                Some(tag) if Some(tag) != division => continue,
                _ => {},
            }
            catalog.push(Arc::clone(def));
        }
        if catalog.layouts.iter().all(Layout::is_spacer) {
            log::warn!(
                "no usable layouts in registry, adding '{}'",
                DEFAULT_LAYOUT_NAME
            );
            catalog.push(Arc::new(LayoutDef::empty(DEFAULT_LAYOUT_NAME)));
        }
        catalog
    }

    fn push(&mut self, def: Arc<LayoutDef>) -> LayoutId {
        let pos = self.layouts.len();
        self.by_name.insert(def.name().to_string(), pos);
        self.layouts.push(Layout::new(def));
        LayoutId(pos)
    }

    /// Exact-name lookup, whitespace included.
    pub fn get_layout(&self, name: &str) -> Option<&Layout> {
        self.find(name).map(|id| self.layout(id))
    }

    pub fn find(&self, name: &str) -> Option<LayoutId> {
        self.by_name.get(name).copied().map(LayoutId)
    }

    /// All layouts in registration order.
    pub fn list_layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn ids(&self) -> impl Iterator<Item = LayoutId> {
        (0..self.layouts.len()).map(LayoutId)
    }

    pub fn layout(&self, id: LayoutId) -> &Layout {
        &self.layouts[id.0]
    }

    pub(crate) fn layout_mut(&mut self, id: LayoutId) -> &mut Layout {
        &mut self.layouts[id.0]
    }

    /// The layout slides fall back to: the first one that is not a spacer.
    pub fn default_layout(&self) -> LayoutId {
        let pos = self
            .layouts
            .iter()
            .position(|layout| !layout.is_spacer())
            .unwrap_or(0);
        LayoutId(pos)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Master-level geometry by role, from the registry the catalog was
    /// built from.
    pub(crate) fn master(&self) -> &HashMap<PlaceholderRole, Geometry> {
        &self.master
    }

    /// Append a new layout, or swap the definition of an existing one.
    ///
    /// Replacing keeps the layout's position; slides already bound to it see
    /// the new definition.
    pub(crate) fn upsert(&mut self, def: LayoutDef) -> LayoutId {
        match self.find(def.name()) {
            Some(id) => {
                self.layouts[id.0].def = Arc::new(def);
                id
            },
            None => self.push(Arc::new(def)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::slot::SlotKey;

    fn builtin() -> &'static LayoutRegistry {
        LayoutRegistry::builtin().unwrap()
    }

    #[test]
    fn test_default_layout_is_first() {
        let catalog = LayoutCatalog::from_registry(builtin(), None);
        let id = catalog.default_layout();
        assert_eq!(id.ordinal(), 1);
        assert_eq!(catalog.layout(id).name(), "Content - no subtitle");
    }

    #[test]
    fn test_exact_lookup() {
        let catalog = LayoutCatalog::from_registry(builtin(), None);
        assert!(catalog.get_layout("Two Content + Subtitles ").is_some());
        assert!(catalog.get_layout("Two Content + Subtitles").is_none());
        assert!(catalog.get_layout("two content + subtitles ").is_none());
    }

    #[test]
    fn test_division_filter() {
        let plain = LayoutCatalog::from_registry(builtin(), None);
        let energy = LayoutCatalog::from_registry(builtin(), Some("energy"));
        assert!(plain.get_layout("CERA_Title Image Bottom").is_none());
        assert!(energy.get_layout("CERA_Title Image Bottom").is_some());
        assert!(energy.len() > plain.len());
        assert_eq!(energy.len(), builtin().len());
    }

    #[test]
    fn test_ordinals_follow_registration_order() {
        let catalog = LayoutCatalog::from_registry(builtin(), None);
        let names: Vec<_> = catalog.list_layouts().iter().map(Layout::name).collect();
        for (pos, id) in catalog.ids().enumerate() {
            assert_eq!(id.ordinal(), pos + 1);
            assert_eq!(catalog.layout(id).name(), names[pos]);
        }
    }

    #[test]
    fn test_empty_registry_gets_default_layout() {
        let registry = LayoutRegistry::from_yaml_str(
            "slide_size: { width: 10.0, height: 7.5 }\nlayouts:\n  - name: \"~ \"\n",
        )
        .unwrap();
        let catalog = LayoutCatalog::from_registry(&registry, None);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.layout(catalog.default_layout()).name(), DEFAULT_LAYOUT_NAME);
    }

    #[test]
    fn test_upsert_does_not_touch_registry() {
        let mut catalog = LayoutCatalog::from_registry(builtin(), None);
        let name = "Content - no subtitle";
        let before = catalog.len();
        let extended = catalog
            .get_layout(name)
            .unwrap()
            .def()
            .extended(&[(SlotKey::body(99), None)], &[])
            .unwrap();
        let id = catalog.upsert(extended);
        assert_eq!(id.ordinal(), 1);
        assert_eq!(catalog.len(), before);
        assert!(catalog.layout(id).def().slots().contains(&SlotKey::body(99)));
        assert!(!builtin().get(name).unwrap().slots().contains(&SlotKey::body(99)));
    }
}
