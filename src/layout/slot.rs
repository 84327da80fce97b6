//! Slot sets and name maps.
//!
//! A [`SlotSet`] is the ordered list of structural slots a layout declares.
//! A [`NameMap`] is a many-to-one mapping from caller-facing names onto those
//! slots; it backs both the label table and the purpose table of a layout.

use super::geometry::Geometry;
use super::role::PlaceholderRole;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// Identity of a slot within one layout: role plus index.
///
/// Indices are unique within a role, not across roles. The title role is
/// unindexed and therefore appears at most once per layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub role: PlaceholderRole,
    pub index: Option<u32>,
}

impl SlotKey {
    pub const TITLE: SlotKey = SlotKey {
        role: PlaceholderRole::Title,
        index: None,
    };

    pub const fn new(role: PlaceholderRole, index: u32) -> Self {
        Self {
            role,
            index: Some(index),
        }
    }

    pub const fn body(index: u32) -> Self {
        Self::new(PlaceholderRole::Body, index)
    }

    /// Build a key from a role and optional index, checking that the index
    /// is present exactly when the role is indexed.
    pub fn checked(role: PlaceholderRole, index: Option<u32>) -> Result<Self, String> {
        match (role.is_indexed(), index) {
            (true, None) => Err(format!("role '{}' requires an index", role)),
            (false, Some(idx)) => Err(format!("role '{}' cannot carry index {}", role, idx)),
            _ => Ok(Self { role, index }),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(idx) => write!(f, "{}:{}", self.role, idx),
            None => write!(f, "{}", self.role),
        }
    }
}

/// A slot declared by a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDecl {
    pub key: SlotKey,
    /// Geometry declared by the layout template, if any. Slots without
    /// geometry inherit their position from the master.
    pub geometry: Option<Geometry>,
}

/// Ordered, duplicate-free set of slots declared by one layout.
#[derive(Debug, Clone, Default)]
pub struct SlotSet {
    slots: Vec<SlotDecl>,
    positions: HashMap<SlotKey, usize>,
}

impl SlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a slot. Fails if the key is already declared.
    pub fn declare(&mut self, key: SlotKey, geometry: Option<Geometry>) -> Result<(), String> {
        if self.positions.contains_key(&key) {
            return Err(match key.index {
                Some(idx) => format!("duplicate index {} for role '{}'", idx, key.role),
                None => format!("role '{}' declared more than once", key.role),
            });
        }
        self.positions.insert(key, self.slots.len());
        self.slots.push(SlotDecl { key, geometry });
        Ok(())
    }

    pub fn contains(&self, key: &SlotKey) -> bool {
        self.positions.contains_key(key)
    }

    pub fn get(&self, key: &SlotKey) -> Option<&SlotDecl> {
        self.positions.get(key).map(|&pos| &self.slots[pos])
    }

    /// Geometry declared for a slot, if the slot exists and has any.
    pub fn geometry(&self, key: &SlotKey) -> Option<Geometry> {
        self.get(key).and_then(|decl| decl.geometry)
    }

    /// Indices declared for a role, in declaration order.
    pub fn indices(&self, role: PlaceholderRole) -> SmallVec<[u32; 8]> {
        self.slots
            .iter()
            .filter(|decl| decl.key.role == role)
            .filter_map(|decl| decl.key.index)
            .collect()
    }

    pub fn has_role(&self, role: PlaceholderRole) -> bool {
        self.slots.iter().any(|decl| decl.key.role == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotDecl> {
        self.slots.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.slots.iter().map(|decl| decl.key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fill in geometry for slots that declare none, from master-level
    /// defaults keyed by role.
    pub(crate) fn inherit_geometry(&mut self, defaults: &HashMap<PlaceholderRole, Geometry>) {
        for decl in &mut self.slots {
            if decl.geometry.is_none() {
                decl.geometry = defaults.get(&decl.key.role).copied();
            }
        }
    }
}

/// Many-to-one mapping from names onto slots, preserving insertion order.
///
/// Several names may map to the same slot; that is aliasing and is expected.
/// One name mapping to two different slots is rejected.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    entries: Vec<(String, SlotKey)>,
    lookup: HashMap<String, usize>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `key`. Rebinding a name to the slot it already names
    /// is a no-op.
    pub fn bind(&mut self, name: &str, key: SlotKey) -> Result<(), String> {
        if let Some(&pos) = self.lookup.get(name) {
            let existing = self.entries[pos].1;
            if existing == key {
                return Ok(());
            }
            return Err(format!(
                "name '{}' already bound to {}, cannot rebind to {}",
                name, existing, key
            ));
        }
        self.lookup.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), key));
        Ok(())
    }

    /// Exact-match lookup. Returns the stored name alongside the slot.
    pub fn get(&self, name: &str) -> Option<(&str, SlotKey)> {
        self.lookup.get(name).map(|&pos| {
            let (stored, key) = &self.entries[pos];
            (stored.as_str(), *key)
        })
    }

    /// Every name bound to `key`, in insertion order.
    pub fn names_for(&self, key: SlotKey) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |(_, k)| *k == key)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SlotKey)> {
        self.entries.iter().map(|(name, key)| (name.as_str(), *key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
