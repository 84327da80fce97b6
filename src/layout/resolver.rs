//! Placeholder resolution.
//!
//! Maps a caller-supplied placeholder name onto a slot of a layout. The
//! lookup order is fixed:
//!
//! 1. exact match in the layout's label table,
//! 2. exact match in the layout's purpose table (`headline`, `footer`,
//!    `slideNumber`, `source`, ...),
//! 3. not found.
//!
//! Resolution never fails with an error. A miss is an ordinary outcome that
//! the composer turns into free-form placement.

use super::definition::LayoutDef;
use super::slot::SlotKey;
use thiserror::Error;

/// Which table produced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Label,
    Purpose,
}

/// Successful resolution of a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub slot: SlotKey,
    /// The label that names the slot. For label matches this is the matched
    /// label itself; for purpose matches it is the slot's first label, if
    /// it has one.
    pub matched_label: Option<String>,
    pub via: MatchKind,
}

/// Why a name did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("placeholder name is empty")]
    EmptyName,
    #[error("layout '{0}' declares no slots")]
    NoDeclaredSlots(String),
    #[error("no placeholder named '{name}' on layout '{layout}'")]
    UnknownName { layout: String, name: String },
}

pub type Resolution = std::result::Result<ResolvedBinding, NotFound>;

/// Resolve `requested` against `layout`.
pub fn resolve(layout: &LayoutDef, requested: &str) -> Resolution {
    if requested.is_empty() {
        return Err(NotFound::EmptyName);
    }
    if layout.slots().is_empty() {
        return Err(NotFound::NoDeclaredSlots(layout.name().to_string()));
    }

    if let Some((label, slot)) = layout.labels().get(requested) {
        log::debug!(
            "resolved '{}' on '{}' to {} by label",
            requested,
            layout.name(),
            slot
        );
        return Ok(ResolvedBinding {
            slot,
            matched_label: Some(label.to_string()),
            via: MatchKind::Label,
        });
    }

    if let Some((_, slot)) = layout.purposes().get(requested) {
        log::debug!(
            "resolved '{}' on '{}' to {} by purpose",
            requested,
            layout.name(),
            slot
        );
        return Ok(ResolvedBinding {
            slot,
            matched_label: layout.labels().names_for(slot).next().map(str::to_string),
            via: MatchKind::Purpose,
        });
    }

    Err(NotFound::UnknownName {
        layout: layout.name().to_string(),
        name: requested.to_string(),
    })
}
