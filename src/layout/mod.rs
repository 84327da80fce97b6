//! Layout registry, catalog and placeholder resolution.
//!
//! - [`LayoutRegistry`]: static, process-wide layout data loaded from YAML.
//! - [`LayoutCatalog`]: the per-presentation view of the registry, plus
//!   application-defined layouts and decorations.
//! - [`resolve`]: maps a placeholder name onto a slot of a layout.

pub mod catalog;
pub mod definition;
pub mod geometry;
pub mod registry;
pub mod resolver;
pub mod role;
pub mod slot;

pub use catalog::{DEFAULT_LAYOUT_NAME, Layout, LayoutCatalog, LayoutId};
pub use definition::{LayoutDef, LayoutDefBuilder, is_spacer_name};
pub use geometry::{Geometry, GeometryOverride, SlideSize};
pub use registry::LayoutRegistry;
pub use resolver::{MatchKind, NotFound, Resolution, ResolvedBinding, resolve};
pub use role::PlaceholderRole;
pub use slot::{NameMap, SlotDecl, SlotKey, SlotSet};
