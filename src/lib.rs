//! Slidekit - layout-aware slide composition for PresentationML decks
//!
//! Slides are built against a catalog of named layouts. Content is placed
//! either into a layout slot, addressed by one of the slot's names, or as a
//! free-form object. Every slot receives at most one object per slide, no
//! matter how many names address it, and slots a slide leaves empty are
//! materialized from the layout before export.
//!
//! # Features
//!
//! - **Layout registry**: the built-in template's layouts as embedded YAML,
//!   or an application-supplied registry
//! - **Placeholder resolution**: exact label match, then a per-layout
//!   purpose table; never fuzzy
//! - **Slide composition**: text, images, tables, charts and shapes, bound or
//!   free-form
//! - **Layout definition**: new layouts and restyled built-ins per
//!   presentation
//! - **Export**: slide, layout and presentation parts to any
//!   [`PackageSink`], including a ZIP archive
//!
//! # Example
//!
//! ```no_run
//! use slidekit::{AddSlideOptions, Presentation, ZipPackage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pres = Presentation::new()?;
//! pres.add_section("Results", None);
//!
//! let mut slide = pres.add_slide(AddSlideOptions::layout("Two Content").in_section("Results"));
//! slide.add_text("Quarterly results", "headline")?;
//! slide.add_text("Revenue grew 12%", "leftContent")?;
//! slide.add_text("Costs fell 3%", "rightContent")?;
//!
//! // Unknown names fall back to a free-form text box and log a warning.
//! slide.add_text("Draft", "watermark")?;
//!
//! let mut zip = ZipPackage::new(std::fs::File::create("parts.zip")?);
//! pres.export(&mut zip)?;
//! zip.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod layout;
pub mod presentation;
pub mod slide;
pub mod writer;

pub use common::{Error, Result};
pub use layout::{
    Geometry, GeometryOverride, Layout, LayoutCatalog, LayoutDef, LayoutId, LayoutRegistry,
    MatchKind, NotFound, PlaceholderRole, Resolution, ResolvedBinding, SlideSize, SlotKey,
};
pub use presentation::{
    AddSlideOptions, PlaceholderDecl, Presentation, PresentationOptions, SlideMasterProps,
};
pub use slide::composer::{Placement, SlideComposer};
pub use slide::content::{
    ChartPart, ContentKind, ContentObject, ImageData, ImageFormat, ImageSource, ShapeKind,
    SlideNumberProps, TableData, TextFormat, TextRun,
};
pub use slide::spec::ContentSpec;
pub use slide::{Slide, SlideState};
pub use writer::{MemoryPackage, PackageSink, Part, ZipPackage};
