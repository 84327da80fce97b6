//! Slides and slide composition.
//!
//! A [`Slide`] owns its content objects and remembers which layout slots are
//! already bound. Content is added through a [`SlideComposer`], which pairs
//! the slide with its layout; [`materialize_inherited_slots`] fills the
//! remaining slots at export time.

pub mod composer;
pub mod content;
pub mod merge;
pub mod spec;

pub use composer::{Placement, SlideComposer};
pub use content::{
    ChartPart, ContentKind, ContentObject, ImageData, ImageFormat, ImageSource, PlaceholderBinding,
    ShapeKind, SlideNumberProps, TableData, TextFormat, TextRun,
};
pub use merge::materialize_inherited_slots;
pub use spec::ContentSpec;

use crate::common::error::{Error, Result};
use crate::layout::catalog::LayoutId;
use crate::layout::slot::SlotKey;
use std::collections::HashMap;

/// First `<p:sldId id>` value; slide ids below 256 are reserved.
pub const FIRST_SLIDE_ID: u32 = 256;

/// Lifecycle of a slide with respect to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideState {
    /// Accepting content.
    Created,
    /// Inherited slots have been materialized for an export attempt.
    Merged,
    /// Written to a package. No further changes are accepted.
    Serialized,
}

/// One slide of a presentation.
#[derive(Debug, Clone)]
pub struct Slide {
    number: usize,
    layout: LayoutId,
    objects: Vec<ContentObject>,
    /// Slot -> position in `objects` of the object bound to it.
    bound: HashMap<SlotKey, usize>,
    state: SlideState,
    pub(crate) section: Option<String>,
    pub(crate) slide_number: Option<SlideNumberProps>,
    pub(crate) background: Option<String>,
}

impl Slide {
    pub(crate) fn new(number: usize, layout: LayoutId) -> Self {
        Self {
            number,
            layout,
            objects: Vec::new(),
            bound: HashMap::new(),
            state: SlideState::Created,
            section: None,
            slide_number: None,
            background: None,
        }
    }

    /// 1-based position in the presentation.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Value written to `<p:sldId id>`.
    pub fn slide_id(&self) -> u32 {
        FIRST_SLIDE_ID + (self.number as u32 - 1)
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn objects(&self) -> &[ContentObject] {
        &self.objects
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn slide_number(&self) -> Option<&SlideNumberProps> {
        self.slide_number.as_ref()
    }

    /// Slots that currently have an object, in object order.
    pub fn bound_slots(&self) -> Vec<SlotKey> {
        self.objects.iter().filter_map(ContentObject::slot).collect()
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// The object bound to `key`, if any.
    pub fn object_for(&self, key: SlotKey) -> Option<&ContentObject> {
        self.bound.get(&key).map(|&pos| &self.objects[pos])
    }

    pub(crate) fn bound_position(&self, key: SlotKey) -> Option<usize> {
        self.bound.get(&key).copied()
    }

    pub(crate) fn object_mut(&mut self, pos: usize) -> &mut ContentObject {
        &mut self.objects[pos]
    }

    /// Append an object, recording its slot if it has one. Returns its
    /// position.
    pub(crate) fn push(&mut self, object: ContentObject) -> usize {
        let pos = self.objects.len();
        if let Some(slot) = object.slot() {
            self.bound.insert(slot, pos);
        }
        self.objects.push(object);
        pos
    }

    /// Accept a mutation. A merged slide goes back to `Created`; a
    /// serialized slide refuses.
    pub(crate) fn reopen(&mut self) -> Result<()> {
        match self.state {
            SlideState::Serialized => Err(Error::SlideSealed(self.number)),
            SlideState::Merged => {
                self.state = SlideState::Created;
                Ok(())
            },
            SlideState::Created => Ok(()),
        }
    }

    pub(crate) fn set_state(&mut self, state: SlideState) {
        self.state = state;
    }
}
