//! Layout inheritance merge.
//!
//! PowerPoint expects a slide to carry a placeholder reference for every slot
//! its layout declares. Before a slide is written, each declared slot that
//! holds no content gets an empty placeholder object that inherits position
//! and formatting from the layout.

use super::content::{ContentKind, ContentObject, PlaceholderBinding};
use super::{Slide, SlideState};
use crate::layout::definition::LayoutDef;

/// Synthesize placeholder objects for the unfilled slots of `layout` on
/// `slide`. Returns how many objects were added.
///
/// Running it again adds nothing: synthesized objects count as bound. Slides
/// already written are left alone.
pub fn materialize_inherited_slots(slide: &mut Slide, layout: &LayoutDef) -> usize {
    if slide.state() == SlideState::Serialized {
        return 0;
    }

    let mut added = 0;
    for key in layout.slots().keys() {
        if slide.bound_position(key).is_some() {
            continue;
        }
        slide.push(ContentObject {
            kind: ContentKind::Placeholder,
            geometry: None,
            binding: Some(PlaceholderBinding {
                slot: key,
                requested_name: None,
                matched_label: layout.labels().names_for(key).next().map(str::to_string),
                synthesized: true,
            }),
        });
        added += 1;
    }

    if added > 0 {
        log::debug!(
            "slide {}: materialized {} inherited slot(s) from '{}'",
            slide.number(),
            added,
            layout.name()
        );
    }
    slide.set_state(SlideState::Merged);
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::catalog::LayoutCatalog;
    use crate::layout::registry::LayoutRegistry;
    use crate::layout::slot::SlotKey;
    use crate::slide::composer::SlideComposer;

    fn catalog() -> LayoutCatalog {
        LayoutCatalog::from_registry(LayoutRegistry::builtin().unwrap(), None)
    }

    #[test]
    fn test_fills_every_declared_slot() {
        let catalog = catalog();
        let id = catalog.find("Two Content + Subtitles ").unwrap();
        let def = catalog.layout(id).def();
        let mut slide = Slide::new(1, id);
        let added = materialize_inherited_slots(&mut slide, def);
        assert_eq!(added, def.slots().len());
        assert_eq!(slide.bound_count(), def.slots().len());
        assert!(slide.objects().iter().all(ContentObject::is_synthesized));
        assert_eq!(slide.state(), SlideState::Merged);
    }

    #[test]
    fn test_idempotent() {
        let catalog = catalog();
        let id = catalog.find("Content w/Sub-headline").unwrap();
        let def = catalog.layout(id).def();
        let mut slide = Slide::new(1, id);
        materialize_inherited_slots(&mut slide, def);
        let once = slide.objects().len();
        assert_eq!(materialize_inherited_slots(&mut slide, def), 0);
        assert_eq!(slide.objects().len(), once);
    }

    #[test]
    fn test_skips_filled_slots() {
        let catalog = catalog();
        let id = catalog.find("Two Content + Subtitles ").unwrap();
        let layout = catalog.layout(id);
        let size = LayoutRegistry::builtin().unwrap().slide_size();
        let mut slide = Slide::new(1, id);
        {
            let mut composer = SlideComposer::new(&mut slide, layout, size);
            composer.add_text("Left", "leftSubtitle").unwrap();
            composer.add_text("Title", "headline").unwrap();
        }
        let added = materialize_inherited_slots(&mut slide, layout.def());
        assert_eq!(added, layout.def().slots().len() - 2);

        let left: Vec<_> = slide
            .objects()
            .iter()
            .filter(|o| o.slot() == Some(SlotKey::body(16)))
            .collect();
        assert_eq!(left.len(), 1);
        assert!(!left[0].is_synthesized());
    }

    #[test]
    fn test_free_form_objects_do_not_count_as_bound() {
        let catalog = catalog();
        let id = catalog.find("Content - no subtitle").unwrap();
        let layout = catalog.layout(id);
        let size = LayoutRegistry::builtin().unwrap().slide_size();
        let mut slide = Slide::new(1, id);
        SlideComposer::new(&mut slide, layout, size)
            .add_text("loose", "nothing-here")
            .unwrap();
        materialize_inherited_slots(&mut slide, layout.def());
        assert_eq!(slide.objects().len(), layout.def().slots().len() + 1);
    }

    #[test]
    fn test_serialized_slide_untouched() {
        let catalog = catalog();
        let id = catalog.default_layout();
        let mut slide = Slide::new(1, id);
        slide.set_state(SlideState::Serialized);
        assert_eq!(materialize_inherited_slots(&mut slide, catalog.layout(id).def()), 0);
        assert!(slide.objects().is_empty());
        assert_eq!(slide.state(), SlideState::Serialized);
    }
}
