//! The demo page the terminal playground runs the walkthrough against

use crate::dom::{ids, ChildNode, Element, MemoryDocument};
use crate::steps::{StepKind, StepRegistry};

pub const SEED_HEADLINE: &str = "Hello ___";
pub const SEED_IMAGE: &str = "assets/placeholder.png";
pub const SEED_LINK: &str = "https://phcode.dev";
pub const SEED_CARDS: [&str; 2] = ["Live preview", "Instant edits"];
pub const SEED_NOTES: [&str; 3] = ["Plan", "Build", "Ship"];

/// Build a page holding every element the walkthrough looks for
pub fn seed_document(registry: &StepRegistry) -> MemoryDocument {
    let mut doc = MemoryDocument::new();

    doc.insert(ids::PROGRESS_CONTAINER, Element::new());
    for step in registry.iter() {
        doc.insert(&ids::progress_dot(step.id), Element::new());
        doc.insert(&ids::section(step.id), Element::new());
        doc.insert(&ids::controls(step.id), Element::scaffold());
        doc.insert(&ids::hint(step.id), Element::new());
        if step.kind.is_task() {
            doc.insert(&ids::success_message(step.id), Element::new());
        }
    }
    for line in 0..registry.total().saturating_sub(1) {
        doc.insert(&ids::progress_line(line), Element::new());
    }

    doc.insert(ids::GET_STARTED_BUTTON, Element::new().with_text("Get started"));

    if registry.position_of(StepKind::EditText).is_some() {
        doc.insert(ids::EDITABLE_TEXT, Element::new().with_text(SEED_HEADLINE));
    }

    if registry.position_of(StepKind::ReplaceImage).is_some() {
        doc.insert(
            ids::REPLACEABLE_IMAGE,
            Element::new().with_attribute(ids::ATTR_SRC, SEED_IMAGE),
        );
        doc.insert(
            ids::IMAGE_SUCCESS_URL_TEXT,
            Element::new().with_text("Image replaced from the web"),
        );
        doc.insert(
            ids::IMAGE_SUCCESS_LOCAL_TEXT,
            Element::new().with_text("Image replaced from your files"),
        );
    }

    if registry.position_of(StepKind::EditCards).is_some() {
        let mut cards = Element::new();
        for text in SEED_CARDS {
            cards = cards.with_child(ChildNode::new(ids::DEMO_CARD, text));
        }
        doc.insert(ids::CARDS_CONTAINER, cards);
        doc.insert(ids::PROGRESS_TOAST, Element::new());
        doc.insert(ids::CARD_COUNT_STATUS, Element::new());
        doc.insert(ids::DELETE_COUNT_STATUS, Element::new());
        doc.insert(ids::UNDO_MESSAGE, Element::new());
    }

    if registry.position_of(StepKind::Reorder).is_some() {
        let mut notes = Element::new();
        for text in SEED_NOTES {
            notes = notes.with_child(ChildNode::new(ids::STICKY_NOTE, text));
        }
        doc.insert(ids::NOTES_CONTAINER, notes);
    }

    if registry.position_of(StepKind::EditLink).is_some() {
        doc.insert(
            ids::EDITABLE_LINK,
            Element::new()
                .with_attribute(ids::ATTR_HREF, SEED_LINK)
                .with_text("Phoenix Code"),
        );
        doc.insert(ids::MODE_CARDS, Element::new());
        doc.insert(ids::ARROW_LEFT, Element::new());
        doc.insert(ids::ARROW_CENTER, Element::new());
    }

    if registry.position_of(StepKind::Bonus).is_some() {
        doc.insert(ids::ALIGN_BOX_FIRST, Element::new());
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_every_step_has_region_and_scaffold() {
        let registry = StepRegistry::standard();
        let doc = seed_document(&registry);
        for step in registry.iter() {
            assert!(doc.contains(&ids::section(step.id)));
            assert!(doc.controls(&ids::controls(step.id)).is_some());
        }
        assert!(doc.contains(&ids::progress_line(6)));
        assert!(!doc.contains(&ids::progress_line(7)));
    }

    #[test]
    fn test_seed_content() {
        let doc = seed_document(&StepRegistry::standard());
        assert_eq!(doc.text(ids::EDITABLE_TEXT).as_deref(), Some(SEED_HEADLINE));
        assert_eq!(doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD), Some(2));
        assert_eq!(doc.child_count(ids::NOTES_CONTAINER, ids::STICKY_NOTE), Some(3));
    }

    #[test]
    fn test_only_task_steps_get_banners() {
        let doc = seed_document(&StepRegistry::standard());
        assert!(!doc.contains(&ids::success_message(1)));
        assert!(doc.contains(&ids::success_message(2)));
        assert!(!doc.contains(&ids::success_message(7)));
    }
}
