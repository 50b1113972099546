//! Sticky-note reorder watcher

use super::{SuccessDetail, WatchEvent, Watcher};
use crate::dom::{ids, Document};
use crate::steps::StepKind;

/// Give every note a stable identity token and return the resulting order.
///
/// Notes that already carry a token keep it, so a note keeps its identity
/// across step re-entries even after being moved.
pub fn tag_notes(doc: &mut dyn Document) -> Option<Vec<String>> {
    let notes = doc.children(ids::NOTES_CONTAINER, ids::STICKY_NOTE)?;
    let mut order = Vec::with_capacity(notes.len());
    for (index, note) in notes.iter().enumerate() {
        let token = match note.data(ids::DATA_NOTE_ID) {
            Some(token) => token.to_string(),
            None => {
                let token = format!("note-{index}");
                doc.set_child_data(
                    ids::NOTES_CONTAINER,
                    ids::STICKY_NOTE,
                    index,
                    ids::DATA_NOTE_ID,
                    &token,
                );
                token
            }
        };
        order.push(token);
    }
    Some(order)
}

/// Current order of note tokens; untagged notes read as `None`
pub fn note_order(doc: &dyn Document) -> Option<Vec<Option<String>>> {
    let notes = doc.children(ids::NOTES_CONTAINER, ids::STICKY_NOTE)?;
    Some(
        notes
            .iter()
            .map(|n| n.data(ids::DATA_NOTE_ID).map(str::to_string))
            .collect(),
    )
}

/// True when any baseline position now holds a different token
pub fn order_changed(baseline: &[String], current: &[Option<String>]) -> bool {
    baseline
        .iter()
        .enumerate()
        .any(|(i, token)| current.get(i).and_then(Option::as_deref) != Some(token.as_str()))
}

pub struct ReorderWatcher {
    baseline: Vec<String>,
}

impl ReorderWatcher {
    pub fn new(baseline: Vec<String>) -> Self {
        Self { baseline }
    }
}

impl Watcher for ReorderWatcher {
    fn kind(&self) -> StepKind {
        StepKind::Reorder
    }

    fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent> {
        match note_order(doc) {
            Some(current) if order_changed(&self.baseline, &current) => {
                vec![WatchEvent::Satisfied(SuccessDetail::Plain)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ChildNode, Element, MemoryDocument};

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn current(list: &[&str]) -> Vec<Option<String>> {
        list.iter().map(|s| Some(s.to_string())).collect()
    }

    fn notes_doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let mut container = Element::new();
        for text in ["a", "b", "c"] {
            container = container.with_child(ChildNode::new(ids::STICKY_NOTE, text));
        }
        doc.insert(ids::NOTES_CONTAINER, container);
        doc
    }

    #[test]
    fn test_identical_order_is_unchanged() {
        assert!(!order_changed(&tokens(&["a", "b", "c"]), &current(&["a", "b", "c"])));
    }

    #[test]
    fn test_any_position_change_counts() {
        let baseline = tokens(&["a", "b", "c"]);
        assert!(order_changed(&baseline, &current(&["b", "a", "c"])));
        assert!(order_changed(&baseline, &current(&["a", "c", "b"])));
        assert!(order_changed(&baseline, &current(&["c", "a", "b"])));
    }

    #[test]
    fn test_missing_note_counts_as_change() {
        assert!(order_changed(&tokens(&["a", "b"]), &current(&["a"])));
    }

    #[test]
    fn test_tag_notes_is_stable() {
        let mut doc = notes_doc();
        let first = tag_notes(&mut doc).unwrap();
        assert_eq!(first, tokens(&["note-0", "note-1", "note-2"]));

        doc.move_child(ids::NOTES_CONTAINER, ids::STICKY_NOTE, 0, 2);
        let second = tag_notes(&mut doc).unwrap();
        assert_eq!(second, tokens(&["note-1", "note-2", "note-0"]));
    }

    #[test]
    fn test_watcher_fires_on_swap() {
        let mut doc = notes_doc();
        let baseline = tag_notes(&mut doc).unwrap();
        let mut watcher = ReorderWatcher::new(baseline);
        assert!(watcher.poll(&doc).is_empty());

        doc.move_child(ids::NOTES_CONTAINER, ids::STICKY_NOTE, 1, 0);
        assert_eq!(
            watcher.poll(&doc),
            vec![WatchEvent::Satisfied(SuccessDetail::Plain)]
        );
    }
}
