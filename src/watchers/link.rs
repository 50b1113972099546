//! Link target watcher

use super::{SuccessDetail, WatchEvent, Watcher};
use crate::dom::{ids, Document};
use crate::steps::StepKind;

pub struct LinkWatcher {
    baseline: String,
}

impl LinkWatcher {
    pub fn new(baseline: String) -> Self {
        Self { baseline }
    }
}

impl Watcher for LinkWatcher {
    fn kind(&self) -> StepKind {
        StepKind::EditLink
    }

    fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent> {
        match doc.attribute(ids::EDITABLE_LINK, ids::ATTR_HREF) {
            Some(href) if href != self.baseline => {
                vec![WatchEvent::Satisfied(SuccessDetail::Plain)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, MemoryDocument};

    #[test]
    fn test_link_change_detected() {
        let mut doc = MemoryDocument::new();
        doc.insert(
            ids::EDITABLE_LINK,
            Element::new().with_attribute(ids::ATTR_HREF, "https://phcode.dev"),
        );
        let mut watcher = LinkWatcher::new("https://phcode.dev".into());
        assert!(watcher.poll(&doc).is_empty());

        doc.set_attribute(ids::EDITABLE_LINK, ids::ATTR_HREF, "https://example.com");
        assert_eq!(watcher.poll(&doc).len(), 1);
    }

    #[test]
    fn test_replaced_node_is_looked_up_fresh() {
        let mut doc = MemoryDocument::new();
        doc.insert(
            ids::EDITABLE_LINK,
            Element::new().with_attribute(ids::ATTR_HREF, "a"),
        );
        let mut watcher = LinkWatcher::new("a".into());
        doc.remove(ids::EDITABLE_LINK);
        assert!(watcher.poll(&doc).is_empty());

        doc.insert(
            ids::EDITABLE_LINK,
            Element::new().with_attribute(ids::ATTR_HREF, "b"),
        );
        assert_eq!(watcher.poll(&doc).len(), 1);
    }
}
