//! In-memory page used by tests and the terminal playground.
//!
//! Besides the [`Document`] contract it exposes the host-side edits a visual
//! editor would make (duplicate or delete a card, drag a note, preview an
//! image, replace an element wholesale) and records the effects the
//! walkthrough requested (activations, scrolls, confetti).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{ActivationTarget, ChildNode, ConfettiBurst, Document};
use crate::render::Control;

/// A single addressable element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub flags: BTreeSet<String>,
    pub text: String,
    pub children: Vec<ChildNode>,
    pub controls: Option<Vec<Control>>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: ChildNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mark the element as a navigation scaffold
    pub fn scaffold() -> Self {
        Self {
            controls: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Positions in `children` of the children carrying `class`
    fn matching(&self, class: &str) -> Vec<usize> {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_class(class))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, Element>,
    /// Everything the walkthrough clicked or focused, oldest first
    pub activations: Vec<ActivationTarget>,
    /// Element ids scrolled into view, oldest first
    pub scrolls: Vec<String>,
    pub scroll_to_top_count: usize,
    pub confetti: Vec<ConfettiBurst>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    /// Swap an element for a new node under the same id
    pub fn replace(&mut self, id: &str, element: Element) -> Option<Element> {
        self.elements.insert(id.to_string(), element)
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn set_flag(&mut self, id: &str, name: &str, on: bool) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        if on {
            element.flags.insert(name.to_string());
        } else {
            element.flags.remove(name);
        }
        true
    }

    pub fn push_child(&mut self, container: &str, child: ChildNode) -> bool {
        let Some(element) = self.elements.get_mut(container) else {
            return false;
        };
        element.children.push(child);
        true
    }

    /// Clone the `index`th matching child and insert the copy right after it
    pub fn duplicate_child(&mut self, container: &str, class: &str, index: usize) -> bool {
        let Some(element) = self.elements.get_mut(container) else {
            return false;
        };
        let Some(&pos) = element.matching(class).get(index) else {
            return false;
        };
        let copy = element.children[pos].clone();
        element.children.insert(pos + 1, copy);
        true
    }

    pub fn remove_child(&mut self, container: &str, class: &str, index: usize) -> Option<ChildNode> {
        let element = self.elements.get_mut(container)?;
        let pos = *element.matching(class).get(index)?;
        Some(element.children.remove(pos))
    }

    /// Drag the `from`th matching child to position `to` among its siblings
    pub fn move_child(&mut self, container: &str, class: &str, from: usize, to: usize) -> bool {
        let Some(element) = self.elements.get_mut(container) else {
            return false;
        };
        let positions = element.matching(class);
        let (Some(&src), Some(&dst)) = (positions.get(from), positions.get(to)) else {
            return false;
        };
        let child = element.children.remove(src);
        element.children.insert(dst, child);
        true
    }

    /// Confetti bursts requested since the last call
    pub fn take_confetti(&mut self) -> Vec<ConfettiBurst> {
        std::mem::take(&mut self.confetti)
    }

    /// Forget recorded activations and scrolls
    pub fn clear_history(&mut self) {
        self.activations.clear();
        self.scrolls.clear();
        self.scroll_to_top_count = 0;
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        if on {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        true
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element
            .attributes
            .insert(name.to_string(), value.to_string());
        true
    }

    fn flag(&self, id: &str, name: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.flags.contains(name))
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        let Some(element) = self.elements.get_mut(id) else {
            return false;
        };
        element.text = text.to_string();
        true
    }

    fn children(&self, container: &str, class: &str) -> Option<Vec<ChildNode>> {
        let element = self.elements.get(container)?;
        Some(
            element
                .children
                .iter()
                .filter(|c| c.has_class(class))
                .cloned()
                .collect(),
        )
    }

    fn set_child_data(
        &mut self,
        container: &str,
        class: &str,
        index: usize,
        key: &str,
        value: &str,
    ) -> bool {
        let Some(element) = self.elements.get_mut(container) else {
            return false;
        };
        let Some(&pos) = element.matching(class).get(index) else {
            return false;
        };
        element.children[pos]
            .data
            .insert(key.to_string(), value.to_string());
        true
    }

    fn controls(&self, scaffold: &str) -> Option<Vec<Control>> {
        self.elements.get(scaffold)?.controls.clone()
    }

    fn set_controls(&mut self, scaffold: &str, controls: Vec<Control>) -> bool {
        let Some(element) = self.elements.get_mut(scaffold) else {
            return false;
        };
        element.controls = Some(controls);
        true
    }

    fn activate(&mut self, target: &ActivationTarget) -> bool {
        let present = match target {
            ActivationTarget::Element(id) => self.elements.contains_key(id),
            ActivationTarget::Child {
                container,
                class,
                index,
            } => self
                .elements
                .get(container)
                .is_some_and(|e| e.matching(class).len() > *index),
        };
        if present {
            self.activations.push(target.clone());
        }
        present
    }

    fn scroll_into_view(&mut self, id: &str) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        self.scrolls.push(id.to_string());
        true
    }

    fn scroll_to_top(&mut self) {
        self.scroll_to_top_count += 1;
    }

    fn launch_confetti(&mut self, burst: ConfettiBurst) {
        self.confetti.push(burst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_cards(n: usize) -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let mut container = Element::new();
        for i in 0..n {
            container = container.with_child(ChildNode::new("demo-card", format!("card {i}")));
        }
        doc.insert("cards", container);
        doc
    }

    #[test]
    fn test_missing_element_is_tolerated() {
        let mut doc = MemoryDocument::new();
        assert!(!doc.contains("nope"));
        assert!(!doc.set_class("nope", "active", true));
        assert!(!doc.has_class("nope", "active"));
        assert_eq!(doc.attribute("nope", "src"), None);
        assert_eq!(doc.children("nope", "demo-card"), None);
        assert!(!doc.scroll_into_view("nope"));
        assert!(!doc.activate(&ActivationTarget::Element("nope".into())));
        assert!(doc.activations.is_empty());
    }

    #[test]
    fn test_recorded_effects_can_be_drained() {
        let mut doc = doc_with_cards(1);
        doc.launch_confetti(ConfettiBurst { particles: 10 });
        doc.scroll_to_top();
        assert!(doc.scroll_into_view("cards"));
        assert!(doc.activate(&ActivationTarget::Element("cards".into())));

        assert_eq!(doc.take_confetti(), vec![ConfettiBurst { particles: 10 }]);
        assert!(doc.take_confetti().is_empty());

        doc.clear_history();
        assert!(doc.activations.is_empty());
        assert!(doc.scrolls.is_empty());
        assert_eq!(doc.scroll_to_top_count, 0);
    }

    #[test]
    fn test_duplicate_and_remove_children() {
        let mut doc = doc_with_cards(1);
        assert!(doc.duplicate_child("cards", "demo-card", 0));
        assert_eq!(doc.child_count("cards", "demo-card"), Some(2));
        assert!(doc.remove_child("cards", "demo-card", 1).is_some());
        assert!(doc.remove_child("cards", "demo-card", 5).is_none());
        assert_eq!(doc.child_count("cards", "demo-card"), Some(1));
    }

    #[test]
    fn test_move_child_reorders() {
        let mut doc = doc_with_cards(3);
        assert!(doc.move_child("cards", "demo-card", 0, 2));
        let texts: Vec<_> = doc
            .children("cards", "demo-card")
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["card 1", "card 2", "card 0"]);
    }

    #[test]
    fn test_children_filter_by_class() {
        let mut doc = doc_with_cards(2);
        doc.push_child("cards", ChildNode::new("spacer", ""));
        assert_eq!(doc.child_count("cards", "demo-card"), Some(2));
        assert!(doc.set_child_data("cards", "demo-card", 1, "k", "v"));
        assert!(!doc.set_child_data("cards", "demo-card", 2, "k", "v"));
    }

    #[test]
    fn test_replace_drops_old_state() {
        let mut doc = MemoryDocument::new();
        doc.insert("img", Element::new().with_attribute("src", "a.png"));
        doc.set_flag("img", "previewing", true);
        doc.replace("img", Element::new().with_attribute("src", "b.png"));
        assert!(!doc.flag("img", "previewing"));
        assert_eq!(doc.attribute("img", "src").as_deref(), Some("b.png"));
    }
}
