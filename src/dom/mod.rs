//! Host page contract.
//!
//! The walkthrough never owns the page it runs on. Everything it reads or
//! toggles goes through [`Document`], addressed by the stable identifiers in
//! [`ids`]. Every operation tolerates a missing target: readers return `None`
//! or `false`, writers return `false` and change nothing.

pub mod ids;
pub mod memory;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::render::Control;

pub use memory::{Element, MemoryDocument};

/// A repeated child of a container (a card, a sticky note)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildNode {
    pub classes: BTreeSet<String>,
    pub data: BTreeMap<String, String>,
    pub text: String,
}

impl ChildNode {
    pub fn new(class: &str, text: impl Into<String>) -> Self {
        Self {
            classes: BTreeSet::from([class.to_string()]),
            data: BTreeMap::new(),
            text: text.into(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Something the walkthrough clicks or focuses on the user's behalf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationTarget {
    Element(String),
    /// The `index`th child with `class` inside `container`
    Child {
        container: String,
        class: String,
        index: usize,
    },
}

/// Request for a celebratory animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfettiBurst {
    pub particles: u32,
}

/// The host DOM as seen by the walkthrough
pub trait Document {
    fn contains(&self, id: &str) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_class(&mut self, id: &str, class: &str, on: bool) -> bool;

    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool;

    /// Transient element property (not an attribute), e.g. "previewing"
    fn flag(&self, id: &str, name: &str) -> bool;

    fn text(&self, id: &str) -> Option<String>;

    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Children of `container` carrying `class`, in document order
    fn children(&self, container: &str, class: &str) -> Option<Vec<ChildNode>>;

    fn set_child_data(
        &mut self,
        container: &str,
        class: &str,
        index: usize,
        key: &str,
        value: &str,
    ) -> bool;

    /// Controls currently rendered into a navigation scaffold
    fn controls(&self, scaffold: &str) -> Option<Vec<Control>>;

    fn set_controls(&mut self, scaffold: &str, controls: Vec<Control>) -> bool;

    /// Click / focus an element
    fn activate(&mut self, target: &ActivationTarget) -> bool;

    fn scroll_into_view(&mut self, id: &str) -> bool;

    fn scroll_to_top(&mut self);

    fn launch_confetti(&mut self, burst: ConfettiBurst);

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.set_class(id, class, true)
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.set_class(id, class, false)
    }

    /// Number of children of `container` carrying `class`
    fn child_count(&self, container: &str, class: &str) -> Option<usize> {
        self.children(container, class).map(|c| c.len())
    }
}
