//! Static catalog of walkthrough steps

use serde::{Deserialize, Serialize};

/// What a step asks the user to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Intro video with a "get started" button
    Intro,
    /// Edit a headline in place
    EditText,
    /// Swap the demo image for another one
    ReplaceImage,
    /// Duplicate cards up to three, then delete one
    EditCards,
    /// Drag sticky notes into a new order
    Reorder,
    /// Point the demo link somewhere else
    EditLink,
    /// Completion slide
    Finish,
    /// Bonus measurement slide
    Bonus,
}

impl StepKind {
    /// Short code reported to telemetry (max 6 letters)
    pub fn mnemonic(&self) -> &'static str {
        match self {
            StepKind::Intro => "intro",
            StepKind::EditText => "edtext",
            StepKind::ReplaceImage => "image",
            StepKind::EditCards => "edcard",
            StepKind::Reorder => "drag",
            StepKind::EditLink => "links",
            StepKind::Finish => "fin",
            StepKind::Bonus => "bonus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Intro => "Welcome",
            StepKind::EditText => "Edit text",
            StepKind::ReplaceImage => "Replace an image",
            StepKind::EditCards => "Edit cards",
            StepKind::Reorder => "Reorder notes",
            StepKind::EditLink => "Edit a link",
            StepKind::Finish => "All done",
            StepKind::Bonus => "Bonus: measure",
        }
    }

    /// Whether entering this step starts a polling watcher
    pub fn is_polled(&self) -> bool {
        matches!(
            self,
            StepKind::ReplaceImage | StepKind::EditCards | StepKind::Reorder | StepKind::EditLink
        )
    }

    /// Whether this step has a success condition at all
    pub fn is_task(&self) -> bool {
        self.is_polled() || matches!(self, StepKind::EditText)
    }

    /// The order used by the standard walkthrough
    pub fn all() -> &'static [StepKind] {
        &[
            StepKind::Intro,
            StepKind::EditText,
            StepKind::ReplaceImage,
            StepKind::EditCards,
            StepKind::Reorder,
            StepKind::EditLink,
            StepKind::Finish,
            StepKind::Bonus,
        ]
    }
}

/// One stage of the walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// 1-based position
    pub id: u8,
    pub kind: StepKind,
}

impl Step {
    pub fn mnemonic(&self) -> &'static str {
        self.kind.mnemonic()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Ordered, immutable list of steps
#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl StepRegistry {
    /// The eight-step playground flow
    pub fn standard() -> Self {
        Self::from_kinds(StepKind::all())
    }

    /// Build a registry numbering `kinds` from 1
    pub fn from_kinds(kinds: &[StepKind]) -> Self {
        let steps = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Step {
                id: (i + 1) as u8,
                kind: *kind,
            })
            .collect();
        Self { steps }
    }

    pub fn total(&self) -> u8 {
        self.steps.len() as u8
    }

    pub fn contains(&self, id: u8) -> bool {
        id >= 1 && id <= self.total()
    }

    pub fn get(&self, id: u8) -> Option<&Step> {
        if id == 0 {
            return None;
        }
        self.steps.get(usize::from(id) - 1)
    }

    pub fn kind_of(&self, id: u8) -> Option<StepKind> {
        self.get(id).map(|s| s.kind)
    }

    /// Telemetry code for a step id, `unknown` when out of range
    pub fn mnemonic_of(&self, id: u8) -> &'static str {
        self.get(id).map_or("unknown", Step::mnemonic)
    }

    /// Position of the first step of the given kind
    pub fn position_of(&self, kind: StepKind) -> Option<u8> {
        self.steps.iter().find(|s| s.kind == kind).map(|s| s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_order() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.total(), 8);
        assert_eq!(registry.kind_of(1), Some(StepKind::Intro));
        assert_eq!(registry.kind_of(4), Some(StepKind::EditCards));
        assert_eq!(registry.kind_of(8), Some(StepKind::Bonus));
    }

    #[test]
    fn test_out_of_range_ids() {
        let registry = StepRegistry::standard();
        assert!(registry.get(0).is_none());
        assert!(registry.get(9).is_none());
        assert!(!registry.contains(0));
        assert!(!registry.contains(9));
        assert_eq!(registry.mnemonic_of(42), "unknown");
    }

    #[test]
    fn test_mnemonics_fit_six_letters() {
        for kind in StepKind::all() {
            assert!(kind.mnemonic().len() <= 6, "{kind:?}");
        }
    }

    #[test]
    fn test_position_of() {
        let registry = StepRegistry::standard();
        assert_eq!(registry.position_of(StepKind::EditLink), Some(6));
        let short = StepRegistry::from_kinds(&[StepKind::Intro, StepKind::Finish]);
        assert_eq!(short.position_of(StepKind::EditLink), None);
    }

    #[test]
    fn test_polled_kinds() {
        assert!(StepKind::EditCards.is_polled());
        assert!(!StepKind::EditText.is_polled());
        assert!(StepKind::EditText.is_task());
        assert!(!StepKind::Finish.is_task());
    }
}
