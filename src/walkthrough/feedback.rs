//! Toast, undo message, hints and arrow pointers

use crate::dom::{ids, Document};
use crate::render::labels;
use crate::steps::StepKind;

use super::{Task, Walkthrough};

impl<D: Document> Walkthrough<D> {
    /// Open or close the hint of `step`
    pub fn toggle_hint(&mut self, step: u8) -> bool {
        let hint = ids::hint(step);
        if !self.document.contains(&hint) {
            return false;
        }
        let open = !self.document.has_class(&hint, ids::CLASS_VISIBLE);
        self.document.set_class(&hint, ids::CLASS_VISIBLE, open);
        true
    }

    /// Pointer hover over the mode cards. Arrows only appear on the link step.
    pub fn hover_mode_cards(&mut self, hovering: bool) -> bool {
        if hovering && self.current_kind() != Some(StepKind::EditLink) {
            return false;
        }
        self.show_arrows(hovering);
        true
    }

    pub(super) fn show_arrows(&mut self, on: bool) {
        for id in [ids::ARROW_LEFT, ids::ARROW_CENTER] {
            self.document.set_class(id, ids::CLASS_VISIBLE, on);
        }
    }

    pub(super) fn update_toast(&mut self, cards: usize, deletes: usize) {
        let rules = self.settings.cards;
        self.document.set_text(
            ids::CARD_COUNT_STATUS,
            &labels::fill(labels::CARD_COUNT_TEMPLATE, cards, rules.target_count),
        );
        self.document.set_class(
            ids::CARD_COUNT_STATUS,
            ids::CLASS_REACHED,
            cards >= rules.target_count,
        );
        self.document.set_text(
            ids::DELETE_COUNT_STATUS,
            &labels::fill(labels::DELETE_COUNT_TEMPLATE, deletes, rules.delete_target),
        );
        self.document.set_class(
            ids::DELETE_COUNT_STATUS,
            ids::CLASS_REACHED,
            deletes >= rules.delete_target,
        );
    }

    /// Show the toast and (re)start its auto-hide countdown
    pub(super) fn show_toast(&mut self) {
        if !self.document.contains(ids::PROGRESS_TOAST) {
            return;
        }
        for timer in [self.timers.toast_hide.take(), self.timers.toast_clear.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(timer);
        }
        self.document
            .remove_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING);
        self.document.add_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW);
        self.timers.toast_hide = Some(
            self.scheduler
                .after(self.settings.toast_visible, Task::HideToast),
        );
    }

    /// Start the toast fade; the classes are cleared once it finishes
    pub(super) fn hide_toast(&mut self) {
        if let Some(timer) = self.timers.toast_hide.take() {
            self.scheduler.cancel(timer);
        }
        if !self.document.has_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW)
            || self.timers.toast_clear.is_some()
        {
            return;
        }
        self.document.add_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING);
        self.timers.toast_clear = Some(
            self.scheduler
                .after(self.settings.toast_fade, Task::ClearToast),
        );
    }

    pub(super) fn show_undo(&mut self) {
        if let Some(timer) = self.timers.undo_clear.take() {
            self.scheduler.cancel(timer);
        }
        self.document.remove_class(ids::UNDO_MESSAGE, ids::CLASS_HIDING);
        self.document.add_class(ids::UNDO_MESSAGE, ids::CLASS_SHOW);
    }

    pub(super) fn hide_undo(&mut self) {
        if !self.document.has_class(ids::UNDO_MESSAGE, ids::CLASS_SHOW)
            || self.timers.undo_clear.is_some()
        {
            return;
        }
        self.document.add_class(ids::UNDO_MESSAGE, ids::CLASS_HIDING);
        self.timers.undo_clear = Some(
            self.scheduler
                .after(self.settings.toast_fade, Task::ClearUndo),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::dom::{ids, Document, Element, MemoryDocument};
    use crate::steps::StepRegistry;
    use crate::walkthrough::{Walkthrough, WalkthroughSettings};

    fn walkthrough() -> Walkthrough<MemoryDocument> {
        let mut doc = MemoryDocument::new();
        for step in 1..=8 {
            doc.insert(&ids::section(step), Element::new());
            doc.insert(&ids::hint(step), Element::new());
        }
        doc.insert(ids::PROGRESS_TOAST, Element::new());
        doc.insert(ids::CARD_COUNT_STATUS, Element::new());
        doc.insert(ids::DELETE_COUNT_STATUS, Element::new());
        doc.insert(ids::UNDO_MESSAGE, Element::new());
        doc.insert(ids::ARROW_LEFT, Element::new());
        doc.insert(ids::ARROW_CENTER, Element::new());
        Walkthrough::new(doc, StepRegistry::standard(), WalkthroughSettings::default())
    }

    #[test]
    fn test_toast_fades_then_clears() {
        let mut w = walkthrough();
        w.update_toast(2, 0);
        w.show_toast();
        assert_eq!(w.document().text(ids::CARD_COUNT_STATUS).as_deref(), Some("2/3 cards"));
        assert!(w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW));

        w.advance_by(Duration::from_millis(2000));
        assert!(w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING));

        w.advance_by(Duration::from_millis(300));
        assert!(!w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW));
        assert!(!w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING));
    }

    #[test]
    fn test_show_during_fade_keeps_toast_up() {
        let mut w = walkthrough();
        w.show_toast();
        w.advance_by(Duration::from_millis(2100));
        w.show_toast();
        w.advance_by(Duration::from_millis(500));
        assert!(w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW));
        assert!(!w.document().has_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING));
    }

    #[test]
    fn test_reached_highlight() {
        let mut w = walkthrough();
        w.update_toast(3, 1);
        assert!(w.document().has_class(ids::CARD_COUNT_STATUS, ids::CLASS_REACHED));
        assert!(w.document().has_class(ids::DELETE_COUNT_STATUS, ids::CLASS_REACHED));
        w.update_toast(2, 1);
        assert!(!w.document().has_class(ids::CARD_COUNT_STATUS, ids::CLASS_REACHED));
    }

    #[test]
    fn test_hint_toggles() {
        let mut w = walkthrough();
        assert!(w.toggle_hint(2));
        assert!(w.document().has_class(&ids::hint(2), ids::CLASS_VISIBLE));
        assert!(w.toggle_hint(2));
        assert!(!w.document().has_class(&ids::hint(2), ids::CLASS_VISIBLE));
        assert!(!w.toggle_hint(42));
    }

    #[test]
    fn test_arrows_only_on_link_step() {
        let mut w = walkthrough();
        assert!(!w.hover_mode_cards(true));
        assert!(!w.document().has_class(ids::ARROW_LEFT, ids::CLASS_VISIBLE));

        assert!(w.go_to(6));
        assert!(w.hover_mode_cards(true));
        assert!(w.document().has_class(ids::ARROW_CENTER, ids::CLASS_VISIBLE));

        assert!(w.go_to(7));
        assert!(!w.document().has_class(ids::ARROW_CENTER, ids::CLASS_VISIBLE));
    }
}
