//! Completion ritual and watcher events

use crate::dom::{ids, ConfettiBurst, Document};
use crate::render;
use crate::steps::StepKind;
use crate::watchers::{SuccessDetail, WatchEvent};

use super::{Task, Walkthrough};

impl<D: Document> Walkthrough<D> {
    /// Mark `step` complete and celebrate. Returns `false` if it already was.
    pub fn mark_complete(&mut self, step: u8) -> bool {
        self.complete_with(step, SuccessDetail::Plain)
    }

    /// Undo a completion. Returns `false` if the step was not complete.
    pub fn mark_incomplete(&mut self, step: u8) -> bool {
        if !self.tracker.unmark(step) {
            return false;
        }
        self.document
            .remove_class(&ids::success_message(step), ids::CLASS_SHOW);
        render::set_advance_highlight(&mut self.document, step, false);
        self.refresh_progress();
        tracing::info!(step, mnemonic = self.registry.mnemonic_of(step), "Step no longer complete");
        true
    }

    /// Commit of the editable headline (blur or Enter). Returns whether the
    /// text was accepted.
    pub fn commit_text(&mut self, element_id: &str) -> bool {
        let Some(text) = self.document.text(element_id) else {
            tracing::debug!(element_id, "Commit on missing element");
            return false;
        };
        let valid = self.settings.edit_rules.is_valid(&text);
        self.document
            .set_class(element_id, ids::CLASS_EDIT_VALID, valid);

        if let Some(step) = self.registry.position_of(StepKind::EditText) {
            if valid {
                self.mark_complete(step);
            } else {
                self.mark_incomplete(step);
            }
        }
        valid
    }

    fn complete_with(&mut self, step: u8, detail: SuccessDetail) -> bool {
        if !self.registry.contains(step) || !self.tracker.mark(step) {
            return false;
        }
        let mnemonic = self.registry.mnemonic_of(step);
        tracing::info!(step, mnemonic, "Step completed");

        if self.registry.kind_of(step) == Some(StepKind::EditCards) {
            self.hide_toast();
        }

        if let SuccessDetail::Image { remote } = detail {
            self.document
                .set_class(ids::IMAGE_SUCCESS_URL_TEXT, ids::CLASS_HIDDEN, !remote);
            self.document
                .set_class(ids::IMAGE_SUCCESS_LOCAL_TEXT, ids::CLASS_HIDDEN, remote);
        }
        let banner = ids::success_message(step);
        self.document.add_class(&banner, ids::CLASS_SHOW);

        let hint = ids::hint(step);
        if !self.document.has_class(&hint, ids::CLASS_VISIBLE) {
            self.document.add_class(&hint, ids::CLASS_VISIBLE);
        }

        self.document.launch_confetti(ConfettiBurst {
            particles: self.settings.confetti_particles,
        });
        render::set_advance_highlight(&mut self.document, step, true);
        self.refresh_progress();
        self.emit_visit(step, true);

        if self.document.contains(&banner) {
            self.scheduler.after_in_scope(
                step,
                self.settings.scroll_delay,
                Task::ScrollIntoView(banner),
            );
        }
        true
    }

    pub(super) fn apply_watch_event(&mut self, step: u8, event: WatchEvent) {
        match event {
            WatchEvent::Satisfied(detail) => {
                self.complete_with(step, detail);
            }
            WatchEvent::CardProgress { cards, deletes } => {
                self.update_toast(cards, deletes);
                self.show_toast();
            }
            WatchEvent::AllCardsDeleted => {
                self.hide_toast();
                self.show_undo();
                self.mark_incomplete(step);
            }
            WatchEvent::CardsPresent => self.hide_undo(),
        }
    }
}
