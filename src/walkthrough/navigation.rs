//! Moving between steps

use crate::dom::{ids, ActivationTarget, ConfettiBurst, Document};
use crate::render::{self, ControlKind};
use crate::steps::StepKind;
use crate::watchers::{self, Baselines, WatcherHandle};

use super::{Task, Walkthrough};

impl<D: Document> Walkthrough<D> {
    /// Show step `step`. Returns `false`, leaving everything untouched, when
    /// the step is out of range or its region is missing from the page.
    pub fn go_to(&mut self, step: u8) -> bool {
        if !self.registry.contains(step) {
            tracing::debug!(step, "Ignoring navigation to unknown step");
            return false;
        }
        let region = ids::section(step);
        if !self.document.contains(&region) {
            tracing::warn!(step, region = %region, "Step region missing, staying put");
            return false;
        }

        let outgoing = self.current;
        self.leave_step(outgoing);

        self.document
            .remove_class(&ids::section(outgoing), ids::CLASS_ACTIVE);
        self.document.add_class(&region, ids::CLASS_ACTIVE);
        self.current = step;

        self.render_step(step);

        let complete = self.tracker.is_complete(step);
        render::set_advance_highlight(&mut self.document, step, complete);
        if complete {
            self.document
                .add_class(&ids::success_message(step), ids::CLASS_SHOW);
        }

        self.start_watcher(step);
        self.enter_effects(step);

        self.document.scroll_to_top();
        tracing::debug!(from = outgoing, to = step, "Step changed");
        self.emit_visit(step, false);
        true
    }

    pub fn next(&mut self) -> bool {
        self.current < self.registry.total() && self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.current > 1 && self.go_to(self.current - 1)
    }

    /// Jump to the finish step
    pub fn finish(&mut self) -> bool {
        match self.registry.position_of(StepKind::Finish) {
            Some(step) => self.go_to(step),
            None => false,
        }
    }

    /// Jump to the bonus step
    pub fn one_more(&mut self) -> bool {
        match self.registry.position_of(StepKind::Bonus) {
            Some(step) => self.go_to(step),
            None => false,
        }
    }

    /// Forget all progress and return to the first step
    pub fn restart(&mut self) {
        if let Some(hooks) = &self.hooks {
            hooks.on_restart();
        }

        if let Some(handle) = self.watcher.take() {
            handle.dispose(&mut self.scheduler);
        }
        self.scheduler.clear();
        self.timers = super::FeedbackTimers::default();
        for id in [ids::PROGRESS_TOAST, ids::UNDO_MESSAGE] {
            self.document.remove_class(id, ids::CLASS_SHOW);
            self.document.remove_class(id, ids::CLASS_HIDING);
        }
        for id in [ids::ARROW_LEFT, ids::ARROW_CENTER] {
            self.document.remove_class(id, ids::CLASS_VISIBLE);
        }

        let steps: Vec<u8> = self.registry.iter().map(|s| s.id).collect();
        for step in steps {
            self.document
                .remove_class(&ids::success_message(step), ids::CLASS_SHOW);
            self.document.remove_class(&ids::hint(step), ids::CLASS_VISIBLE);
            render::set_advance_highlight(&mut self.document, step, false);
        }
        self.document
            .remove_class(ids::EDITABLE_TEXT, ids::CLASS_EDIT_VALID);

        self.tracker.reset();
        self.baselines = Baselines::default();

        tracing::info!("Walkthrough reset");
        if !self.go_to(1) {
            // Region 1 is gone; still show the first step's chrome
            self.current = 1;
            self.render_step(1);
        }
    }

    /// The intro's call-to-action: moves on, and counts as finishing the
    /// intro when the intro video is shown
    pub fn get_started(&mut self) -> bool {
        let Some(intro) = self.registry.position_of(StepKind::Intro) else {
            return false;
        };
        if self.current != intro {
            return false;
        }
        if self.settings.intro_video && self.tracker.mark(intro) {
            tracing::info!(step = intro, "Intro completed");
            self.emit_visit(intro, true);
        }
        self.next()
    }

    /// A click on a progress dot. The bar is inert on the first step.
    pub fn select_progress_dot(&mut self, step: u8) -> bool {
        if self.current == 1 {
            tracing::debug!(step, "Progress bar is inert on the first step");
            return false;
        }
        self.go_to(step)
    }

    /// Run the control `kind` of the current step, if the step offers it
    pub fn activate_control(&mut self, kind: ControlKind) -> bool {
        let offered = render::controls_for(self.current, self.registry.total())
            .iter()
            .any(|c| c.kind == kind && !c.disabled);
        if !offered {
            return false;
        }
        match kind {
            ControlKind::Previous => self.previous(),
            ControlKind::Next => self.next(),
            ControlKind::Finish => self.finish(),
            ControlKind::OneMore => self.one_more(),
            ControlKind::StartAgain => {
                self.restart();
                true
            }
            ControlKind::Hint => self.toggle_hint(self.current),
            ControlKind::Spacer => false,
        }
    }

    fn leave_step(&mut self, step: u8) {
        if let Some(handle) = self.watcher.take() {
            handle.dispose(&mut self.scheduler);
        }
        let cancelled = self.scheduler.cancel_scope(step);
        if cancelled > 0 {
            tracing::trace!(step, cancelled, "Cancelled step timers");
        }
        match self.registry.kind_of(step) {
            Some(StepKind::EditCards) => {
                self.hide_toast();
                self.hide_undo();
            }
            Some(StepKind::EditLink) => self.show_arrows(false),
            _ => {}
        }
    }

    fn start_watcher(&mut self, step: u8) {
        let Some(kind) = self.registry.kind_of(step) else {
            return;
        };
        if !kind.is_polled() || self.watcher.is_some() {
            return;
        }
        match watchers::setup(
            kind,
            &mut self.document,
            &mut self.baselines,
            self.settings.cards,
        ) {
            Some(watcher) => {
                let timer = self
                    .scheduler
                    .every(self.settings.poll_interval, Task::PollWatcher);
                tracing::debug!(step, ?kind, "Watcher started");
                self.watcher = Some(WatcherHandle::new(step, timer, watcher));
            }
            None => tracing::debug!(step, ?kind, "Watch target missing, not polling"),
        }
    }

    fn enter_effects(&mut self, step: u8) {
        let delay = self.settings.entry_activation_delay;
        match self.registry.kind_of(step) {
            Some(StepKind::EditCards) => {
                let target = ActivationTarget::Child {
                    container: ids::CARDS_CONTAINER.to_string(),
                    class: ids::DEMO_CARD.to_string(),
                    index: 0,
                };
                self.scheduler
                    .after_in_scope(step, delay, Task::Activate(target));
            }
            Some(StepKind::EditLink) => {
                let target = ActivationTarget::Element(ids::EDITABLE_LINK.to_string());
                self.scheduler
                    .after_in_scope(step, delay, Task::Activate(target));
            }
            Some(StepKind::Bonus) => {
                let target = ActivationTarget::Element(ids::ALIGN_BOX_FIRST.to_string());
                self.scheduler
                    .after_in_scope(step, delay, Task::Activate(target));
                self.document.add_class(&ids::hint(step), ids::CLASS_VISIBLE);
            }
            Some(StepKind::Finish) => {
                self.document.launch_confetti(ConfettiBurst {
                    particles: self.settings.confetti_particles,
                });
            }
            _ => {}
        }
    }
}
