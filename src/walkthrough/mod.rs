//! The walkthrough context: current step, completion state, the active
//! watcher and pending timers for one mounted walkthrough.
//!
//! All mutation happens through `&mut self`, from navigation calls, user
//! commits and the timer tasks run by [`Walkthrough::advance_to`]. Nothing
//! runs on its own: the owner drives the clock.

mod completion;
mod feedback;
mod navigation;

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::{ids, ActivationTarget, Document};
use crate::hooks::WalkthroughHooks;
use crate::render;
use crate::scheduler::{Scheduler, TimerId};
use crate::steps::{CompletionTracker, StepKind, StepRegistry};
use crate::watchers::{Baselines, CardRules, EditRules, WatcherHandle};

/// Timings and validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkthroughSettings {
    /// How often polled watchers look at the page
    pub poll_interval: Duration,
    /// How long the card progress toast stays up
    pub toast_visible: Duration,
    /// Fade-out window before the toast/undo classes are removed
    pub toast_fade: Duration,
    /// Delay before auto-activating an element on step entry
    pub entry_activation_delay: Duration,
    /// Delay before scrolling a success banner into view
    pub scroll_delay: Duration,
    pub confetti_particles: u32,
    /// The intro step shows a video with its own "get started" button
    pub intro_video: bool,
    pub edit_rules: EditRules,
    pub cards: CardRules,
}

impl Default for WalkthroughSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(400),
            toast_visible: Duration::from_millis(2000),
            toast_fade: Duration::from_millis(300),
            entry_activation_delay: Duration::from_millis(150),
            scroll_delay: Duration::from_millis(100),
            confetti_particles: 50,
            intro_video: true,
            edit_rules: EditRules::default(),
            cards: CardRules::default(),
        }
    }
}

/// Work queued on the walkthrough's clock
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Task {
    PollWatcher,
    HideToast,
    ClearToast,
    ClearUndo,
    Activate(ActivationTarget),
    ScrollIntoView(String),
}

#[derive(Debug, Default)]
struct FeedbackTimers {
    toast_hide: Option<TimerId>,
    toast_clear: Option<TimerId>,
    undo_clear: Option<TimerId>,
}

pub struct Walkthrough<D: Document> {
    registry: StepRegistry,
    settings: WalkthroughSettings,
    document: D,
    current: u8,
    tracker: CompletionTracker,
    watcher: Option<WatcherHandle>,
    baselines: Baselines,
    scheduler: Scheduler<Task>,
    timers: FeedbackTimers,
    hooks: Option<Box<dyn WalkthroughHooks>>,
}

impl<D: Document> Walkthrough<D> {
    /// Mount a walkthrough on `document`, showing the first step
    pub fn new(document: D, registry: StepRegistry, settings: WalkthroughSettings) -> Self {
        let mut walkthrough = Self {
            registry,
            settings,
            document,
            current: 1,
            tracker: CompletionTracker::new(),
            watcher: None,
            baselines: Baselines::default(),
            scheduler: Scheduler::new(),
            timers: FeedbackTimers::default(),
            hooks: None,
        };
        walkthrough.mount();
        walkthrough
    }

    pub fn with_hooks(mut self, hooks: impl WalkthroughHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    fn mount(&mut self) {
        self.document
            .add_class(&ids::section(self.current), ids::CLASS_ACTIVE);
        self.render_step(self.current);
        tracing::debug!(total = self.registry.total(), "Walkthrough mounted");
    }

    pub fn current_step(&self) -> u8 {
        self.current
    }

    pub fn current_kind(&self) -> Option<StepKind> {
        self.registry.kind_of(self.current)
    }

    pub fn total_steps(&self) -> u8 {
        self.registry.total()
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &WalkthroughSettings {
        &self.settings
    }

    pub fn is_complete(&self, step: u8) -> bool {
        self.tracker.is_complete(step)
    }

    pub fn completed_steps(&self) -> &BTreeSet<u8> {
        self.tracker.completed()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Host-side access for edits the walkthrough only observes
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Step and kind of the running watcher, if any
    pub fn active_watcher(&self) -> Option<(u8, StepKind)> {
        self.watcher.as_ref().map(|w| (w.step(), w.kind()))
    }

    pub fn baselines(&self) -> &Baselines {
        &self.baselines
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Current reading of the walkthrough clock
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.now() + delta);
    }

    /// Run every timer due up to `until`, in due order
    pub fn advance_to(&mut self, until: Duration) {
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            self.run_task(id, task);
        }
        self.scheduler.settle(until);
    }

    fn run_task(&mut self, id: TimerId, task: Task) {
        match task {
            Task::PollWatcher => self.poll_watcher(id),
            Task::HideToast => {
                self.timers.toast_hide = None;
                self.hide_toast();
            }
            Task::ClearToast => {
                self.timers.toast_clear = None;
                self.document.remove_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW);
                self.document
                    .remove_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING);
            }
            Task::ClearUndo => {
                self.timers.undo_clear = None;
                self.document.remove_class(ids::UNDO_MESSAGE, ids::CLASS_SHOW);
                self.document.remove_class(ids::UNDO_MESSAGE, ids::CLASS_HIDING);
            }
            Task::Activate(target) => {
                if !self.document.activate(&target) {
                    tracing::debug!(?target, "Activation target missing");
                }
            }
            Task::ScrollIntoView(id) => {
                self.document.scroll_into_view(&id);
            }
        }
    }

    fn poll_watcher(&mut self, timer: TimerId) {
        let Some(handle) = self.watcher.as_mut() else {
            return;
        };
        if handle.timer() != timer {
            return;
        }
        let step = handle.step();
        let events = handle.poll(&self.document);
        for event in events {
            self.apply_watch_event(step, event);
        }
    }

    /// Controls and progress for `step`
    fn render_step(&mut self, step: u8) {
        let total = self.registry.total();
        render::apply_controls(&mut self.document, step, render::controls_for(step, total));
        let hide_scaffold = step == 1
            && self.settings.intro_video
            && self.registry.kind_of(step) == Some(StepKind::Intro);
        render::set_controls_hidden(&mut self.document, step, hide_scaffold);
        self.refresh_progress();
    }

    fn refresh_progress(&mut self) {
        let view = render::progress_view(
            self.current,
            self.tracker.completed(),
            self.registry.total(),
        );
        render::apply_progress(&mut self.document, &view);
    }

    fn emit_visit(&self, step: u8, completed: bool) {
        if let Some(hooks) = &self.hooks {
            hooks.page_visit(self.registry.mnemonic_of(step), step, completed);
        }
    }
}
