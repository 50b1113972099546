//! Document change watchers.
//!
//! Each polled step gets a [`Watcher`] when the step is entered. The
//! walkthrough polls it on a fixed interval through a [`WatcherHandle`] and
//! disposes the handle when the step is left. Watchers only observe: they
//! look their target up by id on every poll (the host may replace the node
//! wholesale) and describe what they saw as [`WatchEvent`]s. Deciding what an
//! event does to completion state is left to the walkthrough.

pub mod cards;
pub mod image;
pub mod link;
pub mod reorder;
pub mod text;

use crate::dom::{ids, Document};
use crate::scheduler::{Scheduler, TimerId};
use crate::steps::StepKind;

pub use cards::{CardRules, CardWatcher};
pub use image::ImageWatcher;
pub use link::LinkWatcher;
pub use reorder::ReorderWatcher;
pub use text::EditRules;

/// Extra context carried by a success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessDetail {
    Plain,
    /// The replacement image is a remote URL rather than a local file
    Image { remote: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The step's success condition holds on this poll
    Satisfied(SuccessDetail),
    /// The card count changed
    CardProgress { cards: usize, deletes: usize },
    /// Every card is gone
    AllCardsDeleted,
    /// At least one card exists
    CardsPresent,
}

pub trait Watcher {
    fn kind(&self) -> StepKind;

    fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent>;
}

/// Values captured the first time a watcher is set up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baselines {
    pub image_src: Option<String>,
    pub link_href: Option<String>,
    pub note_order: Option<Vec<String>>,
}

/// Create the watcher for `kind`, or `None` when the step is not polled or
/// its target is missing from the page
pub fn setup(
    kind: StepKind,
    doc: &mut dyn Document,
    baselines: &mut Baselines,
    cards: CardRules,
) -> Option<Box<dyn Watcher>> {
    match kind {
        StepKind::ReplaceImage => {
            let src = doc.attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC)?;
            let baseline = baselines.image_src.get_or_insert(src).clone();
            Some(Box::new(ImageWatcher::new(baseline)))
        }
        StepKind::EditCards => {
            let count = doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD)?;
            Some(Box::new(CardWatcher::new(cards, count)))
        }
        StepKind::Reorder => {
            let order = reorder::tag_notes(doc)?;
            let baseline = baselines.note_order.get_or_insert(order).clone();
            Some(Box::new(ReorderWatcher::new(baseline)))
        }
        StepKind::EditLink => {
            let href = doc.attribute(ids::EDITABLE_LINK, ids::ATTR_HREF)?;
            let baseline = baselines.link_href.get_or_insert(href).clone();
            Some(Box::new(LinkWatcher::new(baseline)))
        }
        StepKind::Intro
        | StepKind::EditText
        | StepKind::Finish
        | StepKind::Bonus => None,
    }
}

/// An active watcher and the periodic timer that polls it.
///
/// Disposing consumes the handle, so a watcher can be stopped only once;
/// holders keep it in an `Option` and `take()` it.
pub struct WatcherHandle {
    step: u8,
    timer: TimerId,
    watcher: Box<dyn Watcher>,
}

impl WatcherHandle {
    pub fn new(step: u8, timer: TimerId, watcher: Box<dyn Watcher>) -> Self {
        Self {
            step,
            timer,
            watcher,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn kind(&self) -> StepKind {
        self.watcher.kind()
    }

    pub fn timer(&self) -> TimerId {
        self.timer
    }

    pub fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent> {
        self.watcher.poll(doc)
    }

    /// Stop polling
    pub fn dispose<T: Clone>(self, scheduler: &mut Scheduler<T>) {
        scheduler.cancel(self.timer);
        tracing::debug!(step = self.step, kind = ?self.watcher.kind(), "Watcher disposed");
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("step", &self.step)
            .field("kind", &self.watcher.kind())
            .field("timer", &self.timer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ChildNode, Element, MemoryDocument};
    use std::time::Duration;

    #[test]
    fn test_setup_returns_none_without_target() {
        let mut doc = MemoryDocument::new();
        let mut baselines = Baselines::default();
        for kind in StepKind::all() {
            assert!(setup(*kind, &mut doc, &mut baselines, CardRules::default()).is_none());
        }
    }

    #[test]
    fn test_image_baseline_captured_once() {
        let mut doc = MemoryDocument::new();
        doc.insert(
            ids::REPLACEABLE_IMAGE,
            Element::new().with_attribute(ids::ATTR_SRC, "first.png"),
        );
        let mut baselines = Baselines::default();
        setup(StepKind::ReplaceImage, &mut doc, &mut baselines, CardRules::default()).unwrap();
        doc.set_attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC, "second.png");
        setup(StepKind::ReplaceImage, &mut doc, &mut baselines, CardRules::default()).unwrap();
        assert_eq!(baselines.image_src.as_deref(), Some("first.png"));
    }

    #[test]
    fn test_card_watcher_seeded_from_document() {
        let mut doc = MemoryDocument::new();
        doc.insert(
            ids::CARDS_CONTAINER,
            Element::new().with_child(ChildNode::new(ids::DEMO_CARD, "one")),
        );
        let mut baselines = Baselines::default();
        let mut watcher =
            setup(StepKind::EditCards, &mut doc, &mut baselines, CardRules::default()).unwrap();
        assert_eq!(watcher.kind(), StepKind::EditCards);
        assert_eq!(watcher.poll(&doc), vec![WatchEvent::CardsPresent]);
    }

    #[test]
    fn test_dispose_cancels_timer() {
        let mut scheduler: Scheduler<u8> = Scheduler::new();
        let timer = scheduler.every(Duration::from_millis(400), 3);
        let handle = WatcherHandle::new(5, timer, Box::new(ReorderWatcher::new(Vec::new())));
        assert!(scheduler.is_pending(timer));
        handle.dispose(&mut scheduler);
        assert!(!scheduler.is_pending(timer));
    }
}
