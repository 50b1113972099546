//! Card duplicate/delete watcher

use serde::{Deserialize, Serialize};

use super::{SuccessDetail, WatchEvent, Watcher};
use crate::dom::{ids, Document};
use crate::steps::StepKind;

/// Targets for the card step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRules {
    /// Cards the user must reach at some point
    pub target_count: usize,
    /// Deletions shown in the progress toast
    pub delete_target: usize,
}

impl Default for CardRules {
    fn default() -> Self {
        Self {
            target_count: 3,
            delete_target: 1,
        }
    }
}

/// Tracks two independent facts across polls: the count reached the target,
/// and the count went down at least once. Either order completes the step.
pub struct CardWatcher {
    rules: CardRules,
    previous: usize,
    reached_target: bool,
    deleted: bool,
}

impl CardWatcher {
    pub fn new(rules: CardRules, initial: usize) -> Self {
        Self {
            rules,
            previous: initial,
            reached_target: initial >= rules.target_count,
            deleted: false,
        }
    }

    pub fn reached_target(&self) -> bool {
        self.reached_target
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Feed one observed count
    pub fn observe(&mut self, count: usize) -> Vec<WatchEvent> {
        let mut events = Vec::new();

        if count < self.previous {
            self.deleted = true;
        }

        if count == 0 {
            if self.reached_target && self.deleted {
                events.push(WatchEvent::Satisfied(SuccessDetail::Plain));
            }
            events.push(WatchEvent::AllCardsDeleted);
        } else {
            events.push(WatchEvent::CardsPresent);

            if count >= self.rules.target_count {
                self.reached_target = true;
            }

            if count != self.previous {
                events.push(WatchEvent::CardProgress {
                    cards: count,
                    deletes: usize::from(self.deleted),
                });
            }

            if self.reached_target && self.deleted {
                events.push(WatchEvent::Satisfied(SuccessDetail::Plain));
            }
        }

        self.previous = count;
        events
    }
}

impl Watcher for CardWatcher {
    fn kind(&self) -> StepKind {
        StepKind::EditCards
    }

    fn poll(&mut self, doc: &dyn Document) -> Vec<WatchEvent> {
        match doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD) {
            Some(count) => self.observe(count),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfied_count(events: &[WatchEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, WatchEvent::Satisfied(_)))
            .count()
    }

    fn run(counts: &[usize]) -> (CardWatcher, Vec<Vec<WatchEvent>>) {
        let mut watcher = CardWatcher::new(CardRules::default(), counts[0]);
        let events = counts[1..].iter().map(|c| watcher.observe(*c)).collect();
        (watcher, events)
    }

    #[test]
    fn test_grow_then_delete_satisfies() {
        let (watcher, events) = run(&[1, 2, 3, 2]);
        assert!(watcher.reached_target());
        assert!(watcher.deleted());
        assert_eq!(satisfied_count(&events[0]), 0);
        assert_eq!(satisfied_count(&events[1]), 0);
        assert_eq!(satisfied_count(&events[2]), 1);
    }

    #[test]
    fn test_delete_then_grow_satisfies() {
        let (_, events) = run(&[2, 1, 2, 3]);
        assert_eq!(satisfied_count(&events[0]), 0);
        assert_eq!(satisfied_count(&events[1]), 0);
        assert_eq!(satisfied_count(&events[2]), 1);
    }

    #[test]
    fn test_starting_at_target_only_needs_delete() {
        let (_, events) = run(&[3, 2]);
        assert_eq!(satisfied_count(&events[0]), 1);
    }

    #[test]
    fn test_zero_reports_all_deleted() {
        let (_, events) = run(&[1, 2, 3, 2, 0]);
        assert_eq!(
            events[3],
            vec![
                WatchEvent::Satisfied(SuccessDetail::Plain),
                WatchEvent::AllCardsDeleted
            ]
        );
    }

    #[test]
    fn test_progress_only_on_change() {
        let (_, events) = run(&[1, 1, 2]);
        assert_eq!(events[0], vec![WatchEvent::CardsPresent]);
        assert_eq!(
            events[1],
            vec![
                WatchEvent::CardsPresent,
                WatchEvent::CardProgress {
                    cards: 2,
                    deletes: 0
                }
            ]
        );
    }

    #[test]
    fn test_deletion_to_zero_still_counts() {
        let (_, events) = run(&[1, 2, 3, 0, 3]);
        assert_eq!(satisfied_count(&events[1]), 0);
        assert_eq!(satisfied_count(&events[2]), 1);
        assert_eq!(satisfied_count(&events[3]), 1);
    }

    #[test]
    fn test_zero_before_any_delete_is_not_success() {
        let (_, events) = run(&[1, 0]);
        assert_eq!(events[0], vec![WatchEvent::AllCardsDeleted]);
    }
}
