//! Per-step completion flags

use std::collections::BTreeSet;

/// Set of completed step ids.
///
/// Membership is the completion flag; there is no separate boolean per step,
/// so `mark` is the single idempotency guard for every success handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTracker {
    completed: BTreeSet<u8>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self, step: u8) -> bool {
        self.completed.contains(&step)
    }

    /// Returns true only when the step was not already complete
    pub fn mark(&mut self, step: u8) -> bool {
        self.completed.insert(step)
    }

    /// Returns true only when the step was complete
    pub fn unmark(&mut self, step: u8) -> bool {
        self.completed.remove(&step)
    }

    pub fn completed(&self) -> &BTreeSet<u8> {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn reset(&mut self) {
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_idempotent() {
        let mut tracker = CompletionTracker::new();
        assert!(tracker.mark(3));
        assert!(!tracker.mark(3));
        assert!(tracker.is_complete(3));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_unmark_reports_prior_state() {
        let mut tracker = CompletionTracker::new();
        assert!(!tracker.unmark(2));
        tracker.mark(2);
        assert!(tracker.unmark(2));
        assert!(!tracker.is_complete(2));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tracker = CompletionTracker::new();
        tracker.mark(1);
        tracker.mark(5);
        tracker.reset();
        assert!(tracker.is_empty());
    }
}
