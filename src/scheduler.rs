//! Deterministic timer queue driven by an explicit clock.
//!
//! Stands in for browser `setTimeout`/`setInterval`: nothing runs on its own,
//! the owner advances time and handles each due task before asking for the
//! next one. Timers may be scoped to a step so that leaving the step cancels
//! them in one call.

use std::time::Duration;

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    scope: Option<u8>,
    task: T,
}

/// Timer queue keyed by due time, ties broken by creation order
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `task` once after `delay`
    pub fn after(&mut self, delay: Duration, task: T) -> TimerId {
        self.push(delay, None, None, task)
    }

    /// Fire `task` once after `delay`, cancelled by `cancel_scope(step)`
    pub fn after_in_scope(&mut self, step: u8, delay: Duration, task: T) -> TimerId {
        self.push(delay, None, Some(step), task)
    }

    /// Fire `task` every `period`, first after one period
    pub fn every(&mut self, period: Duration, task: T) -> TimerId {
        // A zero period would never let the clock move past `now`
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), None, task)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, scope: Option<u8>, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            scope,
            task,
        });
        id
    }

    /// Cancel a timer; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every timer scoped to `step`, returning how many were pending
    pub fn cancel_scope(&mut self, step: u8) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.scope != Some(step));
        before - self.entries.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// Moves the clock to the task's due time. Periodic timers are re-armed
    /// for their next occurrence before the task is returned, so the caller
    /// can still cancel them while handling it.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let due = self.entries[index].due;
        if due > self.now {
            self.now = due;
        }

        match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.due = due + period;
                Some((entry.id, entry.task.clone()))
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Some((entry.id, entry.task))
            }
        }
    }

    /// Move the clock forward once nothing else is due
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
