//! Optional callbacks fired by the walkthrough.
//!
//! Hooks are best-effort: they return nothing, and a walkthrough without
//! hooks behaves exactly like one with no-op hooks.

use std::sync::{Arc, Mutex};

/// External observers of walkthrough progress
pub trait WalkthroughHooks {
    /// A step was shown (`completed = false`) or completed (`completed = true`)
    fn page_visit(&self, _mnemonic: &str, _step: u8, _completed: bool) {}

    /// The user asked to start again; runs before state is reset
    fn on_restart(&self) {}
}

/// Logs every callback at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHooks;

impl WalkthroughHooks for TracingHooks {
    fn page_visit(&self, mnemonic: &str, step: u8, completed: bool) {
        tracing::info!(mnemonic, step, completed, "Page visit");
    }

    fn on_restart(&self) {
        tracing::info!("Walkthrough restarted");
    }
}

/// Forwards every callback to each inner hook in order
#[derive(Default)]
pub struct CompositeHooks {
    hooks: Vec<Box<dyn WalkthroughHooks>>,
}

impl CompositeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hook: impl WalkthroughHooks + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl WalkthroughHooks for CompositeHooks {
    fn page_visit(&self, mnemonic: &str, step: u8, completed: bool) {
        for hook in &self.hooks {
            hook.page_visit(mnemonic, step, completed);
        }
    }

    fn on_restart(&self) {
        for hook in &self.hooks {
            hook.on_restart();
        }
    }
}

/// A single recorded callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookCall {
    PageVisit {
        mnemonic: String,
        step: u8,
        completed: bool,
    },
    Restart,
}

/// Records callbacks for inspection; clones share the same log
#[derive(Debug, Default, Clone)]
pub struct RecordingHooks {
    pub calls: Arc<Mutex<Vec<HookCall>>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Completion visits only
    pub fn completions(&self) -> Vec<u8> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HookCall::PageVisit {
                    step,
                    completed: true,
                    ..
                } => Some(step),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: HookCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl WalkthroughHooks for RecordingHooks {
    fn page_visit(&self, mnemonic: &str, step: u8, completed: bool) {
        self.push(HookCall::PageVisit {
            mnemonic: mnemonic.to_string(),
            step,
            completed,
        });
    }

    fn on_restart(&self) {
        self.push(HookCall::Restart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_hooks_share_log() {
        let hooks = RecordingHooks::new();
        let clone = hooks.clone();
        clone.page_visit("edtext", 2, false);
        clone.page_visit("edtext", 2, true);
        clone.on_restart();
        assert_eq!(hooks.calls().len(), 3);
        assert_eq!(hooks.completions(), vec![2]);
    }

    #[test]
    fn test_composite_fans_out() {
        let a = RecordingHooks::new();
        let b = RecordingHooks::new();
        let composite = CompositeHooks::new().with(a.clone()).with(b.clone());
        assert_eq!(composite.len(), 2);
        composite.page_visit("image", 3, true);
        assert_eq!(a.completions(), vec![3]);
        assert_eq!(b.completions(), vec![3]);
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl WalkthroughHooks for Silent {}
        Silent.page_visit("fin", 7, false);
        Silent.on_restart();
    }
}
