//! Walkthrough steps and their completion state

pub mod registry;
pub mod tracker;

pub use registry::{Step, StepKind, StepRegistry};
pub use tracker::CompletionTracker;
