//! Playground tour - a guided walkthrough for a visual editor
//!
//! The walkthrough steps a user through a fixed sequence of edits, watching
//! a host page for each edit and celebrating completions. The page is
//! reached through the [`dom::Document`] trait; [`dom::MemoryDocument`] is
//! the in-memory page used by tests and the terminal playground.

pub mod config;
pub mod dom;
pub mod hooks;
pub mod logging;
pub mod playground;
pub mod render;
pub mod scheduler;
pub mod steps;
pub mod telemetry;
pub mod walkthrough;
pub mod watchers;

pub use dom::{Document, MemoryDocument};
pub use hooks::WalkthroughHooks;
pub use steps::{StepKind, StepRegistry};
pub use walkthrough::{Walkthrough, WalkthroughSettings};
