//! Navigation controls and progress indicator.
//!
//! The `*_for` / `*_view` functions are pure: they only look at the current
//! step, the completed set and the step count. The `apply_*` functions write
//! those views into a [`Document`] and do nothing when a target is missing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dom::{ids, Document};

/// Display strings
pub mod labels {
    pub const PREVIOUS: &str = "Previous";
    pub const BACK: &str = "Back";
    pub const NEXT: &str = "Next";
    pub const TIP: &str = "Tip";
    pub const FINISH: &str = "Finish";
    pub const ONE_MORE: &str = "One more thing";
    pub const START_AGAIN: &str = "Start Again";

    pub const CARD_COUNT_TEMPLATE: &str = "{NUM_DONE}/{NUM_TARGET} cards";
    pub const DELETE_COUNT_TEMPLATE: &str = "{NUM_DONE}/{NUM_TARGET} deleted";

    /// Fill a toast template
    pub fn fill(template: &str, done: usize, target: usize) -> String {
        template
            .replace("{NUM_DONE}", &done.to_string())
            .replace("{NUM_TARGET}", &target.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Keeps the layout when there is no previous button
    Spacer,
    Previous,
    Hint,
    Next,
    Finish,
    OneMore,
    StartAgain,
}

impl ControlKind {
    /// Whether this control moves the user forward (and gets highlighted)
    pub fn is_advance(&self) -> bool {
        matches!(self, ControlKind::Next | ControlKind::Finish)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub kind: ControlKind,
    pub label: &'static str,
    pub disabled: bool,
    pub highlighted: bool,
}

impl Control {
    fn new(kind: ControlKind, label: &'static str) -> Self {
        Self {
            kind,
            label,
            disabled: false,
            highlighted: false,
        }
    }
}

/// Controls shown on `step` of a `total`-step walkthrough
pub fn controls_for(step: u8, total: u8) -> Vec<Control> {
    let mut controls = Vec::new();

    if step > 1 {
        let label = if step == total {
            labels::BACK
        } else {
            labels::PREVIOUS
        };
        controls.push(Control::new(ControlKind::Previous, label));
    } else {
        controls.push(Control::new(ControlKind::Spacer, ""));
    }

    let finish_step = total.saturating_sub(2);
    if (step >= 2 && step <= finish_step) || step == total {
        controls.push(Control::new(ControlKind::Hint, labels::TIP));
    }

    if step < finish_step {
        let mut next = Control::new(ControlKind::Next, labels::NEXT);
        next.disabled = step >= total;
        controls.push(next);
    } else if step == finish_step {
        controls.push(Control::new(ControlKind::Finish, labels::FINISH));
    } else if step + 1 == total {
        controls.push(Control::new(ControlKind::OneMore, labels::ONE_MORE));
        controls.push(Control::new(ControlKind::StartAgain, labels::START_AGAIN));
    } else {
        controls.push(Control::new(ControlKind::StartAgain, labels::START_AGAIN));
    }

    controls
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DotState {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub step: u8,
    pub state: DotState,
    /// Highlighted as the first real task while the intro is showing
    pub next_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub dots: Vec<Dot>,
    /// `lines[i]` bridges dots `i + 1` and `i + 2`
    pub lines: Vec<bool>,
    /// Dots ignore clicks
    pub inert: bool,
}

pub fn progress_view(current: u8, completed: &BTreeSet<u8>, total: u8) -> ProgressView {
    let on_intro = current == 1;

    let dots = (1..=total)
        .map(|step| {
            let state = if completed.contains(&step) {
                DotState::Completed
            } else if step == current {
                DotState::Active
            } else {
                DotState::Upcoming
            };
            Dot {
                step,
                state,
                next_up: on_intro && step == 2,
            }
        })
        .collect();

    let lines = (0..total.saturating_sub(1))
        .map(|i| completed.contains(&(i + 2)))
        .collect();

    ProgressView {
        dots,
        lines,
        inert: on_intro,
    }
}

/// Write `controls` into the step's scaffold, restoring any highlight the
/// caller asks for
pub fn apply_controls(doc: &mut dyn Document, step: u8, controls: Vec<Control>) -> bool {
    let scaffold = ids::controls(step);
    if !doc.contains(&scaffold) {
        return false;
    }
    doc.set_controls(&scaffold, controls)
}

/// Show or hide the whole scaffold
pub fn set_controls_hidden(doc: &mut dyn Document, step: u8, hidden: bool) -> bool {
    doc.set_class(&ids::controls(step), ids::CLASS_HIDDEN, hidden)
}

/// Toggle the highlight on the step's advance control
pub fn set_advance_highlight(doc: &mut dyn Document, step: u8, on: bool) -> bool {
    let scaffold = ids::controls(step);
    let Some(mut controls) = doc.controls(&scaffold) else {
        return false;
    };
    let mut changed = false;
    for control in controls.iter_mut().filter(|c| c.kind.is_advance()) {
        control.highlighted = on;
        changed = true;
    }
    changed && doc.set_controls(&scaffold, controls)
}

pub fn apply_progress(doc: &mut dyn Document, view: &ProgressView) {
    doc.set_class(ids::PROGRESS_CONTAINER, ids::CLASS_INERT, view.inert);

    for dot in &view.dots {
        let id = ids::progress_dot(dot.step);
        doc.set_class(
            &id,
            ids::CLASS_COMPLETED,
            dot.state == DotState::Completed,
        );
        doc.set_class(&id, ids::CLASS_ACTIVE, dot.state == DotState::Active);
        doc.set_class(&id, ids::CLASS_NEXT_UP, dot.next_up);
    }

    for (i, completed) in view.lines.iter().enumerate() {
        doc.set_class(&ids::progress_line(i as u8), ids::CLASS_COMPLETED, *completed);
    }
}
