//! Keyboard shortcuts of the playground.
//!
//! One table drives both key handling and the footer, so the footer never
//! advertises a key the current step ignores.

use crossterm::event::KeyCode;

use playground_tour::StepKind;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Previous,
    Forward,
    ToggleHint,
    StartAgain,
    GetStarted,
    JumpTo(u8),
    EditText,
    PreviewImage,
    CommitPreview,
    CancelPreview,
    RemoteImage,
    DuplicateCard,
    DeleteCard,
    RestoreCard,
    SwapNotes,
    RotateNotes,
    EditLink,
    HoverModeCards,
}

#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: KeyCode,
    pub label: &'static str,
    pub description: &'static str,
    pub action: Action,
    /// `None` for keys active on every step
    pub step: Option<StepKind>,
}

const fn global(key: KeyCode, label: &'static str, description: &'static str, action: Action) -> Shortcut {
    Shortcut {
        key,
        label,
        description,
        action,
        step: None,
    }
}

const fn on(
    step: StepKind,
    key: KeyCode,
    label: &'static str,
    description: &'static str,
    action: Action,
) -> Shortcut {
    Shortcut {
        key,
        label,
        description,
        action,
        step: Some(step),
    }
}

pub static SHORTCUTS: &[Shortcut] = &[
    global(KeyCode::Left, "←", "back", Action::Previous),
    global(KeyCode::Right, "→", "forward", Action::Forward),
    global(KeyCode::Char('?'), "?", "tip", Action::ToggleHint),
    global(KeyCode::Char('r'), "r", "start again", Action::StartAgain),
    global(KeyCode::Char('q'), "q", "quit", Action::Quit),
    on(StepKind::Intro, KeyCode::Char('g'), "g", "get started", Action::GetStarted),
    on(StepKind::EditText, KeyCode::Char('e'), "e", "edit headline", Action::EditText),
    on(StepKind::ReplaceImage, KeyCode::Char('p'), "p", "preview image", Action::PreviewImage),
    on(StepKind::ReplaceImage, KeyCode::Char('c'), "c", "keep preview", Action::CommitPreview),
    on(StepKind::ReplaceImage, KeyCode::Char('x'), "x", "discard preview", Action::CancelPreview),
    on(StepKind::ReplaceImage, KeyCode::Char('u'), "u", "image from URL", Action::RemoteImage),
    on(StepKind::EditCards, KeyCode::Char('d'), "d", "duplicate card", Action::DuplicateCard),
    on(StepKind::EditCards, KeyCode::Char('x'), "x", "delete card", Action::DeleteCard),
    on(StepKind::EditCards, KeyCode::Char('z'), "z", "undo delete", Action::RestoreCard),
    on(StepKind::Reorder, KeyCode::Char('s'), "s", "swap first notes", Action::SwapNotes),
    on(StepKind::Reorder, KeyCode::Char('o'), "o", "rotate notes", Action::RotateNotes),
    on(StepKind::EditLink, KeyCode::Char('e'), "e", "edit link", Action::EditLink),
    on(StepKind::EditLink, KeyCode::Char('m'), "m", "hover mode cards", Action::HoverModeCards),
];

/// Resolve a key press on a step of kind `step`
pub fn action_for(key: KeyCode, step: Option<StepKind>) -> Option<Action> {
    if let KeyCode::Char(c @ '1'..='9') = key {
        return c.to_digit(10).map(|d| Action::JumpTo(d as u8));
    }
    SHORTCUTS
        .iter()
        .filter(|s| s.step.is_none() || s.step == step)
        .find(|s| s.key == key)
        .map(|s| s.action)
}

/// Shortcuts shown in the footer for `step`, step-specific ones first
pub fn shortcuts_for(step: Option<StepKind>) -> Vec<&'static Shortcut> {
    let specific = SHORTCUTS.iter().filter(|s| s.step.is_some() && s.step == step);
    let common = SHORTCUTS.iter().filter(|s| s.step.is_none());
    specific.chain(common).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_keys_are_scoped() {
        assert_eq!(
            action_for(KeyCode::Char('x'), Some(StepKind::EditCards)),
            Some(Action::DeleteCard)
        );
        assert_eq!(
            action_for(KeyCode::Char('x'), Some(StepKind::ReplaceImage)),
            Some(Action::CancelPreview)
        );
        assert_eq!(action_for(KeyCode::Char('x'), Some(StepKind::Finish)), None);
    }

    #[test]
    fn test_digits_jump() {
        assert_eq!(action_for(KeyCode::Char('4'), None), Some(Action::JumpTo(4)));
    }

    #[test]
    fn test_no_duplicate_keys_per_step() {
        for kind in StepKind::all() {
            let shortcuts = shortcuts_for(Some(*kind));
            for (i, a) in shortcuts.iter().enumerate() {
                for b in &shortcuts[i + 1..] {
                    assert_ne!(a.key, b.key, "{:?} bound twice on {:?}", a.key, kind);
                }
            }
        }
    }
}
