//! Stable element identifiers and class names of the host page

/// Container holding every progress dot
pub const PROGRESS_CONTAINER: &str = "progress-container";
/// Headline edited on the text step
pub const EDITABLE_TEXT: &str = "editable-name";
pub const REPLACEABLE_IMAGE: &str = "replaceable-image";
pub const EDITABLE_LINK: &str = "editable-link";
pub const CARDS_CONTAINER: &str = "cards-container";
pub const NOTES_CONTAINER: &str = "notes-container";
pub const GET_STARTED_BUTTON: &str = "get-started-button";
pub const PROGRESS_TOAST: &str = "progress-toast";
pub const CARD_COUNT_STATUS: &str = "card-count-status";
pub const DELETE_COUNT_STATUS: &str = "delete-count-status";
pub const UNDO_MESSAGE: &str = "undo-message";
pub const IMAGE_SUCCESS_URL_TEXT: &str = "success-message-url";
pub const IMAGE_SUCCESS_LOCAL_TEXT: &str = "success-message-local";
pub const MODE_CARDS: &str = "mode-cards";
pub const ARROW_LEFT: &str = "arrow-left";
pub const ARROW_CENTER: &str = "arrow-center";
/// First box of the bonus alignment demo
pub const ALIGN_BOX_FIRST: &str = "align-box-1";

/// Child classes
pub const DEMO_CARD: &str = "demo-card";
pub const STICKY_NOTE: &str = "sticky-note";

/// Attributes, data keys and element flags
pub const ATTR_SRC: &str = "src";
pub const ATTR_HREF: &str = "href";
pub const DATA_NOTE_ID: &str = "note-id";
pub const FLAG_PREVIEWING: &str = "previewing";

/// Class names toggled by the walkthrough
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_SHOW: &str = "show";
pub const CLASS_HIDING: &str = "hiding";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_COMPLETED: &str = "completed";
pub const CLASS_NEXT_UP: &str = "next-up";
pub const CLASS_INERT: &str = "inert";
pub const CLASS_EDIT_VALID: &str = "edit-valid";
pub const CLASS_REACHED: &str = "reached";

pub fn section(step: u8) -> String {
    format!("section-{step}")
}

/// Navigation scaffold inside a section
pub fn controls(step: u8) -> String {
    format!("slide-controls-{step}")
}

pub fn success_message(step: u8) -> String {
    format!("success-message-{step}")
}

pub fn hint(step: u8) -> String {
    format!("hint-{step}")
}

pub fn progress_dot(step: u8) -> String {
    format!("progress-dot-{step}")
}

/// Line between dots `index + 1` and `index + 2`
pub fn progress_line(index: u8) -> String {
    format!("progress-line-{index}")
}
