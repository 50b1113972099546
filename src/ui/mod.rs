pub mod confetti;
pub mod keybindings;
pub mod page;
pub mod terminal_guard;

pub use confetti::ConfettiOverlay;
pub use page::{LineEdit, PageView};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
