use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use playground_tour::config::Config;
use playground_tour::dom::{ids, ChildNode};
use playground_tour::hooks::{CompositeHooks, TracingHooks};
use playground_tour::playground::seed_document;
use playground_tour::render::{self, ControlKind};
use playground_tour::telemetry::JsonlTelemetry;
use playground_tour::{Document, MemoryDocument, StepRegistry, Walkthrough};

use crate::ui::keybindings::{action_for, Action};
use crate::ui::{page, ConfettiOverlay, LineEdit, PageView, TerminalGuard};

const REMOTE_IMAGE: &str = "https://images.example.com/mountains.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Headline,
    Link,
}

pub struct App {
    config: Config,
    walkthrough: Walkthrough<MemoryDocument>,
    confetti: ConfettiOverlay,
    /// Bursts already turned into an overlay
    editing: Option<(EditTarget, LineEdit)>,
    /// Image source to restore when a preview is discarded
    preview_backup: Option<String>,
    previews: u32,
    /// Deleted cards, most recent last
    deleted_cards: Vec<ChildNode>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let registry = StepRegistry::standard();
        let document = seed_document(&registry);

        let mut hooks = CompositeHooks::new().with(TracingHooks);
        if config.telemetry.enabled {
            let telemetry = JsonlTelemetry::new(config.telemetry_path());
            tracing::info!(path = ?telemetry.path(), "Recording page visits");
            hooks = hooks.with(telemetry);
        }

        let walkthrough =
            Walkthrough::new(document, registry, config.settings()).with_hooks(hooks);

        Ok(Self {
            config,
            walkthrough,
            confetti: ConfettiOverlay::new(),
            editing: None,
            preview_backup: None,
            previews: 0,
            deleted_cards: Vec::new(),
            status: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        crate::ui::install_panic_hook();
        let mut guard = TerminalGuard::enter()?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || read_keys(&tx));

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms.max(1));
        let mut ticker = tokio::time::interval(tick_rate);
        let started = Instant::now();

        while !self.should_quit {
            self.walkthrough.advance_to(started.elapsed());
            self.collect_effects();

            let now = Instant::now();
            let editing = self.editing.as_ref().map(|(_, edit)| edit);
            let view = PageView {
                walkthrough: &self.walkthrough,
                editing,
                status: self.status.as_deref(),
            };
            let confetti = &self.confetti;
            guard.terminal_mut().draw(|f| {
                let area = f.area();
                page::render(f, &view);
                confetti.render(f, area, now);
            })?;

            tokio::select! {
                _ = ticker.tick() => {}
                key = rx.recv() => match key {
                    Some(key) => self.handle_key(key),
                    None => self.should_quit = true,
                },
            }
        }

        drop(rx);
        guard.restore();
        if let Err(e) = reader.await {
            tracing::warn!(error = %e, "Key reader did not shut down cleanly");
        }
        Ok(())
    }

    /// Pick up effects the walkthrough requested since the last frame
    fn collect_effects(&mut self) {
        let document = self.walkthrough.document_mut();
        let bursts = document.take_confetti();
        document.clear_history();
        if let Some(burst) = bursts.last() {
            self.confetti.launch(
                burst.particles,
                Duration::from_millis(self.config.ui.confetti_ms),
                Instant::now(),
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.editing.is_some() {
            self.handle_edit_key(key.code);
            return;
        }

        self.status = None;
        if let Some(action) = action_for(key.code, self.walkthrough.current_kind()) {
            self.perform(action);
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Some((target, edit)) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => edit.buffer.push(c),
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            KeyCode::Esc => self.editing = None,
            KeyCode::Enter => {
                let target = *target;
                let buffer = std::mem::take(&mut edit.buffer);
                self.editing = None;
                self.commit_edit(target, &buffer);
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self, target: EditTarget, buffer: &str) {
        match target {
            EditTarget::Headline => {
                self.walkthrough
                    .document_mut()
                    .set_text(ids::EDITABLE_TEXT, buffer);
                if !self.walkthrough.commit_text(ids::EDITABLE_TEXT) {
                    self.status = Some("Make the headline your own".to_string());
                }
            }
            EditTarget::Link => {
                self.walkthrough
                    .document_mut()
                    .set_attribute(ids::EDITABLE_LINK, ids::ATTR_HREF, buffer.trim());
            }
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Previous => {
                self.walkthrough.activate_control(ControlKind::Previous);
            }
            Action::Forward => self.forward(),
            Action::ToggleHint => {
                let step = self.walkthrough.current_step();
                self.walkthrough.toggle_hint(step);
            }
            Action::StartAgain => {
                self.walkthrough.restart();
                self.deleted_cards.clear();
                self.preview_backup = None;
            }
            Action::GetStarted => {
                self.walkthrough.get_started();
            }
            Action::JumpTo(step) => {
                if !self.walkthrough.select_progress_dot(step) {
                    self.status = Some("Use Get started to begin".to_string());
                }
            }
            Action::EditText => self.begin_edit(EditTarget::Headline),
            Action::EditLink => self.begin_edit(EditTarget::Link),
            Action::PreviewImage => self.preview_image(),
            Action::CommitPreview => {
                let doc = self.walkthrough.document_mut();
                if doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING) {
                    doc.set_flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING, false);
                    self.preview_backup = None;
                }
            }
            Action::CancelPreview => {
                let doc = self.walkthrough.document_mut();
                if doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING) {
                    if let Some(src) = self.preview_backup.take() {
                        doc.set_attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC, &src);
                    }
                    doc.set_flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING, false);
                }
            }
            Action::RemoteImage => {
                let doc = self.walkthrough.document_mut();
                doc.set_flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING, false);
                doc.set_attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC, REMOTE_IMAGE);
                self.preview_backup = None;
            }
            Action::DuplicateCard => {
                self.walkthrough
                    .document_mut()
                    .duplicate_child(ids::CARDS_CONTAINER, ids::DEMO_CARD, 0);
            }
            Action::DeleteCard => {
                let doc = self.walkthrough.document_mut();
                let count = doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD).unwrap_or(0);
                if count > 0 {
                    if let Some(card) = doc.remove_child(ids::CARDS_CONTAINER, ids::DEMO_CARD, count - 1) {
                        self.deleted_cards.push(card);
                    }
                }
            }
            Action::RestoreCard => {
                if let Some(card) = self.deleted_cards.pop() {
                    self.walkthrough
                        .document_mut()
                        .push_child(ids::CARDS_CONTAINER, card);
                }
            }
            Action::SwapNotes => {
                self.walkthrough
                    .document_mut()
                    .move_child(ids::NOTES_CONTAINER, ids::STICKY_NOTE, 0, 1);
            }
            Action::RotateNotes => {
                let doc = self.walkthrough.document_mut();
                let count = doc.child_count(ids::NOTES_CONTAINER, ids::STICKY_NOTE).unwrap_or(0);
                if count > 1 {
                    doc.move_child(ids::NOTES_CONTAINER, ids::STICKY_NOTE, 0, count - 1);
                }
            }
            Action::HoverModeCards => {
                let hovering = self
                    .walkthrough
                    .document()
                    .has_class(ids::ARROW_LEFT, ids::CLASS_VISIBLE);
                self.walkthrough.hover_mode_cards(!hovering);
            }
        }
    }

    /// Right arrow: the step's forward control, or "get started" while the
    /// intro hides its controls
    fn forward(&mut self) {
        let step = self.walkthrough.current_step();
        if self
            .walkthrough
            .document()
            .has_class(&ids::controls(step), ids::CLASS_HIDDEN)
        {
            self.walkthrough.get_started();
            return;
        }
        let forward = render::controls_for(step, self.walkthrough.total_steps())
            .into_iter()
            .map(|c| c.kind)
            .find(|k| matches!(k, ControlKind::Next | ControlKind::Finish | ControlKind::OneMore));
        if let Some(kind) = forward {
            self.walkthrough.activate_control(kind);
        }
    }

    fn begin_edit(&mut self, target: EditTarget) {
        let doc = self.walkthrough.document();
        let (label, buffer) = match target {
            EditTarget::Headline => ("Headline", doc.text(ids::EDITABLE_TEXT)),
            EditTarget::Link => ("Link", doc.attribute(ids::EDITABLE_LINK, ids::ATTR_HREF)),
        };
        self.editing = Some((
            target,
            LineEdit {
                label,
                buffer: buffer.unwrap_or_default(),
            },
        ));
    }

    fn preview_image(&mut self) {
        self.previews += 1;
        let doc = self.walkthrough.document_mut();
        if !doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING) {
            self.preview_backup = doc.attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC);
        }
        doc.set_flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING, true);
        doc.set_attribute(
            ids::REPLACEABLE_IMAGE,
            ids::ATTR_SRC,
            &format!("~/Pictures/photo-{}.jpg", self.previews),
        );
    }
}

/// Forward key presses until the app stops listening
fn read_keys(tx: &mpsc::UnboundedSender<KeyEvent>) {
    while !tx.is_closed() {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read terminal event");
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to poll terminal events");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use tempfile::TempDir;

    fn app() -> (App, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        (App::new(config).unwrap(), temp_dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_right_on_intro_gets_started() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.walkthrough.current_step(), 2);
        assert!(app.walkthrough.is_complete(1));
    }

    #[test]
    fn test_headline_edit_completes_step() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Hello ___".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "Hello Ada");
        press(&mut app, KeyCode::Enter);

        assert!(app.walkthrough.is_complete(2));
        app.collect_effects();
        assert!(app.confetti.is_active(Instant::now()));
        assert!(app.walkthrough.document().confetti.is_empty());
    }

    #[test]
    fn test_escape_discards_edit() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "!!");
        press(&mut app, KeyCode::Esc);
        assert!(app.editing.is_none());
        assert_eq!(
            app.walkthrough.document().text(ids::EDITABLE_TEXT).as_deref(),
            Some("Hello ___")
        );
    }

    #[test]
    fn test_card_keys_edit_document() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.walkthrough.current_step(), 3);
        press(&mut app, KeyCode::Char('4'));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('x'));
        let doc = app.walkthrough.document();
        assert_eq!(doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD), Some(1));

        press(&mut app, KeyCode::Char('z'));
        let doc = app.walkthrough.document();
        assert_eq!(doc.child_count(ids::CARDS_CONTAINER, ids::DEMO_CARD), Some(2));
    }

    #[test]
    fn test_progress_dots_inert_on_intro() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.walkthrough.current_step(), 1);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_discarded_preview_restores_image() {
        let (mut app, _dir) = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.walkthrough.current_step(), 3);

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('x'));
        let doc = app.walkthrough.document();
        assert!(!doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING));
        assert_eq!(
            doc.attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC).as_deref(),
            Some(playground_tour::playground::SEED_IMAGE)
        );
    }
}
