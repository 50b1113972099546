//! Draws the walkthrough page.
//!
//! Everything shown is read back from the document, so the screen reflects
//! exactly what the walkthrough wrote: classes drive colors, the controls
//! scaffold drives the button row.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use playground_tour::dom::ids;
use playground_tour::render::ControlKind;
use playground_tour::{Document, MemoryDocument, StepKind, Walkthrough};

use super::keybindings::shortcuts_for;

/// An in-progress line edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub label: &'static str,
    pub buffer: String,
}

pub struct PageView<'a> {
    pub walkthrough: &'a Walkthrough<MemoryDocument>,
    pub editing: Option<&'a LineEdit>,
    pub status: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &PageView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // progress
            Constraint::Min(8),    // region
            Constraint::Length(4), // feedback
            Constraint::Length(3), // controls
            Constraint::Length(2), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view.walkthrough);
    render_progress(frame, chunks[1], view.walkthrough);
    render_region(frame, chunks[2], view);
    render_feedback(frame, chunks[3], view.walkthrough);
    render_controls(frame, chunks[4], view.walkthrough);
    render_footer(frame, chunks[5], view);
}

fn render_header(frame: &mut Frame, area: Rect, w: &Walkthrough<MemoryDocument>) {
    let step = w.current_step();
    let label = w.current_kind().map(|k| k.label()).unwrap_or("");
    let title = Line::from(vec![
        Span::styled(
            "Playground Tour",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ·  Step {step} of {}  ·  ", w.total_steps())),
        Span::styled(label, Style::default().fg(Color::White)),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_progress(frame: &mut Frame, area: Rect, w: &Walkthrough<MemoryDocument>) {
    let doc = w.document();
    let inert = doc.has_class(ids::PROGRESS_CONTAINER, ids::CLASS_INERT);
    let mut spans = Vec::new();

    for step in 1..=w.total_steps() {
        let dot = ids::progress_dot(step);
        let (glyph, mut style) = if doc.has_class(&dot, ids::CLASS_COMPLETED) {
            ("●", Style::default().fg(Color::Green))
        } else if doc.has_class(&dot, ids::CLASS_ACTIVE) {
            ("◉", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else if doc.has_class(&dot, ids::CLASS_NEXT_UP) {
            ("○", Style::default().fg(Color::Yellow))
        } else {
            ("○", Style::default().fg(Color::Gray))
        };
        if inert {
            style = style.add_modifier(Modifier::DIM);
        }
        spans.push(Span::styled(format!("{glyph} {step}"), style));

        if step < w.total_steps() {
            let line = ids::progress_line(step - 1);
            let (glyph, color) = if doc.has_class(&line, ids::CLASS_COMPLETED) {
                (" ━━━ ", Color::Green)
            } else {
                (" ─── ", Color::DarkGray)
            };
            spans.push(Span::styled(glyph, Style::default().fg(color)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_region(frame: &mut Frame, area: Rect, view: &PageView) {
    let w = view.walkthrough;
    let doc = w.document();
    let mut lines: Vec<Line> = Vec::new();

    match w.current_kind() {
        Some(StepKind::Intro) => {
            lines.push(Line::from("Welcome! This short tour shows you how to edit a page visually."));
            lines.push(Line::from(""));
            let button = doc.text(ids::GET_STARTED_BUTTON).unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("[ {button} ]  (g)"),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        Some(StepKind::EditText) => {
            lines.push(Line::from("Click the headline and type your own words."));
            lines.push(Line::from(""));
            let text = doc.text(ids::EDITABLE_TEXT).unwrap_or_default();
            let valid = doc.has_class(ids::EDITABLE_TEXT, ids::CLASS_EDIT_VALID);
            let color = if valid { Color::Green } else { Color::White };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        Some(StepKind::ReplaceImage) => {
            lines.push(Line::from("Swap the picture for one of your own."));
            lines.push(Line::from(""));
            let src = doc
                .attribute(ids::REPLACEABLE_IMAGE, ids::ATTR_SRC)
                .unwrap_or_default();
            let mut spans = vec![Span::raw("🖼  "), Span::styled(src, Style::default().fg(Color::Yellow))];
            if doc.flag(ids::REPLACEABLE_IMAGE, ids::FLAG_PREVIEWING) {
                spans.push(Span::styled("  (previewing)", Style::default().fg(Color::Magenta)));
            }
            lines.push(Line::from(spans));
        }
        Some(StepKind::EditCards) => {
            lines.push(Line::from("Duplicate a card until there are three, then delete one."));
            lines.push(Line::from(""));
            for card in doc
                .children(ids::CARDS_CONTAINER, ids::DEMO_CARD)
                .unwrap_or_default()
            {
                lines.push(Line::from(format!("┃ {}", card.text)));
            }
        }
        Some(StepKind::Reorder) => {
            lines.push(Line::from("Drag the notes into a different order."));
            lines.push(Line::from(""));
            let notes: Vec<Span> = doc
                .children(ids::NOTES_CONTAINER, ids::STICKY_NOTE)
                .unwrap_or_default()
                .into_iter()
                .map(|note| {
                    Span::styled(
                        format!(" {} ", note.text),
                        Style::default().fg(Color::Black).bg(Color::Yellow),
                    )
                })
                .flat_map(|note| [note, Span::raw("  ")])
                .collect();
            lines.push(Line::from(notes));
        }
        Some(StepKind::EditLink) => {
            lines.push(Line::from("Point the link somewhere new."));
            lines.push(Line::from(""));
            let text = doc.text(ids::EDITABLE_LINK).unwrap_or_default();
            let href = doc
                .attribute(ids::EDITABLE_LINK, ids::ATTR_HREF)
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(
                    text,
                    Style::default()
                        .fg(Color::LightBlue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::styled(format!("  → {href}"), Style::default().fg(Color::Gray)),
            ]));
            if doc.has_class(ids::ARROW_LEFT, ids::CLASS_VISIBLE) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "⇦ Edit mode   ⇧ Preview mode",
                    Style::default().fg(Color::Magenta),
                )));
            }
        }
        Some(StepKind::Finish) => {
            lines.push(Line::from(Span::styled(
                "You're all set!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "{} of {} steps completed.",
                w.completed_steps().len(),
                w.total_steps()
            )));
        }
        Some(StepKind::Bonus) => {
            lines.push(Line::from("One more thing: align boxes with the layout guides."));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "┌──────┐  ┌──────┐  ┌──────┐",
                Style::default().fg(Color::Cyan),
            )));
        }
        None => {}
    }

    if let Some(edit) = view.editing {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", edit.label), Style::default().fg(Color::Cyan)),
            Span::raw(edit.buffer.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(Span::styled(
            "Enter to save, Esc to cancel",
            Style::default().fg(Color::Gray),
        )));
    }

    let region = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(region, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, w: &Walkthrough<MemoryDocument>) {
    let doc = w.document();
    let step = w.current_step();
    let mut lines = Vec::new();

    if doc.has_class(&ids::success_message(step), ids::CLASS_SHOW) {
        let mut text = "Nice work!".to_string();
        for variant in [ids::IMAGE_SUCCESS_URL_TEXT, ids::IMAGE_SUCCESS_LOCAL_TEXT] {
            if w.current_kind() == Some(StepKind::ReplaceImage)
                && doc.contains(variant)
                && !doc.has_class(variant, ids::CLASS_HIDDEN)
            {
                text = doc.text(variant).unwrap_or(text);
            }
        }
        lines.push(Line::from(Span::styled(
            format!("✔ {text}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if doc.has_class(&ids::hint(step), ids::CLASS_VISIBLE) {
        lines.push(Line::from(Span::styled(
            format!("Tip: {}", hint_text(w.current_kind())),
            Style::default().fg(Color::Yellow),
        )));
    }

    if doc.has_class(ids::PROGRESS_TOAST, ids::CLASS_SHOW) {
        let mut style = Style::default().fg(Color::White).bg(Color::DarkGray);
        if doc.has_class(ids::PROGRESS_TOAST, ids::CLASS_HIDING) {
            style = style.add_modifier(Modifier::DIM);
        }
        let status = |id: &str| {
            let reached = doc.has_class(id, ids::CLASS_REACHED);
            Span::styled(
                format!(" {} ", doc.text(id).unwrap_or_default()),
                if reached {
                    style.fg(Color::Green)
                } else {
                    style
                },
            )
        };
        lines.push(Line::from(vec![
            status(ids::CARD_COUNT_STATUS),
            Span::styled("·", style),
            status(ids::DELETE_COUNT_STATUS),
        ]));
    }

    if doc.has_class(ids::UNDO_MESSAGE, ids::CLASS_SHOW) {
        lines.push(Line::from(Span::styled(
            "All cards are gone. Press z to undo.",
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn hint_text(kind: Option<StepKind>) -> &'static str {
    match kind {
        Some(StepKind::EditText) => "double-click any text to edit it in place.",
        Some(StepKind::ReplaceImage) => "hover an image and pick a file or paste a URL.",
        Some(StepKind::EditCards) => "use the toolbar to duplicate or delete an element.",
        Some(StepKind::Reorder) => "grab an element's handle and drop it elsewhere.",
        Some(StepKind::EditLink) => "links open in preview mode and edit in edit mode.",
        Some(StepKind::Bonus) => "guides appear while dragging near other boxes.",
        _ => "explore at your own pace.",
    }
}

fn render_controls(frame: &mut Frame, area: Rect, w: &Walkthrough<MemoryDocument>) {
    let doc = w.document();
    let scaffold = ids::controls(w.current_step());
    if doc.has_class(&scaffold, ids::CLASS_HIDDEN) {
        return;
    }
    let Some(controls) = doc.controls(&scaffold) else {
        return;
    };

    let mut spans = Vec::new();
    for control in controls {
        if control.kind == ControlKind::Spacer {
            spans.push(Span::raw(" ".repeat(12)));
            continue;
        }
        let mut style = Style::default().fg(Color::White);
        if control.highlighted {
            style = style
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD);
        }
        if control.disabled {
            style = style.fg(Color::DarkGray);
        }
        spans.push(Span::styled(format!("[ {} ]", control.label), style));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, view: &PageView) {
    let mut spans = Vec::new();
    if let Some(status) = view.status {
        spans.push(Span::styled(format!("{status}   "), Style::default().fg(Color::Magenta)));
    }
    for shortcut in shortcuts_for(view.walkthrough.current_kind()) {
        spans.push(Span::styled(
            format!("[{}]", shortcut.label),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(" {}  ", shortcut.description)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray)),
        area,
    );
}
