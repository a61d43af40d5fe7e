//! Email gate pane.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::components::EmailGate;
use crate::core::desk::Desk;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

#[derive(Debug, Default)]
pub struct EmailView {
    pub input: InputBuffer,
}

impl EmailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(&mut self, event: &Event, desk: &mut Desk) -> ViewResult {
        let Some((modifiers, code)) = key_press(event) else {
            return ViewResult::Ignored;
        };
        if modifiers.contains(KeyModifiers::CONTROL) {
            return ViewResult::Ignored;
        }

        match code {
            KeyCode::Enter => ViewResult::Dispatch(desk.submit_email(self.input.text())),
            code if self.input.handle_key(code) => ViewResult::Consumed,
            _ => ViewResult::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, gate: &EmailGate, focused: bool) {
        let block = theme::pane("Email", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            self.input.to_line("Email:", "you@example.com", focused),
            status_line(gate),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn status_line(gate: &EmailGate) -> Line<'static> {
    if let Some(error) = gate.error() {
        return Line::from(Span::styled(error.to_string(), theme::error()));
    }
    match gate.email() {
        Some(email) => Line::from(vec![
            Span::styled("✓ ", Style::default().fg(theme::SUCCESS)),
            Span::styled(format!("Signed in as {email}"), theme::muted()),
        ]),
        None => Line::from(Span::styled("Enter to submit", theme::key_hint())),
    }
}
