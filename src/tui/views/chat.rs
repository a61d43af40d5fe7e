//! Conversation pane.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{key_press, ViewResult};
use crate::core::components::{ConversationPanel, Speaker, Turn};
use crate::core::desk::Desk;
use crate::tui::theme;
use crate::tui::widgets::InputBuffer;

#[derive(Debug, Default)]
pub struct ChatView {
    pub input: InputBuffer,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter submits the prompt and clears the input. While an answer is
    /// pending, or before an email is confirmed, the text stays put.
    pub fn handle_input(&mut self, event: &Event, desk: &mut Desk) -> ViewResult {
        let Some((modifiers, code)) = key_press(event) else {
            return ViewResult::Ignored;
        };
        if modifiers.contains(KeyModifiers::CONTROL) {
            return ViewResult::Ignored;
        }

        match code {
            KeyCode::Enter => {
                if desk.conversation.is_typing() {
                    return ViewResult::Consumed;
                }
                if desk.email().is_none() {
                    return ViewResult::Dispatch(desk.ask(self.input.text()));
                }
                let query = self.input.take();
                ViewResult::Dispatch(desk.ask(&query))
            }
            code if self.input.handle_key(code) => ViewResult::Consumed,
            _ => ViewResult::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, panel: &ConversationPanel, focused: bool) {
        let block = theme::pane("Chat", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(inner);

        let lines = transcript_lines(panel.transcript(), panel.is_typing());
        let height = rows[0].height as usize;
        // Keep the newest turns in view; wrapped lines may push a little past.
        let scroll = lines.len().saturating_sub(height);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((scroll as u16, 0)),
            rows[0],
        );

        let prompt = Paragraph::new(self.input.to_line(">", "Ask about your documents", focused))
            .block(Block::default().borders(Borders::TOP).border_style(theme::dim()));
        frame.render_widget(prompt, rows[1]);
    }
}

pub fn transcript_lines(transcript: &[Turn], typing: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(transcript.len() * 2 + 1);
    for turn in transcript {
        let (label, color) = match turn.speaker {
            Speaker::User => ("You", theme::USER),
            Speaker::Assistant => ("Assistant", theme::ASSISTANT),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(turn.text.clone()),
        ]));
    }
    if typing {
        lines.push(Line::from(Span::styled(
            "Typing...",
            theme::muted().add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::Outcome;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn gated_desk() -> Desk {
        let mut desk = Desk::new();
        desk.submit_email("a@b.com");
        desk
    }

    #[test]
    fn test_submit_clears_input_and_appends_user_turn() {
        let mut view = ChatView::new();
        let mut desk = gated_desk();
        view.input = InputBuffer::with_text("total due?");

        let ViewResult::Dispatch(mut commands) = view.handle_input(&key(KeyCode::Enter), &mut desk)
        else {
            panic!("expected dispatch");
        };
        assert!(view.input.text().is_empty());
        assert_eq!(desk.conversation.transcript(), &[Turn::user("total due?")]);

        let command = commands.remove(0);
        desk.apply(Outcome::Answer {
            ticket: command.ticket(),
            result: Ok("$500".to_string()),
        });
        assert_eq!(
            desk.conversation.transcript(),
            &[Turn::user("total due?"), Turn::assistant("$500")]
        );
    }

    #[test]
    fn test_blank_submission_adds_nothing() {
        let mut view = ChatView::new();
        let mut desk = gated_desk();
        view.input = InputBuffer::with_text("   ");
        assert_eq!(
            view.handle_input(&key(KeyCode::Enter), &mut desk),
            ViewResult::Dispatch(Vec::new())
        );
        assert!(desk.conversation.transcript().is_empty());
    }

    #[test]
    fn test_enter_ignored_while_typing() {
        let mut view = ChatView::new();
        let mut desk = gated_desk();
        desk.ask("first");
        view.input = InputBuffer::with_text("second");
        assert_eq!(view.handle_input(&key(KeyCode::Enter), &mut desk), ViewResult::Consumed);
        assert_eq!(view.input.text(), "second");
    }

    #[test]
    fn test_ungated_question_stays_in_input() {
        let mut view = ChatView::new();
        let mut desk = Desk::new();
        view.input = InputBuffer::with_text("total due?");

        assert_eq!(
            view.handle_input(&key(KeyCode::Enter), &mut desk),
            ViewResult::Dispatch(Vec::new())
        );
        assert_eq!(view.input.text(), "total due?");
        assert!(desk.conversation.transcript().is_empty());
        assert_eq!(desk.take_notices()[0].message, "Please submit your email first.");
    }

    #[test]
    fn test_typing_indicator_line() {
        let lines = transcript_lines(&[Turn::user("hi")], true);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].content, "Typing...");
        assert!(transcript_lines(&[], false).is_empty());
    }
}
