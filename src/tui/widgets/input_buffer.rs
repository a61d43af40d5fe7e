//! Single-line text input with cursor management.
//!
//! Backs the email field, the upload path field, the chat prompt and the
//! go-to prompt.

use crossterm::event::KeyCode;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::theme;

#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only counts as empty.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns `false` for keys that do not edit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Render as `label` followed by the text, with a block cursor when
    /// `active`. Shows `placeholder` while empty.
    pub fn to_line(&self, label: &str, placeholder: &str, active: bool) -> Line<'static> {
        let mut spans = vec![Span::styled(format!("{label} "), theme::muted())];
        if self.content.is_empty() && !active {
            spans.push(Span::styled(placeholder.to_string(), theme::dim()));
            return Line::from(spans);
        }

        let (before, after) = self.content.split_at(self.cursor);
        spans.push(Span::raw(before.to_string()));
        if active {
            let mut rest = after.chars();
            let under = rest.next().unwrap_or(' ');
            spans.push(Span::styled(
                under.to_string(),
                Style::default().fg(theme::BG_BASE).bg(theme::TEXT),
            ));
            spans.push(Span::raw(rest.collect::<String>()));
        } else {
            spans.push(Span::raw(after.to_string()));
        }
        Line::from(spans)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}
