//! Slate & amber palette for the docdesk TUI.
//!
//! Views take their colors from here rather than inline `Color::*` values.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Steel blue — focused borders, active pane.
pub const PRIMARY: Color = Color::Rgb(0x5C, 0x8D, 0xC9);
/// Pale steel — key names, secondary emphasis.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x9E, 0xC1, 0xE8);
/// Amber — titles, selection.
pub const ACCENT: Color = Color::Rgb(0xF2, 0xB1, 0x34);

pub const BG_BASE: Color = Color::Rgb(0x14, 0x18, 0x20);

pub const TEXT: Color = Color::Rgb(0xE3, 0xE6, 0xEA);
pub const TEXT_MUTED: Color = Color::Rgb(0x8A, 0x91, 0x9C);
pub const TEXT_DIM: Color = Color::Rgb(0x55, 0x5B, 0x66);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xE0, 0x5A, 0x4F);
pub const SUCCESS: Color = Color::Rgb(0x6A, 0xBF, 0x69);
pub const WARNING: Color = Color::Rgb(0xF0, 0x9A, 0x36);
pub const INFO: Color = Color::Rgb(0x4F, 0xA3, 0xE0);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Document links.
pub const LINK: Color = Color::Rgb(0x7F, 0xB2, 0xF0);
/// User turns in the conversation.
pub const USER: Color = Color::Rgb(0xF2, 0xB1, 0x34);
/// Assistant turns in the conversation.
pub const ASSISTANT: Color = Color::Rgb(0x8F, 0xD1, 0xB5);

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn link() -> Style {
    Style::default().fg(LINK).add_modifier(Modifier::UNDERLINED)
}

pub fn error() -> Style {
    Style::default().fg(ERROR)
}

pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Badge shown while a request is in flight.
pub fn busy_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// Bordered pane block, highlighted when `focused`.
pub fn pane(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border)
}
