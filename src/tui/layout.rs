//! Root layout: content + status bar, and the home route's pane grid.

use ratatui::layout::{Constraint, Layout, Rect};

/// Below this width the home panes stack in a single column.
pub const STACK_THRESHOLD: u16 = 100;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        AppLayout {
            main: rows[0],
            status: rows[1],
        }
    }
}

/// Pane regions of the home route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeLayout {
    pub email: Rect,
    pub upload: Rect,
    pub documents: Rect,
    pub key_details: Rect,
    pub chat: Rect,
}

impl HomeLayout {
    /// Gate and upload on top; documents, key details and chat share the
    /// rest. Two columns on wide terminals, one column otherwise.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(4), // Email + upload
            Constraint::Min(6),
        ])
        .split(area);

        let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        if area.width < STACK_THRESHOLD {
            let body = Layout::vertical([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(rows[1]);
            return HomeLayout {
                email: top[0],
                upload: top[1],
                documents: body[0],
                key_details: body[1],
                chat: body[2],
            };
        }

        let cols = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);
        let left = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(cols[0]);

        HomeLayout {
            email: top[0],
            upload: top[1],
            documents: left[0],
            key_details: left[1],
            chat: cols[1],
        }
    }
}
