use crate::core::command::Outcome;
use crate::core::components::{Notice, NoticeLevel};
use crate::core::route::Route;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A request issued by a component finished.
    Outcome(Outcome),
    /// Notification to display to the user.
    Notification(Notice),
}

/// High-level actions resolved from global keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    OpenGoTo,
    CloseGoTo,
    Navigate(Route),
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Which pane of the home route has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Email,
    Upload,
    Documents,
    KeyDetails,
    Chat,
}

impl Focus {
    pub const ALL: [Focus; 5] = [
        Focus::Email,
        Focus::Upload,
        Focus::Documents,
        Focus::KeyDetails,
        Focus::Chat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Email => "Email",
            Focus::Upload => "Upload",
            Focus::Documents => "Documents",
            Focus::KeyDetails => "Key Details",
            Focus::Chat => "Chat",
        }
    }

    /// Panes that take free text swallow printable keys.
    pub fn takes_text(self) -> bool {
        matches!(self, Focus::Email | Focus::Upload | Focus::Chat)
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NoticeLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
