//! Views of the two routes.
//!
//! Views own only presentation state (input buffers, selection, scroll).
//! Domain state lives in the components they render; a view turns key
//! presses into component operations and reports what the shell must do
//! next through [`ViewResult`].

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::command::Command;
use crate::core::route::Route;

pub mod chat;
pub mod detail;
pub mod documents;
pub mod email;
pub mod key_details;
pub mod upload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResult {
    /// Not handled; fall through to global keybindings.
    Ignored,
    Consumed,
    /// Issue these requests.
    Dispatch(Vec<Command>),
    Navigate(Route),
    OpenLink(String),
}

impl ViewResult {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, ViewResult::Ignored)
    }
}

/// The modifiers and code of a key press, or `None` for anything else.
pub(crate) fn key_press(event: &Event) -> Option<(KeyModifiers, KeyCode)> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };
    Some((*modifiers, *code))
}
