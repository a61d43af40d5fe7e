//! Question-answering conversation.

use serde::{Deserialize, Serialize};

use crate::core::api::ApiError;
use crate::core::command::Command;
use crate::core::request::{RequestTracker, Ticket};

const NO_ANSWER: &str = "No answer found.";
const ANSWER_FAILED: &str = "Error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Append-only transcript plus the "typing" indicator.
#[derive(Debug, Default)]
pub struct ConversationPanel {
    transcript: Vec<Turn>,
    tracker: RequestTracker,
}

impl ConversationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_typing(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Ask `query` on behalf of `email`.
    ///
    /// Blank queries and queries made while an answer is pending return
    /// `None` and leave the transcript untouched. Otherwise the user turn is
    /// appended before the request is issued.
    pub fn ask(&mut self, query: &str, email: &str) -> Option<Command> {
        if query.trim().is_empty() {
            return None;
        }
        let ticket = self.tracker.try_begin()?;

        self.transcript.push(Turn::user(query));
        Some(Command::Ask {
            ticket,
            query: query.to_string(),
            email: email.to_string(),
        })
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<String, ApiError>) {
        if !self.tracker.finish(ticket) {
            log::debug!("Dropping stale answer (generation {})", ticket.generation());
            return;
        }

        let text = match result {
            Ok(answer) => answer,
            Err(e) if e.is_status() => NO_ANSWER.to_string(),
            Err(_) => ANSWER_FAILED.to_string(),
        };
        self.transcript.push(Turn::assistant(text));
    }
}
