//! Component state machines.
//!
//! Each component follows `Idle → Pending → Idle`: an operation either
//! refuses (validation, already pending), or returns the [`Command`] to
//! issue; the matching `apply` consumes the [`Outcome`] payload and yields
//! at most one user-facing [`Notice`].
//!
//! [`Command`]: crate::core::command::Command
//! [`Outcome`]: crate::core::command::Outcome

pub mod conversation;
pub mod detail_page;
pub mod email_gate;
pub mod key_details;
pub mod lister;
pub mod uploader;

pub use conversation::{ConversationPanel, Speaker, Turn};
pub use detail_page::DocumentDetailPage;
pub use email_gate::{EmailGate, GateError, UserSession};
pub use key_details::DocumentDetailFetcher;
pub use lister::DocumentLister;
pub use uploader::{DocumentUploader, SelectedFile, UploadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user, shown by the shell as a timed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}
