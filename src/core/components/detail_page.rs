//! Single-document detail view reached through `/document_details/:id`.

use crate::core::api::{ApiError, DocumentDetail};
use crate::core::command::Command;
use crate::core::request::{RequestTracker, Ticket};

#[derive(Debug)]
pub struct DocumentDetailPage {
    email: String,
    document_id: Option<String>,
    detail: Option<DocumentDetail>,
    error: Option<String>,
    tracker: RequestTracker,
}

impl DocumentDetailPage {
    /// `email` is sent with every request instead of the session email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            document_id: None,
            detail: None,
            error: None,
            tracker: RequestTracker::new(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn detail(&self) -> Option<&DocumentDetail> {
        self.detail.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Mount (or re-mount) the page for `document_id`.
    ///
    /// Always issues a fresh request that supersedes any in flight. The
    /// previous detail is dropped only when the identifier changed.
    pub fn mount(&mut self, document_id: &str) -> Command {
        if self.document_id.as_deref() != Some(document_id) {
            self.detail = None;
            self.document_id = Some(document_id.to_string());
        }
        self.error = None;

        log::warn!(
            "Document detail for {document_id} requested with configured email {}",
            self.email
        );
        Command::FetchDocumentDetail {
            ticket: self.tracker.begin(),
            document_id: document_id.to_string(),
            email: self.email.clone(),
        }
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<DocumentDetail, ApiError>) {
        if !self.tracker.finish(ticket) {
            log::debug!("Dropping stale document detail (generation {})", ticket.generation());
            return;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.error = None;
            }
            Err(e) if e.is_status() => self.error = Some("No document found.".to_string()),
            Err(_) => self.error = Some("Error fetching document details.".to_string()),
        }
    }
}
