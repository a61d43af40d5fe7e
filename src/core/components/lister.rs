use super::Notice;
use crate::core::api::{ApiError, DocumentSummary};
use crate::core::command::Command;
use crate::core::request::{RequestTracker, Ticket};

/// Documents uploaded under one email. Each fetch supersedes the previous.
#[derive(Debug, Default)]
pub struct DocumentLister {
    documents: Vec<DocumentSummary>,
    tracker: RequestTracker,
}

impl DocumentLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    pub fn fetch(&mut self, email: &str) -> Command {
        let ticket = self.tracker.begin();
        log::debug!("Fetching documents (generation {})", ticket.generation());
        Command::ListDocuments {
            ticket,
            email: email.to_string(),
        }
    }

    /// Drop the listed documents and any listing still in flight.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.tracker.cancel();
    }

    /// Apply a listing result. A failure keeps whatever was listed before.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<DocumentSummary>, ApiError>,
    ) -> Option<Notice> {
        if !self.tracker.finish(ticket) {
            log::debug!("Dropping stale document list (generation {})", ticket.generation());
            return None;
        }

        match result {
            Ok(documents) => {
                log::info!("Listed {} document(s)", documents.len());
                self.documents = documents;
                None
            }
            Err(e) if e.is_status() => Some(Notice::warning("No documents found.")),
            Err(_) => Some(Notice::error("Error fetching documents.")),
        }
    }
}
