//! Extracted key details (invoices, purchase orders) for one email.

use super::Notice;
use crate::core::api::{ApiError, ExtractedDetails};
use crate::core::command::Command;
use crate::core::request::{RequestTracker, Ticket};

#[derive(Debug, Default)]
pub struct DocumentDetailFetcher {
    details: Option<ExtractedDetails>,
    tracker: RequestTracker,
}

impl DocumentDetailFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn details(&self) -> Option<&ExtractedDetails> {
        self.details.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending()
    }

    /// Returns `None` while a fetch is already loading.
    pub fn fetch_key_details(&mut self, email: &str) -> Option<Command> {
        let ticket = self.tracker.try_begin()?;
        log::debug!("Fetching key details (generation {})", ticket.generation());
        Some(Command::FetchKeyDetails {
            ticket,
            email: email.to_string(),
        })
    }

    /// Drop the extracted details and any fetch still in flight.
    pub fn reset(&mut self) {
        self.details = None;
        self.tracker.cancel();
    }

    /// Apply a fetch result. Any failure clears the previous details.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<ExtractedDetails, ApiError>,
    ) -> Option<Notice> {
        if !self.tracker.finish(ticket) {
            log::debug!("Dropping stale key details (generation {})", ticket.generation());
            return None;
        }

        match result {
            Ok(details) => {
                self.details = Some(details);
                None
            }
            Err(e) => {
                self.details = None;
                if e.is_status() {
                    Some(Notice::warning("No document details found."))
                } else {
                    Some(Notice::error("Error fetching document details."))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::InvoiceRecord;

    fn invoices() -> ExtractedDetails {
        ExtractedDetails {
            invoices: Some(vec![InvoiceRecord {
                number: "INV-1".into(),
                date: "2024-01-01".into(),
                total_amount: "500".into(),
                vendor_name: "Acme".into(),
            }]),
            purchase_orders: None,
        }
    }

    #[test]
    fn test_loading_cleared_on_success() {
        let mut fetcher = DocumentDetailFetcher::new();
        let command = fetcher.fetch_key_details("a@b.com").unwrap();
        assert!(fetcher.is_loading());

        assert_eq!(fetcher.apply(command.ticket(), Ok(invoices())), None);
        assert!(!fetcher.is_loading());
        assert_eq!(fetcher.details(), Some(&invoices()));
    }

    #[test]
    fn test_loading_cleared_and_details_nulled_on_failure() {
        let mut fetcher = DocumentDetailFetcher::new();
        let first = fetcher.fetch_key_details("a@b.com").unwrap();
        fetcher.apply(first.ticket(), Ok(invoices()));

        let second = fetcher.fetch_key_details("a@b.com").unwrap();
        let notice = fetcher
            .apply(second.ticket(), Err(ApiError::Transport("reset".into())))
            .unwrap();
        assert_eq!(notice.message, "Error fetching document details.");
        assert!(!fetcher.is_loading());
        assert!(fetcher.details().is_none());
    }

    #[test]
    fn test_status_failure_message() {
        let mut fetcher = DocumentDetailFetcher::new();
        let command = fetcher.fetch_key_details("a@b.com").unwrap();
        let notice = fetcher
            .apply(
                command.ticket(),
                Err(ApiError::Status {
                    status: 404,
                    body: "{}".into(),
                }),
            )
            .unwrap();
        assert_eq!(notice.message, "No document details found.");
    }

    #[test]
    fn test_refuses_while_loading() {
        let mut fetcher = DocumentDetailFetcher::new();
        assert!(fetcher.fetch_key_details("a@b.com").is_some());
        assert!(fetcher.fetch_key_details("a@b.com").is_none());
    }
}
