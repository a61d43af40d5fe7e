//! The email-gated home route.
//!
//! `Desk` wires the components together: the gate confirms the session,
//! the uploader, lister, key-detail fetcher and conversation read the
//! confirmed email, and a successful upload or gate submission triggers a
//! fresh listing. User intents and request outcomes both return the
//! commands to issue next; user-facing messages are queued as notices.

use crate::core::api::DocumentApi;
use crate::core::command::{Command, Outcome};
use crate::core::components::uploader::UploadApplied;
use crate::core::components::{
    ConversationPanel, DocumentDetailFetcher, DocumentLister, DocumentUploader, EmailGate, Notice,
    SelectedFile, UploadError,
};

const EMAIL_REQUIRED: &str = "Please submit your email first.";

#[derive(Debug, Default)]
pub struct Desk {
    pub gate: EmailGate,
    pub uploader: DocumentUploader,
    pub lister: DocumentLister,
    pub key_details: DocumentDetailFetcher,
    pub conversation: ConversationPanel,
    notices: Vec<Notice>,
}

impl Desk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> Option<&str> {
        self.gate.email()
    }

    /// Validate and confirm the email; on success the first listing is issued.
    ///
    /// Switching to a different email drops everything fetched for the
    /// previous one, including requests still in flight.
    pub fn submit_email(&mut self, raw_input: &str) -> Vec<Command> {
        let previous = self.gate.email().map(str::to_string);
        let email = match self.gate.submit(raw_input) {
            Ok(email) => email.to_string(),
            Err(_) => return Vec::new(),
        };

        if previous.as_deref().is_some_and(|p| p != email) {
            log::info!("Session email changed, clearing fetched data");
            self.lister.reset();
            self.key_details.reset();
        }
        vec![self.lister.fetch(&email)]
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.uploader.select_file(file);
    }

    pub fn upload(&mut self) -> Vec<Command> {
        let email = self.gate.email().map(str::to_string);
        match self.uploader.upload(email.as_deref()) {
            Ok(command) => vec![command],
            Err(UploadError::InFlight) => {
                log::debug!("Upload already in flight");
                Vec::new()
            }
            Err(e) => {
                self.notices.push(Notice::warning(e.to_string()));
                Vec::new()
            }
        }
    }

    pub fn refresh_documents(&mut self) -> Vec<Command> {
        match self.gate.email().map(str::to_string) {
            Some(email) => vec![self.lister.fetch(&email)],
            None => self.require_email(),
        }
    }

    pub fn fetch_key_details(&mut self) -> Vec<Command> {
        match self.gate.email().map(str::to_string) {
            Some(email) => self.key_details.fetch_key_details(&email).into_iter().collect(),
            None => self.require_email(),
        }
    }

    pub fn ask(&mut self, query: &str) -> Vec<Command> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.gate.email().map(str::to_string) {
            Some(email) => self.conversation.ask(query, &email).into_iter().collect(),
            None => self.require_email(),
        }
    }

    /// Route a completed request to the component that issued it.
    ///
    /// Document detail outcomes belong to the detail route and are ignored.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Documents { ticket, result } => {
                let notice = self.lister.apply(ticket, result);
                self.push_notice(notice);
                Vec::new()
            }
            Outcome::Uploaded { ticket, result } => {
                let applied = self.uploader.apply(ticket, result);
                self.push_notice(applied.notice());
                match (applied, self.gate.email().map(str::to_string)) {
                    (UploadApplied::Uploaded { .. }, Some(email)) => {
                        vec![self.lister.fetch(&email)]
                    }
                    _ => Vec::new(),
                }
            }
            Outcome::KeyDetails { ticket, result } => {
                let notice = self.key_details.apply(ticket, result);
                self.push_notice(notice);
                Vec::new()
            }
            Outcome::Answer { ticket, result } => {
                self.conversation.apply(ticket, result);
                Vec::new()
            }
            Outcome::DocumentDetail { .. } => Vec::new(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Run `commands` one at a time against `api`, applying each outcome and
    /// following up on the commands it produces, until nothing is left.
    pub async fn settle(&mut self, api: &dyn DocumentApi, commands: Vec<Command>) {
        let mut queue = commands;
        while !queue.is_empty() {
            let command = queue.remove(0);
            let outcome = command.run(api).await;
            queue.extend(self.apply(outcome));
        }
    }

    fn require_email(&mut self) -> Vec<Command> {
        self.notices.push(Notice::warning(EMAIL_REQUIRED));
        Vec::new()
    }

    fn push_notice(&mut self, notice: Option<Notice>) {
        self.notices.extend(notice);
    }
}
