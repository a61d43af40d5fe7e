//! Document uploader: one selected file, one upload in flight.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Notice;
use crate::core::api::ApiError;
use crate::core::command::Command;
use crate::core::request::{RequestTracker, Ticket};

const FALLBACK_FILE_NAME: &str = "document.pdf";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please submit your email first.")]
    EmailNotSubmitted,
    #[error("Please select a file first.")]
    NoFileSelected,
    #[error("An upload is already in progress.")]
    InFlight,
}

/// A file chosen for upload. Read lazily when the upload runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name sent as the multipart file name.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
    }

    /// Only a hint for the view; nothing is enforced.
    pub fn looks_like_pdf(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

/// What an upload completion did to the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadApplied {
    /// Not the latest upload; nothing changed.
    Stale,
    Uploaded { document_type: String },
    Failed,
}

impl UploadApplied {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Stale => None,
            Self::Uploaded { .. } => Some(Notice::success("File uploaded successfully!")),
            Self::Failed => Some(Notice::error("Error uploading file.")),
        }
    }
}

#[derive(Debug, Default)]
pub struct DocumentUploader {
    selected_file: Option<SelectedFile>,
    last_classified_type: Option<String>,
    tracker: RequestTracker,
}

impl DocumentUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        log::debug!("Selected file {}", file.path().display());
        self.selected_file = Some(file);
    }

    pub fn clear_selection(&mut self) {
        self.selected_file = None;
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.tracker.is_pending()
    }

    pub fn last_classified_type(&self) -> Option<&str> {
        self.last_classified_type.as_deref()
    }

    /// Start an upload for the confirmed `email`.
    ///
    /// The email is checked before the file, so an ungated upload always
    /// reports the missing email.
    pub fn upload(&mut self, email: Option<&str>) -> Result<Command, UploadError> {
        let email = email.ok_or(UploadError::EmailNotSubmitted)?;
        let file = self
            .selected_file
            .clone()
            .ok_or(UploadError::NoFileSelected)?;
        let ticket = self.tracker.try_begin().ok_or(UploadError::InFlight)?;

        log::info!("Uploading {}", file.file_name());
        Ok(Command::Upload {
            ticket,
            email: email.to_string(),
            file,
        })
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<String, ApiError>) -> UploadApplied {
        if !self.tracker.finish(ticket) {
            log::debug!("Dropping stale upload result (generation {})", ticket.generation());
            return UploadApplied::Stale;
        }

        match result {
            Ok(document_type) => {
                log::info!("Upload classified as {document_type}");
                self.last_classified_type = Some(document_type.clone());
                UploadApplied::Uploaded { document_type }
            }
            Err(e) => {
                log::warn!("Upload failed: {e}");
                UploadApplied::Failed
            }
        }
    }
}
