//! Requests issued by components and their completions.
//!
//! Components never talk to the network. An operation that needs the
//! service returns a [`Command`]; the shell runs it (usually on a spawned
//! task) and hands the resulting [`Outcome`] back to the component that
//! issued it. Both carry the issuing [`Ticket`].

use crate::core::api::{
    ApiError, DocumentApi, DocumentDetail, DocumentSummary, ExtractedDetails, UploadRequest,
};
use crate::core::components::uploader::SelectedFile;
use crate::core::request::Ticket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListDocuments {
        ticket: Ticket,
        email: String,
    },
    Upload {
        ticket: Ticket,
        email: String,
        file: SelectedFile,
    },
    FetchKeyDetails {
        ticket: Ticket,
        email: String,
    },
    FetchDocumentDetail {
        ticket: Ticket,
        document_id: String,
        email: String,
    },
    Ask {
        ticket: Ticket,
        query: String,
        email: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Documents {
        ticket: Ticket,
        result: Result<Vec<DocumentSummary>, ApiError>,
    },
    Uploaded {
        ticket: Ticket,
        result: Result<String, ApiError>,
    },
    KeyDetails {
        ticket: Ticket,
        result: Result<ExtractedDetails, ApiError>,
    },
    DocumentDetail {
        ticket: Ticket,
        result: Result<DocumentDetail, ApiError>,
    },
    Answer {
        ticket: Ticket,
        result: Result<String, ApiError>,
    },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListDocuments { .. } => "list_documents",
            Self::Upload { .. } => "upload_document",
            Self::FetchKeyDetails { .. } => "key_details",
            Self::FetchDocumentDetail { .. } => "document_details",
            Self::Ask { .. } => "search_answer",
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            Self::ListDocuments { ticket, .. }
            | Self::Upload { ticket, .. }
            | Self::FetchKeyDetails { ticket, .. }
            | Self::FetchDocumentDetail { ticket, .. }
            | Self::Ask { ticket, .. } => *ticket,
        }
    }

    /// Execute against the service. Never fails: errors end up in the outcome.
    pub async fn run(self, api: &dyn DocumentApi) -> Outcome {
        log::debug!("Running {} (generation {})", self.name(), self.ticket().generation());

        let outcome = match self {
            Self::ListDocuments { ticket, email } => Outcome::Documents {
                ticket,
                result: api.list_documents(&email).await,
            },
            Self::Upload {
                ticket,
                email,
                file,
            } => {
                let result = match read_upload(&file, email).await {
                    Ok(request) => api.upload_document(request).await,
                    Err(e) => Err(e),
                };
                Outcome::Uploaded { ticket, result }
            }
            Self::FetchKeyDetails { ticket, email } => Outcome::KeyDetails {
                ticket,
                result: api.key_details(&email).await,
            },
            Self::FetchDocumentDetail {
                ticket,
                document_id,
                email,
            } => Outcome::DocumentDetail {
                ticket,
                result: api.document_details(&document_id, &email).await,
            },
            Self::Ask {
                ticket,
                query,
                email,
            } => Outcome::Answer {
                ticket,
                result: api.search_answer(&query, &email).await,
            },
        };

        if let Some(err) = outcome.error() {
            log::warn!("Request failed: {err}");
        }
        outcome
    }
}

impl Outcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Documents { result, .. } => result.as_ref().err(),
            Self::Uploaded { result, .. } => result.as_ref().err(),
            Self::KeyDetails { result, .. } => result.as_ref().err(),
            Self::DocumentDetail { result, .. } => result.as_ref().err(),
            Self::Answer { result, .. } => result.as_ref().err(),
        }
    }
}

async fn read_upload(file: &SelectedFile, email: String) -> Result<UploadRequest, ApiError> {
    let bytes = tokio::fs::read(file.path())
        .await
        .map_err(|e| ApiError::File {
            path: file.path().display().to_string(),
            message: e.to_string(),
        })?;
    Ok(UploadRequest {
        file_name: file.file_name(),
        bytes,
        email,
    })
}
