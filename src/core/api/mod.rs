//! Document service API: wire models, error type, and the HTTP client.

pub mod client;
pub mod error;
pub mod models;

pub use client::{DocumentApi, HttpDocumentApi};
#[cfg(test)]
pub use client::MockDocumentApi;
pub use error::{ApiError, Result};
pub use models::{
    DocumentDetail, DocumentKind, DocumentSummary, ExtractedDetails, InvoiceRecord,
    PurchaseOrderRecord, UploadRequest,
};
