//! Wire models for the document service.
//!
//! Field names follow the service's JSON. Extracted records are lenient:
//! identifiers accept both the `*_number` and `*_name` spellings the
//! service has used, scalar values of any JSON type are kept as display
//! strings, and missing fields become empty strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Listing
// ============================================================================

/// One stored document belonging to a session email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(rename = "document_name")]
    pub name: String,
    #[serde(rename = "document_url")]
    pub url: String,
}

/// `GET /documents` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<DocumentSummary>,
}

// ============================================================================
// Upload / question answering
// ============================================================================

/// `POST /upload_document/` response body. Other fields the service
/// returns (storage keys, raw extraction) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub document_type: String,
}

/// A file ready to be submitted as multipart content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub email: String,
}

/// `POST /search_answer/` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub email: &'a str,
}

/// `POST /search_answer/` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

// ============================================================================
// Extracted fields
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    #[serde(
        rename = "invoice_number",
        alias = "invoice_name",
        deserialize_with = "display_string"
    )]
    pub number: String,
    #[serde(rename = "invoice_date", deserialize_with = "display_string")]
    pub date: String,
    #[serde(deserialize_with = "display_string")]
    pub total_amount: String,
    #[serde(deserialize_with = "display_string")]
    pub vendor_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseOrderRecord {
    #[serde(
        rename = "purchase_order_number",
        alias = "purchase_order_name",
        deserialize_with = "display_string"
    )]
    pub number: String,
    #[serde(rename = "order_date", deserialize_with = "display_string")]
    pub date: String,
    #[serde(deserialize_with = "display_string")]
    pub total_amount: String,
    #[serde(deserialize_with = "display_string")]
    pub supplier_name: String,
}

/// `GET /get_key_details` response body.
///
/// A table is shown for each key that is present, even when its list is
/// empty; `None` means the key was absent (or `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDetails {
    #[serde(default)]
    pub invoices: Option<Vec<InvoiceRecord>>,
    #[serde(default)]
    pub purchase_orders: Option<Vec<PurchaseOrderRecord>>,
}

/// `GET /document_details/{id}` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetail {
    #[serde(default)]
    pub invoice: Option<InvoiceRecord>,
    #[serde(default)]
    pub purchase_order: Option<PurchaseOrderRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    PurchaseOrder,
}

impl DocumentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::PurchaseOrder => "Purchase Order",
        }
    }
}

impl DocumentDetail {
    /// `invoice` wins whenever it is present, even alongside a purchase order.
    pub fn kind(&self) -> DocumentKind {
        if self.invoice.is_some() {
            DocumentKind::Invoice
        } else {
            DocumentKind::PurchaseOrder
        }
    }
}

fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
