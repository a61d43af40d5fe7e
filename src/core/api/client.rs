//! HTTP client for the document service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{ApiError, Result};
use super::models::{
    AnswerResponse, DocumentDetail, DocumentList, DocumentSummary, ExtractedDetails,
    SearchRequest, UploadRequest, UploadResponse,
};

/// MIME type sent with uploaded files.
const PDF_MIME: &str = "application/pdf";

/// Operations the front-end needs from the document service.
///
/// Implemented over HTTP by [`HttpDocumentApi`]; mocked in unit tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// `GET /documents?email=`
    async fn list_documents(&self, email: &str) -> Result<Vec<DocumentSummary>>;

    /// `POST /upload_document/` — returns the classification label.
    async fn upload_document(&self, upload: UploadRequest) -> Result<String>;

    /// `GET /get_key_details?email=`
    async fn key_details(&self, email: &str) -> Result<ExtractedDetails>;

    /// `GET /document_details/{id}?email=`
    async fn document_details(&self, document_id: &str, email: &str) -> Result<DocumentDetail>;

    /// `POST /search_answer/` — returns the answer text.
    async fn search_answer(&self, query: &str, email: &str) -> Result<String>;
}

/// [`DocumentApi`] over reqwest.
pub struct HttpDocumentApi {
    client: Client,
    base_url: String,
}

impl HttpDocumentApi {
    /// Create a client for the service at `base_url`
    /// (e.g. `http://localhost:8000`, trailing slash optional).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `/document_details/{id}` with the id as a single percent-encoded segment.
    fn detail_endpoint(&self, document_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint("document_details")).map_err(|e| {
            ApiError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: e.to_string(),
            }
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .push(document_id);
        Ok(url)
    }
}

/// Turn a response into `T`, mapping non-2xx statuses to [`ApiError::Status`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn list_documents(&self, email: &str) -> Result<Vec<DocumentSummary>> {
        let url = self.endpoint("documents");
        tracing::debug!(url = %url, "listing documents");

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await?;
        let list: DocumentList = decode(response).await?;

        tracing::debug!(count = list.documents.len(), "listed documents");
        Ok(list.documents)
    }

    async fn upload_document(&self, upload: UploadRequest) -> Result<String> {
        let url = self.endpoint("upload_document/");
        tracing::debug!(url = %url, file = %upload.file_name, size = upload.bytes.len(), "uploading document");

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(PDF_MIME)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", upload.email);

        let response = self.client.post(&url).multipart(form).send().await?;
        let body: UploadResponse = decode(response).await?;
        Ok(body.document_type)
    }

    async fn key_details(&self, email: &str) -> Result<ExtractedDetails> {
        let url = self.endpoint("get_key_details");
        tracing::debug!(url = %url, "fetching key details");

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await?;
        decode(response).await
    }

    async fn document_details(&self, document_id: &str, email: &str) -> Result<DocumentDetail> {
        let url = self.detail_endpoint(document_id)?;
        tracing::debug!(url = %url, "fetching document detail");

        let response = self
            .client
            .get(url)
            .query(&[("email", email)])
            .send()
            .await?;
        decode(response).await
    }

    async fn search_answer(&self, query: &str, email: &str) -> Result<String> {
        let url = self.endpoint("search_answer/");
        tracing::debug!(url = %url, "asking question");

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest { query, email })
            .send()
            .await?;
        let body: AnswerResponse = decode(response).await?;
        Ok(body.answer)
    }
}
