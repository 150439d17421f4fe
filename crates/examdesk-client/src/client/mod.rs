//! Stateless exam API client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use examdesk_core::{Exam, ExamPayload, PdfDocument, ResourceId, UploadError, PDF_MIME};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::{ApiError, ApiResult};
use crate::types::{ClientConfig, ExamPage, ListResponse, UploadReceipt};

mod helpers;
mod http;

use helpers::{
    exam_path, normalize_base_url, resolve_next_url, CREATE_EXAM_PATH, EXAMS_PATH, UPLOAD_PATH,
};
use http::HttpBackend;

pub const USER_AGENT_VALUE: &str = concat!("examdesk/", env!("CARGO_PKG_VERSION"));

/// Upper bound on pages followed by [`ExamClient::list_all_exams`].
const MAX_PAGES: usize = 1000;

/// Exam API client.
#[derive(Debug, Clone)]
pub struct ExamClient {
    http: HttpBackend,
}

impl ExamClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let token_provider = config
            .token
            .as_ref()
            .map(TokenProvider::static_token)
            .unwrap_or(TokenProvider::None);

        Self::with_token_provider(config, token_provider)
    }

    pub fn with_token_provider(
        config: ClientConfig,
        token_provider: TokenProvider,
    ) -> ApiResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| ApiError::Network {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                token_provider,
            },
        })
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// POST /core/exams/create/
    pub async fn create_exam(&self, payload: &ExamPayload) -> ApiResult<Exam> {
        let url = self.http.url(CREATE_EXAM_PATH);
        debug!(url = %url, questions = payload.questions.len(), "creating exam");

        let request = self.http.request(Method::POST, &url).json(payload);
        self.http.send_json(request, "exam").await
    }

    /// GET /core/exams/ (optionally one page of a paginated backend).
    pub async fn list_exams(&self, page: Option<u32>) -> ApiResult<ExamPage> {
        let url = self.http.url(EXAMS_PATH);
        debug!(url = %url, page = ?page, "listing exams");

        let mut request = self.http.request(Method::GET, &url);
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        let response: ListResponse = self.http.send_json(request, "exam list").await?;
        Ok(response.into())
    }

    /// Every exam, following `next` links of a paginated backend.
    pub async fn list_all_exams(&self) -> ApiResult<Vec<Exam>> {
        let first = self.list_exams(None).await?;
        let mut items = first.items;
        let mut next = first.next;
        let mut seen = HashSet::new();

        while let Some(link) = next.take() {
            let url = resolve_next_url(&self.http.base_url, &link)?;
            if !seen.insert(url.clone()) || seen.len() > MAX_PAGES {
                return Err(ApiError::InvalidResponse {
                    message: format!("pagination does not terminate at {}", url),
                });
            }
            debug!(url = %url, "following next page");

            let request = self.http.request(Method::GET, &url);
            let response: ListResponse = self.http.send_json(request, "exam list").await?;
            let page = ExamPage::from(response);
            items.extend(page.items);
            next = page.next;
        }

        Ok(items)
    }

    /// GET /core/exams/{id}/
    pub async fn get_exam(&self, id: &ResourceId) -> ApiResult<Exam> {
        let url = self.http.url(&exam_path(id));
        debug!(url = %url, "fetching exam");

        let request = self.http.request(Method::GET, &url);
        self.http.send_json(request, &format!("exam {}", id)).await
    }

    /// PUT /core/exams/{id}/ (full replacement).
    pub async fn update_exam(&self, id: &ResourceId, payload: &ExamPayload) -> ApiResult<Exam> {
        let url = self.http.url(&exam_path(id));
        debug!(url = %url, questions = payload.questions.len(), "updating exam");

        let request = self.http.request(Method::PUT, &url).json(payload);
        self.http.send_json(request, &format!("exam {}", id)).await
    }

    /// DELETE /core/exams/{id}/
    pub async fn delete_exam(&self, id: &ResourceId) -> ApiResult<()> {
        let url = self.http.url(&exam_path(id));
        debug!(url = %url, "deleting exam");

        let request = self.http.request(Method::DELETE, &url);
        self.http.send(request, &format!("exam {}", id)).await?;
        Ok(())
    }

    /// POST /core/upload/ as multipart (`file` field, `application/pdf`).
    pub async fn upload_pdf(&self, document: PdfDocument) -> ApiResult<UploadReceipt> {
        let url = self.http.url(UPLOAD_PATH);
        debug!(url = %url, file = document.file_name(), size = document.len(), "uploading pdf");

        let (file_name, bytes) = document.into_parts();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(PDF_MIME)
            .map_err(ApiError::from)?;
        let form = Form::new().part("file", part);

        let request = self.http.request(Method::POST, &url).multipart(form);
        self.http.send_json(request, "upload").await
    }

    /// Read `path`, check it is a PDF, then upload it.
    ///
    /// Non-PDF files are refused before any request is made.
    pub async fn upload_pdf_file(&self, path: &Path) -> ApiResult<UploadReceipt> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::Io {
            file_name: file_name.clone(),
            message: e.to_string(),
        })?;

        let document = PdfDocument::new(file_name, bytes)?;
        self.upload_pdf(document).await
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.http.token_provider.is_authenticated()
    }
}
