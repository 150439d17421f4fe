//! Cached API facade used by views and the wizard.
//!
//! Reads go through the [`QueryCache`]; writes go straight to the backend
//! and, on success, invalidate the tags their [`Mutation`] declares.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use examdesk_core::{Exam, ExamBackend, ExamPayload, PdfDocument, ResourceId};
use tracing::debug;

use crate::cache::{Mutation, QueryCache};
use crate::client::ExamClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{ClientConfig, ExamPage, UploadReceipt};

#[derive(Debug, Clone)]
pub struct ExamApi {
    client: ExamClient,
    cache: QueryCache,
}

impl ExamApi {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let ttl = Duration::from_secs(config.cache_ttl_secs);
        Ok(Self::with_client(ExamClient::new(config)?, QueryCache::new(ttl)))
    }

    pub fn with_client(client: ExamClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn client(&self) -> &ExamClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// One page of exams (cached).
    pub async fn list(&self, page: Option<u32>) -> ApiResult<ExamPage> {
        if let Some(cached) = self.cache.page(page) {
            debug!(page = ?page, "exam list served from cache");
            return Ok((*cached).clone());
        }
        let fetched = self.client.list_exams(page).await?;
        Ok((*self.cache.put_page(page, fetched)).clone())
    }

    /// Every exam across pages (cached).
    pub async fn list_all(&self) -> ApiResult<Vec<Exam>> {
        if let Some(cached) = self.cache.all() {
            debug!("full exam list served from cache");
            return Ok((*cached).clone());
        }
        let fetched = self.client.list_all_exams().await?;
        Ok((*self.cache.put_all(fetched)).clone())
    }

    /// Fetch one exam (cached). No request is made when `id` is `None`.
    pub async fn retrieve(&self, id: Option<&ResourceId>) -> ApiResult<Option<Exam>> {
        let Some(id) = id else {
            debug!("retrieve skipped: no exam id");
            return Ok(None);
        };
        if let Some(cached) = self.cache.exam(id) {
            debug!(id = %id, "exam served from cache");
            return Ok(Some((*cached).clone()));
        }
        let fetched = self.client.get_exam(id).await?;
        Ok(Some((*self.cache.put_exam(fetched)).clone()))
    }

    pub async fn create(&self, payload: &ExamPayload) -> ApiResult<Exam> {
        let exam = self.client.create_exam(payload).await?;
        self.cache.apply(&Mutation::Create);
        Ok(exam)
    }

    pub async fn update(&self, id: &ResourceId, payload: &ExamPayload) -> ApiResult<Exam> {
        let exam = self.client.update_exam(id, payload).await?;
        self.cache.apply(&Mutation::Update(id.clone()));
        Ok(exam)
    }

    pub async fn delete(&self, id: &ResourceId) -> ApiResult<()> {
        self.client.delete_exam(id).await?;
        self.cache.apply(&Mutation::Delete(id.clone()));
        Ok(())
    }

    pub async fn upload(&self, document: PdfDocument) -> ApiResult<UploadReceipt> {
        self.client.upload_pdf(document).await
    }

    pub async fn upload_file(&self, path: &Path) -> ApiResult<UploadReceipt> {
        self.client.upload_pdf_file(path).await
    }
}

#[async_trait]
impl ExamBackend for ExamApi {
    type Error = ApiError;

    async fn create_exam(&self, payload: &ExamPayload) -> Result<Exam, ApiError> {
        self.create(payload).await
    }

    async fn update_exam(&self, id: &ResourceId, payload: &ExamPayload) -> Result<Exam, ApiError> {
        self.update(id, payload).await
    }
}
