//! Client configuration and response types.

use examdesk_core::Exam;
use serde::{Deserialize, Serialize};

/// One page of exams, normalized from either list response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamPage {
    /// Exams on this page.
    pub items: Vec<Exam>,

    /// Total number of exams (equals `items.len()` for unpaginated lists).
    pub count: usize,

    /// URL of the next page, if any.
    pub next: Option<String>,

    /// URL of the previous page, if any.
    pub previous: Option<String>,
}

/// Raw list response: a plain array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse {
    Paginated {
        count: usize,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<Exam>,
    },
    Plain(Vec<Exam>),
}

impl From<ListResponse> for ExamPage {
    fn from(response: ListResponse) -> Self {
        match response {
            ListResponse::Paginated {
                count,
                next,
                previous,
                results,
            } => Self {
                items: results,
                count,
                next,
                previous,
            },
            ListResponse::Plain(items) => Self {
                count: items.len(),
                items,
                next: None,
                previous: None,
            },
        }
    }
}

/// Response from POST /core/upload/.
///
/// The backend's fields are kept as-is; `id`, `file` and `text` are
/// surfaced when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub id: Option<examdesk_core::ResourceId>,

    /// Stored file location.
    #[serde(default)]
    pub file: Option<String>,

    /// Extracted text (OCR).
    #[serde(default)]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL (scheme and host, optionally a path prefix).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authentication token.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds; `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// How long list/detail results stay cached.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `EXAMDESK_API_URL` | Backend base URL |
    /// | `EXAMDESK_API_TOKEN` | Authentication token |
    /// | `EXAMDESK_TIMEOUT` | Request timeout in seconds |
    /// | `EXAMDESK_CACHE_TTL` | Cache TTL in seconds |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("EXAMDESK_API_URL").unwrap_or_else(|_| default_base_url()),
            token: std::env::var("EXAMDESK_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("EXAMDESK_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok()),
            cache_ttl_secs: std::env::var("EXAMDESK_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_cache_ttl),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the cache TTL.
    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }
}
