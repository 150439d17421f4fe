//! Error types for the exam API client.

use examdesk_core::UploadError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found (404).
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Authentication failed or token invalid (401/403).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Backend refused the request body (400). `message` is the response body.
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Any other non-success status.
    #[error("server error: HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Invalid response from the backend.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// File refused before upload.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl ApiError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller input
            Self::NotFound { .. } => 1,
            Self::Rejected { .. } => 1,
            Self::Upload(_) => 1,

            // Configuration / auth
            Self::Config { .. } => 2,
            Self::Unauthorized { .. } => 2,

            // Network / backend
            Self::Network { .. } => 3,
            Self::Server { .. } => 3,
            Self::InvalidResponse { .. } => 3,
        }
    }

    /// Whether the error came from the transport or the backend rather
    /// than from what the user sent.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Server { .. } | Self::InvalidResponse { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
