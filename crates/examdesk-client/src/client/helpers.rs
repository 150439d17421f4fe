//! Pure helpers: endpoint paths, base URL checks, body truncation (no HTTP).

use examdesk_core::ResourceId;
use url::Url;

use crate::error::{ApiError, ApiResult};

pub(crate) const EXAMS_PATH: &str = "/core/exams/";
pub(crate) const CREATE_EXAM_PATH: &str = "/core/exams/create/";
pub(crate) const UPLOAD_PATH: &str = "/core/upload/";

const MAX_BODY_CHARS: usize = 200;

/// Path of a single exam: `/core/exams/{id}/`.
pub(crate) fn exam_path(id: &ResourceId) -> String {
    format!("{}{}/", EXAMS_PATH, id)
}

/// Check a configured base URL and return it without a trailing slash.
pub(crate) fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let parsed = Url::parse(raw).map_err(|e| ApiError::Config {
        message: format!("invalid base URL {:?}: {}", raw, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Config {
            message: format!("base URL must use http or https: {}", raw),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ApiError::Config {
            message: format!("base URL must not carry a query or fragment: {}", raw),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Resolve a `next` page link against the base URL.
///
/// The link must stay on the base URL's origin (scheme, host and port);
/// requests carry the bearer token.
pub(crate) fn resolve_next_url(base: &str, next: &str) -> ApiResult<String> {
    let base = Url::parse(base).map_err(|e| ApiError::Config {
        message: format!("invalid base URL {:?}: {}", base, e),
    })?;
    let resolved = base.join(next).map_err(|e| ApiError::InvalidResponse {
        message: format!("invalid next page URL {:?}: {}", next, e),
    })?;
    if resolved.origin() != base.origin() {
        return Err(ApiError::InvalidResponse {
            message: format!(
                "next page URL {} leaves {}",
                resolved,
                base.origin().ascii_serialization()
            ),
        });
    }
    Ok(resolved.into())
}

/// Shorten an error body for display.
pub(crate) fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_BODY_CHARS {
        body.to_string()
    } else {
        let mut short: String = body.chars().take(MAX_BODY_CHARS).collect();
        short.push('…');
        short
    }
}
