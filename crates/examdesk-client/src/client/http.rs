//! HTTP layer: auth header, status mapping, JSON decoding.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::{ApiError, ApiResult};

use super::helpers::truncate_body;

/// HTTP backend for making requests (holds reqwest client, base URL, auth).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token_provider: TokenProvider,
}

impl HttpBackend {
    /// Absolute URL for an API path (`/core/...`).
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the auth header applied.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(value) = self.token_provider.authorization() {
            request = request.header(AUTHORIZATION, value);
        }
        request
    }

    /// Send a request; non-2xx statuses become errors.
    ///
    /// `resource` names what was addressed, for 404 messages.
    pub(crate) async fn send(&self, request: RequestBuilder, resource: &str) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), resource = resource, "response received");

        match status.as_u16() {
            200..=299 => Ok(response),

            400 => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Rejected {
                    message: if body.is_empty() {
                        "bad request".to_string()
                    } else {
                        truncate_body(&body)
                    },
                })
            }

            401 => Err(ApiError::Unauthorized {
                message: "invalid or expired token".to_string(),
            }),

            403 => Err(ApiError::Unauthorized {
                message: "permission denied".to_string(),
            }),

            404 => Err(ApiError::NotFound {
                resource: resource.to_string(),
            }),

            _ => {
                let message = response
                    .text()
                    .await
                    .ok()
                    .filter(|b| !b.is_empty())
                    .map(|b| truncate_body(&b))
                    .unwrap_or_else(|| status.to_string());
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, resource).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                message: format!("failed to parse {} response: {}", resource, e),
            })
    }
}
