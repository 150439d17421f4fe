//! REST client for the exam backend.
//!
//! This crate provides:
//!
//! - [`ExamClient`]: stateless wrappers for the `/core/` endpoints
//! - [`ExamApi`]: the same operations behind a tagged query cache, and the
//!   [`examdesk_core::ExamBackend`] implementation used by the wizard
//! - Normalization of plain-array and paginated list responses into
//!   [`ExamPage`]
//!
//! # Quick Start
//!
//! ```no_run
//! use examdesk_client::{ClientConfig, ExamApi};
//!
//! # async fn example() -> Result<(), examdesk_client::ApiError> {
//! let api = ExamApi::new(ClientConfig::from_env())?;
//! let page = api.list(None).await?;
//! for exam in &page.items {
//!     println!("{} {}", exam.id, exam.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `EXAMDESK_API_URL` | Backend base URL (default: `http://localhost:8000`) |
//! | `EXAMDESK_API_TOKEN` | Bearer token |
//! | `EXAMDESK_TIMEOUT` | Request timeout in seconds (default: client default) |
//! | `EXAMDESK_CACHE_TTL` | Query cache TTL in seconds (default: 300) |

pub mod api;
pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use api::ExamApi;
pub use auth::TokenProvider;
pub use cache::{CacheTag, Mutation, QueryCache, QueryKey};
pub use client::{ExamClient, USER_AGENT_VALUE as CLIENT_USER_AGENT};
pub use error::{ApiError, ApiResult};
pub use types::{ClientConfig, ExamPage, UploadReceipt};
