//! Opaque backend identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the backend.
///
/// The backend may emit numeric or string ids. The original wire form is
/// kept so that a fetched resource serializes back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(u64),
    Text(String),
}

impl ResourceId {
    /// Parse an id typed by a user or taken from a path segment.
    ///
    /// Returns `None` for values that cannot address a single resource:
    /// empty input, or input containing `/`, `?` or `#`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(['/', '?', '#']) {
            return None;
        }

        Some(match raw.parse::<u64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(raw.to_string()),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(n: u64) -> Self {
        Self::Int(n)
    }
}
