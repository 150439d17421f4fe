//! Token authentication for the exam backend.

/// Token provider for backend authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProvider {
    /// Static token (from config or env).
    Static(String),

    /// No authentication.
    None,
}

impl TokenProvider {
    /// Create a static token provider.
    pub fn static_token(token: impl Into<String>) -> Self {
        Self::Static(token.into())
    }

    /// Create from the `EXAMDESK_API_TOKEN` environment variable.
    ///
    /// An empty value counts as unset.
    pub fn from_env() -> Self {
        match std::env::var("EXAMDESK_API_TOKEN") {
            Ok(token) if !token.is_empty() => Self::Static(token),
            _ => Self::None,
        }
    }

    /// Value for the `Authorization` header, if any.
    pub fn authorization(&self) -> Option<String> {
        match self {
            Self::Static(token) => Some(format!("Bearer {}", token)),
            Self::None => None,
        }
    }

    /// Check if authentication is configured.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for TokenProvider {
    fn default() -> Self {
        Self::from_env()
    }
}
