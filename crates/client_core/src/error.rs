use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(
        "backend rejected request with status {status}: {}",
        .detail.as_deref().unwrap_or("no detail")
    )]
    Rejected { status: u16, detail: Option<String> },
    #[error("malformed backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Server-supplied explanation, present only for rejected requests that carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// User-facing failure of a session action. The display text is what the view shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Local input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Backend refused the request and explained why.
    #[error("{0}")]
    Rejected(String),
    /// Transport or decode failure, or a refusal without detail.
    #[error("{0}")]
    Failed(String),
}

impl SessionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn from_gateway(err: &GatewayError, fallback: &str) -> Self {
        match err.detail() {
            Some(detail) => Self::Rejected(detail.to_string()),
            None => Self::Failed(fallback.to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Rejected(message) | Self::Failed(message) => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid backend url '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("backend url '{url}' must use http or https")]
    UnsupportedScheme { url: String },
}
