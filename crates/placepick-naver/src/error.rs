use thiserror::Error;

/// Errors returned by the Naver Search client.
#[derive(Debug, Error)]
pub enum NaverError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Naver answered with a non-2xx status.
    #[error("Naver API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl NaverError {
    /// Upstream HTTP status, when the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            NaverError::Status { status, .. } => Some(*status),
            NaverError::Http(e) => e.status().map(|s| s.as_u16()),
            NaverError::Deserialize { .. } | NaverError::InvalidBaseUrl(_) => None,
        }
    }
}
