use thiserror::Error;

/// Errors returned by the Kakao Local client.
#[derive(Debug, Error)]
pub enum KakaoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Kakao answered with a non-2xx status.
    #[error("Kakao API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl KakaoError {
    /// Upstream HTTP status, when the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            KakaoError::Status { status, .. } => Some(*status),
            KakaoError::Http(e) => e.status().map(|s| s.as_u16()),
            KakaoError::Deserialize { .. } | KakaoError::InvalidBaseUrl(_) => None,
        }
    }
}
