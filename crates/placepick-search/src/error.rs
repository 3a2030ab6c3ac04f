use std::fmt;

use placepick_kakao::KakaoError;
use placepick_naver::NaverError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Kakao,
    Naver,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Kakao => f.write_str("Kakao"),
            Provider::Naver => f.write_str("Naver"),
        }
    }
}

/// Errors surfaced by the search pipeline.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Credentials for the provider were absent at start-up.
    #[error("{0} API credentials not configured")]
    Configuration(Provider),

    #[error("Kakao request failed: {0}")]
    Kakao(#[from] KakaoError),

    #[error("Naver request failed: {0}")]
    Naver(#[from] NaverError),

    /// Caller input the pipeline cannot act on.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
}

impl SearchError {
    /// True for upstream failures (non-2xx, transport, malformed body).
    #[must_use]
    pub fn is_provider(&self) -> bool {
        matches!(self, SearchError::Kakao(_) | SearchError::Naver(_))
    }
}
