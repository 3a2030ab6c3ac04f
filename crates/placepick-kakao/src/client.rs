//! HTTP client for the Kakao Local REST API.
//!
//! Wraps `reqwest` with the `KakaoAK` authorization header, query-string
//! construction, and typed response deserialization. One call per
//! invocation: no retries, no caching.

use std::time::Duration;

use placepick_core::{Coords, SortOrder};
use reqwest::{Client, Url};

use crate::error::KakaoError;
use crate::types::KakaoSearchResponse;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KakaoEndpoint {
    /// `v2/local/search/keyword.json`: free text, optional category filter.
    Keyword,
    /// `v2/local/search/category.json`: category code around a coordinate.
    Category,
}

impl KakaoEndpoint {
    fn path(self) -> &'static str {
        match self {
            KakaoEndpoint::Keyword => "v2/local/search/keyword.json",
            KakaoEndpoint::Category => "v2/local/search/category.json",
        }
    }
}

/// Parameters for a keyword search.
#[derive(Debug, Clone)]
pub struct KeywordSearch<'a> {
    pub query: &'a str,
    pub category_group_code: Option<&'a str>,
    pub coords: Option<Coords>,
    pub radius: Option<u32>,
    pub page: u32,
    pub size: u32,
    pub sort: SortOrder,
}

/// Parameters for a coordinate-only category search.
#[derive(Debug, Clone)]
pub struct CategorySearch<'a> {
    pub category_group_code: &'a str,
    pub coords: Coords,
    pub radius: u32,
    pub page: u32,
    pub size: u32,
    pub sort: SortOrder,
}

impl KeywordSearch<'_> {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.to_string())];
        if let Some(code) = self.category_group_code {
            params.push(("category_group_code", code.to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("size", self.size.to_string()));
        params.push(("sort", self.sort.as_str().to_string()));
        // Radius only means something around a coordinate.
        if let Some(coords) = self.coords {
            params.push(("x", coords.x()));
            params.push(("y", coords.y()));
            if let Some(radius) = self.radius {
                params.push(("radius", radius.to_string()));
            }
        }
        params
    }
}

impl CategorySearch<'_> {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("category_group_code", self.category_group_code.to_string()),
            ("x", self.coords.x()),
            ("y", self.coords.y()),
            ("radius", self.radius.to_string()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ]
    }
}

/// Client for the Kakao Local API.
///
/// Use [`KakaoClient::new`] for production or [`KakaoClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for KakaoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KakaoClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl KakaoClient {
    /// Creates a client pointed at the production Kakao API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, KakaoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`KakaoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends the endpoint path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Keyword search, optionally restricted to a category and a radius.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Status`] on a non-2xx response.
    /// - [`KakaoError::Http`] on network failure.
    /// - [`KakaoError::Deserialize`] if the body does not match the envelope.
    pub async fn search_keyword(
        &self,
        params: &KeywordSearch<'_>,
    ) -> Result<KakaoSearchResponse, KakaoError> {
        self.search(KakaoEndpoint::Keyword, &params.params()).await
    }

    /// Category search around a coordinate, no keyword.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::search_keyword`].
    pub async fn search_category(
        &self,
        params: &CategorySearch<'_>,
    ) -> Result<KakaoSearchResponse, KakaoError> {
        self.search(KakaoEndpoint::Category, &params.params()).await
    }

    /// Raw call against either endpoint with pre-built parameters.
    ///
    /// # Errors
    ///
    /// Same as [`KakaoClient::search_keyword`].
    pub async fn search(
        &self,
        endpoint: KakaoEndpoint,
        params: &[(&str, String)],
    ) -> Result<KakaoSearchResponse, KakaoError> {
        let url = self.build_url(endpoint, params)?;
        tracing::debug!(endpoint = ?endpoint, "kakao search");

        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("KakaoAK {}", self.api_key),
            )
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Kakao API error response");
            return Err(KakaoError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| KakaoError::Deserialize {
            context: endpoint.path().to_string(),
            source: e,
        })
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: KakaoEndpoint, params: &[(&str, String)]) -> Result<Url, KakaoError> {
        let mut url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| KakaoError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}
