//! HTTP client for the Naver Search API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::NaverError;
use crate::types::{NaverBlogItem, NaverImageItem, NaverLocalItem, NaverResponse};

const DEFAULT_BASE_URL: &str = "https://openapi.naver.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaverEndpoint {
    Local,
    Image,
    Blog,
}

impl NaverEndpoint {
    fn path(self) -> &'static str {
        match self {
            NaverEndpoint::Local => "v1/search/local.json",
            NaverEndpoint::Image => "v1/search/image",
            NaverEndpoint::Blog => "v1/search/blog.json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalSort {
    #[default]
    Random,
    Comment,
}

impl LocalSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LocalSort::Random => "random",
            LocalSort::Comment => "comment",
        }
    }

    /// Unknown values fall back to `random`.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("comment") => LocalSort::Comment,
            _ => LocalSort::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogSort {
    /// Relevance.
    #[default]
    Sim,
    Date,
}

impl BlogSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlogSort::Sim => "sim",
            BlogSort::Date => "date",
        }
    }

    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("date") => BlogSort::Date,
            _ => BlogSort::Sim,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    pub query: &'a str,
    pub display: u32,
    pub start: u32,
    pub sort: LocalSort,
}

#[derive(Debug, Clone)]
pub struct ImageSearch<'a> {
    pub query: &'a str,
    pub display: u32,
}

#[derive(Debug, Clone)]
pub struct BlogSearch<'a> {
    pub query: &'a str,
    pub display: u32,
    pub start: u32,
    pub sort: BlogSort,
}

/// Client for the Naver Search API.
///
/// Every request carries the `X-Naver-Client-Id` / `X-Naver-Client-Secret`
/// header pair. One call per invocation, no retries.
#[derive(Clone)]
pub struct NaverClient {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: Url,
}

impl std::fmt::Debug for NaverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaverClient")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl NaverClient {
    /// Creates a client pointed at the production Naver API.
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NaverError> {
        Self::with_base_url(
            client_id,
            client_secret,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NaverError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`NaverError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NaverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| NaverError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            base_url,
        })
    }

    /// Local business search.
    ///
    /// # Errors
    ///
    /// - [`NaverError::Status`] on a non-2xx response.
    /// - [`NaverError::Http`] on network failure.
    /// - [`NaverError::Deserialize`] if the body does not match the envelope.
    pub async fn search_local(
        &self,
        params: &LocalSearch<'_>,
    ) -> Result<NaverResponse<NaverLocalItem>, NaverError> {
        let query = [
            ("query", params.query.to_string()),
            ("display", params.display.to_string()),
            ("start", params.start.to_string()),
            ("sort", params.sort.as_str().to_string()),
        ];
        self.search(NaverEndpoint::Local, &query).await
    }

    /// Image search, relevance order.
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::search_local`].
    pub async fn search_image(
        &self,
        params: &ImageSearch<'_>,
    ) -> Result<NaverResponse<NaverImageItem>, NaverError> {
        let query = [
            ("query", params.query.to_string()),
            ("display", params.display.to_string()),
            ("sort", "sim".to_string()),
        ];
        self.search(NaverEndpoint::Image, &query).await
    }

    /// Blog post search.
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::search_local`].
    pub async fn search_blog(
        &self,
        params: &BlogSearch<'_>,
    ) -> Result<NaverResponse<NaverBlogItem>, NaverError> {
        let query = [
            ("query", params.query.to_string()),
            ("display", params.display.to_string()),
            ("start", params.start.to_string()),
            ("sort", params.sort.as_str().to_string()),
        ];
        self.search(NaverEndpoint::Blog, &query).await
    }

    /// First image link for `query`, if any.
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::search_local`].
    pub async fn first_image(&self, query: &str) -> Result<Option<String>, NaverError> {
        let response = self.search_image(&ImageSearch { query, display: 1 }).await?;
        Ok(response
            .items
            .into_iter()
            .map(|item| item.link)
            .find(|link| !link.is_empty()))
    }

    /// Raw call against any endpoint with pre-built parameters.
    ///
    /// # Errors
    ///
    /// Same as [`NaverClient::search_local`].
    pub async fn search<T: DeserializeOwned>(
        &self,
        endpoint: NaverEndpoint,
        params: &[(&str, String)],
    ) -> Result<NaverResponse<T>, NaverError> {
        let url = self.build_url(endpoint, params)?;
        tracing::debug!(endpoint = ?endpoint, "naver search");

        let response = self
            .client
            .get(url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Naver API error response");
            return Err(NaverError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| NaverError::Deserialize {
            context: endpoint.path().to_string(),
            source: e,
        })
    }

    fn build_url(&self, endpoint: NaverEndpoint, params: &[(&str, String)]) -> Result<Url, NaverError> {
        let mut url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| NaverError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}
