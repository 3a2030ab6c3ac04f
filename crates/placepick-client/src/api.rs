use std::time::Duration;

use placepick_core::{Category, DocumentsPage, FilterState, LocationMode};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::pagination::{FetchTicket, PageResult};
use crate::params::category_params;
use crate::types::{FeaturedPlace, HealthStatus, PlaceDetailView};

/// Error body every backend route returns on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Typed client for the placepick backend routes.
#[derive(Debug, Clone)]
pub struct PlacepickClient {
    client: Client,
    base_url: Url,
}

impl PlacepickClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("placepick-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// One page of a category listing for `filter`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the backend answers non-2xx.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] when the body is not a documents page.
    pub async fn category_page(
        &self,
        filter: &FilterState,
        page: u32,
    ) -> Result<DocumentsPage, ClientError> {
        let path = format!("api/places/category/{}", filter.category);
        self.get_json(&path, &category_params(filter, page)).await
    }

    /// Performs the request a [`crate::PaginationController`] asked for.
    ///
    /// # Errors
    ///
    /// Same as [`PlacepickClient::category_page`].
    pub async fn fetch_page(&self, ticket: &FetchTicket) -> Result<PageResult, ClientError> {
        self.category_page(&ticket.filter, ticket.page)
            .await
            .map(PageResult::from)
    }

    /// Free-text search across all categories.
    ///
    /// # Errors
    ///
    /// Same as [`PlacepickClient::category_page`]. A blank `q` comes back as
    /// a 400 [`ClientError::Api`].
    pub async fn search(&self, q: &str, page: u32, size: u32) -> Result<DocumentsPage, ClientError> {
        let params = [
            ("q", q.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ];
        self.get_json("api/places/search", &params).await
    }

    /// A random place from a random category near `location`.
    ///
    /// # Errors
    ///
    /// Same as [`PlacepickClient::category_page`]. An empty pick is a 404
    /// [`ClientError::Api`].
    pub async fn featured(&self, location: &LocationMode) -> Result<FeaturedPlace, ClientError> {
        let mut params = Vec::new();
        match location {
            LocationMode::Unfiltered => {}
            LocationMode::ByRegion(region) => params.push(("region", region.clone())),
            LocationMode::ByCoordinates { coords, radius } => {
                params.push(("x", coords.x()));
                params.push(("y", coords.y()));
                if let Some(radius) = radius {
                    params.push(("radius", radius.to_string()));
                }
            }
        }
        self.get_json("api/places/featured", &params).await
    }

    /// A random place picked through Naver local search.
    ///
    /// # Errors
    ///
    /// Same as [`PlacepickClient::featured`].
    pub async fn naver_featured(&self, region: Option<&str>) -> Result<FeaturedPlace, ClientError> {
        let params: Vec<(&str, String)> = region
            .map(|r| ("region", r.to_string()))
            .into_iter()
            .collect();
        self.get_json("api/naver/featured", &params).await
    }

    /// Blog reviews and photos for one place.
    ///
    /// # Errors
    ///
    /// Same as [`PlacepickClient::category_page`].
    pub async fn detail(
        &self,
        category: Category,
        title: &str,
        thumbnail: Option<&str>,
    ) -> Result<PlaceDetailView, ClientError> {
        let path = format!("api/places/category/{category}/detail");
        let mut params = vec![("title", title.to_string())];
        if let Some(thumbnail) = thumbnail {
            params.push(("thumbnail", thumbnail.to_string()));
        }
        self.get_json(&path, &params).await
    }

    /// # Errors
    ///
    /// Same as [`PlacepickClient::category_page`].
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json("api/health", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.build_url(path, params)?;
        tracing::debug!(url = %url, "placepick request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), message = %message, "placepick API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: path.to_string(),
            source: e,
        })
    }

    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}
