use placepick_core::filter::MAX_PAGE_SIZE;
use placepick_core::registry::DEFAULT_NEARBY_RADIUS_M;
use placepick_core::{AppConfig, PlaceResult, SearchQuery, SearchResponse, SearchStrategy, SortOrder};
use placepick_kakao::{CategorySearch, KakaoClient, KeywordSearch};
use placepick_naver::{
    BlogSearch, ImageSearch, LocalSearch, NaverBlogItem, NaverClient, NaverImageItem, NaverResponse,
};

use crate::enrich::attach_thumbnails;
use crate::error::{Provider, SearchError};

/// One page of Naver local results, normalized, plus the provider's build
/// timestamp.
#[derive(Debug, Clone)]
pub struct LocalListing {
    pub response: SearchResponse,
    pub last_build_date: String,
}

/// Owns the provider clients. Either one may be absent when its credentials
/// were not configured; calls that need it then fail with
/// [`SearchError::Configuration`].
#[derive(Debug, Clone, Default)]
pub struct SearchOrchestrator {
    kakao: Option<KakaoClient>,
    naver: Option<NaverClient>,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(kakao: Option<KakaoClient>, naver: Option<NaverClient>) -> Self {
        Self { kakao, naver }
    }

    /// Builds provider clients for whichever credentials are configured.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Kakao`] / [`SearchError::Naver`] if a client
    /// cannot be constructed (bad base URL override, TLS init failure).
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let timeout = config.upstream_timeout_secs;
        let user_agent = config.user_agent.as_str();

        let kakao = config
            .kakao
            .as_ref()
            .map(|creds| match config.kakao_base_url.as_deref() {
                Some(url) => KakaoClient::with_base_url(&creds.rest_api_key, timeout, user_agent, url),
                None => KakaoClient::new(&creds.rest_api_key, timeout, user_agent),
            })
            .transpose()?;

        let naver = config
            .naver
            .as_ref()
            .map(|creds| match config.naver_base_url.as_deref() {
                Some(url) => NaverClient::with_base_url(
                    &creds.client_id,
                    &creds.client_secret,
                    timeout,
                    user_agent,
                    url,
                ),
                None => NaverClient::new(&creds.client_id, &creds.client_secret, timeout, user_agent),
            })
            .transpose()?;

        if kakao.is_none() {
            tracing::warn!("Kakao credentials not configured; place routes will fail");
        }
        if naver.is_none() {
            tracing::warn!("Naver credentials not configured; image and blog routes will fail");
        }

        Ok(Self { kakao, naver })
    }

    #[must_use]
    pub fn has_kakao(&self) -> bool {
        self.kakao.is_some()
    }

    #[must_use]
    pub fn has_naver(&self) -> bool {
        self.naver.is_some()
    }

    pub(crate) fn kakao(&self) -> Result<&KakaoClient, SearchError> {
        self.kakao
            .as_ref()
            .ok_or(SearchError::Configuration(Provider::Kakao))
    }

    pub(crate) fn naver(&self) -> Result<&NaverClient, SearchError> {
        self.naver
            .as_ref()
            .ok_or(SearchError::Configuration(Provider::Naver))
    }

    /// Runs the primary Kakao call for `query`, then optionally enriches the
    /// page with thumbnails.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Configuration`] when Kakao is not configured.
    /// - [`SearchError::Validation`] for a nearby query without coordinates.
    /// - [`SearchError::Kakao`] when the primary call fails. Enrichment
    ///   failures never surface here.
    pub async fn execute(
        &self,
        query: &SearchQuery,
        enrich: bool,
    ) -> Result<SearchResponse, SearchError> {
        let kakao = self.kakao()?;
        let start = query.start();

        let raw = match (query.strategy(), query.keyword.as_deref()) {
            (SearchStrategy::Keyword, Some(keyword)) => {
                tracing::debug!(keyword, category = %query.category, page = query.page, "keyword search");
                kakao
                    .search_keyword(&KeywordSearch {
                        query: keyword,
                        category_group_code: Some(query.category_code),
                        coords: query.coords,
                        radius: query.radius,
                        page: query.page,
                        size: query.size,
                        sort: query.sort,
                    })
                    .await?
            }
            _ => {
                let coords = query.coords.ok_or_else(|| {
                    SearchError::Validation("coordinates are required for a nearby search".to_string())
                })?;
                tracing::debug!(category = %query.category, page = query.page, "nearby search");
                kakao
                    .search_category(&CategorySearch {
                        category_group_code: query.category_code,
                        coords,
                        radius: query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_M),
                        page: query.page,
                        size: query.size,
                        sort: SortOrder::Distance,
                    })
                    .await?
            }
        };

        let mut response = raw.into_search_response(start);
        if enrich {
            self.enrich(&mut response.items).await;
        }
        Ok(response)
    }

    /// Free-text Kakao search across every category.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] when `q` is blank.
    /// - [`SearchError::Configuration`] when Kakao is not configured.
    /// - [`SearchError::Kakao`] when the call fails.
    pub async fn search_text(
        &self,
        q: &str,
        page: u32,
        size: u32,
    ) -> Result<SearchResponse, SearchError> {
        let q = q.trim();
        if q.is_empty() {
            return Err(SearchError::Validation(
                "Missing query parameter: q".to_string(),
            ));
        }
        let kakao = self.kakao()?;
        let page = page.max(1);
        let size = size.clamp(1, MAX_PAGE_SIZE);
        let start = (page - 1).saturating_mul(size).saturating_add(1);

        let raw = kakao
            .search_keyword(&KeywordSearch {
                query: q,
                category_group_code: None,
                coords: None,
                radius: None,
                page,
                size,
                sort: SortOrder::Accuracy,
            })
            .await?;
        Ok(raw.into_search_response(start))
    }

    /// Naver local search, normalized, optionally with thumbnails.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] when the query is blank.
    /// - [`SearchError::Configuration`] when Naver is not configured.
    /// - [`SearchError::Naver`] when the primary call fails.
    pub async fn naver_local(
        &self,
        params: &LocalSearch<'_>,
        enrich: bool,
    ) -> Result<LocalListing, SearchError> {
        require_query(params.query)?;
        let naver = self.naver()?;
        let raw = naver.search_local(params).await?;
        let last_build_date = raw.last_build_date.clone();
        let mut response = raw.into_search_response();
        if enrich {
            attach_thumbnails(naver, &mut response.items).await;
        }
        Ok(LocalListing {
            response,
            last_build_date,
        })
    }

    /// Naver image search, titles cleaned.
    ///
    /// # Errors
    ///
    /// Same as [`SearchOrchestrator::naver_local`].
    pub async fn naver_images(
        &self,
        query: &str,
        display: u32,
    ) -> Result<NaverResponse<NaverImageItem>, SearchError> {
        require_query(query)?;
        let naver = self.naver()?;
        let response = naver.search_image(&ImageSearch { query, display }).await?;
        Ok(response.map_items(NaverImageItem::cleaned))
    }

    /// Naver blog search with markup stripped and dates reformatted.
    ///
    /// # Errors
    ///
    /// Same as [`SearchOrchestrator::naver_local`].
    pub async fn naver_blogs(
        &self,
        params: &BlogSearch<'_>,
    ) -> Result<NaverResponse<NaverBlogItem>, SearchError> {
        require_query(params.query)?;
        let naver = self.naver()?;
        let response = naver.search_blog(params).await?;
        Ok(response.map_items(NaverBlogItem::cleaned))
    }

    /// Thumbnail enrichment when Naver is available; a no-op otherwise.
    async fn enrich(&self, items: &mut [PlaceResult]) {
        match &self.naver {
            Some(naver) => {
                let attached = attach_thumbnails(naver, items).await;
                tracing::debug!(attached, total = items.len(), "thumbnails attached");
            }
            None => tracing::warn!("thumbnail enrichment skipped: Naver not configured"),
        }
    }
}

fn require_query(query: &str) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        Err(SearchError::Validation("Query is required".to_string()))
    } else {
        Ok(())
    }
}
