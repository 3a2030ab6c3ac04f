use axum::{
    extract::{Query, State},
    Extension, Json,
};
use placepick_core::{ListPage, RandomPicker};
use placepick_naver::{
    BlogSearch, BlogSort, LocalSearch, LocalSort, NaverBlogItem, NaverImageItem, NaverResponse,
};
use placepick_search::Featured;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_search_error, non_blank, positive, ApiError, AppState};

/// Naver caps local search at 5 results per call.
const LOCAL_MAX_DISPLAY: u32 = 5;
const SEARCH_MAX_DISPLAY: u32 = 100;
const SEARCH_MAX_START: u32 = 1_000;

#[derive(Debug, Deserialize)]
pub(super) struct LocalQuery {
    pub query: Option<String>,
    pub display: Option<String>,
    pub start: Option<String>,
    pub sort: Option<String>,
    pub thumbnails: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ImageQuery {
    pub query: Option<String>,
    pub display: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BlogQuery {
    pub query: Option<String>,
    pub display: Option<String>,
    pub start: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeaturedQuery {
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocalListBody {
    #[serde(flatten)]
    page: ListPage,
    last_build_date: String,
}

pub(super) async fn local(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<LocalQuery>,
) -> Result<Json<LocalListBody>, ApiError> {
    let query = params.query.as_deref().unwrap_or_default();
    let search = LocalSearch {
        query,
        display: positive(params.display.as_deref())
            .unwrap_or(LOCAL_MAX_DISPLAY)
            .min(LOCAL_MAX_DISPLAY),
        start: positive(params.start.as_deref())
            .unwrap_or(1)
            .min(SEARCH_MAX_START),
        sort: LocalSort::from_param(params.sort.as_deref()),
    };
    // Thumbnails are on unless explicitly turned off.
    let enrich = !matches!(non_blank(params.thumbnails.as_deref()), Some("false" | "0"));

    let listing = state
        .search
        .naver_local(&search, enrich)
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch local places"))?;

    Ok(Json(LocalListBody {
        page: ListPage::from(listing.response),
        last_build_date: listing.last_build_date,
    }))
}

pub(super) async fn image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ImageQuery>,
) -> Result<Json<NaverResponse<NaverImageItem>>, ApiError> {
    let display = positive(params.display.as_deref())
        .unwrap_or(1)
        .min(SEARCH_MAX_DISPLAY);
    let response = state
        .search
        .naver_images(params.query.as_deref().unwrap_or_default(), display)
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch images"))?;

    Ok(Json(response))
}

pub(super) async fn blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<BlogQuery>,
) -> Result<Json<NaverResponse<NaverBlogItem>>, ApiError> {
    let search = BlogSearch {
        query: params.query.as_deref().unwrap_or_default(),
        display: positive(params.display.as_deref())
            .unwrap_or(5)
            .min(SEARCH_MAX_DISPLAY),
        start: positive(params.start.as_deref())
            .unwrap_or(1)
            .min(SEARCH_MAX_START),
        sort: BlogSort::from_param(params.sort.as_deref()),
    };
    let response = state
        .search
        .naver_blogs(&search)
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch blog posts"))?;

    Ok(Json(response))
}

pub(super) async fn featured(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeaturedQuery>,
) -> Result<Json<Featured>, ApiError> {
    let featured = state
        .search
        .naver_featured(
            non_blank(params.region.as_deref()),
            &mut RandomPicker::detached(),
        )
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch featured place"))?;

    Ok(Json(featured))
}
