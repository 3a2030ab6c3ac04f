use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use placepick_core::registry::MAX_RADIUS_M;
use placepick_core::{
    build_query, Category, Coords, DocumentsPage, FilterState, LocationMode, RandomPicker,
    SortOrder,
};
use placepick_search::{Featured, PlaceDetail};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_search_error, non_blank, positive, ApiError, AppState};

const DEFAULT_SEARCH_SIZE: u32 = 15;

#[derive(Debug, Deserialize)]
pub(super) struct CategoryQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub region: Option<String>,
    pub sub: Option<String>,
    pub sort: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub radius: Option<String>,
    /// `nearby` is accepted for compatibility; the strategy follows the
    /// filter itself.
    pub mode: Option<String>,
    pub thumbnails: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQueryParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeaturedQuery {
    pub region: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub radius: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailQuery {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
}

fn parse_category(raw: &str) -> Result<Category, ApiError> {
    raw.parse::<Category>()
        .map_err(|_| ApiError::new("bad_request", "Invalid category"))
}

fn flag(raw: Option<&str>) -> bool {
    matches!(non_blank(raw), Some("true" | "1"))
}

/// Region wins over coordinates; coordinates need both halves to parse.
fn location_from_params(
    region: Option<&str>,
    x: Option<&str>,
    y: Option<&str>,
    radius: Option<&str>,
) -> LocationMode {
    if let Some(region) = non_blank(region) {
        return LocationMode::ByRegion(region.to_string());
    }
    match (x, y) {
        (Some(x), Some(y)) => Coords::parse(x, y).map_or(LocationMode::Unfiltered, |coords| {
            LocationMode::ByCoordinates {
                coords,
                radius: positive(radius).map(|r| r.min(MAX_RADIUS_M)),
            }
        }),
        _ => LocationMode::Unfiltered,
    }
}

/// Rebuilds the caller's filter from query parameters.
fn filter_from_params(category: Category, params: &CategoryQuery) -> FilterState {
    let mut state = FilterState::new(category);
    state.location = location_from_params(
        params.region.as_deref(),
        params.x.as_deref(),
        params.y.as_deref(),
        params.radius.as_deref(),
    );
    state.sub_filter = non_blank(params.sub.as_deref()).map(str::to_string);
    state.sort = SortOrder::from_param(params.sort.as_deref());
    if let Some(size) = positive(params.size.as_deref()) {
        state.size = size;
    }
    state.page = positive(params.page.as_deref()).unwrap_or(1);
    state.sanitized()
}

pub(super) async fn list_category(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(category_id): Path<String>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<DocumentsPage>, ApiError> {
    let category = parse_category(&category_id)?;
    let filter = filter_from_params(category, &params);
    let query = build_query(&filter, filter.page, &mut RandomPicker::thread());

    tracing::debug!(
        request_id = %req_id.0,
        category = %category,
        keyword = ?query.keyword,
        mode = ?params.mode,
        page = query.page,
        "category listing"
    );

    let response = state
        .search
        .execute(&query, flag(params.thumbnails.as_deref()))
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch places"))?;

    Ok(Json(DocumentsPage::from(response)))
}

pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<DocumentsPage>, ApiError> {
    let response = state
        .search
        .search_text(
            params.q.as_deref().unwrap_or_default(),
            positive(params.page.as_deref()).unwrap_or(1),
            positive(params.size.as_deref()).unwrap_or(DEFAULT_SEARCH_SIZE),
        )
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to search places"))?;

    Ok(Json(DocumentsPage::from(response)))
}

pub(super) async fn featured_place(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeaturedQuery>,
) -> Result<Json<Featured>, ApiError> {
    let location = location_from_params(
        params.region.as_deref(),
        params.x.as_deref(),
        params.y.as_deref(),
        params.radius.as_deref(),
    );
    let featured = state
        .search
        .featured(location, &mut RandomPicker::detached())
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch featured place"))?;

    Ok(Json(featured))
}

pub(super) async fn place_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(category_id): Path<String>,
    Query(params): Query<DetailQuery>,
) -> Result<Json<PlaceDetail>, ApiError> {
    let category = parse_category(&category_id)?;
    let detail = state
        .search
        .detail(
            category,
            params.title.as_deref().unwrap_or_default(),
            non_blank(params.thumbnail.as_deref()),
        )
        .await
        .map_err(|e| map_search_error(&req_id.0, &e, "Failed to fetch place details"))?;

    Ok(Json(detail))
}
