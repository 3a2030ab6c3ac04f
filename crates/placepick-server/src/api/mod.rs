mod naver;
mod places;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use placepick_search::{SearchError, SearchOrchestrator};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub search: SearchOrchestrator,
}

/// Error body every route returns: `{"error": "<message>"}`.
///
/// `code` selects the status and is never serialized.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub code: &'static str,
    pub error: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    kakao: bool,
    naver: bool,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a pipeline error onto the route boundary.
///
/// Upstream failures are logged with their detail and answered with the
/// route's generic `fallback` message; nothing from the provider leaks into
/// the body.
pub(super) fn map_search_error(
    request_id: &str,
    error: &SearchError,
    fallback: &'static str,
) -> ApiError {
    match error {
        SearchError::Validation(msg) => ApiError::new("validation_error", msg.clone()),
        SearchError::NotFound(msg) => ApiError::new("not_found", msg.clone()),
        SearchError::Configuration(_) => {
            tracing::error!(request_id, error = %error, "provider not configured");
            ApiError::new("configuration_error", error.to_string())
        }
        SearchError::Kakao(_) | SearchError::Naver(_) => {
            tracing::error!(request_id, error = %error, "upstream provider call failed");
            ApiError::new("internal_error", fallback)
        }
    }
}

/// Lenient numeric query parameter: blank, zero, or garbage yields `None`.
pub(super) fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

/// Blank query parameters count as absent.
pub(super) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/places/category/{category_id}",
            get(places::list_category),
        )
        .route(
            "/api/places/category/{category_id}/detail",
            get(places::place_detail),
        )
        .route("/api/places/search", get(places::search_places))
        .route("/api/places/featured", get(places::featured_place))
        .route("/api/naver/local", get(naver::local))
        .route("/api/naver/image", get(naver::image))
        .route("/api/naver/blog", get(naver::blog))
        .route("/api/naver/featured", get(naver::featured))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        kakao: state.search.has_kakao(),
        naver: state.search.has_naver(),
    })
}
