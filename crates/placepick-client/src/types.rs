//! Bodies returned by the backend routes that are not shared page types.

use placepick_core::{Category, PlaceResult};
use placepick_naver::{NaverBlogItem, NaverImageItem};
use serde::Deserialize;

/// `{place, category}` from either featured route.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedPlace {
    pub place: PlaceResult,
    pub category: Category,
}

/// Aggregated reviews and photos for one place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailView {
    pub title: String,
    pub hero_image: String,
    #[serde(default)]
    pub blogs: Vec<NaverBlogItem>,
    #[serde(default)]
    pub images: Vec<NaverImageItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub kakao: bool,
    pub naver: bool,
}
