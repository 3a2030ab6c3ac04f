//! Kakao Local API response types.
//!
//! Both search endpoints (`keyword.json`, `category.json`) answer with the
//! same `{ "meta": {...}, "documents": [...] }` envelope.

use placepick_core::place::is_end_of_results;
use placepick_core::{PlaceResult, SearchResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct KakaoSearchResponse {
    pub meta: KakaoMeta,
    #[serde(default)]
    pub documents: Vec<KakaoPlace>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct KakaoMeta {
    pub total_count: u32,
    /// How many of `total_count` Kakao will actually page through (max 45).
    pub pageable_count: u32,
    pub is_end: bool,
}

/// One document from a Kakao place search. Every field is a string on the
/// wire, `distance` included.
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoPlace {
    pub id: String,
    pub place_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(default)]
    pub category_group_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub place_url: String,
    #[serde(default)]
    pub distance: String,
}

impl From<KakaoPlace> for PlaceResult {
    fn from(place: KakaoPlace) -> Self {
        Self {
            id: place.id,
            name: place.place_name,
            category_path: place.category_name,
            category_group_code: place.category_group_code,
            category_group_name: place.category_group_name,
            phone: place.phone,
            address: place.address_name,
            road_address: place.road_address_name,
            x: place.x,
            y: place.y,
            place_url: place.place_url,
            distance: place.distance.trim().parse::<u32>().ok(),
            thumbnail: None,
        }
    }
}

impl KakaoSearchResponse {
    /// Normalizes one page fetched at 1-indexed offset `start`.
    ///
    /// Kakao reports `is_end` itself; it is the provider's own echo of where
    /// the page sits, so it is used as is. It is also true once the echo
    /// passes `pageable_count`, which guards against a provider that keeps
    /// answering `false` past its paging window.
    #[must_use]
    pub fn into_search_response(self, start: u32) -> SearchResponse {
        let display = u32::try_from(self.documents.len()).unwrap_or(u32::MAX);
        let is_end = self.meta.is_end
            || (display > 0 && is_end_of_results(start, display, self.meta.pageable_count));
        SearchResponse {
            items: self.documents.into_iter().map(PlaceResult::from).collect(),
            total_count: self.meta.total_count,
            pageable_count: self.meta.pageable_count,
            start,
            display,
            is_end,
        }
    }
}
