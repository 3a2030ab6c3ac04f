//! Naver Search API response types.
//!
//! All three verticals share the `{lastBuildDate, total, start, display,
//! items}` envelope; only the item shape differs. Text fields carry `<b>`
//! highlight markup around matched terms.

use placepick_core::text::{format_post_date, strip_html};
use placepick_core::{is_end_of_results, PlaceResult, SearchResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverResponse<T> {
    #[serde(default)]
    pub last_build_date: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub display: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverLocalItem {
    pub title: String,
    #[serde(default)]
    pub link: String,
    /// e.g. `카페,디저트>카페`
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub road_address: String,
    #[serde(default)]
    pub mapx: String,
    #[serde(default)]
    pub mapy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverImageItem {
    #[serde(default)]
    pub title: String,
    /// Original image URL.
    pub link: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub sizeheight: String,
    #[serde(default)]
    pub sizewidth: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaverBlogItem {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bloggername: String,
    #[serde(default)]
    pub bloggerlink: String,
    /// `YYYYMMDD` on the wire.
    #[serde(default)]
    pub postdate: String,
}

impl NaverLocalItem {
    /// Stable identifier used by the detail page: `{mapx}_{mapy}`.
    #[must_use]
    pub fn place_id(&self) -> String {
        format!("{}_{}", self.mapx, self.mapy)
    }
}

/// Naver local coordinates are WGS84 degrees scaled by 10^7 (`1269246000`).
/// Values already in degree range are passed through; anything unparseable
/// is kept verbatim.
fn scaled_coordinate(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.abs() > 180.0 => (v / 10_000_000.0).to_string(),
        Ok(v) => v.to_string(),
        Err(_) => raw.to_string(),
    }
}

impl From<NaverLocalItem> for PlaceResult {
    fn from(item: NaverLocalItem) -> Self {
        let id = item.place_id();
        Self {
            id,
            name: strip_html(&item.title),
            category_group_name: item
                .category
                .rsplit(['>', ','])
                .next()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            category_path: item.category,
            category_group_code: String::new(),
            phone: item.telephone,
            address: item.address,
            road_address: item.road_address,
            x: scaled_coordinate(&item.mapx),
            y: scaled_coordinate(&item.mapy),
            place_url: item.link,
            distance: None,
            thumbnail: None,
        }
    }
}

impl NaverBlogItem {
    /// Title and description without markup, post date as `YYYY.MM.DD`.
    #[must_use]
    pub fn cleaned(self) -> Self {
        Self {
            title: strip_html(&self.title),
            description: strip_html(&self.description),
            postdate: format_post_date(&self.postdate),
            ..self
        }
    }
}

impl NaverImageItem {
    #[must_use]
    pub fn cleaned(self) -> Self {
        Self {
            title: strip_html(&self.title),
            ..self
        }
    }
}

impl NaverResponse<NaverLocalItem> {
    /// Normalizes a local search page. `isEnd` comes from the echoed
    /// `start`/`display`/`total`, never from a short page.
    #[must_use]
    pub fn into_search_response(self) -> SearchResponse {
        let start = self.start.max(1);
        let display = if self.display == 0 {
            u32::try_from(self.items.len()).unwrap_or(u32::MAX)
        } else {
            self.display
        };
        SearchResponse {
            is_end: is_end_of_results(start, display, self.total),
            items: self.items.into_iter().map(PlaceResult::from).collect(),
            total_count: self.total,
            pageable_count: self.total,
            start,
            display,
        }
    }
}

impl<T> NaverResponse<T> {
    /// Applies `f` to every item, keeping the envelope.
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> NaverResponse<U> {
        NaverResponse {
            last_build_date: self.last_build_date,
            total: self.total,
            start: self.start,
            display: self.display,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
