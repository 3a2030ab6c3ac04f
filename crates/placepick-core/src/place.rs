//! Normalized place records and the page envelopes the HTTP routes return.
//!
//! [`PlaceResult`] serializes with Kakao's document field names so the
//! category route keeps its historical body; Naver-sourced records are mapped
//! into the same shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::filter::Coords;

/// One place as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub id: String,
    #[serde(rename = "place_name")]
    pub name: String,
    /// Full provider category path, e.g. `음식점 > 카페 > 커피전문점`.
    #[serde(rename = "category_name", default)]
    pub category_path: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(default)]
    pub category_group_name: String,
    #[serde(default)]
    pub phone: String,
    /// Lot-number address.
    #[serde(rename = "address_name", default)]
    pub address: String,
    #[serde(rename = "road_address_name", default)]
    pub road_address: String,
    /// Longitude, provider string form.
    #[serde(default)]
    pub x: String,
    /// Latitude, provider string form.
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub place_url: String,
    /// Meters from the search origin; only coordinate searches fill it.
    #[serde(default, with = "distance_field")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl PlaceResult {
    /// Road address, falling back to the lot address.
    #[must_use]
    pub fn display_address(&self) -> &str {
        if self.road_address.is_empty() {
            &self.address
        } else {
            &self.road_address
        }
    }

    #[must_use]
    pub fn coords(&self) -> Option<Coords> {
        Coords::parse(&self.x, &self.y)
    }

    /// Local tags derived from the category path: the top-level group
    /// (`음식점`, `여행` ...) is dropped, the remaining segments are kept.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        category_tags(&self.category_path)
    }

    #[must_use]
    pub fn short_address(&self) -> String {
        short_address(self.display_address())
    }
}

/// Splits a provider category path into display tags.
///
/// Accepts both Kakao (`음식점 > 카페 > 커피전문점`) and Naver
/// (`카페,디저트>카페`) separators. A single-segment path is kept as is.
#[must_use]
pub fn category_tags(path: &str) -> Vec<String> {
    let segments: Vec<String> = path
        .split(['>', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let mut tags: Vec<String> = if segments.len() > 1 {
        segments[1..].to_vec()
    } else {
        segments
    };
    let mut seen = std::collections::HashSet::new();
    tags.retain(|t| seen.insert(t.clone()));
    tags
}

/// First three whitespace-separated tokens (province, city, district).
#[must_use]
pub fn short_address(address: &str) -> String {
    address
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `850m` below a kilometre, `1.2km` above; empty for zero.
#[must_use]
pub fn format_distance(meters: u32) -> String {
    match meters {
        0 => String::new(),
        m if m < 1_000 => format!("{m}m"),
        m => format!("{:.1}km", f64::from(m) / 1_000.0),
    }
}

/// End-of-results from the provider's pagination echo.
///
/// `start` is the 1-indexed position of the first returned item and
/// `display` the number of items returned, so the page ends at
/// `start + display - 1`. A short page in the middle of a result set is not
/// the end.
#[must_use]
pub fn is_end_of_results(start: u32, display: u32, total: u32) -> bool {
    start.saturating_add(display) > total
}

/// Provider-agnostic result of one primary search (plus enrichment).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub items: Vec<PlaceResult>,
    pub total_count: u32,
    /// Kakao's `pageable_count`; equals `total_count` for Naver.
    pub pageable_count: u32,
    pub start: u32,
    pub display: u32,
    pub is_end: bool,
}

/// `{documents, meta}` body served by the Kakao-backed routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentsPage {
    pub documents: Vec<PlaceResult>,
    pub meta: DocumentsMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsMeta {
    pub total_count: u32,
    pub pageable_count: u32,
    pub is_end: bool,
}

/// `{items, total, start, display, isEnd}` body served by the Naver-backed
/// list routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub items: Vec<PlaceResult>,
    pub total: u32,
    pub start: u32,
    pub display: u32,
    pub is_end: bool,
}

impl From<SearchResponse> for DocumentsPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            documents: response.items,
            meta: DocumentsMeta {
                total_count: response.total_count,
                pageable_count: response.pageable_count,
                is_end: response.is_end,
            },
        }
    }
}

impl From<SearchResponse> for ListPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            items: response.items,
            total: response.total_count,
            start: response.start,
            display: response.display,
            is_end: response.is_end,
        }
    }
}

/// Kakao sends `distance` as a string that is empty outside coordinate
/// searches; keep that representation on the wire.
mod distance_field {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S: Serializer>(value: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(m) => s.serialize_str(&m.to_string()),
            None => s.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u32),
        }

        Ok(match Option::<Raw>::deserialize(d)? {
            Some(Raw::Text(s)) => s.trim().parse::<u32>().ok(),
            Some(Raw::Number(n)) => Some(n),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kakao_document() -> serde_json::Value {
        serde_json::json!({
            "id": "26338954",
            "place_name": "카페 온더락",
            "category_name": "음식점 > 카페 > 커피전문점",
            "category_group_code": "CE7",
            "category_group_name": "카페",
            "phone": "02-123-4567",
            "address_name": "서울 마포구 연남동 223-14",
            "road_address_name": "서울 마포구 동교로 241",
            "x": "126.9246",
            "y": "37.5618",
            "place_url": "http://place.map.kakao.com/26338954",
            "distance": ""
        })
    }

    #[test]
    fn kakao_document_deserializes() {
        let place: PlaceResult = serde_json::from_value(kakao_document()).expect("parse");
        assert_eq!(place.name, "카페 온더락");
        assert_eq!(place.distance, None);
        assert_eq!(place.coords(), Some(Coords::new(126.9246, 37.5618)));
        assert_eq!(place.tags(), vec!["카페", "커피전문점"]);
        assert_eq!(place.display_address(), "서울 마포구 동교로 241");
        assert_eq!(place.short_address(), "서울 마포구 동교로");
    }

    #[test]
    fn serialization_keeps_kakao_field_names_and_omits_missing_thumbnail() {
        let place: PlaceResult = serde_json::from_value(kakao_document()).expect("parse");
        let value = serde_json::to_value(&place).expect("serialize");
        assert_eq!(value, kakao_document());
    }

    #[test]
    fn distance_round_trips_as_string() {
        let mut doc = kakao_document();
        doc["distance"] = serde_json::json!("418");
        let place: PlaceResult = serde_json::from_value(doc).expect("parse");
        assert_eq!(place.distance, Some(418));
        let value = serde_json::to_value(&place).expect("serialize");
        assert_eq!(value["distance"], "418");
    }

    #[test]
    fn thumbnail_is_serialized_when_present() {
        let mut place: PlaceResult = serde_json::from_value(kakao_document()).expect("parse");
        place.thumbnail = Some("https://img.example/1.jpg".into());
        let value = serde_json::to_value(&place).expect("serialize");
        assert_eq!(value["thumbnail"], "https://img.example/1.jpg");
    }

    #[test]
    fn road_address_falls_back_to_lot_address() {
        let mut place: PlaceResult = serde_json::from_value(kakao_document()).expect("parse");
        place.road_address.clear();
        assert_eq!(place.display_address(), "서울 마포구 연남동 223-14");
    }

    #[test]
    fn category_tags_handle_both_separators() {
        assert_eq!(category_tags("카페,디저트>카페"), vec!["디저트", "카페"]);
        assert_eq!(category_tags("여행 > 관광,명소 > 테마파크"), vec!["관광", "명소", "테마파크"]);
        assert_eq!(category_tags("카페"), vec!["카페"]);
        assert!(category_tags("").is_empty());
    }

    #[test]
    fn short_address_handles_short_inputs() {
        assert_eq!(short_address("제주 제주시"), "제주 제주시");
        assert_eq!(short_address(""), "");
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(0), "");
        assert_eq!(format_distance(850), "850m");
        assert_eq!(format_distance(1_234), "1.2km");
    }

    #[test]
    fn end_of_results_uses_echo_values() {
        assert!(is_end_of_results(41, 3, 42));
        assert!(!is_end_of_results(41, 1, 42));
        assert!(is_end_of_results(1, 0, 0));
        assert!(!is_end_of_results(1, 2, 10));
    }

    #[test]
    fn last_item_exactly_ends_results() {
        assert!(is_end_of_results(41, 2, 42));
        assert!(is_end_of_results(1, 10, 10));
        assert!(!is_end_of_results(1, 9, 10));
    }

    #[test]
    fn list_page_uses_camel_case_is_end() {
        let page = ListPage {
            items: vec![],
            total: 42,
            start: 41,
            display: 3,
            is_end: true,
        };
        let value = serde_json::to_value(&page).expect("serialize");
        assert_eq!(value["isEnd"], true);
        assert_eq!(value["total"], 42);
    }
}
