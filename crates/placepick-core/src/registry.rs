//! Static category, region, and radius tables.
//!
//! Every category carries its Kakao category group code, the default keyword
//! pool used when no sub-filter is chosen, and the ordered sub-filter list the
//! UI offers. Nothing here changes at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cafe,
    Restaurant,
    Resort,
}

/// A refined keyword the user can pick instead of a random default keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubFilter {
    pub label: &'static str,
    pub keyword: &'static str,
}

#[derive(Debug)]
pub struct CategoryEntry {
    pub id: Category,
    /// Korean display label, also appended to detail-page queries.
    pub label: &'static str,
    /// Kakao `category_group_code`.
    pub provider_code: &'static str,
    pub default_keywords: &'static [&'static str],
    pub sub_filters: &'static [SubFilter],
    /// Keyword pool for the Naver-backed featured pick.
    pub featured_keywords: &'static [&'static str],
    /// Shown when neither provider has an image for a place.
    pub fallback_images: &'static [&'static str],
}

const fn sub(label: &'static str, keyword: &'static str) -> SubFilter {
    SubFilter { label, keyword }
}

static CAFE: CategoryEntry = CategoryEntry {
    id: Category::Cafe,
    label: "카페",
    provider_code: "CE7",
    default_keywords: &["인기카페", "감성카페", "뷰카페"],
    sub_filters: &[
        sub("감성카페", "감성카페"),
        sub("뷰카페", "뷰카페"),
        sub("대형카페", "대형카페"),
        sub("디저트카페", "디저트카페"),
        sub("북카페", "북카페"),
        sub("브런치카페", "브런치카페"),
        sub("애견카페", "애견카페"),
        sub("루프탑카페", "루프탑카페"),
    ],
    featured_keywords: &["감성카페", "뷰카페", "대형카페", "디저트카페", "브런치카페"],
    fallback_images: &[
        "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1554118811-1e0d58224f24?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1519682337058-a94d519337bc?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=800&h=600&fit=crop",
    ],
};

static RESTAURANT: CategoryEntry = CategoryEntry {
    id: Category::Restaurant,
    label: "맛집",
    provider_code: "FD6",
    default_keywords: &["맛집", "인기맛집", "추천맛집"],
    sub_filters: &[
        sub("한식", "한식맛집"),
        sub("양식", "양식맛집"),
        sub("일식", "일식맛집"),
        sub("중식", "중식맛집"),
        sub("분식", "분식맛집"),
        sub("고기", "고기맛집"),
        sub("해산물", "해산물맛집"),
        sub("채식", "채식맛집"),
        sub("브런치", "브런치맛집"),
        sub("파인다이닝", "파인다이닝"),
    ],
    featured_keywords: &["한식맛집", "양식맛집", "일식맛집", "고기맛집", "해산물맛집"],
    fallback_images: &[
        "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1621996346565-e3dbc646d9a9?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe?w=800&h=600&fit=crop",
    ],
};

static RESORT: CategoryEntry = CategoryEntry {
    id: Category::Resort,
    label: "휴양지",
    provider_code: "AT4",
    default_keywords: &["휴양지", "관광명소", "힐링여행"],
    sub_filters: &[
        sub("산/계곡", "산 계곡 여행"),
        sub("바다/해변", "바다 해변 여행"),
        sub("숲/공원", "숲 공원 힐링"),
        sub("온천/스파", "온천 스파"),
        sub("섬여행", "섬 여행"),
        sub("캠핑", "캠핑장"),
        sub("트레킹", "등산 트레킹"),
        sub("템플스테이", "템플스테이"),
    ],
    featured_keywords: &["힐링여행지", "관광명소", "자연휴양림", "온천스파", "해변여행"],
    fallback_images: &[
        "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1602002418082-a4443e081dd1?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800&h=600&fit=crop",
        "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?w=800&h=600&fit=crop",
    ],
};

/// The 17 first-level administrative regions offered as region filters.
pub const REGIONS: [&str; 17] = [
    "서울", "경기", "인천", "강원", "제주", "부산", "대구", "대전", "광주", "울산", "세종", "충북",
    "충남", "전북", "전남", "경북", "경남",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadiusOption {
    pub label: &'static str,
    pub meters: u32,
}

pub const RADIUS_OPTIONS: [RadiusOption; 6] = [
    RadiusOption { label: "500m", meters: 500 },
    RadiusOption { label: "1km", meters: 1_000 },
    RadiusOption { label: "3km", meters: 3_000 },
    RadiusOption { label: "5km", meters: 5_000 },
    RadiusOption { label: "10km", meters: 10_000 },
    RadiusOption { label: "20km", meters: 20_000 },
];

/// Radius used by coordinate-only searches when the filter carries none.
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 3_000;

/// Kakao rejects radii above 20 km.
pub const MAX_RADIUS_M: u32 = 20_000;

impl Category {
    pub const ALL: [Category; 3] = [Category::Cafe, Category::Restaurant, Category::Resort];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cafe => "cafe",
            Category::Restaurant => "restaurant",
            Category::Resort => "resort",
        }
    }

    #[must_use]
    pub fn entry(self) -> &'static CategoryEntry {
        match self {
            Category::Cafe => &CAFE,
            Category::Restaurant => &RESTAURANT,
            Category::Resort => &RESORT,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    #[must_use]
    pub fn provider_code(self) -> &'static str {
        self.entry().provider_code
    }

    /// Looks up a sub-filter by the keyword it sends upstream.
    #[must_use]
    pub fn sub_filter(self, keyword: &str) -> Option<&'static SubFilter> {
        self.entry().sub_filters.iter().find(|sf| sf.keyword == keyword)
    }

    /// Fallback image for the `index`-th item, cycling through the pool.
    #[must_use]
    pub fn fallback_image(self, index: usize) -> &'static str {
        let images = self.entry().fallback_images;
        images[index % images.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cafe" => Ok(Category::Cafe),
            "restaurant" => Ok(Category::Restaurant),
            "resort" => Ok(Category::Resort),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[must_use]
pub fn is_known_region(region: &str) -> bool {
    REGIONS.contains(&region)
}

/// Label for a radius option, if `meters` is one of the offered values.
#[must_use]
pub fn radius_label(meters: u32) -> Option<&'static str> {
    RADIUS_OPTIONS
        .iter()
        .find(|opt| opt.meters == meters)
        .map(|opt| opt.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "bar".parse::<Category>(),
            Err(UnknownCategory("bar".to_string()))
        );
    }

    #[test]
    fn provider_codes_match_kakao_groups() {
        assert_eq!(Category::Cafe.provider_code(), "CE7");
        assert_eq!(Category::Restaurant.provider_code(), "FD6");
        assert_eq!(Category::Resort.provider_code(), "AT4");
    }

    #[test]
    fn every_category_has_default_keywords_and_images() {
        for category in Category::ALL {
            let entry = category.entry();
            assert_eq!(entry.id, category);
            assert!(!entry.default_keywords.is_empty());
            assert!(!entry.featured_keywords.is_empty());
            assert!(!entry.fallback_images.is_empty());
        }
    }

    #[test]
    fn sub_filter_lookup_uses_keyword() {
        let sf = Category::Restaurant.sub_filter("한식맛집").expect("known sub-filter");
        assert_eq!(sf.label, "한식");
        assert!(Category::Restaurant.sub_filter("한식").is_none());
    }

    #[test]
    fn fallback_image_cycles() {
        let first = Category::Cafe.fallback_image(0);
        assert_eq!(Category::Cafe.fallback_image(5), first);
    }

    #[test]
    fn regions_and_radius_labels() {
        assert!(is_known_region("제주"));
        assert!(!is_known_region("도쿄"));
        assert_eq!(radius_label(3_000), Some("3km"));
        assert_eq!(radius_label(2_500), None);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Restaurant).expect("serialize");
        assert_eq!(json, "\"restaurant\"");
    }
}
