//! Encodes a [`FilterState`] as category-route query parameters.

use placepick_core::{FilterState, LocationMode};

/// Query parameters for `GET /api/places/category/{id}` at `page`.
///
/// `mode=nearby` is sent exactly when the filter resolves to a
/// coordinate-only search: device location on, no sub-filter, no region.
#[must_use]
pub fn category_params(state: &FilterState, page: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", page.max(1).to_string()),
        ("size", state.size.to_string()),
        ("sort", state.sort.as_str().to_string()),
    ];

    if let Some(sub) = &state.sub_filter {
        params.push(("sub", sub.clone()));
    }

    match &state.location {
        LocationMode::Unfiltered => {}
        LocationMode::ByRegion(region) => params.push(("region", region.clone())),
        LocationMode::ByCoordinates { coords, radius } => {
            params.push(("x", coords.x()));
            params.push(("y", coords.y()));
            if let Some(radius) = radius {
                params.push(("radius", radius.to_string()));
            }
            if state.sub_filter.is_none() {
                params.push(("mode", "nearby".to_string()));
            }
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use placepick_core::{Category, Coords, FilterAction};

    fn get<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn defaults_encode_page_size_and_sort() {
        let params = category_params(&FilterState::new(Category::Cafe), 1);
        assert_eq!(get(&params, "page"), Some("1"));
        assert_eq!(get(&params, "size"), Some("3"));
        assert_eq!(get(&params, "sort"), Some("accuracy"));
        assert_eq!(get(&params, "mode"), None);
        assert_eq!(get(&params, "region"), None);
    }

    #[test]
    fn region_and_sub_filter_are_sent() {
        let state = FilterState::new(Category::Cafe)
            .with_region("서울")
            .apply(FilterAction::SetSubFilter(Some("감성카페".into())));
        let params = category_params(&state, 3);
        assert_eq!(get(&params, "region"), Some("서울"));
        assert_eq!(get(&params, "sub"), Some("감성카페"));
        assert_eq!(get(&params, "page"), Some("3"));
    }

    #[test]
    fn plain_location_is_nearby_mode() {
        let state = FilterState::new(Category::Restaurant)
            .apply(FilterAction::UseMyLocation(Coords::new(127.1, 37.5)))
            .apply(FilterAction::SetRadius(Some(1_000)));
        let params = category_params(&state, 1);
        assert_eq!(get(&params, "mode"), Some("nearby"));
        assert_eq!(get(&params, "x"), Some("127.1"));
        assert_eq!(get(&params, "radius"), Some("1000"));
    }

    #[test]
    fn location_with_sub_filter_is_not_nearby_mode() {
        let state = FilterState::new(Category::Restaurant)
            .apply(FilterAction::UseMyLocation(Coords::new(127.1, 37.5)))
            .apply(FilterAction::SetSubFilter(Some("한식맛집".into())));
        let params = category_params(&state, 1);
        assert_eq!(get(&params, "mode"), None);
        assert_eq!(get(&params, "y"), Some("37.5"));
    }
}
