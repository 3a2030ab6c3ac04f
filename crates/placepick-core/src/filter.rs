//! Filter state for one category listing and the pure reducer that mutates it.
//!
//! Region and device location are mutually exclusive, so they live in a single
//! [`LocationMode`] variant instead of two independently nullable fields.
//! Every action except [`FilterAction::NextPage`] resets the page to 1.

use serde::{Deserialize, Serialize};

use crate::registry::{Category, MAX_RADIUS_M};

/// WGS84 position as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coords {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Longitude in the string form providers expect for `x`.
    #[must_use]
    pub fn x(&self) -> String {
        self.longitude.to_string()
    }

    /// Latitude in the string form providers expect for `y`.
    #[must_use]
    pub fn y(&self) -> String {
        self.latitude.to_string()
    }

    /// Parses provider-style `x`/`y` strings. Returns `None` for blanks,
    /// garbage, or out-of-range values.
    #[must_use]
    pub fn parse(x: &str, y: &str) -> Option<Self> {
        let longitude = x.trim().parse::<f64>().ok()?;
        let latitude = y.trim().parse::<f64>().ok()?;
        let in_range = longitude.is_finite()
            && latitude.is_finite()
            && (-180.0..=180.0).contains(&longitude)
            && (-90.0..=90.0).contains(&latitude);
        in_range.then_some(Self::new(longitude, latitude))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Accuracy,
    Distance,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Accuracy => "accuracy",
            SortOrder::Distance => "distance",
        }
    }

    /// Lenient parse for query strings: anything but `distance` is accuracy.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("distance") => SortOrder::Distance,
            _ => SortOrder::Accuracy,
        }
    }
}

/// Where the search is anchored.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationMode {
    #[default]
    Unfiltered,
    ByRegion(String),
    ByCoordinates { coords: Coords, radius: Option<u32> },
}

impl LocationMode {
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        match self {
            LocationMode::ByRegion(region) => Some(region),
            _ => None,
        }
    }

    #[must_use]
    pub fn coords(&self) -> Option<Coords> {
        match self {
            LocationMode::ByCoordinates { coords, .. } => Some(*coords),
            _ => None,
        }
    }

    #[must_use]
    pub fn radius(&self) -> Option<u32> {
        match self {
            LocationMode::ByCoordinates { radius, .. } => *radius,
            _ => None,
        }
    }

    #[must_use]
    pub fn uses_my_location(&self) -> bool {
        matches!(self, LocationMode::ByCoordinates { .. })
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Kakao caps `size` at 15 per page.
pub const MAX_PAGE_SIZE: u32 = 15;

/// The user's current search intent for one category view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub category: Category,
    pub location: LocationMode,
    pub sub_filter: Option<String>,
    pub sort: SortOrder,
    pub size: u32,
    pub page: u32,
}

/// One user interaction against a [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// `Some` switches to region mode (dropping device location); `None`
    /// clears the region.
    SetRegion(Option<String>),
    SetSubFilter(Option<String>),
    SetSort(SortOrder),
    SetSize(u32),
    /// Switches to device-location mode, dropping any region.
    UseMyLocation(Coords),
    ClearMyLocation,
    SetRadius(Option<u32>),
    /// Replaces every field at once, as the filter sheet's "apply" does.
    Replace(Box<FilterState>),
    Reset,
    /// "Load more": the only action that keeps the rest of the state and
    /// advances the page.
    NextPage,
}

impl FilterState {
    /// Defaults for a freshly opened category view.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            location: LocationMode::Unfiltered,
            sub_filter: None,
            sort: SortOrder::Accuracy,
            size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.location = LocationMode::ByRegion(region.into());
        self.sort = SortOrder::Accuracy;
        self
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.location.region()
    }

    /// Applies `action` and returns the next state. The input is untouched.
    #[must_use]
    pub fn apply(&self, action: FilterAction) -> Self {
        let mut next = self.clone();
        match action {
            FilterAction::SetRegion(region) => {
                match normalize_text(region) {
                    Some(region) => {
                        next.location = LocationMode::ByRegion(region);
                        next.sort = SortOrder::Accuracy;
                    }
                    None => {
                        if matches!(next.location, LocationMode::ByRegion(_)) {
                            next.location = LocationMode::Unfiltered;
                        }
                    }
                }
            }
            FilterAction::SetSubFilter(sub) => next.sub_filter = normalize_text(sub),
            FilterAction::SetSort(sort) => {
                next.sort = if next.location.uses_my_location() {
                    sort
                } else {
                    SortOrder::Accuracy
                };
            }
            FilterAction::SetSize(size) => next.size = size.clamp(1, MAX_PAGE_SIZE),
            FilterAction::UseMyLocation(coords) => {
                let radius = next.location.radius();
                next.location = LocationMode::ByCoordinates { coords, radius };
            }
            FilterAction::ClearMyLocation => {
                if next.location.uses_my_location() {
                    next.location = LocationMode::Unfiltered;
                    next.sort = SortOrder::Accuracy;
                }
            }
            FilterAction::SetRadius(radius) => {
                if let LocationMode::ByCoordinates { radius: current, .. } = &mut next.location {
                    *current = radius.map(|r| r.clamp(1, MAX_RADIUS_M));
                }
            }
            FilterAction::Replace(state) => {
                next = (*state).sanitized();
                next.category = self.category;
            }
            FilterAction::Reset => next = Self::new(self.category),
            FilterAction::NextPage => {
                next.page = self.page.saturating_add(1);
                return next;
            }
        }
        next.page = 1;
        next
    }

    /// True when `other` describes the same search, ignoring the page.
    #[must_use]
    pub fn same_search(&self, other: &Self) -> bool {
        self.category == other.category
            && self.location == other.location
            && self.sub_filter == other.sub_filter
            && self.sort == other.sort
            && self.size == other.size
    }

    /// Restores the invariants on a state assembled field by field.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.size = self.size.clamp(1, MAX_PAGE_SIZE);
        self.page = self.page.max(1);
        self.sub_filter = normalize_text(self.sub_filter);
        if !self.location.uses_my_location() {
            self.sort = SortOrder::Accuracy;
        }
        if let LocationMode::ByRegion(region) = &self.location {
            if region.trim().is_empty() {
                self.location = LocationMode::Unfiltered;
            }
        }
        self
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul() -> Coords {
        Coords::new(126.978, 37.5665)
    }

    #[test]
    fn defaults_match_a_fresh_view() {
        let state = FilterState::new(Category::Cafe);
        assert_eq!(state.location, LocationMode::Unfiltered);
        assert_eq!(state.sub_filter, None);
        assert_eq!(state.sort, SortOrder::Accuracy);
        assert_eq!(state.size, 3);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn every_mutation_resets_page() {
        let mut state = FilterState::new(Category::Cafe);
        state.page = 4;
        let next = state.apply(FilterAction::SetSubFilter(Some("북카페".into())));
        assert_eq!(next.page, 1);
        assert_eq!(next.sub_filter.as_deref(), Some("북카페"));
    }

    #[test]
    fn next_page_keeps_filters() {
        let state = FilterState::new(Category::Cafe).with_region("서울");
        let next = state.apply(FilterAction::NextPage);
        assert_eq!(next.page, 2);
        assert!(next.same_search(&state));
    }

    #[test]
    fn region_and_location_are_exclusive() {
        let state = FilterState::new(Category::Resort)
            .apply(FilterAction::UseMyLocation(seoul()))
            .apply(FilterAction::SetRadius(Some(1_000)))
            .apply(FilterAction::SetSort(SortOrder::Distance));
        assert!(state.location.uses_my_location());

        let with_region = state.apply(FilterAction::SetRegion(Some("제주".into())));
        assert_eq!(with_region.location, LocationMode::ByRegion("제주".into()));
        assert_eq!(with_region.location.radius(), None);
        assert_eq!(with_region.sort, SortOrder::Accuracy);

        let back = with_region.apply(FilterAction::UseMyLocation(seoul()));
        assert_eq!(back.region(), None);
        assert_eq!(back.location.coords(), Some(seoul()));
    }

    #[test]
    fn distance_sort_requires_coordinates() {
        let state = FilterState::new(Category::Cafe).apply(FilterAction::SetSort(SortOrder::Distance));
        assert_eq!(state.sort, SortOrder::Accuracy);

        let located = FilterState::new(Category::Cafe)
            .apply(FilterAction::UseMyLocation(seoul()))
            .apply(FilterAction::SetSort(SortOrder::Distance));
        assert_eq!(located.sort, SortOrder::Distance);

        let cleared = located.apply(FilterAction::ClearMyLocation);
        assert_eq!(cleared.sort, SortOrder::Accuracy);
        assert_eq!(cleared.location, LocationMode::Unfiltered);
    }

    #[test]
    fn radius_is_ignored_without_location() {
        let state = FilterState::new(Category::Cafe).apply(FilterAction::SetRadius(Some(500)));
        assert_eq!(state.location, LocationMode::Unfiltered);
    }

    #[test]
    fn radius_survives_coordinate_refresh() {
        let state = FilterState::new(Category::Cafe)
            .apply(FilterAction::UseMyLocation(seoul()))
            .apply(FilterAction::SetRadius(Some(5_000)))
            .apply(FilterAction::UseMyLocation(Coords::new(127.0, 37.5)));
        assert_eq!(state.location.radius(), Some(5_000));
    }

    #[test]
    fn clearing_region_only_affects_region_mode() {
        let located = FilterState::new(Category::Cafe).apply(FilterAction::UseMyLocation(seoul()));
        let still_located = located.apply(FilterAction::SetRegion(None));
        assert!(still_located.location.uses_my_location());

        let regional = FilterState::new(Category::Cafe).with_region("부산");
        let cleared = regional.apply(FilterAction::SetRegion(Some("   ".into())));
        assert_eq!(cleared.location, LocationMode::Unfiltered);
    }

    #[test]
    fn size_is_clamped() {
        let state = FilterState::new(Category::Cafe).apply(FilterAction::SetSize(0));
        assert_eq!(state.size, 1);
        let state = state.apply(FilterAction::SetSize(99));
        assert_eq!(state.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn replace_keeps_category_and_sanitizes() {
        let mut incoming = FilterState::new(Category::Resort);
        incoming.sort = SortOrder::Distance;
        incoming.page = 7;
        incoming.sub_filter = Some(String::new());
        let next = FilterState::new(Category::Cafe).apply(FilterAction::Replace(Box::new(incoming)));
        assert_eq!(next.category, Category::Cafe);
        assert_eq!(next.sort, SortOrder::Accuracy);
        assert_eq!(next.page, 1);
        assert_eq!(next.sub_filter, None);
    }

    #[test]
    fn reset_returns_defaults() {
        let state = FilterState::new(Category::Restaurant)
            .with_region("대구")
            .apply(FilterAction::SetSize(10));
        assert_eq!(state.apply(FilterAction::Reset), FilterState::new(Category::Restaurant));
    }

    #[test]
    fn coords_parse_rejects_garbage() {
        assert_eq!(Coords::parse("127.1", "37.5"), Some(Coords::new(127.1, 37.5)));
        assert_eq!(Coords::parse("", "37.5"), None);
        assert_eq!(Coords::parse("abc", "37.5"), None);
        assert_eq!(Coords::parse("127.1", "95"), None);
    }

    #[test]
    fn sort_param_is_lenient() {
        assert_eq!(SortOrder::from_param(Some("distance")), SortOrder::Distance);
        assert_eq!(SortOrder::from_param(Some("bogus")), SortOrder::Accuracy);
        assert_eq!(SortOrder::from_param(None), SortOrder::Accuracy);
    }
}
