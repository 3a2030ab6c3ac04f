//! Turns a [`FilterState`] snapshot into the request descriptor a provider
//! call is made from.
//!
//! Strategy selection:
//! - device location on, coordinates known, no sub-filter, no region:
//!   coordinate-only ("nearby") category search, no keyword, sorted by
//!   distance;
//! - anything else: keyword search. The keyword is the sub-filter, or a
//!   random pick from the category's default pool, prefixed with the region
//!   when one is set.
//!
//! The random pick is deliberate (it varies the flavour of the default
//! listing between visits) and goes through an injected [`KeywordPicker`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::filter::{Coords, FilterState, SortOrder};
use crate::registry::Category;

/// Source of the uniform index used for default-keyword and featured picks.
pub trait KeywordPicker {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// [`KeywordPicker`] backed by any `rand` generator.
#[derive(Debug)]
pub struct RandomPicker<R>(R);

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RandomPicker<rand::rngs::ThreadRng> {
    /// Picker over the thread-local generator. Not `Send`: build the query
    /// before the first `.await`.
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RandomPicker<StdRng> {
    /// Picker seeded from the thread-local generator. `Send`, so it can be
    /// held across `.await` in a request handler.
    #[must_use]
    pub fn detached() -> Self {
        Self(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> KeywordPicker for RandomPicker<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Picks one element of `items` through `picker`.
pub fn pick_one<'a, T, P>(picker: &mut P, items: &'a [T]) -> Option<&'a T>
where
    P: KeywordPicker + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    let index = picker.pick_index(items.len()).min(items.len() - 1);
    items.get(index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Keyword + category code, coordinates optional.
    Keyword,
    /// Category code + coordinates, no keyword.
    Nearby,
}

/// Immutable descriptor for one primary provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub category: Category,
    pub keyword: Option<String>,
    pub category_code: &'static str,
    pub coords: Option<Coords>,
    pub radius: Option<u32>,
    pub page: u32,
    pub size: u32,
    pub sort: SortOrder,
}

impl SearchQuery {
    /// A query without a keyword is always a nearby query.
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        if self.keyword.is_some() {
            SearchStrategy::Keyword
        } else {
            SearchStrategy::Nearby
        }
    }

    /// 1-indexed offset of the first item on this page.
    #[must_use]
    pub fn start(&self) -> u32 {
        (self.page.max(1) - 1)
            .saturating_mul(self.size)
            .saturating_add(1)
    }
}

/// Builds the query for `page` of the search described by `state`.
pub fn build_query<P>(state: &FilterState, page: u32, picker: &mut P) -> SearchQuery
where
    P: KeywordPicker + ?Sized,
{
    let entry = state.category.entry();
    let coords = state.location.coords();
    let radius = state.location.radius();
    let page = page.max(1);

    if coords.is_some() && state.sub_filter.is_none() && state.region().is_none() {
        return SearchQuery {
            category: state.category,
            keyword: None,
            category_code: entry.provider_code,
            coords,
            radius,
            page,
            size: state.size,
            sort: SortOrder::Distance,
        };
    }

    let base_keyword = match &state.sub_filter {
        Some(sub) => sub.clone(),
        None => pick_one(picker, entry.default_keywords)
            .map(|kw| (*kw).to_string())
            .unwrap_or_else(|| entry.label.to_string()),
    };

    let keyword = match state.region() {
        Some(region) => format!("{region} {base_keyword}"),
        None => base_keyword,
    };

    let sort = if coords.is_some() {
        state.sort
    } else {
        SortOrder::Accuracy
    };

    SearchQuery {
        category: state.category,
        keyword: Some(keyword),
        category_code: entry.provider_code,
        coords,
        radius,
        page,
        size: state.size,
        sort,
    }
}
