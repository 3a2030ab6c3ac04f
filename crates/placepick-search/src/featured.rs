//! "Pick of the day": one random place from a random category.

use placepick_core::text::strip_html;
use placepick_core::{
    build_query, pick_one, Category, FilterAction, FilterState, KeywordPicker, LocationMode,
    PlaceResult,
};
use placepick_naver::{LocalSearch, LocalSort};
use serde::Serialize;

use crate::error::SearchError;
use crate::orchestrator::SearchOrchestrator;

/// Candidates fetched before the random pick.
const FEATURED_POOL_SIZE: u32 = 5;

/// Naver featured picks start at a random offset in `1..=5`.
const NAVER_START_SPAN: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Featured {
    pub place: PlaceResult,
    pub category: Category,
}

fn pick_category<P>(picker: &mut P) -> Category
where
    P: KeywordPicker + ?Sized,
{
    pick_one(picker, &Category::ALL)
        .copied()
        .unwrap_or(Category::Cafe)
}

fn no_places() -> SearchError {
    SearchError::NotFound("No places found".to_string())
}

impl SearchOrchestrator {
    /// Kakao-backed featured place.
    ///
    /// Builds a first-page query for a random category through the regular
    /// query builder, so region and coordinates behave as they do for a
    /// category listing, then picks one of the returned places.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NotFound`] when the provider returns nothing.
    /// - Any error from [`SearchOrchestrator::execute`].
    pub async fn featured<P>(
        &self,
        location: LocationMode,
        picker: &mut P,
    ) -> Result<Featured, SearchError>
    where
        P: KeywordPicker + Send + ?Sized,
    {
        let category = pick_category(picker);
        let mut state = FilterState::new(category).apply(FilterAction::SetSize(FEATURED_POOL_SIZE));
        state.location = location;
        let query = build_query(&state.sanitized(), 1, picker);

        let response = self.execute(&query, false).await?;
        let place = pick_one(picker, &response.items)
            .cloned()
            .ok_or_else(no_places)?;

        tracing::info!(category = %category, place = %place.name, "featured place picked");
        Ok(Featured { place, category })
    }

    /// Naver-backed featured place with a representative thumbnail.
    ///
    /// Uses the per-category featured keyword pool, a random start offset
    /// and Naver's random ordering so repeat visits see different places.
    /// The thumbnail lookup is best-effort.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Configuration`] when Naver is not configured.
    /// - [`SearchError::NotFound`] when the provider returns nothing.
    /// - [`SearchError::Naver`] when the local search fails.
    pub async fn naver_featured<P>(
        &self,
        region: Option<&str>,
        picker: &mut P,
    ) -> Result<Featured, SearchError>
    where
        P: KeywordPicker + Send + ?Sized,
    {
        let naver = self.naver()?;
        let category = pick_category(picker);
        let keyword = pick_one(picker, category.entry().featured_keywords)
            .copied()
            .unwrap_or(category.label());
        let query = match region.map(str::trim).filter(|r| !r.is_empty()) {
            Some(region) => format!("{region} {keyword}"),
            None => keyword.to_string(),
        };
        let offset = picker.pick_index(NAVER_START_SPAN).min(NAVER_START_SPAN - 1);
        let start = u32::try_from(offset).unwrap_or(0) + 1;

        let response = naver
            .search_local(&LocalSearch {
                query: &query,
                display: FEATURED_POOL_SIZE,
                start,
                sort: LocalSort::Random,
            })
            .await?;

        let item = pick_one(picker, &response.items)
            .cloned()
            .ok_or_else(no_places)?;
        let image_query = strip_html(&item.title);
        let mut place = PlaceResult::from(item);
        place.thumbnail = match naver.first_image(&image_query).await {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!(query = %image_query, error = %e, "featured thumbnail lookup failed");
                None
            }
        };

        tracing::info!(category = %category, query = %query, place = %place.name, "naver featured place picked");
        Ok(Featured { place, category })
    }
}
