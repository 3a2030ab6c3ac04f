//! Best-effort thumbnail enrichment.

use futures::stream::{self, StreamExt};
use placepick_core::PlaceResult;
use placepick_naver::NaverClient;

/// Upper bound on image lookups in flight for one page, kept low to stay
/// under Naver's per-second rate limit.
pub const ENRICH_CONCURRENCY: usize = 5;

/// Looks up one image per item and stores it in `thumbnail`.
///
/// Lookups run concurrently and fail independently: a failed or empty lookup
/// leaves that item's `thumbnail` as `None`. Results are joined back by
/// index, so item order never changes. Returns how many items received a
/// thumbnail.
pub async fn attach_thumbnails(naver: &NaverClient, items: &mut [PlaceResult]) -> usize {
    let lookups: Vec<(usize, String)> = items
        .iter()
        .enumerate()
        .map(|(index, place)| (index, place.name.clone()))
        .collect();

    let results = stream::iter(lookups.into_iter().map(|(index, query)| async move {
        match naver.first_image(&query).await {
            Ok(link) => (index, link),
            Err(e) => {
                tracing::warn!(index, query = %query, error = %e, "thumbnail lookup failed");
                (index, None)
            }
        }
    }))
    .buffer_unordered(ENRICH_CONCURRENCY)
    .collect::<Vec<_>>()
    .await;

    let mut attached = 0;
    for (index, thumbnail) in results {
        if let Some(place) = items.get_mut(index) {
            if thumbnail.is_some() {
                attached += 1;
            }
            place.thumbnail = thumbnail;
        }
    }
    attached
}
