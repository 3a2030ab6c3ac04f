//! Aggregated third-party content for one place.

use placepick_core::Category;
use placepick_naver::{BlogSearch, BlogSort, ImageSearch, NaverBlogItem, NaverImageItem};
use serde::Serialize;

use crate::error::SearchError;
use crate::orchestrator::SearchOrchestrator;

pub const DETAIL_BLOG_COUNT: u32 = 10;
pub const DETAIL_IMAGE_COUNT: u32 = 6;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    pub title: String,
    pub hero_image: String,
    pub blogs: Vec<NaverBlogItem>,
    pub images: Vec<NaverImageItem>,
}

/// First image found, else the thumbnail the caller already had, else the
/// category's stock image.
fn hero_image(images: &[NaverImageItem], thumbnail: Option<&str>, category: Category) -> String {
    images
        .iter()
        .map(|img| img.link.as_str())
        .chain(thumbnail)
        .find(|link| !link.trim().is_empty())
        .unwrap_or_else(|| category.fallback_image(0))
        .to_string()
}

impl SearchOrchestrator {
    /// Blog reviews and photos for `title`, fetched concurrently.
    ///
    /// Both lookups are best-effort: a failing one yields an empty list and
    /// the page still renders.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] when `title` is blank.
    /// - [`SearchError::Configuration`] when Naver is not configured.
    pub async fn detail(
        &self,
        category: Category,
        title: &str,
        thumbnail: Option<&str>,
    ) -> Result<PlaceDetail, SearchError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SearchError::Validation(
                "Missing query parameter: title".to_string(),
            ));
        }
        let naver = self.naver()?;
        let label = category.label();
        let blog_query = format!("{title} {label} 후기");
        let image_query = format!("{title} {label}");

        let blog_search = BlogSearch {
            query: &blog_query,
            display: DETAIL_BLOG_COUNT,
            start: 1,
            sort: BlogSort::Sim,
        };
        let image_search = ImageSearch {
            query: &image_query,
            display: DETAIL_IMAGE_COUNT,
        };
        let (blogs, images) = futures::join!(
            naver.search_blog(&blog_search),
            naver.search_image(&image_search),
        );

        let blogs = match blogs {
            Ok(response) => response.items.into_iter().map(NaverBlogItem::cleaned).collect(),
            Err(e) => {
                tracing::warn!(query = %blog_query, error = %e, "blog lookup failed");
                Vec::new()
            }
        };
        let images: Vec<NaverImageItem> = match images {
            Ok(response) => response.items.into_iter().map(NaverImageItem::cleaned).collect(),
            Err(e) => {
                tracing::warn!(query = %image_query, error = %e, "image lookup failed");
                Vec::new()
            }
        };

        Ok(PlaceDetail {
            title: title.to_string(),
            hero_image: hero_image(&images, thumbnail, category),
            blogs,
            images,
        })
    }
}
