//! Client for the Naver Search API (local, image and blog verticals).

pub mod client;
pub mod error;
pub mod types;

pub use client::{BlogSearch, BlogSort, ImageSearch, LocalSearch, LocalSort, NaverClient, NaverEndpoint};
pub use error::NaverError;
pub use types::{NaverBlogItem, NaverImageItem, NaverLocalItem, NaverResponse};
