//! Client for the Kakao Local search API.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CategorySearch, KakaoClient, KakaoEndpoint, KeywordSearch};
pub use error::KakaoError;
pub use types::{KakaoMeta, KakaoPlace, KakaoSearchResponse};
