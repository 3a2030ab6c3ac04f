//! Shared domain model for placepick.
//!
//! Holds everything that is pure data or pure logic: the category registry,
//! the filter state and its reducer, the query builder, the normalized place
//! records returned to callers, and environment-driven configuration.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod place;
pub mod query;
pub mod registry;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, KakaoCredentials, NaverCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{Coords, FilterAction, FilterState, LocationMode, SortOrder};
pub use place::{
    is_end_of_results, DocumentsMeta, DocumentsPage, ListPage, PlaceResult, SearchResponse,
};
pub use query::{build_query, pick_one, KeywordPicker, RandomPicker, SearchQuery, SearchStrategy};
pub use registry::{Category, CategoryEntry, SubFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Returned when a path segment or flag names a category that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);
