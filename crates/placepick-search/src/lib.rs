//! Per-request search logic shared by the HTTP routes and the CLI.
//!
//! One primary provider call per request, optional best-effort thumbnail
//! enrichment, and the aggregate views (featured pick, place detail) built on
//! top of the two provider clients.

pub mod detail;
pub mod enrich;
pub mod error;
pub mod featured;
pub mod orchestrator;

pub use detail::PlaceDetail;
pub use enrich::{attach_thumbnails, ENRICH_CONCURRENCY};
pub use error::{Provider, SearchError};
pub use featured::Featured;
pub use orchestrator::{LocalListing, SearchOrchestrator};
