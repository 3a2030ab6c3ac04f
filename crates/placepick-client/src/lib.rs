//! Consumer side of the placepick API: a typed HTTP client for the backend
//! routes, the incremental-fetch controller that drives a category listing,
//! and the geolocation provider that feeds "near me" filters.

pub mod api;
pub mod error;
pub mod geolocation;
pub mod pagination;
pub mod params;
pub mod types;

pub use api::PlacepickClient;
pub use error::{ClientError, GeolocationError};
pub use geolocation::{
    GeolocationOptions, Geolocator, LocationSource, StaticLocation, DEFAULT_MAXIMUM_AGE,
    DEFAULT_TIMEOUT,
};
pub use pagination::{FetchTicket, LoadPhase, PageResult, PaginationController};
pub use params::category_params;
pub use types::{FeaturedPlace, HealthStatus, PlaceDetailView};
