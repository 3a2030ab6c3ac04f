//! Device position for "near me" filters.
//!
//! [`LocationSource`] is the platform seam. [`Geolocator`] wraps one with a
//! timeout and a short-lived cache so repeated "use my location" taps do not
//! re-query the device.

use std::time::Duration;

use async_trait::async_trait;
use placepick_core::Coords;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::GeolocationError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAXIMUM_AGE: Duration = Duration::from_secs(5 * 60);

/// Something that can report the device's current position.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Coords, GeolocationError>;
}

/// A source that always answers the same way. Used by the CLI when the
/// caller passes coordinates explicitly, and in tests.
#[derive(Debug, Clone)]
pub struct StaticLocation(Result<Coords, GeolocationError>);

impl StaticLocation {
    #[must_use]
    pub fn at(coords: Coords) -> Self {
        Self(Ok(coords))
    }

    #[must_use]
    pub fn failing(error: GeolocationError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl LocationSource for StaticLocation {
    async fn current_position(&self) -> Result<Coords, GeolocationError> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeolocationOptions {
    pub timeout: Duration,
    /// A cached fix younger than this is returned without asking the source.
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            maximum_age: DEFAULT_MAXIMUM_AGE,
        }
    }
}

pub struct Geolocator<S> {
    source: S,
    options: GeolocationOptions,
    cache: Mutex<Option<(Coords, Instant)>>,
}

impl<S: LocationSource> Geolocator<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, GeolocationOptions::default())
    }

    pub fn with_options(source: S, options: GeolocationOptions) -> Self {
        Self {
            source,
            options,
            cache: Mutex::new(None),
        }
    }

    /// Returns a fresh-enough cached fix, or asks the source.
    ///
    /// The cache lock is held while the source is queried, so concurrent
    /// callers wait for the one in-flight fix instead of each querying the
    /// device. The wait is bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError::Timeout`] when the source does not answer
    /// within the configured timeout, or whatever error the source reports.
    /// Failures are not cached.
    pub async fn current_position(&self) -> Result<Coords, GeolocationError> {
        let mut cache = self.cache.lock().await;
        if let Some((coords, at)) = *cache {
            if at.elapsed() <= self.options.maximum_age {
                tracing::debug!("serving cached location");
                return Ok(coords);
            }
        }

        let coords = tokio::time::timeout(self.options.timeout, self.source.current_position())
            .await
            .map_err(|_| {
                tracing::warn!(timeout = ?self.options.timeout, "location request timed out");
                GeolocationError::Timeout
            })??;

        *cache = Some((coords, Instant::now()));
        Ok(coords)
    }

    /// Drops the cached fix so the next call queries the source.
    pub async fn clear_cache(&self) {
        *self.cache.lock().await = None;
    }
}
