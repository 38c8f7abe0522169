use std::future::Future;
use std::pin::Pin;

use formats::{Coordinate, CountryGeometry};

use crate::error::ApiError;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Requests the viewer makes against the flood backend.
///
/// Every call is one round trip; nothing is cached at this level.
/// Implementations must be `Send + Sync` so requests can run on spawned tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait FloodApi: Send + Sync {
    /// `GET /ghana-geometry`.
    fn fetch_country_geometry(&self) -> BoxFuture<'_, Result<CountryGeometry, ApiError>>;

    /// `GET /events`, narrowed to one region server-side when `region` is set.
    fn fetch_markers<'a>(
        &'a self,
        region: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, ApiError>>;

    /// `POST /events`. Resolves to the coordinate as the backend stored it.
    fn submit_marker(&self, coordinate: Coordinate) -> BoxFuture<'_, Result<Coordinate, ApiError>>;
}
