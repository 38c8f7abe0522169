use std::sync::Arc;

use formats::{Coordinate, CountryGeometry};

use crate::api::FloodApi;
use crate::cache::GeometryCache;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpFloodApi;

/// Shared handle to the backend. Cheap to clone; clones share the geometry cache.
#[derive(Clone)]
pub struct FloodClient {
    api: Arc<dyn FloodApi>,
    geometry: Arc<GeometryCache>,
}

impl FloodClient {
    pub fn new(api: Arc<dyn FloodApi>) -> Self {
        Self {
            api,
            geometry: Arc::new(GeometryCache::new()),
        }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(HttpFloodApi::new(config)?)))
    }

    /// Country and region outlines, fetched once and replayed afterwards.
    pub async fn country_geometry(&self) -> Result<Arc<CountryGeometry>, ApiError> {
        self.geometry.get_or_fetch(self.api.as_ref()).await
    }

    /// Current markers, optionally narrowed to a region. Always hits the backend.
    pub async fn markers(&self, region: Option<&str>) -> Result<Vec<Coordinate>, ApiError> {
        self.api.fetch_markers(region).await
    }

    /// Stores a new marker and returns the backend's copy of it.
    pub async fn submit_marker(&self, coordinate: Coordinate) -> Result<Coordinate, ApiError> {
        coordinate
            .validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;
        self.api.submit_marker(coordinate).await
    }
}

impl std::fmt::Debug for FloodClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloodClient")
            .field("geometry_cached", &self.geometry.is_populated())
            .finish()
    }
}
