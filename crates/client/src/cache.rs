use std::sync::Arc;

use formats::CountryGeometry;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::api::FloodApi;
use crate::error::ApiError;

/// Single-slot replay cache for the country geometry.
///
/// The first caller triggers the fetch; concurrent callers wait on the same
/// initialisation instead of issuing their own request. The outcome, success
/// or failure, is kept for the lifetime of the cache and handed to every
/// later caller. There is no refresh.
#[derive(Debug, Default)]
pub struct GeometryCache {
    slot: OnceCell<Result<Arc<CountryGeometry>, ApiError>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch(&self, api: &dyn FloodApi) -> Result<Arc<CountryGeometry>, ApiError> {
        self.slot
            .get_or_init(|| async {
                match api.fetch_country_geometry().await {
                    Ok(geometry) => {
                        info!(
                            country = %geometry.country.name,
                            regions = geometry.regions.len(),
                            "country geometry loaded"
                        );
                        Ok(Arc::new(geometry))
                    }
                    Err(err) => {
                        error!("country geometry fetch failed: {err}");
                        Err(err)
                    }
                }
            })
            .await
            .clone()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.initialized()
    }
}
