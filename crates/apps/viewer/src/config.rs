use std::env;

use client::ClientConfig;
use layers::OSM_TILE_URL;

/// Viewport size used when nothing else is configured.
pub const DEFAULT_MAP_SIZE: [f64; 2] = [1024.0, 768.0];
/// Padding kept around the country outline when the view is fitted to it.
pub const DEFAULT_FIT_PADDING_PX: f64 = 15.0;
pub const DEFAULT_ZOOM: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub client: ClientConfig,
    /// XYZ template for the basemap tiles.
    pub basemap_url: String,
    /// Viewport size in pixels, `[width, height]`.
    pub map_size: [f64; 2],
    pub fit_padding_px: f64,
    /// Projected centre before the country outline arrives.
    pub initial_center: [f64; 2],
    pub initial_zoom: f64,
}

impl ViewerConfig {
    /// Reads `FLOOD_BASEMAP_URL`, `FLOOD_MAP_WIDTH` and `FLOOD_MAP_HEIGHT` on top
    /// of the client's own variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let basemap_url = env::var("FLOOD_BASEMAP_URL").unwrap_or_else(|_| OSM_TILE_URL.to_string());
        let width = env_var_f64("FLOOD_MAP_WIDTH").unwrap_or(defaults.map_size[0]);
        let height = env_var_f64("FLOOD_MAP_HEIGHT").unwrap_or(defaults.map_size[1]);
        Self {
            client: ClientConfig::from_env(),
            basemap_url,
            map_size: [width, height],
            ..defaults
        }
    }

    /// Uniform `[top, right, bottom, left]` padding for fitting the view.
    pub fn fit_padding(&self) -> [f64; 4] {
        [self.fit_padding_px; 4]
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            basemap_url: OSM_TILE_URL.to_string(),
            map_size: DEFAULT_MAP_SIZE,
            fit_padding_px: DEFAULT_FIT_PADDING_PX,
            initial_center: [0.0, 0.0],
            initial_zoom: DEFAULT_ZOOM,
        }
    }
}

fn env_var_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}
