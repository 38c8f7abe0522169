use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use formats::{CountryGeometry, GeometryError};

/// Simplified Ghana outline and regions, used when no geometry file is configured.
pub const BUNDLED_GEOMETRY: &str = include_str!("../assets/ghana_geometry.json");

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug)]
pub enum ServerError {
    InvalidAddr { value: String, reason: String },
    GeometryIo { path: PathBuf, source: std::io::Error },
    Geometry(GeometryError),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::InvalidAddr { value, reason } => {
                write!(f, "invalid FLOOD_ADDR {value:?}: {reason}")
            }
            ServerError::GeometryIo { path, source } => {
                write!(f, "failed to read geometry {}: {source}", path.display())
            }
            ServerError::Geometry(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// GeoJSON-style country geometry file; the bundled one when unset.
    pub geometry_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads `FLOOD_ADDR` and `FLOOD_GEOMETRY_PATH`.
    pub fn from_env() -> Result<Self, ServerError> {
        let addr = env::var("FLOOD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr.parse().map_err(|e: std::net::AddrParseError| ServerError::InvalidAddr {
            value: addr.clone(),
            reason: e.to_string(),
        })?;
        let geometry_path = env::var("FLOOD_GEOMETRY_PATH").ok().map(PathBuf::from);
        Ok(Self {
            addr,
            geometry_path,
        })
    }

    pub async fn load_geometry(&self) -> Result<CountryGeometry, ServerError> {
        match &self.geometry_path {
            Some(path) => load_geometry_file(path).await,
            None => CountryGeometry::from_json_str(BUNDLED_GEOMETRY).map_err(ServerError::Geometry),
        }
    }
}

async fn load_geometry_file(path: &Path) -> Result<CountryGeometry, ServerError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ServerError::GeometryIo {
            path: path.to_path_buf(),
            source,
        })?;
    CountryGeometry::from_json_str(&text).map_err(ServerError::Geometry)
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, ServerError};

    #[tokio::test]
    async fn bundled_geometry_loads_when_no_path() {
        let cfg = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            geometry_path: None,
        };
        let geometry = cfg.load_geometry().await.expect("bundled geometry");
        assert_eq!(geometry.country.name, "Ghana");
        assert!(geometry.region("Greater Accra").is_some());
    }

    #[tokio::test]
    async fn missing_geometry_file_is_reported_with_path() {
        let cfg = ServerConfig {
            addr: "127.0.0.1:0".parse().unwrap(),
            geometry_path: Some("/definitely/not/here.json".into()),
        };
        let err = cfg.load_geometry().await.unwrap_err();
        assert!(matches!(err, ServerError::GeometryIo { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
