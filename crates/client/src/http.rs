use formats::{Coordinate, CountryGeometry};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::api::{BoxFuture, FloodApi};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// [`FloodApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpFloodApi {
    config: ClientConfig,
    http: Client,
}

impl HttpFloodApi {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(%url, "sending request");
        let resp = request.send().await.map_err(|e| {
            error!(%url, "request failed: {e}");
            ApiError::Network {
                url: url.clone(),
                message: e.to_string(),
            }
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().await.map_err(|e| ApiError::Decode {
                url,
                message: e.to_string(),
            });
        }

        error!(%url, status = status.as_u16(), "backend rejected request");
        match status {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { url }),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let body = resp.text().await.unwrap_or_default();
                Err(ApiError::Validation {
                    message: error_message(&body),
                })
            }
            other => Err(ApiError::Status {
                url,
                status: other.as_u16(),
            }),
        }
    }
}

/// Pulls `{"error": "..."}` out of an error body, or falls back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

impl FloodApi for HttpFloodApi {
    fn fetch_country_geometry(&self) -> BoxFuture<'_, Result<CountryGeometry, ApiError>> {
        Box::pin(async move {
            let url = self.config.url("/ghana-geometry");
            let request = self.http.get(&url);
            self.send_json(url, request).await
        })
    }

    fn fetch_markers<'a>(
        &'a self,
        region: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<Coordinate>, ApiError>> {
        Box::pin(async move {
            let url = self.config.url("/events");
            let mut request = self.http.get(&url);
            if let Some(region) = region {
                request = request.query(&[("region", region)]);
            }
            self.send_json(url, request).await
        })
    }

    fn submit_marker(&self, coordinate: Coordinate) -> BoxFuture<'_, Result<Coordinate, ApiError>> {
        Box::pin(async move {
            let url = self.config.url("/events");
            let request = self.http.post(&url).json(&coordinate);
            self.send_json(url, request).await
        })
    }
}
