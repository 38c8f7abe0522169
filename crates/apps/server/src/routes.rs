use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use formats::{Coordinate, CountryGeometry};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::events::EventStore;

#[derive(Clone)]
pub struct AppState {
    pub geometry: Arc<CountryGeometry>,
    pub events: Arc<EventStore>,
}

impl AppState {
    pub fn new(geometry: CountryGeometry) -> Self {
        Self {
            geometry: Arc::new(geometry),
            events: Arc::new(EventStore::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub region: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/ghana-geometry", get(get_geometry))
        .route("/events", get(list_events).post(create_event))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub async fn get_geometry(State(state): State<AppState>) -> Response {
    (StatusCode::OK, Json(state.geometry.as_ref().clone())).into_response()
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    let Some(name) = query.region else {
        return (StatusCode::OK, Json(state.events.list())).into_response();
    };

    match state.geometry.region(&name) {
        Some(region) => (StatusCode::OK, Json(state.events.in_region(region))).into_response(),
        None => {
            warn!(region = %name, "events requested for unknown region");
            api_error(StatusCode::NOT_FOUND, format!("unknown region: {name}")).into_response()
        }
    }
}

pub async fn create_event(State(state): State<AppState>, body: Bytes) -> Response {
    let coordinate: Coordinate = match serde_json::from_slice(&body) {
        Ok(c) => c,
        Err(err) => {
            return api_error(StatusCode::BAD_REQUEST, format!("invalid event body: {err}"))
                .into_response();
        }
    };
    if let Err(err) = coordinate.validate() {
        return api_error(StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }

    let stored = state.events.insert(coordinate);
    info!(lat = stored.lat, lng = stored.lng, "flood event stored");
    (StatusCode::CREATED, Json(stored)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::Response;
    use bytes::Bytes;
    use formats::{Coordinate, CountryGeometry};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::{create_event, get_geometry, list_events, AppState, EventsQuery};
    use crate::config::BUNDLED_GEOMETRY;

    fn state() -> AppState {
        AppState::new(CountryGeometry::from_json_str(BUNDLED_GEOMETRY).unwrap())
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn query(region: Option<&str>) -> Query<EventsQuery> {
        Query(EventsQuery {
            region: region.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn post_then_list_returns_stored_event() {
        let state = state();
        let resp = create_event(
            State(state.clone()),
            Bytes::from_static(br#"{"lat": 5.6, "lng": -0.2}"#),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({"lat": 5.6, "lng": -0.2})
        );

        let resp = list_events(State(state), query(None)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let events: Vec<Coordinate> = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(events, vec![Coordinate::new(5.6, -0.2)]);
    }

    #[tokio::test]
    async fn region_filter_uses_region_polygon() {
        let state = state();
        state.events.insert(Coordinate::new(5.6, -0.2));
        state.events.insert(Coordinate::new(9.4, -0.8));

        let resp = list_events(State(state.clone()), query(Some("Northern"))).await;
        let events: Vec<Coordinate> = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(events, vec![Coordinate::new(9.4, -0.8)]);
    }

    #[tokio::test]
    async fn unknown_region_is_not_found() {
        let resp = list_events(State(state()), query(Some("D Region"))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "unknown region: D Region");
    }

    #[tokio::test]
    async fn invalid_bodies_are_rejected() {
        let state = state();
        let resp = create_event(State(state.clone()), Bytes::from_static(b"not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = create_event(
            State(state.clone()),
            Bytes::from_static(br#"{"lat": 95.0, "lng": 0.0}"#),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "latitude 95 outside [-90, 90]");
        assert!(state.events.is_empty());
    }

    #[tokio::test]
    async fn geometry_is_served_as_loaded() {
        let state = state();
        let resp = get_geometry(State(state.clone())).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let served: CountryGeometry = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(&served, state.geometry.as_ref());
    }
}
