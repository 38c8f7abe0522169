//! Runs the real backend router on an ephemeral port and drives it through
//! the HTTP client.

use std::net::SocketAddr;

use client::{ClientConfig, ErrorKind, FloodClient};
use formats::{Coordinate, CountryGeometry};
use pretty_assertions::assert_eq;
use server::{router, AppState, BUNDLED_GEOMETRY};

async fn spawn_backend() -> SocketAddr {
    let geometry = CountryGeometry::from_json_str(BUNDLED_GEOMETRY).expect("bundled geometry");
    let app = router(AppState::new(geometry));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn client_for(addr: SocketAddr) -> FloodClient {
    FloodClient::from_config(ClientConfig::new(format!("http://{addr}/"))).expect("client")
}

#[tokio::test]
async fn geometry_is_fetched_and_cached() {
    let client = client_for(spawn_backend().await).await;
    let first = client.country_geometry().await.expect("geometry");
    let second = client.country_geometry().await.expect("geometry");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.country.name, "Ghana");
    assert!(first.region_names().contains(&"Greater Accra".to_string()));
}

#[tokio::test]
async fn submitted_marker_shows_up_in_later_queries() {
    let client = client_for(spawn_backend().await).await;
    assert!(client.markers(None).await.expect("markers").is_empty());

    let stored = client
        .submit_marker(Coordinate::new(5.6, -0.2))
        .await
        .expect("submit");
    assert_eq!(stored, Coordinate::new(5.6, -0.2));

    assert_eq!(client.markers(None).await.expect("markers"), vec![stored]);
    assert_eq!(
        client.markers(Some("Greater Accra")).await.expect("markers"),
        vec![stored]
    );
    assert!(client
        .markers(Some("Northern"))
        .await
        .expect("markers")
        .is_empty());
}

#[tokio::test]
async fn unknown_region_maps_to_not_found() {
    let client = client_for(spawn_backend().await).await;
    let err = client.markers(Some("D Region")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Bind and drop to get a port nothing listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(addr).await;
    let err = client.markers(None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
}
