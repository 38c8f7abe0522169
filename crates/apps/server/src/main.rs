use server::{router, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    };

    let geometry = match config.load_geometry().await {
        Ok(geometry) => geometry,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };
    info!(
        country = %geometry.country.name,
        regions = geometry.regions.len(),
        "geometry loaded"
    );

    let app = router(AppState::new(geometry));

    info!("flood server listening on http://{}", config.addr);
    axum::serve(tokio::net::TcpListener::bind(config.addr).await.unwrap(), app)
        .await
        .unwrap();
}
