//! Showreel API server entry point.

use std::sync::Arc;

use showreel_api::config::ServerConfig;
use showreel_api::directory::HttpAccessDirectory;
use showreel_api::error::AppError;
use showreel_api::routes;
use showreel_api::state::AppState;
use showreel_content::catalog::load_scenes_file;
use showreel_content::intro::default_intro;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Showreel API server");

    // Read configuration from environment.
    let config = ServerConfig::from_env()?;

    let intro = match &config.intro_scenes_path {
        Some(path) => load_scenes_file(path)?,
        None => default_intro(),
    };

    let directory =
        HttpAccessDirectory::new(&config.user_service_url, config.user_service_timeout)?;

    // Build application state.
    let app_state = AppState::new(Arc::new(directory), intro);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
