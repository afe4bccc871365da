//! Liveness endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body of GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Scenes in the intro being served.
    pub intro_scenes: usize,
    /// Playback length of that intro.
    pub intro_duration_ms: u64,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scenes = state.intro.scenes();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        intro_scenes: scenes.len(),
        intro_duration_ms: u64::try_from(scenes.total_duration().as_millis()).unwrap_or(u64::MAX),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
