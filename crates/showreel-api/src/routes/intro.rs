//! Intro content endpoints.

use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use showreel_content::particles::ParticleField;
use showreel_content::transitions::{TransitionSpec, TransitionVariant};
use showreel_core::rng::SeededRng;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_PARTICLES: usize = 40;
const MAX_PARTICLES: usize = 200;

/// Query parameters for GET /scenes.
#[derive(Debug, Default, Deserialize)]
pub struct ScenesQuery {
    /// Seed for the particle field; random when absent.
    pub seed: Option<u64>,
    /// Number of particles, capped at 200.
    pub particles: Option<usize>,
}

/// One scene as served to the front-end.
#[derive(Debug, Serialize)]
pub struct IntroScene {
    /// Scene title.
    pub title: String,
    /// Scene subtitle.
    pub subtitle: String,
    /// Display duration.
    pub duration_ms: u64,
    /// Entrance transition.
    pub transition: &'static TransitionSpec,
}

/// Response body for GET /scenes.
#[derive(Debug, Serialize)]
pub struct ScenesResponse {
    /// Scenes in playback order.
    pub scenes: Vec<IntroScene>,
    /// Sum of all scene durations.
    pub total_duration_ms: u64,
    /// Decorative background particles.
    pub particles: ParticleField,
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// GET /scenes
#[instrument(skip(state))]
async fn scenes(
    State(state): State<AppState>,
    Query(query): Query<ScenesQuery>,
) -> Json<ScenesResponse> {
    let scenes = state
        .intro
        .entries()
        .map(|(scene, transition)| IntroScene {
            title: scene.title().to_owned(),
            subtitle: scene.subtitle().to_owned(),
            duration_ms: millis(scene.duration()),
            transition: transition.spec(),
        })
        .collect();

    let count = query
        .particles
        .unwrap_or(DEFAULT_PARTICLES)
        .min(MAX_PARTICLES);
    let mut rng = query.seed.map_or_else(SeededRng::from_os, SeededRng::new);
    let particles = ParticleField::generate(count, &mut rng);
    debug!(particles = particles.len(), "serving intro scenes");

    Json(ScenesResponse {
        scenes,
        total_duration_ms: millis(state.intro.scenes().total_duration()),
        particles,
    })
}

/// GET /transitions/{name}
async fn transition(Path(name): Path<String>) -> Result<Json<TransitionSpec>, ApiError> {
    let variant: TransitionVariant = name.parse()?;
    Ok(Json(*variant.spec()))
}

/// Returns the router for intro content.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scenes", get(scenes))
        .route("/transitions/{name}", get(transition))
}
