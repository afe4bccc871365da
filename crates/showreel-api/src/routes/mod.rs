//! Route modules and the assembled application router.

use axum::Router;

use crate::state::AppState;

pub mod access;
pub mod health;
pub mod intro;

/// Builds the full route tree over `state`. Middleware layers are added by
/// the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api", access::router())
        .nest("/api/v1/intro", intro::router())
        .with_state(state)
}
