//! Route definitions and router construction.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the router: `/` forwards, `/health` answers `OK`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::forward))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
