//! Shared application state for handlers.

use axum::http::StatusCode;
use linkhop_core::RedirectResolver;
use std::sync::Arc;

/// Immutable state cloned into every request. Each request resolves independently.
#[derive(Clone, Debug)]
pub struct AppState {
    pub resolver: Arc<RedirectResolver>,
    pub seed_url: Arc<str>,
    /// Status of the final redirect (3xx).
    pub redirect_status: StatusCode,
}

impl AppState {
    pub fn new(resolver: RedirectResolver, seed_url: &str, redirect_status: StatusCode) -> Self {
        Self {
            resolver: Arc::new(resolver),
            seed_url: Arc::from(seed_url),
            redirect_status,
        }
    }
}
