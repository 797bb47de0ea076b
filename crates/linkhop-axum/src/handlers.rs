//! Request handlers.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::HeaderValue;
use axum::response::Response;
use linkhop_core::url_model::append_link;
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ForwardParams {
    /// Path/query suffix appended to the resolved URL.
    pub link: Option<String>,
}

/// `GET /`: resolve the seed, append `link`, redirect.
pub async fn forward(
    State(state): State<AppState>,
    Query(params): Query<ForwardParams>,
) -> Result<Response, HttpError> {
    let resolver = state.resolver.clone();
    let seed = state.seed_url.clone();
    let resolved = tokio::task::spawn_blocking(move || resolver.resolve(&seed))
        .await
        .map_err(|e| HttpError::Internal(format!("resolve task: {}", e)))??;

    // Blame upstream for a bad resolved URL, the client for a bad suffix.
    HeaderValue::from_str(&resolved)
        .map_err(|_| HttpError::BadGateway(format!("unusable redirect target {:?}", resolved)))?;
    let target = append_link(&resolved, params.link.as_deref());
    let location = HeaderValue::from_str(&target).map_err(|_| {
        HttpError::BadRequest(format!("link cannot form a Location header: {:?}", target))
    })?;
    tracing::info!(seed = %state.seed_url, %target, "forwarding");

    Response::builder()
        .status(state.redirect_status)
        .header(LOCATION, location)
        .body(Body::empty())
        .map_err(|e| HttpError::Internal(e.to_string()))
}

/// `GET /health`.
pub async fn health() -> &'static str {
    "OK"
}
