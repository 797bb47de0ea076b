//! Axum-specific error type and its mapping to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkhop_core::ResolveError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    /// The client's request cannot be turned into a redirect.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream redirect chain could not be resolved.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error (misconfiguration, task failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for clients.
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<&'static str>,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The seed is validated at bootstrap, so whatever fails here failed upstream.
impl From<ResolveError> for HttpError {
    fn from(e: ResolveError) -> Self {
        HttpError::BadGateway(e.to_string())
    }
}

fn error_type(e: &HttpError) -> Option<&'static str> {
    match e {
        HttpError::BadRequest(_) => Some("bad_link"),
        HttpError::BadGateway(_) => Some("resolution_failed"),
        HttpError::Internal(_) => None,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "{}", self);
        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
            error_type: error_type(&self),
        };
        (status, Json(body)).into_response()
    }
}
