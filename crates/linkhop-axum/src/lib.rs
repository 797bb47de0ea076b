//! Forwarding endpoint: `GET /?link=<suffix>` resolves the configured seed
//! URL, appends the suffix and redirects the visitor there.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{start_server, ServerConfig};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
