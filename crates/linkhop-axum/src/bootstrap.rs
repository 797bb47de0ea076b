//! Server bootstrap: build the resolver from config and serve.

use anyhow::{bail, Context, Result};
use axum::http::StatusCode;
use linkhop_core::config::LinkhopConfig;
use linkhop_core::url_model::parse_seed;
use linkhop_core::{build_transport, RedirectResolver, TransportKind};
use tokio::net::TcpListener;

use crate::routes::create_router;
use crate::state::AppState;

/// Everything the endpoint needs, resolved from [`LinkhopConfig`] plus CLI overrides.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: String,
    pub seed_url: String,
    pub redirect_status: u16,
    pub core: LinkhopConfig,
}

impl ServerConfig {
    pub fn from_config(cfg: &LinkhopConfig) -> Self {
        Self {
            listen: cfg.server.listen.clone(),
            seed_url: cfg.seed_url.clone(),
            redirect_status: cfg.server.redirect_status,
            core: cfg.clone(),
        }
    }
}

/// Validate the config and build the shared state. The transport is picked here, once.
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let seed = parse_seed(&config.seed_url).context("seed_url")?;
    if config.core.transport == TransportKind::Socket && seed.scheme() != "http" {
        bail!(
            "seed_url {} needs TLS; the socket transport only speaks http",
            config.seed_url
        );
    }
    let status = StatusCode::from_u16(config.redirect_status)
        .ok()
        .filter(StatusCode::is_redirection)
        .with_context(|| format!("redirect status {} is not 3xx", config.redirect_status))?;

    let transport = build_transport(config.core.transport, &config.core.transport_settings());
    let resolver = RedirectResolver::new(transport, config.core.resolver_options());
    Ok(AppState::new(resolver, &config.seed_url, status))
}

/// Bind `config.listen` and serve until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    tracing::info!(
        seed = %config.seed_url,
        transport = %config.core.transport,
        "linkhop endpoint listening on http://{}",
        config.listen
    );

    axum::serve(listener, app).await?;
    Ok(())
}
