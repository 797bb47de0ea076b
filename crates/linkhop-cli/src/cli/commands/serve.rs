//! `linkhop serve` – run the forwarding endpoint.

use anyhow::Result;
use linkhop_axum::{start_server, ServerConfig};
use linkhop_core::config;
use linkhop_core::TransportKind;

#[derive(Debug, Default)]
pub struct ServeArgs {
    pub listen: Option<String>,
    pub seed: Option<String>,
    pub transport: Option<TransportKind>,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut cfg = config::load_or_init()?;
    if let Some(kind) = args.transport {
        cfg.transport = kind;
    }

    let mut server = ServerConfig::from_config(&cfg);
    if let Some(listen) = args.listen {
        server.listen = listen;
    }
    if let Some(seed) = args.seed {
        server.seed_url = seed;
    }
    start_server(server).await
}
