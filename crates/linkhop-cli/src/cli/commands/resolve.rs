//! `linkhop resolve [url]` – follow a redirect chain and print the result.

use anyhow::{Context, Result};
use linkhop_core::config::{self, LinkhopConfig};
use linkhop_core::url_model::append_link;
use linkhop_core::{build_transport, RedirectResolver, Resolution, TransportKind};

#[derive(Debug, Default)]
pub struct ResolveArgs {
    pub url: Option<String>,
    pub link: Option<String>,
    pub transport: Option<TransportKind>,
    pub max_hops: Option<u32>,
    pub trace: bool,
    pub json: bool,
}

/// Apply command-line overrides on top of the loaded config.
pub(crate) fn effective_config(mut cfg: LinkhopConfig, args: &ResolveArgs) -> LinkhopConfig {
    if let Some(kind) = args.transport {
        cfg.transport = kind;
    }
    if let Some(n) = args.max_hops {
        cfg.max_hops = n;
    }
    cfg
}

fn print_trace(resolution: &Resolution) {
    for (i, hop) in resolution.hops.iter().enumerate() {
        println!("  {:>2}  {}  {} -> {}", i + 1, hop.status, hop.from, hop.to);
    }
}

pub async fn run_resolve(args: ResolveArgs) -> Result<()> {
    let cfg = effective_config(config::load_or_init()?, &args);
    let seed = args.url.clone().unwrap_or_else(|| cfg.seed_url.clone());

    let transport = build_transport(cfg.transport, &cfg.transport_settings());
    let resolver = RedirectResolver::new(transport, cfg.resolver_options());
    let resolution = tokio::task::spawn_blocking({
        let seed = seed.clone();
        move || resolver.resolve_traced(&seed)
    })
    .await
    .context("resolve task join")?
    .with_context(|| format!("resolving {}", seed))?;

    let target = append_link(&resolution.url, args.link.as_deref());
    if args.json {
        let mut value = serde_json::to_value(&resolution)?;
        value["target"] = serde_json::Value::String(target);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    if args.trace {
        print_trace(&resolution);
    }
    println!("{}", target);
    Ok(())
}
