use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::probe::{TransportKind, TransportSettings};
use crate::resolver::ResolverOptions;

/// Seed the forwarding endpoint resolves when none is configured.
pub const DEFAULT_SEED_URL: &str = "http://sourceforge.net/p/nestededitor/code/";

/// Probe limits (optional `[probe]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,
    /// Largest header block the socket transport will buffer.
    pub max_header_bytes: usize,
    /// Optional `User-Agent` sent with each probe.
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            timeout_secs: 5,
            max_header_bytes: 64 * 1024,
            user_agent: None,
        }
    }
}

/// Forwarding endpoint settings (optional `[server]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the endpoint binds to.
    pub listen: String,
    /// Status used for the final redirect to the visitor. Must be 3xx.
    pub redirect_status: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            redirect_status: 302,
        }
    }
}

/// Global configuration loaded from `~/.config/linkhop/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkhopConfig {
    /// URL whose redirect chain the endpoint resolves.
    pub seed_url: String,
    /// Maximum redirects followed per resolution.
    pub max_hops: u32,
    /// Probe transport: "curl" (default) or "socket".
    pub transport: TransportKind,
    /// Join relative `Location` values against the current URL.
    pub resolve_relative_locations: bool,
    pub probe: ProbeConfig,
    pub server: ServerConfig,
}

impl Default for LinkhopConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            max_hops: 20,
            transport: TransportKind::default(),
            resolve_relative_locations: true,
            probe: ProbeConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl LinkhopConfig {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: Duration::from_secs(self.probe.connect_timeout_secs),
            timeout: Duration::from_secs(self.probe.timeout_secs),
            max_header_bytes: self.probe.max_header_bytes,
            user_agent: self.probe.user_agent.clone(),
        }
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            max_hops: self.max_hops,
            resolve_relative: self.resolve_relative_locations,
        }
    }

    /// Reject values the resolver or endpoint cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(300..=399).contains(&self.server.redirect_status) {
            anyhow::bail!(
                "server.redirect_status must be 3xx, got {}",
                self.server.redirect_status
            );
        }
        if self.probe.max_header_bytes == 0 {
            anyhow::bail!("probe.max_header_bytes must be > 0");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linkhop")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkhopConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<LinkhopConfig> {
    if !path.exists() {
        let default_cfg = LinkhopConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: LinkhopConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = LinkhopConfig::default();
        assert_eq!(cfg.seed_url, DEFAULT_SEED_URL);
        assert_eq!(cfg.max_hops, 20);
        assert_eq!(cfg.transport, TransportKind::Curl);
        assert!(cfg.resolve_relative_locations);
        assert_eq!(cfg.probe.timeout_secs, 5);
        assert_eq!(cfg.probe.max_header_bytes, 65536);
        assert_eq!(cfg.server.redirect_status, 302);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = LinkhopConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: LinkhopConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.seed_url, cfg.seed_url);
        assert_eq!(parsed.max_hops, cfg.max_hops);
        assert_eq!(parsed.server.listen, cfg.server.listen);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            seed_url = "https://example.org/start"
            transport = "socket"

            [probe]
            timeout_secs = 2
        "#;
        let cfg: LinkhopConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.seed_url, "https://example.org/start");
        assert_eq!(cfg.transport, TransportKind::Socket);
        assert_eq!(cfg.max_hops, 20);
        assert_eq!(cfg.probe.timeout_secs, 2);
        assert_eq!(cfg.probe.connect_timeout_secs, 5);
        assert_eq!(cfg.server.redirect_status, 302);
    }

    #[test]
    fn transport_settings_and_resolver_options() {
        let toml = r#"
            max_hops = 7
            resolve_relative_locations = false

            [probe]
            connect_timeout_secs = 1
            timeout_secs = 3
            max_header_bytes = 8192
            user_agent = "linkhop-test"
        "#;
        let cfg: LinkhopConfig = toml::from_str(toml).unwrap();
        let s = cfg.transport_settings();
        assert_eq!(s.connect_timeout, Duration::from_secs(1));
        assert_eq!(s.timeout, Duration::from_secs(3));
        assert_eq!(s.max_header_bytes, 8192);
        assert_eq!(s.user_agent.as_deref(), Some("linkhop-test"));
        let o = cfg.resolver_options();
        assert_eq!(o.max_hops, 7);
        assert!(!o.resolve_relative);
    }

    #[test]
    fn non_redirect_status_rejected() {
        let mut cfg = LinkhopConfig::default();
        cfg.server.redirect_status = 200;
        assert!(cfg.validate().is_err());
        cfg.server.redirect_status = 307;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        std::fs::write(&path, "max_hops = 3\n").unwrap();
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(first.max_hops, 20);
        assert_eq!(second.max_hops, 3);
    }

    #[test]
    fn load_rejects_bad_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nredirect_status = 404\n").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
