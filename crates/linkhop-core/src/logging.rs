//! Tracing setup for the `linkhop` binary.
//!
//! Logs go to `linkhop.log` under the XDG state dir when it is writable and
//! to stderr otherwise. The filter comes from `LINKHOP_LOG`, then `RUST_LOG`,
//! then [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fmt;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Verbose for our own crates, quiet for dependencies.
pub const DEFAULT_FILTER: &str = "info,linkhop=debug,linkhop_core=debug,linkhop_axum=debug";

/// Takes precedence over `RUST_LOG` so the endpoint can be tuned on its own.
pub const FILTER_ENV: &str = "LINKHOP_LOG";

/// Where log lines end up after [`init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Stderr,
}

impl fmt::Display for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogDestination::File(path) => write!(f, "{}", path.display()),
            LogDestination::Stderr => f.write_str("stderr"),
        }
    }
}

/// Pick the filter directives: first non-blank of `linkhop_log`, `rust_log`, default.
pub fn filter_directives(linkhop_log: Option<&str>, rust_log: Option<&str>) -> String {
    [linkhop_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn env_filter() -> EnvFilter {
    let linkhop_log = std::env::var(FILTER_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(linkhop_log.as_deref(), rust_log.as_deref());
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("linkhop: ignoring log filter {:?}: {}", directives, e);
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// `~/.local/state/linkhop/linkhop.log`, creating the directory.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("linkhop")?;
    let dir = dirs.get_state_home();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir.join("linkhop.log"))
}

fn open_log_file() -> Result<(PathBuf, File)> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    Ok((path, file))
}

/// Install the global subscriber. Falls back to stderr if the log file cannot be opened.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() -> LogDestination {
    match open_log_file() {
        Ok((path, file)) => {
            // `Mutex<File>` is a `MakeWriter`; the lock keeps lines from interleaving.
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .is_ok();
            let destination = LogDestination::File(path);
            if installed {
                tracing::info!("linkhop logging to {}", destination);
            }
            destination
        }
        Err(err) => {
            init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
            LogDestination::Stderr
        }
    }
}

/// Install a stderr-only subscriber.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
