//! HTTP HEAD probing.
//!
//! A [`Transport`] issues one header-only request and hands back the raw
//! status and header block. Two implementations exist: [`CurlTransport`]
//! (libcurl via the `curl` crate) and [`SocketTransport`] (a plain TCP
//! connection speaking HTTP/1.1 by hand). Which one is used is decided once,
//! from configuration, by [`build_transport`].

mod easy;
pub mod parse;
#[cfg(any(test, feature = "test-utils"))]
mod scripted;
mod socket;

pub use easy::CurlTransport;
pub use parse::{extract_location, parse_status_line, HeaderParseError};
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedTransport;
pub use socket::SocketTransport;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::ResolveError;

/// Header-only probe capability. Auto-follow must never happen inside a
/// transport: each hop has to be observed by the resolver.
pub trait Transport: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Issue a HEAD request for `url` and return its status and raw headers.
    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError> {
        (**self).probe(url)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError> {
        (**self).probe(url)
    }
}

/// Status code and raw header text of one probe.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: u16,
    pub raw: String,
}

impl ProbeResponse {
    /// Validate the status line of `raw` and wrap it.
    pub fn from_raw(raw: String) -> Result<Self, HeaderParseError> {
        let status = parse_status_line(&raw)?;
        Ok(Self { status, raw })
    }

    /// Redirect target, if the response carries one.
    pub fn location(&self) -> Result<Option<&str>, HeaderParseError> {
        extract_location(&self.raw)
    }
}

/// Which transport to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Curl,
    Socket,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Curl => f.write_str("curl"),
            TransportKind::Socket => f.write_str("socket"),
        }
    }
}

/// Limits shared by both transports.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    /// Whole-probe timeout (curl) or per read/write timeout (socket).
    pub timeout: Duration,
    /// Upper bound on the header block the socket transport will buffer.
    pub max_header_bytes: usize,
    pub user_agent: Option<String>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
            max_header_bytes: 64 * 1024,
            user_agent: None,
        }
    }
}

/// Build the transport selected by `kind`.
pub fn build_transport(kind: TransportKind, settings: &TransportSettings) -> Box<dyn Transport> {
    tracing::debug!(transport = %kind, ?settings, "building transport");
    match kind {
        TransportKind::Curl => Box::new(CurlTransport::new(settings.clone())),
        TransportKind::Socket => Box::new(SocketTransport::new(settings.clone())),
    }
}
