//! Canned transport for tests: answers each URL with a fixed header block.

use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

use super::{ProbeResponse, Transport};
use crate::error::ResolveError;

/// Transport that replays scripted responses keyed by URL and records every probe.
/// Unknown URLs fail with a connection error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

fn key(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `from` answers `status` with `Location: to`.
    pub fn redirect(self, from: &str, status: u16, to: &str) -> Self {
        let raw = format!(
            "HTTP/1.1 {} Redirect\r\nLocation: {}\r\nContent-Length: 0\r\n\r\n",
            status, to
        );
        self.raw(from, &raw)
    }

    /// `url` answers 200 with no `Location`.
    pub fn terminal(self, url: &str) -> Self {
        self.raw(url, "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n")
    }

    /// `url` answers with exactly `raw`.
    pub fn raw(mut self, url: &str, raw: &str) -> Self {
        self.responses.insert(key(url), raw.to_string());
        self
    }

    /// URLs probed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Transport for ScriptedTransport {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        let raw = self
            .responses
            .get(url.as_str())
            .ok_or_else(|| ResolveError::connection(url.as_str(), "no scripted response"))?;
        ProbeResponse::from_raw(raw.clone())
            .map_err(|e| ResolveError::malformed(url.as_str(), e.to_string()))
    }
}
