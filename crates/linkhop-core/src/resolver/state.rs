//! Per-resolution state and trace types.

use serde::Serialize;
use url::Url;

/// Mutable state of one resolution. Owned by a single `resolve` call.
#[derive(Debug, Clone)]
pub struct ResolutionState {
    /// URL being probed, verbatim as given or received.
    pub current_url: String,
    /// Parsed form of `current_url`; always an absolute http(s) URL.
    pub parsed: Url,
    pub redirect_count: u32,
}

impl ResolutionState {
    pub fn new(seed: &str, parsed: Url) -> Self {
        Self {
            current_url: seed.to_string(),
            parsed,
            redirect_count: 0,
        }
    }

    /// Move to the next hop.
    pub fn advance(&mut self, text: String, parsed: Url) {
        self.current_url = text;
        self.parsed = parsed;
        self.redirect_count += 1;
    }
}

/// One followed redirect.
#[derive(Debug, Clone, Serialize)]
pub struct Hop {
    pub from: String,
    pub status: u16,
    /// `Location` value exactly as received.
    pub location: String,
    pub to: String,
}

/// Result of a traced resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub seed: String,
    /// Canonical URL.
    pub url: String,
    pub redirect_count: u32,
    pub hops: Vec<Hop>,
}
