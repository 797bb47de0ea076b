//! Redirect resolution: follow `Location` headers until a URL stops redirecting.
//!
//! The resolver only depends on the [`Transport`] trait; whether probes go
//! through libcurl or a raw socket is decided by whoever builds it.

mod state;

pub use state::{Hop, Resolution, ResolutionState};

use crate::error::ResolveError;
use crate::probe::Transport;
use crate::url_model::{parse_seed, redirect_target};

/// Knobs for the redirect loop.
#[derive(Debug, Clone, Copy)]
pub struct ResolverOptions {
    /// Maximum number of redirects followed before giving up.
    pub max_hops: u32,
    /// Join relative `Location` values against the current URL.
    pub resolve_relative: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_hops: 20,
            resolve_relative: true,
        }
    }
}

/// Follows redirect chains with header-only probes.
pub struct RedirectResolver {
    transport: Box<dyn Transport>,
    options: ResolverOptions,
}

impl std::fmt::Debug for RedirectResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectResolver")
            .field("transport", &self.transport.name())
            .field("options", &self.options)
            .finish()
    }
}

impl RedirectResolver {
    pub fn new(transport: Box<dyn Transport>, options: ResolverOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `seed` to its canonical URL.
    pub fn resolve(&self, seed: &str) -> Result<String, ResolveError> {
        self.resolve_traced(seed).map(|r| r.url)
    }

    /// Resolve `seed` and keep the list of hops taken.
    ///
    /// Stops at the first response without a redirect target, or at a
    /// redirect pointing back at the URL just probed. Fails with
    /// `InfiniteRedirect` when more than `max_hops` redirects would be needed.
    pub fn resolve_traced(&self, seed: &str) -> Result<Resolution, ResolveError> {
        let parsed = parse_seed(seed)?;
        let mut state = ResolutionState::new(seed, parsed);
        let mut hops = Vec::new();

        loop {
            let response = self.transport.probe(&state.parsed)?;
            let location = response
                .location()
                .map_err(|e| ResolveError::malformed(state.current_url.as_str(), e.to_string()))?;
            let Some(location) = location else {
                tracing::debug!(url = %state.current_url, status = response.status, "no redirect");
                break;
            };

            let (next_text, next) =
                redirect_target(&state.parsed, location, self.options.resolve_relative)?;
            if next == state.parsed {
                tracing::debug!(url = %state.current_url, "redirect points at itself; stopping");
                break;
            }
            if state.redirect_count >= self.options.max_hops {
                tracing::warn!(
                    seed,
                    next = %next_text,
                    max_hops = self.options.max_hops,
                    "redirect bound exceeded"
                );
                return Err(ResolveError::InfiniteRedirect {
                    seed: seed.to_string(),
                    next: next_text,
                    max_hops: self.options.max_hops,
                });
            }

            tracing::debug!(
                hop = state.redirect_count + 1,
                from = %state.current_url,
                to = %next_text,
                status = response.status,
                "following redirect"
            );
            hops.push(Hop {
                from: state.current_url.clone(),
                status: response.status,
                location: location.to_string(),
                to: next_text.clone(),
            });
            state.advance(next_text, next);
        }

        tracing::info!(
            seed,
            url = %state.current_url,
            redirects = state.redirect_count,
            transport = self.transport.name(),
            "resolved"
        );
        Ok(Resolution {
            seed: seed.to_string(),
            url: state.current_url,
            redirect_count: state.redirect_count,
            hops,
        })
    }
}
