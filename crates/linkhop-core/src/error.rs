//! Resolution error type and its classification.
//!
//! Every failure of a resolution is terminal: nothing here is retried
//! internally. Callers that want retries look at [`ResolveError::kind`].

use std::io;
use std::time::Duration;
use thiserror::Error;

/// High-level classification of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The seed (or a URL handed to a transport) is not a usable absolute http(s) URL.
    InvalidUrl,
    /// Host unreachable: DNS failure, connection refused, socket error.
    ConnectionFailure,
    /// The response has no parseable status/header block.
    MalformedResponse,
    /// More redirects than the configured hop bound.
    InfiniteRedirect,
    /// A probe did not complete within its timeout.
    Timeout,
}

/// Error returned by a probe or by the redirect loop.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("connection to {url} failed: {message}")]
    ConnectionFailure { url: String, message: String },

    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("gave up after {max_hops} redirects starting at {seed} (next hop: {next})")]
    InfiniteRedirect {
        seed: String,
        next: String,
        max_hops: u32,
    },

    #[error("probe of {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ResolveError::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            ResolveError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            ResolveError::InfiniteRedirect { .. } => ErrorKind::InfiniteRedirect,
            ResolveError::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    pub(crate) fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::MalformedResponse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn connection(url: impl Into<String>, message: impl ToString) -> Self {
        ResolveError::ConnectionFailure {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Map a curl failure for `url` onto the taxonomy.
    pub(crate) fn from_curl(
        url: &str,
        e: &curl::Error,
        stage: CurlStage,
        timeout: Duration,
    ) -> Self {
        match classify_curl_error(e, stage) {
            ErrorKind::Timeout => ResolveError::Timeout {
                url: url.to_string(),
                after: timeout,
            },
            ErrorKind::MalformedResponse => ResolveError::malformed(url, e.description()),
            ErrorKind::InvalidUrl => ResolveError::invalid_url(url, e.description()),
            _ => ResolveError::connection(url, e),
        }
    }

    /// Map a socket I/O failure for `url` onto the taxonomy.
    pub(crate) fn from_io(url: &str, e: &io::Error, timeout: Duration) -> Self {
        match classify_io_error(e) {
            ErrorKind::Timeout => ResolveError::Timeout {
                url: url.to_string(),
                after: timeout,
            },
            _ => ResolveError::connection(url, e),
        }
    }
}

/// Where a curl error came from: building the handle or running the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurlStage {
    Setup,
    Transfer,
}

/// Classify a curl error.
///
/// During setup, a bad or unsupported URL is the caller's input. During the
/// transfer, `CURLE_UNSUPPORTED_PROTOCOL` means libcurl refused what the
/// server sent back (e.g. an HTTP/0.9 or non-HTTP reply).
pub fn classify_curl_error(e: &curl::Error, stage: CurlStage) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.code() == curl_sys::CURLE_FTP_WEIRD_SERVER_REPLY {
        return ErrorKind::MalformedResponse;
    }
    match stage {
        CurlStage::Setup if e.is_url_malformed() || e.is_unsupported_protocol() => {
            ErrorKind::InvalidUrl
        }
        CurlStage::Transfer if e.is_unsupported_protocol() => ErrorKind::MalformedResponse,
        _ => ErrorKind::ConnectionFailure,
    }
}

/// Classify a socket I/O error. Read timeouts surface as `WouldBlock` on some platforms.
pub fn classify_io_error(e: &io::Error) -> ErrorKind {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ErrorKind::Timeout,
        _ => ErrorKind::ConnectionFailure,
    }
}
