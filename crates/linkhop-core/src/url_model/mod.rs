//! URL handling for the redirect loop.
//!
//! Validates seeds, turns raw `Location` values into the next URL to probe,
//! and appends the forwarding suffix to a resolved URL.

mod link;
mod target;

pub use link::append_link;
pub use target::redirect_target;

use crate::error::ResolveError;
use url::Url;

/// Parse a seed URL. Must be absolute, `http` or `https`, and carry a host.
pub fn parse_seed(seed: &str) -> Result<Url, ResolveError> {
    let url = Url::parse(seed).map_err(|e| ResolveError::invalid_url(seed, e.to_string()))?;
    check_probeable(&url).map_err(|reason| ResolveError::invalid_url(seed, reason))?;
    Ok(url)
}

/// Returns why `url` cannot be probed, if it cannot.
pub(crate) fn check_probeable(url: &Url) -> Result<(), String> {
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {:?}", other)),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parse_seed_accepts_http_and_https() {
        let u = parse_seed("http://sourceforge.net/p/nestededitor/code/").unwrap();
        assert_eq!(u.host_str(), Some("sourceforge.net"));
        assert!(parse_seed("https://example.org/repo").is_ok());
    }

    #[test]
    fn parse_seed_rejects_relative() {
        let err = parse_seed("/p/nestededitor/code/").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }

    #[test]
    fn parse_seed_rejects_other_schemes() {
        let err = parse_seed("ftp://example.org/pub").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn parse_seed_rejects_garbage() {
        assert!(parse_seed("not a url").is_err());
        assert!(parse_seed("").is_err());
    }
}
