//! Parse the raw header block returned by a HEAD probe.

use thiserror::Error;

/// Literal, case-sensitive marker that introduces a redirect target.
pub const LOCATION_MARKER: &str = "Location: ";

/// Why a header block could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderParseError {
    #[error("empty response")]
    Empty,
    #[error("bad status line {0:?}")]
    BadStatusLine(String),
    #[error("Location header is not terminated by CRLF")]
    UnterminatedLocation,
}

/// Parse the status code out of the first line (`HTTP/<version> <code> ...`).
pub fn parse_status_line(raw: &str) -> Result<u16, HeaderParseError> {
    let line = raw.split("\r\n").next().unwrap_or("");
    if line.trim().is_empty() {
        return Err(HeaderParseError::Empty);
    }
    let bad = || HeaderParseError::BadStatusLine(line.to_string());

    let mut parts = line.splitn(3, ' ');
    let version = parts.next().ok_or_else(bad)?;
    if !version.starts_with("HTTP/") {
        return Err(bad());
    }
    let code = parts.next().ok_or_else(bad)?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    code.parse::<u16>().map_err(|_| bad())
}

/// Extract the redirect target from raw response text.
///
/// Returns `Ok(None)` when there is no `Location: ` marker or its value is
/// empty. The value runs from just after the marker up to the next CRLF and
/// is returned verbatim.
pub fn extract_location(raw: &str) -> Result<Option<&str>, HeaderParseError> {
    let start = match raw.find(LOCATION_MARKER) {
        Some(pos) => pos + LOCATION_MARKER.len(),
        None => return Ok(None),
    };
    let rest = &raw[start..];
    let end = rest
        .find("\r\n")
        .ok_or(HeaderParseError::UnterminatedLocation)?;
    let value = &rest[..end];
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}
