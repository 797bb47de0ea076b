//! HEAD probe over a plain TCP connection.
//!
//! Writes a literal HTTP/1.1 HEAD request and reads the response until the
//! blank line that ends the header block. The read is bounded by
//! `max_header_bytes`; a larger header block is rejected, not truncated.
//! `timeout` is a deadline for the whole exchange after connecting, not a
//! per-read allowance.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::{Duration, Instant};
use url::Url;

use super::{ProbeResponse, Transport, TransportSettings};
use crate::error::ResolveError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const READ_CHUNK: usize = 1024;

/// Raw-socket transport. Plain `http` only.
#[derive(Debug, Clone)]
pub struct SocketTransport {
    settings: TransportSettings,
}

impl SocketTransport {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    fn connect(&self, url: &Url) -> Result<TcpStream, ResolveError> {
        // Handles bracketed IPv6 literals, which `(host, port)` lookups do not.
        let addrs: Vec<SocketAddr> = url
            .socket_addrs(|| Some(80))
            .map_err(|e| ResolveError::connection(url.as_str(), e))?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.settings.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    tracing::debug!(%addr, "connect failed: {}", e);
                    last_err = Some(e);
                }
            }
        }
        Err(match last_err {
            Some(e) => ResolveError::from_io(url.as_str(), &e, self.settings.connect_timeout),
            None => ResolveError::connection(
                url.as_str(),
                format!("{} resolved to no address", url.host_str().unwrap_or_default()),
            ),
        })
    }
}

impl Transport for SocketTransport {
    fn name(&self) -> &'static str {
        "socket"
    }

    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError> {
        // A hop can point at https mid-chain; without TLS that host is unreachable here.
        if url.scheme() != "http" {
            return Err(ResolveError::connection(
                url.as_str(),
                format!("socket transport has no {} support", url.scheme()),
            ));
        }
        if url.host_str().is_none() {
            return Err(ResolveError::invalid_url(url.as_str(), "missing host"));
        }
        let timeout = self.settings.timeout;
        let io_err = |e: io::Error| ResolveError::from_io(url.as_str(), &e, timeout);

        let mut stream = self.connect(url)?;
        let deadline = Instant::now() + timeout;

        let request = head_request(url, self.settings.user_agent.as_deref());
        let write_timeout = remaining(deadline).map_err(io_err)?;
        stream.set_write_timeout(Some(write_timeout)).map_err(io_err)?;
        stream.write_all(request.as_bytes()).map_err(io_err)?;
        stream.flush().map_err(io_err)?;

        let mut reader = DeadlineReader {
            stream: &stream,
            deadline,
        };
        let raw = read_header_block(&mut reader, self.settings.max_header_bytes).map_err(
            |e| match e {
                HeaderReadError::Io(e) => io_err(e),
                HeaderReadError::TooLarge(limit) => ResolveError::malformed(
                    url.as_str(),
                    format!("header block exceeds {} bytes", limit),
                ),
            },
        )?;

        let text = String::from_utf8_lossy(&raw).into_owned();
        let response = ProbeResponse::from_raw(text)
            .map_err(|e| ResolveError::malformed(url.as_str(), e.to_string()))?;
        tracing::debug!(url = %url, status = response.status, bytes = raw.len(), "socket HEAD probe");
        Ok(response)
    }
}

/// Time left before `deadline`, or `TimedOut` once it has passed.
fn remaining(deadline: Instant) -> io::Result<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(io::Error::new(io::ErrorKind::TimedOut, "probe deadline passed"));
    }
    Ok(left)
}

/// Reads from `stream` with the socket timeout shrunk to what is left before `deadline`.
struct DeadlineReader<'a> {
    stream: &'a TcpStream,
    deadline: Instant,
}

impl Read for DeadlineReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.set_read_timeout(Some(remaining(self.deadline)?))?;
        self.stream.read(buf)
    }
}

/// Build the HEAD request text for `url`.
pub(crate) fn head_request(url: &Url, user_agent: Option<&str>) -> String {
    let mut target = url.path().to_string();
    if let Some(q) = url.query() {
        target.push('?');
        target.push_str(q);
    }
    let host = url.host_str().unwrap_or_default();
    let host_header = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let mut request = format!("HEAD {} HTTP/1.1\r\nHost: {}\r\n", target, host_header);
    if let Some(ua) = user_agent {
        request.push_str(&format!("User-Agent: {}\r\n", ua));
    }
    request.push_str("Connection: close\r\n\r\n");
    request
}

#[derive(Debug)]
pub(crate) enum HeaderReadError {
    Io(io::Error),
    TooLarge(usize),
}

/// Read until the header terminator, EOF, or `limit` bytes.
///
/// Bytes after the terminator are dropped. EOF before the terminator returns
/// whatever arrived and leaves validation to the status-line parser.
pub(crate) fn read_header_block<R: Read>(
    reader: &mut R,
    limit: usize,
) -> Result<Vec<u8>, HeaderReadError> {
    let mut buf: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(buf),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HeaderReadError::Io(e)),
        };
        // Terminator may straddle two reads.
        let search_from = buf.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = find_terminator(&buf[search_from..]) {
            buf.truncate(search_from + pos + HEADER_TERMINATOR.len());
            if buf.len() > limit {
                return Err(HeaderReadError::TooLarge(limit));
            }
            return Ok(buf);
        }
        if buf.len() > limit {
            return Err(HeaderReadError::TooLarge(limit));
        }
    }
}

fn find_terminator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}
