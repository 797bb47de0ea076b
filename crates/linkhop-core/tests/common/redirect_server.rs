//! Minimal HTTP/1.1 server that answers HEAD with scripted redirects for integration tests.
//!
//! Each path maps to a raw header block; `{base}` in a block is replaced by the
//! server's own base URL so chains can point back at it. Unknown paths get 404.
//! Every request's raw text is recorded.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{TcpListener, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct RedirectServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl RedirectServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Header block for a redirect from a path to `location`.
pub fn redirect(status: u16, location: &str) -> String {
    format!(
        "HTTP/1.1 {} Moved\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status, location
    )
}

/// Header block for a final (non-redirecting) page.
pub fn ok() -> String {
    "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
}

/// Starts a server on IPv4 loopback in a background thread. Runs until the process exits.
pub fn start(routes: &[(&str, String)]) -> RedirectServer {
    start_on("127.0.0.1:0", routes).expect("bind")
}

/// Like [`start`], on any bind address (e.g. `[::1]:0`).
pub fn start_on(bind: impl ToSocketAddrs, routes: &[(&str, String)]) -> io::Result<RedirectServer> {
    let listener = TcpListener::bind(bind)?;
    let base = format!("http://{}", listener.local_addr()?);
    let routes: HashMap<String, String> = routes
        .iter()
        .map(|(path, raw)| (path.to_string(), raw.replace("{base}", &base)))
        .collect();
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &routes, &recorded));
        }
    });
    Ok(RedirectServer { base, requests })
}

/// Accepts connections and never answers (for timeout tests).
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Answers every request with `raw`, one byte per `delay`.
pub fn start_trickle(raw: &str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let raw = raw.as_bytes().to_vec();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let raw = raw.clone();
            thread::spawn(move || {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                for byte in raw {
                    if stream.write_all(&[byte]).is_err() {
                        return;
                    }
                    thread::sleep(delay);
                }
            });
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, String>,
    recorded: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    recorded.lock().unwrap().push(request);
    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_string());
    let _ = stream.write_all(response.as_bytes());
}
