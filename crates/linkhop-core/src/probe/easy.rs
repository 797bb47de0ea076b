//! HEAD probe over libcurl's easy interface.

use curl::easy::{Easy, HttpVersion};
use url::Url;

use super::{ProbeResponse, Transport, TransportSettings};
use crate::error::{CurlStage, ResolveError};

/// Rich-client transport. Redirects are never followed by curl itself.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    settings: TransportSettings,
}

impl CurlTransport {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    fn configure(&self, easy: &mut Easy, url: &Url) -> Result<(), curl::Error> {
        easy.url(url.as_str())?;
        easy.nobody(true)?; // HEAD request
        easy.follow_location(false)?;
        easy.http_version(HttpVersion::V11)?;
        easy.connect_timeout(self.settings.connect_timeout)?;
        easy.timeout(self.settings.timeout)?;
        if let Some(ua) = &self.settings.user_agent {
            easy.useragent(ua)?;
        }
        Ok(())
    }
}

impl Transport for CurlTransport {
    fn name(&self) -> &'static str {
        "curl"
    }

    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    fn probe(&self, url: &Url) -> Result<ProbeResponse, ResolveError> {
        let timeout = self.settings.timeout;
        let mut raw: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        self.configure(&mut easy, url)
            .map_err(|e| ResolveError::from_curl(url.as_str(), &e, CurlStage::Setup, timeout))?;
        let transfer_err =
            |e: curl::Error| ResolveError::from_curl(url.as_str(), &e, CurlStage::Transfer, timeout);

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    raw.extend_from_slice(data);
                    true
                })
                .map_err(transfer_err)?;
            transfer.perform().map_err(transfer_err)?;
        }

        let text = String::from_utf8_lossy(&raw).into_owned();
        let response = ProbeResponse::from_raw(text)
            .map_err(|e| ResolveError::malformed(url.as_str(), e.to_string()))?;
        tracing::debug!(url = %url, status = response.status, "curl HEAD probe");
        Ok(response)
    }
}
