//! HTTP transport.
//!
//! Blocking client with a per-request timeout. The caller owns any retry
//! policy; a single `get` is attempted exactly once.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

use super::Transport;

/// Downloads bundles over HTTP/HTTPS.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a transport with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cacert-refresh/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let body = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", url))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let transport = HttpTransport::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn get_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/cacert.pem");
            then.status(200).body("-----BEGIN CERTIFICATE-----");
        });

        let transport = HttpTransport::new().unwrap();
        let body = transport.get(&server.url("/cacert.pem")).unwrap();

        mock.assert();
        assert_eq!(body, b"-----BEGIN CERTIFICATE-----");
    }

    #[test]
    fn get_non_success_status_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cacert.pem");
            then.status(503);
        });

        let transport = HttpTransport::new().unwrap();
        let err = transport.get(&server.url("/cacert.pem")).unwrap_err();

        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn get_unreachable_host_is_error() {
        let transport = HttpTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let err = transport.get("http://127.0.0.1:1/cacert.pem").unwrap_err();

        assert!(err.to_string().contains("Failed to fetch"));
    }
}
