//! HTTP client for remote command listings.
//!
//! Speaks the GitHub contents API shape: a GET on a directory URL returns
//! a JSON array of entries, and each file entry carries a raw download URL.

use reqwest::blocking::{Client, RequestBuilder, Response};

use super::{RemoteEntry, RemoteSource};
use crate::error::{FabrunError, Result};

/// User agent sent with every request. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("fabrun/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP implementation of [`RemoteSource`].
pub struct HttpSource {
    /// HTTP client instance.
    client: Client,
}

impl HttpSource {
    /// Creates a new HTTP source.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = request.send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FabrunError::Server { status, message });
        }

        Ok(response)
    }
}

impl RemoteSource for HttpSource {
    fn list(&self, url: &str) -> Result<Vec<RemoteEntry>> {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        let body = self.send(url, request)?.text()?;
        serde_json::from_str(&body).map_err(|e| FabrunError::Network {
            url: url.to_string(),
            message: format!("unexpected listing format: {e}"),
        })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self.send(url, self.client.get(url))?.bytes()?;
        Ok(bytes.to_vec())
    }
}
