//! Downloads remote source images before upload.

use std::time::Duration;

use imgdrop_protocol::Request;
use tracing::debug;
use url::{Host, Url};

use crate::error::UploadError;
use crate::request_builder::USER_AGENT;
use crate::transport::Transport;

/// Fetches image bytes from `http(s)` URLs through the host transport.
pub struct RemoteFetcher<'a> {
    transport: &'a dyn Transport,
}

impl<'a> RemoteFetcher<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Downloads `url`, failing unless the server answers `200 OK` within `timeout`.
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, UploadError> {
        validate_url(url)?;

        let request = Request::get(url)
            .with_header("User-Agent", USER_AGENT)
            .with_timeout(timeout);

        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| {
                UploadError::Network(format!("timed out after {}ms", timeout.as_millis()))
            })??;

        if response.status != 200 {
            return Err(UploadError::HttpStatus {
                code: response.status,
            });
        }

        debug!(url, bytes = response.body.len(), "remote image fetched");
        Ok(response.body)
    }
}

/// Checks that `url` looks like `http(s)://host[/path]`.
///
/// Hosts must be IP literals, `localhost`, or contain a dot.
pub fn validate_url(url: &str) -> Result<(), UploadError> {
    let invalid = || UploadError::InvalidUrl(url.to_string());

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }

    match parsed.host() {
        Some(Host::Domain(domain)) if domain == "localhost" || domain.contains('.') => Ok(()),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => Ok(()),
        _ => Err(invalid()),
    }
}
