//! Per-item upload: resolve bytes, POST, extract the result URL.
//!
//! A task never fails outward. Every error is turned into an
//! [`UploadOutcome::Failed`] carrying an empty URL and the error text.

use base64::{Engine, engine::general_purpose::STANDARD};
use imgdrop_protocol::{ImageItem, Response, ResultItem, UploadConfig};
use tracing::{debug, warn};

use crate::error::{ExtractionFailure, UploadError};
use crate::extract::extract_url;
use crate::fetcher::RemoteFetcher;
use crate::request_builder::build_upload_request;
use crate::transport::{Notifier, Transport};

/// Number of response characters included in diagnostic logs.
const SNIPPET_CHARS: usize = 200;

/// Terminal state of an [`UploadTask`].
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Succeeded(ResultItem),
    Failed(ResultItem),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded(_))
    }

    pub fn into_result(self) -> ResultItem {
        match self {
            UploadOutcome::Succeeded(r) | UploadOutcome::Failed(r) => r,
        }
    }
}

/// Uploads a single item. Owns a private copy of the item.
pub struct UploadTask<'a> {
    index: usize,
    item: ImageItem,
    config: &'a UploadConfig,
    transport: &'a dyn Transport,
}

impl<'a> UploadTask<'a> {
    /// Creates a task for the item at zero-based `index` in the batch.
    pub fn new(
        index: usize,
        item: ImageItem,
        config: &'a UploadConfig,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            index,
            item,
            config,
            transport,
        }
    }

    /// Runs the task to a terminal state.
    ///
    /// Failures are reported to `notifier` once, titled with the item's
    /// 1-based position.
    pub async fn run(mut self, notifier: &dyn Notifier) -> UploadOutcome {
        match self.execute().await {
            Ok(url) => {
                debug!(index = self.index, file = %self.item.file_name, url = %url, "upload succeeded");
                UploadOutcome::Succeeded(ResultItem::succeeded(&self.item, url))
            }
            Err(e) => {
                let message = e.to_string();
                warn!(index = self.index, file = %self.item.file_name, error = %message, "upload failed");
                notifier.notify(
                    &format!("Image {} upload failed", self.index + 1),
                    &message,
                );
                UploadOutcome::Failed(ResultItem::failed(&self.item, message))
            }
        }
    }

    async fn execute(&mut self) -> Result<String, UploadError> {
        let image = self.resolve_bytes().await?;

        let timeout = self.config.timeout();
        let request = build_upload_request(image, &self.config.endpoint_url, &self.item.file_name)?
            .with_timeout(timeout);

        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| {
                UploadError::Network(format!("timed out after {}ms", timeout.as_millis()))
            })??;

        // Sent; the working copy no longer needs its bytes.
        self.item.discard_payload();

        if !response.is_success() {
            return Err(UploadError::HttpStatus {
                code: response.status,
            });
        }

        self.result_url(&response)
    }

    /// Picks the image bytes: inline, then base64, then remote download.
    ///
    /// Empty sources count as absent and fall through to the next one.
    async fn resolve_bytes(&mut self) -> Result<Vec<u8>, UploadError> {
        if let Some(data) = self.item.binary_data.take().filter(|d| !d.is_empty()) {
            return Ok(data);
        }

        let encoded = self
            .item
            .base64_data
            .as_deref()
            .map(|s| strip_data_uri(s.trim()))
            .filter(|s| !s.is_empty());
        if let Some(encoded) = encoded {
            let data = STANDARD.decode(encoded)?;
            if !data.is_empty() {
                return Ok(data);
            }
        }

        if let Some(url) = self.item.source_url.as_deref().filter(|u| !u.trim().is_empty()) {
            let data = RemoteFetcher::new(self.transport)
                .fetch(url, self.config.timeout())
                .await
                .map_err(|e| UploadError::RemoteDownload(Box::new(e)))?;
            if !data.is_empty() {
                return Ok(data);
            }
        }

        Err(UploadError::NoImageData)
    }

    fn result_url(&self, response: &Response) -> Result<String, UploadError> {
        let Some(path) = self.config.response_path() else {
            let body = response.text();
            if body.is_empty() {
                return Err(ExtractionFailure::EmptyResult.into());
            }
            return Ok(body);
        };

        let json: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
            warn!(index = self.index, response = %snippet(response), "response is not JSON");
            UploadError::JsonParse(e)
        })?;

        extract_url(&json, path).map_err(|e| {
            warn!(index = self.index, path, response = %snippet(response), "result URL not found");
            UploadError::Extraction(e)
        })
    }
}

/// Strips a `data:<mime>;base64,` prefix if present.
fn strip_data_uri(encoded: &str) -> &str {
    match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    }
}

fn snippet(response: &Response) -> String {
    response.text().chars().take(SNIPPET_CHARS).collect()
}
