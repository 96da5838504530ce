use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endpoint used when the host has no `endpointUrl` configured.
///
/// The file name is appended verbatim, so the URL ends with the query key.
pub const DEFAULT_ENDPOINT_URL: &str = "https://p.sda1.dev/api/v1/upload_external_noform?filename=";

/// Default dotted path to the image URL inside the JSON response.
pub const DEFAULT_RESPONSE_PATH: &str = "data.url";

/// Default timeout for remote fetches and upload round trips.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;

/// A single image queued for upload.
///
/// Bytes come from `binary_data`, then `base64_data`, then `source_url`,
/// in that order of preference. Any other keys the host attached are kept
/// in `extra` and copied into the matching [`ResultItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(skip)]
    pub binary_data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageItem {
    /// Creates an item backed by in-memory bytes.
    pub fn from_bytes(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            binary_data: Some(data),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Creates an item backed by a base64 string.
    pub fn from_base64(file_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            base64_data: Some(data.into()),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Creates an item whose bytes must be downloaded first.
    pub fn from_url(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source_url: Some(url.into()),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Drops any inline image bytes still held by the item.
    pub fn discard_payload(&mut self) {
        self.binary_data = None;
        self.base64_data = None;
    }

    /// Attaches a pass-through metadata field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Outcome of uploading one [`ImageItem`].
///
/// On success `result_url` is non-empty and `error_message` is `None`.
/// On failure `result_url` is empty and `error_message` holds the cause.
/// There are no byte fields: image data never outlives the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub file_name: String,
    pub result_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResultItem {
    /// Builds a successful result carrying the item's metadata.
    pub fn succeeded(item: &ImageItem, result_url: impl Into<String>) -> Self {
        Self {
            file_name: item.file_name.clone(),
            result_url: result_url.into(),
            error_message: None,
            source_url: item.source_url.clone(),
            extra: passthrough(&item.extra),
        }
    }

    /// Builds a failed result carrying the item's metadata.
    pub fn failed(item: &ImageItem, error_message: impl Into<String>) -> Self {
        Self {
            file_name: item.file_name.clone(),
            result_url: String::new(),
            error_message: Some(error_message.into()),
            source_url: item.source_url.clone(),
            extra: passthrough(&item.extra),
        }
    }

    /// Returns true if the upload produced a URL.
    pub fn is_success(&self) -> bool {
        self.error_message.is_none() && !self.result_url.is_empty()
    }
}

/// Keys that may smuggle image bytes in through `extra`.
const BYTE_KEYS: [&str; 4] = ["binaryData", "base64Data", "buffer", "base64Image"];

/// Keys owned by [`ResultItem`]'s named fields; a flattened copy would
/// serialize as a duplicate.
const RESULT_KEYS: [&str; 4] = ["fileName", "resultUrl", "errorMessage", "sourceUrl"];

fn passthrough(
    extra: &serde_json::Map<String, serde_json::Value>,
) -> serde_json::Map<String, serde_json::Value> {
    extra
        .iter()
        .filter(|(k, _)| !BYTE_KEYS.contains(&k.as_str()) && !RESULT_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Errors from [`UploadConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("endpoint URL is empty")]
    EmptyEndpoint,

    #[error("timeout must be a positive integer")]
    ZeroTimeout,
}

/// Uploader settings, read-only for the duration of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    pub endpoint_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_path: Option<String>,
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            response_path: Some(DEFAULT_RESPONSE_PATH.into()),
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }
}

impl UploadConfig {
    /// Creates a config for `endpoint_url` that uses the raw response body as the URL.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            response_path: None,
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }

    pub fn with_response_path(mut self, path: impl Into<String>) -> Self {
        self.response_path = Some(path.into());
        self
    }

    pub fn with_timeout_millis(mut self, millis: u64) -> Self {
        self.timeout_millis = millis;
        self
    }

    /// Returns the configured extraction path, or `None` when the raw body
    /// should be used.
    pub fn response_path(&self) -> Option<&str> {
        self.response_path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    /// Checks the invariants a batch relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.timeout_millis == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
