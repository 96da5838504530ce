//! Upload error types.

/// Why a dotted-path lookup into a JSON response failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("field `{field}` not found in JSON response")]
    MissingField { field: String },

    #[error("cannot read field `{field}` from a non-object value")]
    NotIndexable { field: String },

    #[error("URL extracted from JSON response is empty")]
    EmptyResult,
}

/// Errors produced while uploading a batch.
///
/// Everything except `ConfigMissing` and `InvalidConfig` is scoped to a
/// single item and ends up as that item's `error_message`.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("uploader config `{0}` not found")]
    ConfigMissing(String),

    #[error("invalid uploader config: {0}")]
    InvalidConfig(#[from] imgdrop_protocol::ConfigError),

    #[error("no image data")]
    NoImageData,

    #[error("base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("remote image download failed: {0}")]
    RemoteDownload(Box<UploadError>),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {code}")]
    HttpStatus { code: u16 },

    #[error("JSON parse failed: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    #[error("invalid request arguments: {0}")]
    InvalidArguments(&'static str),
}

impl UploadError {
    /// True for errors that abort the whole batch rather than one item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UploadError::ConfigMissing(_) | UploadError::InvalidConfig(_)
        )
    }
}
