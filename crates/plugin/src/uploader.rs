//! The uploader entry points the host calls.

use imgdrop_protocol::{
    ConfigField, DEFAULT_ENDPOINT_URL, DEFAULT_RESPONSE_PATH, DEFAULT_TIMEOUT_MILLIS, FieldKind,
    FieldValidation, ImageItem, ResultItem, UploadConfig,
};
use imgdrop_uploader::{BATCH_FAILED_TITLE, BatchOrchestrator, UploadError};
use serde_json::json;
use tracing::{error, info};

use crate::host::{Host, UploaderRegistration};

/// Registry id of the uploader.
pub const UPLOADER_ID: &str = "imgdrop";

/// Name shown in the host's uploader list.
pub const DISPLAY_NAME: &str = "imgdrop";

/// Key the host stores this uploader's config under.
pub const CONFIG_KEY: &str = "picBed.imgdrop";

const TIMEOUT_MESSAGE: &str = "must be a positive integer";

pub struct ImgdropUploader;

impl ImgdropUploader {
    /// Registers the uploader with the host, advertising the default schema.
    pub fn register<H: Host>(host: &H) {
        let user = host.get_config(CONFIG_KEY);
        host.register_uploader(UploaderRegistration {
            id: UPLOADER_ID,
            name: DISPLAY_NAME,
            schema: Self::config_schema(user.as_ref()),
        });
        info!(id = UPLOADER_ID, "uploader registered");
    }

    /// Declares the recognized options.
    ///
    /// Each field's default is the user's stored value when set, otherwise
    /// the built-in default. Empty or zero values count as unset.
    pub fn config_schema(user: Option<&UploadConfig>) -> Vec<ConfigField> {
        let endpoint = user
            .map(|c| c.endpoint_url.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT_URL);
        let response_path = user
            .and_then(|c| c.response_path())
            .unwrap_or(DEFAULT_RESPONSE_PATH);
        let timeout = user
            .map(|c| c.timeout_millis)
            .filter(|&t| t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MILLIS);

        vec![
            ConfigField {
                name: "endpointUrl".into(),
                kind: FieldKind::Input,
                default: json!(endpoint),
                required: true,
                message: "Upload API endpoint; the file name is appended".into(),
                alias: "API endpoint".into(),
                validate: None,
            },
            ConfigField {
                name: "responsePath".into(),
                kind: FieldKind::Input,
                default: json!(response_path),
                required: false,
                message: "JSON path to the image URL (e.g. data.url)".into(),
                alias: "JSON path".into(),
                validate: None,
            },
            ConfigField {
                name: "timeoutMillis".into(),
                kind: FieldKind::Input,
                default: json!(timeout),
                required: true,
                message: "Request timeout (milliseconds)".into(),
                alias: "Timeout".into(),
                validate: Some(FieldValidation::PositiveInteger {
                    message: TIMEOUT_MESSAGE.into(),
                }),
            },
        ]
    }

    /// Uploads a batch using the config stored under [`CONFIG_KEY`].
    pub async fn handle<H: Host>(
        host: &H,
        items: &[ImageItem],
    ) -> Result<Vec<ResultItem>, UploadError> {
        let Some(config) = host.get_config(CONFIG_KEY) else {
            let err = UploadError::ConfigMissing(CONFIG_KEY.into());
            error!(error = %err, "batch rejected");
            host.notify(BATCH_FAILED_TITLE, &err.to_string());
            return Err(err);
        };

        BatchOrchestrator::new(host.transport(), host)
            .run(items, &config)
            .await
    }
}
