use imgdrop_protocol::{ConfigField, UploadConfig};
use imgdrop_uploader::{Notifier, Transport};

/// What the uploader advertises to the host registry.
#[derive(Debug, Clone, PartialEq)]
pub struct UploaderRegistration {
    pub id: &'static str,
    pub name: &'static str,
    pub schema: Vec<ConfigField>,
}

/// Capabilities the host application provides to the uploader.
///
/// Notifications go through the [`Notifier`] supertrait.
pub trait Host: Notifier {
    /// Looks up the stored uploader config under `key`.
    fn get_config(&self, key: &str) -> Option<UploadConfig>;

    /// Adds an uploader to the host's registry.
    fn register_uploader(&self, registration: UploaderRegistration);

    /// HTTP transport used for downloads and uploads.
    fn transport(&self) -> &dyn Transport;
}
