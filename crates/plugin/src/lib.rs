//! Host integration for the imgdrop uploader.
//!
//! A thin layer: it registers the uploader, declares its config schema and
//! hands each batch to [`imgdrop_uploader::BatchOrchestrator`].

pub mod host;
pub mod notify;
pub mod uploader;

pub use host::{Host, UploaderRegistration};
pub use notify::{Notification, NotificationQueue};
pub use uploader::{CONFIG_KEY, DISPLAY_NAME, ImgdropUploader, UPLOADER_ID};
