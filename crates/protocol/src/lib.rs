//! Data types shared across the imgdrop workspace.
//!
//! Nothing in here performs I/O. The uploader, HTTP transport and host
//! plugin crates all speak in terms of these types.

pub mod request;
pub mod schema;
pub mod types;

// Re-export primary types for convenience.
pub use request::{Method, Request, Response};
pub use schema::{ConfigField, FieldKind, FieldValidation};
pub use types::{
    ConfigError, DEFAULT_ENDPOINT_URL, DEFAULT_RESPONSE_PATH, DEFAULT_TIMEOUT_MILLIS, ImageItem, ResultItem,
    UploadConfig,
};
