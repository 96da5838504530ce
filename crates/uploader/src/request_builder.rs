//! Upload request construction.

use std::path::Path;

use imgdrop_protocol::Request;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::UploadError;

/// Client identifier sent on every outbound request.
pub const USER_AGENT: &str = "PicGo";

/// Characters escaped when appending a file name to the endpoint.
///
/// Matches JavaScript's `encodeURIComponent`: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the POST that uploads `image` as `file_name` to `endpoint_url`.
///
/// The encoded file name is appended to the endpoint as-is, so endpoints
/// are expected to end with a query key such as `?filename=`.
pub fn build_upload_request(
    image: Vec<u8>,
    endpoint_url: &str,
    file_name: &str,
) -> Result<Request, UploadError> {
    if image.is_empty() {
        return Err(UploadError::InvalidArguments("image data is empty"));
    }
    if endpoint_url.is_empty() {
        return Err(UploadError::InvalidArguments("endpoint URL is empty"));
    }
    if file_name.is_empty() {
        return Err(UploadError::InvalidArguments("file name is empty"));
    }

    let url = format!("{endpoint_url}{}", encode_file_name(file_name));
    Ok(Request::post(url, image)
        .with_header("Content-Type", detect_content_type(file_name))
        .with_header("User-Agent", USER_AGENT)
        .with_header("Connection", "keep-alive"))
}

/// Percent-encodes a file name for use inside a URL component.
pub fn encode_file_name(file_name: &str) -> String {
    utf8_percent_encode(file_name, COMPONENT).to_string()
}

/// Detects the MIME content type from a file name extension.
pub fn detect_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
