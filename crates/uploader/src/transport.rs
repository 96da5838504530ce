//! Host-provided capabilities: sending HTTP requests and surfacing notifications.
//!
//! The host implements these traits on top of its own HTTP client and
//! notification UI. Using traits keeps the upload engine decoupled from
//! transport and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use imgdrop_protocol::{Request, Response};

use crate::error::UploadError;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Response, UploadError>> + Send + 'a>>;

/// Opaque HTTP transport.
///
/// Implementations return the response for any status code; only failures
/// to complete the exchange (connect, timeout, read) are errors, reported
/// as [`UploadError::Network`].
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> TransportFuture<'_>;
}

/// Fire-and-forget notification sink.
///
/// Must not block; the pipeline never waits on or checks a notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Discards every notification.
impl Notifier for () {
    fn notify(&self, _title: &str, _body: &str) {}
}
