//! Batch image upload core.
//!
//! This crate implements the **upload engine**. It has no transport or
//! host dependencies: the host provides a [`Transport`] to send HTTP
//! requests and a [`Notifier`] to surface failures.
//!
//! # Pipeline (per item)
//!
//! 1. **Resolve**: take inline bytes, decode base64, or fetch the source URL
//! 2. **Upload**: POST the bytes to the configured endpoint
//! 3. **Extract**: pull the result URL out of the response via a dotted path
//!
//! The [`BatchOrchestrator`] runs one pipeline per item concurrently and
//! returns results in input order.

pub mod error;
pub mod extract;
pub mod fetcher;
pub mod orchestrator;
pub mod request_builder;
pub mod task;
pub mod transport;

#[cfg(test)]
mod test_support;

// Re-export primary types for convenience.
pub use error::{ExtractionFailure, UploadError};
pub use extract::{extract, extract_url};
pub use fetcher::RemoteFetcher;
pub use orchestrator::{BATCH_FAILED_TITLE, BatchOrchestrator};
pub use request_builder::{build_upload_request, detect_content_type, encode_file_name};
pub use task::{UploadOutcome, UploadTask};
pub use transport::{Notifier, Transport, TransportFuture};
