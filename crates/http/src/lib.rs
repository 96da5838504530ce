//! HTTP transport for the upload engine, built on `reqwest`.

pub mod client;

pub use client::{HttpError, HttpTransport};
