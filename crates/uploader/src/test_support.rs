//! Mock transport and notifier shared by the unit tests.

use std::sync::Mutex;
use std::time::Duration;

use imgdrop_protocol::{Method, Request, Response};

use crate::error::UploadError;
use crate::transport::{Notifier, Transport, TransportFuture};

type Handler = dyn Fn(&Request) -> Result<Response, UploadError> + Send + Sync;
type Delay = dyn Fn(&Request) -> Duration + Send + Sync;

/// Transport driven by a closure, with an optional per-request delay.
pub(crate) struct FnTransport {
    handler: Box<Handler>,
    delay: Box<Delay>,
    pub requests: Mutex<Vec<Request>>,
}

impl FnTransport {
    pub fn new(
        handler: impl Fn(&Request) -> Result<Response, UploadError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            delay: Box::new(|_| Duration::ZERO),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(
        mut self,
        delay: impl Fn(&Request) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn posts(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == Method::Post)
            .cloned()
            .collect()
    }
}

impl Transport for FnTransport {
    fn send(&self, request: Request) -> TransportFuture<'_> {
        let result = (self.handler)(&request);
        let delay = (self.delay)(&request);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            result
        })
    }
}

/// Echoes the uploaded file name back as `{"data":{"url":"https://cdn.test/<name>"}}`.
pub(crate) fn echo_json(request: &Request) -> Result<Response, UploadError> {
    let name = request.url.rsplit('=').next().unwrap_or_default();
    let body = format!(r#"{{"data":{{"url":"https://cdn.test/{name}"}}}}"#);
    Ok(Response::new(200, body))
}

/// Records every notification.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub seen: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.seen
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}
