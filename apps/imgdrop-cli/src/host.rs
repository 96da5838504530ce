//! Host implementation backing the command-line tool.

use std::sync::Mutex;

use imgdrop_http::HttpTransport;
use imgdrop_plugin::{CONFIG_KEY, Host, Notification, NotificationQueue, UploaderRegistration};
use imgdrop_protocol::{Request, UploadConfig};
use imgdrop_uploader::{Notifier, Transport, TransportFuture, UploadError};

/// Stand-in transport for commands that never touch the network.
struct Offline;

impl Transport for Offline {
    fn send(&self, request: Request) -> TransportFuture<'_> {
        Box::pin(async move {
            Err(UploadError::Network(format!(
                "offline host cannot send {}",
                request.url
            )))
        })
    }
}

/// Serves one config, sends over HTTP, and queues notifications for the
/// end-of-run summary.
pub struct CliHost {
    config: UploadConfig,
    transport: Option<HttpTransport>,
    notifications: Mutex<NotificationQueue>,
    registry: Mutex<Vec<UploaderRegistration>>,
}

impl CliHost {
    pub fn new(config: UploadConfig, transport: HttpTransport) -> Self {
        Self::with_transport(config, Some(transport))
    }

    /// Host without an HTTP client, for registration and schema output.
    pub fn offline(config: UploadConfig) -> Self {
        Self::with_transport(config, None)
    }

    fn with_transport(config: UploadConfig, transport: Option<HttpTransport>) -> Self {
        Self {
            config,
            transport,
            notifications: Mutex::new(NotificationQueue::new()),
            registry: Mutex::new(Vec::new()),
        }
    }

    /// Removes and returns every notification raised so far.
    pub fn take_notifications(&self) -> Vec<Notification> {
        match self.notifications.lock() {
            Ok(mut queue) => queue.drain(),
            Err(poisoned) => poisoned.into_inner().drain(),
        }
    }

    /// Looks up a registered uploader by id.
    pub fn registration(&self, id: &str) -> Option<UploaderRegistration> {
        let registry = match self.registry.lock() {
            Ok(r) => r,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry.iter().find(|r| r.id == id).cloned()
    }
}

impl Notifier for CliHost {
    fn notify(&self, title: &str, body: &str) {
        tracing::warn!(title, body, "notification");
        if let Ok(mut queue) = self.notifications.lock() {
            queue.push(title, body);
        }
    }
}

impl Host for CliHost {
    fn get_config(&self, key: &str) -> Option<UploadConfig> {
        (key == CONFIG_KEY).then(|| self.config.clone())
    }

    fn register_uploader(&self, registration: UploaderRegistration) {
        tracing::debug!(id = registration.id, "uploader registered with CLI host");
        if let Ok(mut registry) = self.registry.lock() {
            registry.retain(|r| r.id != registration.id);
            registry.push(registration);
        }
    }

    fn transport(&self) -> &dyn Transport {
        match &self.transport {
            Some(http) => http,
            None => &Offline,
        }
    }
}
