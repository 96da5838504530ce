//! `reqwest` implementation of [`Transport`].

use imgdrop_protocol::{Method, Request, Response};
use imgdrop_uploader::{Transport, TransportFuture, UploadError};
use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;

/// Errors from the HTTP transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid header `{0}`")]
    InvalidHeader(String),
}

impl From<HttpError> for UploadError {
    fn from(e: HttpError) -> Self {
        UploadError::Network(e.to_string())
    }
}

/// Sends upload and download requests over a shared `reqwest` client.
///
/// Any HTTP status is returned as a [`Response`]; the upload engine
/// decides what counts as success.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Result<Self, HttpError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }

    /// Wraps an existing client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        debug!(method = request.method.as_str(), url = %request.url, bytes = request.body.len(), "sending request");

        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(name.as_str().to_string()))?;
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if request.method == Method::Post {
            builder = builder.body(request.body);
        }

        let resp = builder.send().await.map_err(map_reqwest)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(map_reqwest)?.to_vec();
        debug!(status, bytes = body.len(), "response received");

        Ok(Response::new(status, body))
    }
}

fn map_reqwest(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Http(e)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> TransportFuture<'_> {
        Box::pin(async move { self.execute(request).await.map_err(UploadError::from) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Reads one HTTP/1.1 request (head plus Content-Length body).
    async fn read_request(stream: &mut tokio::net::TcpStream) -> Vec<u8> {
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let len = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + len {
                    break;
                }
            }
        }
        raw
    }

    /// Starts a mock HTTP server that answers once and hands back the raw request.
    async fn mock_server(
        status: u16,
        body: &str,
    ) -> (String, oneshot::Receiver<Vec<u8>>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let raw = read_request(&mut stream).await;
                let _ = tx.send(raw);

                let resp = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, rx, handle)
    }

    #[tokio::test]
    async fn post_sends_headers_and_body() {
        let (url, rx, handle) = mock_server(200, r#"{"data":{"url":"https://cdn/a.png"}}"#).await;
        let transport = HttpTransport::new().unwrap();

        let request = Request::post(format!("{url}/upload?filename=a.png"), b"IMGDATA".to_vec())
            .with_header("Content-Type", "image/png")
            .with_header("User-Agent", "PicGo");
        let resp = transport.send(request).await.unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.text(), r#"{"data":{"url":"https://cdn/a.png"}}"#);

        let raw = String::from_utf8(rx.await.unwrap()).unwrap();
        assert!(raw.starts_with("POST /upload?filename=a.png HTTP/1.1\r\n"));
        let lower = raw.to_lowercase();
        assert!(lower.contains("content-type: image/png"));
        assert!(lower.contains("user-agent: picgo"));
        assert!(raw.ends_with("IMGDATA"));

        handle.abort();
    }

    #[tokio::test]
    async fn get_returns_body() {
        let (url, _rx, handle) = mock_server(200, "raw-bytes").await;
        let transport = HttpTransport::new().unwrap();

        let resp = transport.send(Request::get(format!("{url}/img.png"))).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"raw-bytes");

        handle.abort();
    }

    #[tokio::test]
    async fn error_status_is_not_a_transport_error() {
        let (url, _rx, handle) = mock_server(503, r#"{"error":"busy"}"#).await;
        let transport = HttpTransport::new().unwrap();

        let resp = transport.send(Request::get(url)).await.unwrap();
        assert_eq!(resp.status, 503);
        assert!(!resp.is_success());

        handle.abort();
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::new().unwrap();
        let err = transport
            .send(Request::get(format!("http://127.0.0.1:{port}/")))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Network(_)));
    }

    #[tokio::test]
    async fn request_timeout_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        // Accept but never answer.
        let handle = tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(stream);
            }
        });

        let transport = HttpTransport::new().unwrap();
        let request = Request::get(format!("http://127.0.0.1:{port}/"))
            .with_timeout(Duration::from_millis(100));
        let err = transport.send(request).await.unwrap_err();

        assert_eq!(err.to_string(), "network error: request timed out");
        handle.abort();
    }

    #[tokio::test]
    async fn invalid_header_rejected() {
        let transport = HttpTransport::new().unwrap();
        let request = Request::get("http://127.0.0.1:1/").with_header("bad header", "x");
        let err = transport.send(request).await.unwrap_err();
        assert_eq!(err.to_string(), "network error: invalid header `bad header`");
    }
}
