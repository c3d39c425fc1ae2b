//! Mock transactions API server for testing
//!
//! Serves `GET /transactions` from a plain `TcpListener` on a background
//! thread so the real reqwest client can be exercised end to end, including
//! authentication, rate-limit and malformed-body failures.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crate::domain::TransactionsPayload;

/// What the mock server answers with
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 with the payload serialized as JSON
    Payload(TransactionsPayload),
    /// 200 with an arbitrary body
    RawBody(String),
    /// Given status code with an error body
    Status(u16),
}

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub response: MockResponse,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            response: MockResponse::Payload(TransactionsPayload::default()),
            delay_ms: 0,
        }
    }
}

/// Mock transactions API server
pub struct MockApiServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockApiServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let counter = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &counter);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Number of `/transactions` requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, requests: &AtomicUsize) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    }

    let method = parts[0];
    let path = parts[1].split('?').next().unwrap_or(parts[1]);

    match (method, path) {
        ("GET", "/transactions") => {
            requests.fetch_add(1, Ordering::SeqCst);
            match &config.response {
                MockResponse::Payload(payload) => {
                    let json = serde_json::to_string(payload).unwrap_or_default();
                    send_response(&mut stream, 200, &json);
                }
                MockResponse::RawBody(body) => send_response(&mut stream, 200, body),
                MockResponse::Status(status) => {
                    send_response(&mut stream, *status, r#"{"error": "mock failure"}"#)
                }
            }
        }
        ("GET", _) => send_response(&mut stream, 404, r#"{"error": "Endpoint not found"}"#),
        _ => send_response(&mut stream, 405, r#"{"error": "Method not allowed"}"#),
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        429 => "Too Many Requests",
        _ => "Error",
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::demo::demo_payload;
    use crate::adapters::http::HttpTransactionSource;
    use crate::domain::result::Error;
    use crate::ports::TransactionSource;

    fn start(response: MockResponse) -> MockApiServer {
        MockApiServer::start(MockConfig {
            response,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_payload() {
        let payload = demo_payload();
        let server = start(MockResponse::Payload(payload.clone()));

        let source = HttpTransactionSource::new(&server.base_url()).unwrap();
        let fetched = source.fetch_transactions().await.unwrap();

        assert_eq!(fetched, payload);
        assert_eq!(server.request_count(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let server = start(MockResponse::Status(401));
        let source = HttpTransactionSource::new(&server.base_url()).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Authentication"));
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let server = start(MockResponse::Status(429));
        let source = HttpTransactionSource::new(&server.base_url()).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        let msg = err.to_string().to_lowercase();
        assert!(msg.contains("rate limit"), "Expected 'rate limit' in error, got: {}", msg);
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = start(MockResponse::Status(500));
        let source = HttpTransactionSource::new(&server.base_url()).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_wrong_path_is_not_found() {
        let server = start(MockResponse::Payload(TransactionsPayload::default()));
        let source = HttpTransactionSource::new(&format!("{}/v2", server.base_url())).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = start(MockResponse::RawBody(r#"{"transactions": "nope"}"#.to_string()));
        let source = HttpTransactionSource::new(&server.base_url()).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockApiServer::start(MockConfig {
            delay_ms: 2_500,
            ..Default::default()
        })
        .unwrap();
        let source = HttpTransactionSource::with_timeout(&server.base_url(), 1).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let source = HttpTransactionSource::new(&format!("http://127.0.0.1:{}", port)).unwrap();

        let err = source.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
