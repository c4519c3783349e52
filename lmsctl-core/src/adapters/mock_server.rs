//! Mock LMS API server for testing
//!
//! Serves the two account endpoints over plain HTTP/1.1 on a random local
//! port and records every request it receives:
//! - PUT /user/update answers with the configured status and body
//! - DELETE /user/delete answers with the configured status and body

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned response for one endpoint
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub update: MockResponse,
    pub delete: MockResponse,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            update: MockResponse::json(200, r#"{"success": true}"#),
            delete: MockResponse::json(200, r#"{"success": true}"#),
            delay_ms: 0,
        }
    }
}

/// A request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Mock LMS server
pub struct MockLmsServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockLmsServer {
    /// Start on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(10));
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

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn update_url(&self) -> String {
        format!("{}/user/update", self.base_url())
    }

    pub fn delete_url(&self) -> String {
        format!("{}/user/delete", self.base_url())
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockLmsServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_nonblocking(false);
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    let canned = match (request.method.as_str(), request.path.as_str()) {
        ("PUT", "/user/update") => Some(config.update.clone()),
        ("DELETE", "/user/delete") => Some(config.delete.clone()),
        _ => None,
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request);
    }

    match canned {
        Some(resp) => send_response(&mut stream, resp.status, &resp.body),
        None => send_response(&mut stream, 404, r#"{"error": "Endpoint not found"}"#),
    }
}

/// Read the request line, headers and a Content-Length delimited body
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let mut authorization = None;
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "authorization" => authorization = Some(value.trim().to_string()),
            "content-length" => content_length = value.trim().parse().unwrap_or(0),
            _ => {}
        }
    }

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }
    let body_end = data.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&data[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        authorization,
        body,
    })
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::HttpMutationTransport;
    use crate::domain::{
        DraftField, MutationResponse, ProfileUpdateDraft, SessionCredential, TransportError,
    };
    use crate::ports::MutationTransport;

    fn transport(server: &MockLmsServer, timeout: Duration) -> HttpMutationTransport {
        HttpMutationTransport::with_urls(&server.update_url(), &server.delete_url(), timeout)
            .unwrap()
    }

    fn sample_request() -> crate::domain::UpdateProfileRequest {
        let mut draft = ProfileUpdateDraft::new();
        draft.set(DraftField::Name, "Ada");
        draft.set(DraftField::OldPassword, "old-pw");
        draft.set(DraftField::NewPassword, "new-pw");
        draft.set(DraftField::ConfirmPassword, "new-pw");
        draft.to_request()
    }

    #[tokio::test]
    async fn test_update_sends_bearer_and_body() {
        let server = MockLmsServer::start(MockConfig::default()).unwrap();
        let transport = transport(&server, Duration::from_secs(5));

        let response = transport
            .update_profile(&sample_request(), &SessionCredential::new("tok-1"))
            .await
            .unwrap();
        assert_eq!(response, MutationResponse::ok());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-1"));

        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ada", "oldPassword": "old-pw", "newPassword": "new-pw"})
        );
    }

    #[tokio::test]
    async fn test_update_rejected_body_is_ok() {
        let server = MockLmsServer::start(MockConfig {
            update: MockResponse::json(
                200,
                r#"{"success": false, "message": "Old password is incorrect"}"#,
            ),
            ..Default::default()
        })
        .unwrap();

        let response = transport(&server, Duration::from_secs(5))
            .update_profile(&sample_request(), &SessionCredential::new("tok"))
            .await
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Old password is incorrect"));
    }

    #[tokio::test]
    async fn test_forbidden_status() {
        let server = MockLmsServer::start(MockConfig {
            update: MockResponse::json(403, r#"{"message": "jwt expired"}"#),
            ..Default::default()
        })
        .unwrap();

        let result = transport(&server, Duration::from_secs(5))
            .update_profile(&sample_request(), &SessionCredential::new("tok"))
            .await;

        assert_eq!(result, Err(TransportError::Forbidden { status: 403 }));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = MockLmsServer::start(MockConfig {
            delete: MockResponse::json(500, r#"{"success": false}"#),
            ..Default::default()
        })
        .unwrap();

        let result = transport(&server, Duration::from_secs(5))
            .delete_account(&SessionCredential::new("tok"))
            .await;

        assert_eq!(result, Err(TransportError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_delete_has_no_body() {
        let server = MockLmsServer::start(MockConfig::default()).unwrap();

        transport(&server, Duration::from_secs(5))
            .delete_account(&SessionCredential::new("tok-2"))
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/user/delete");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-2"));
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_delete_empty_success_body() {
        let server = MockLmsServer::start(MockConfig {
            delete: MockResponse::json(204, ""),
            ..Default::default()
        })
        .unwrap();

        let response = transport(&server, Duration::from_secs(5))
            .delete_account(&SessionCredential::new("tok"))
            .await
            .unwrap();

        assert!(response.success);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockLmsServer::start(MockConfig {
            update: MockResponse::json(200, "<html>oops</html>"),
            ..Default::default()
        })
        .unwrap();

        let result = transport(&server, Duration::from_secs(5))
            .update_profile(&sample_request(), &SessionCredential::new("tok"))
            .await;

        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockLmsServer::start(MockConfig {
            delay_ms: 1000,
            ..Default::default()
        })
        .unwrap();

        let result = transport(&server, Duration::from_millis(100))
            .delete_account(&SessionCredential::new("tok"))
            .await;

        assert_eq!(result, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/user/delete", port);
        let transport = HttpMutationTransport::with_urls(&url, &url, Duration::from_secs(2)).unwrap();

        let result = transport.delete_account(&SessionCredential::new("tok")).await;

        assert_eq!(result, Err(TransportError::Connect));
    }
}
