//! Common test utilities and helpers
//!
//! A loopback HTTP listener that serves one canned response and records
//! the request it received. No mock-server dependency: the clients under
//! test speak plain HTTP/1.1, so a `TcpListener` is enough to observe
//! exactly what goes over the wire.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One HTTP request as the listener saw it
pub struct RecordedRequest {
    /// e.g. `POST /alerts HTTP/1.1`
    pub request_line: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Handle to a listener serving exactly one request
pub struct TestServer {
    /// Base URL clients should be pointed at
    pub base_url: String,
    requests: mpsc::Receiver<RecordedRequest>,
}

impl TestServer {
    /// Bind a loopback listener that answers the next request with
    /// `response` (a complete HTTP/1.1 response, headers included).
    pub fn serve(response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader
                .read_line(&mut request_line)
                .expect("read request line");

            let mut headers = HashMap::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("read header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
                }
            }

            let content_length = headers
                .get("content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).expect("read body");

            let stream = reader.get_mut();
            stream
                .write_all(response.as_bytes())
                .expect("write response");
            stream.flush().expect("flush response");

            let _ = tx.send(RecordedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body,
            });
        });

        Self {
            base_url,
            requests: rx,
        }
    }

    /// The request the listener saw; panics if none arrives in time.
    pub fn recorded_request(&self) -> RecordedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request recorded")
    }
}

/// A complete HTTP/1.1 response with the given status line and body
pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// An empty 200 response
pub fn ok_response() -> String {
    http_response("200 OK", "")
}
