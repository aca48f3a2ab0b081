//! Minimal HTTP/1.1 responder for driving `HttpStore` and the CLI over a
//! real socket.
//!
//! Each connection carries one request and is closed after the response.
//! Routes are matched on method and raw (still percent-encoded) path.

use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct StubResponse {
    status: u16,
    body: String,
}

type RouteTable = HashMap<(String, String), VecDeque<StubResponse>>;

#[derive(Default)]
struct Shared {
    routes: RouteTable,
    requests: Vec<RecordedRequest>,
}

pub struct StubServer {
    url: String,
    shared: Arc<Mutex<Shared>>,
}

impl StubServer {
    /// Bind to an ephemeral port and serve on a background thread
    pub fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url = format!("http://{}", listener.local_addr()?);
        let shared = Arc::new(Mutex::new(Shared::default()));

        let worker = Arc::clone(&shared);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let _ = serve(stream, &worker);
            }
        });

        Ok(Self { url, shared })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Queue a response. Responses for one route are served in order; the
    /// last one keeps answering.
    pub fn route(&self, method: &str, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.lock()
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(StubResponse {
                status,
                body: body.into(),
            });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn serve(stream: TcpStream, shared: &Mutex<Shared>) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    let response = {
        let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
        shared.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            body: String::from_utf8_lossy(&body).to_string(),
        });
        match shared.routes.get_mut(&(method, path)) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    }
    .unwrap_or(StubResponse {
        status: 404,
        body: r#"{"detail":"no such route"}"#.to_string(),
    });

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        if response.status < 400 { "OK" } else { "Error" },
        response.body.len(),
        response.body
    )?;
    stream.flush()
}
