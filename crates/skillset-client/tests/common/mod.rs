//! In-process fake SkillSet service on a Unix socket.
//!
//! Records every request and counts connections accepted and connections the
//! client has closed.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

/// A request as the fake service saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// How the fake service answers one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Status plus body, delimited by `Content-Length`.
    Http { status: u16, body: String },
    /// Status plus body, sent with chunked transfer encoding.
    Chunked { status: u16, body: String },
    /// Close the connection without writing anything.
    HangUp,
    /// Never answer; wait for the client to give up.
    Stall,
}

impl Reply {
    pub fn json(status: u16, value: Value) -> Self {
        Self::Http {
            status,
            body: value.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            body: body.to_owned(),
        }
    }
}

type Handler = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

#[derive(Default)]
struct State {
    accepted: AtomicUsize,
    closed: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeService {
    _dir: TempDir,
    path: PathBuf,
    state: Arc<State>,
    task: JoinHandle<()>,
}

impl FakeService {
    pub async fn start(handler: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skillset.sock");
        let listener = UnixListener::bind(&path).expect("bind fake service socket");
        let state = Arc::new(State::default());
        let handler: Handler = Arc::new(handler);

        let task = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    state.accepted.fetch_add(1, Ordering::SeqCst);
                    let state = Arc::clone(&state);
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move {
                        serve(stream, &state, &handler).await;
                        state.closed.fetch_add(1, Ordering::SeqCst);
                    });
                }
            }
        });

        Self {
            _dir: dir,
            path,
            state,
            task,
        }
    }

    /// Always answers 200 with `value`.
    pub async fn replying(value: Value) -> Self {
        Self::start(move |_| Reply::json(200, value.clone())).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accepted(&self) -> usize {
        self.state.accepted.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("requests lock").clone()
    }

    /// Waits (up to two seconds) until every accepted connection has closed.
    pub async fn wait_until_all_closed(&self) -> usize {
        for _ in 0..400 {
            if self.closed() == self.accepted() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.closed()
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(stream: UnixStream, state: &State, handler: &Handler) {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
        return;
    }

    let mut headers = Vec::new();
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim().to_owned(), value.trim().to_owned());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body = vec![0; content_length];
    if reader.read_exact(&mut body).await.is_err() {
        return;
    }

    let recorded = Recorded {
        request_line: request_line.trim_end().to_owned(),
        headers,
        body,
    };
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(recorded.clone());

    let response = match handler(&recorded) {
        Reply::HangUp => return,
        Reply::Stall => None,
        Reply::Http { status, body } => Some(format!(
            "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )),
        Reply::Chunked { status, body } => {
            let mid = body.len() / 2;
            let (a, b) = body.split_at(mid);
            let mut out = format!("HTTP/1.1 {status} Fake\r\nTransfer-Encoding: chunked\r\n\r\n");
            for chunk in [a, b].into_iter().filter(|c| !c.is_empty()) {
                out.push_str(&format!("{:x}\r\n{chunk}\r\n", chunk.len()));
            }
            out.push_str("0\r\n\r\n");
            Some(out)
        }
    };

    if let Some(response) = response {
        if write.write_all(response.as_bytes()).await.is_err() {
            return;
        }
        let _ = write.flush().await;
    }

    // Returns once the client drops its end.
    let mut rest = Vec::new();
    let _ = reader.read_to_end(&mut rest).await;
}
