//! Scripted mock of the content backend.
//!
//! Binds to `127.0.0.1:0`, answers each `(method, path)` with a scripted reply and
//! records every request it sees so tests can assert call counts and payloads.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// One scripted answer.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Option<Value>,
    pub raw: Option<String>,
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Self { status: 200, body: Some(body), raw: None }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body: Some(body), raw: None }
    }

    pub fn no_content() -> Self {
        Self { status: 204, body: None, raw: None }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self { status, body: Some(body), raw: None }
    }

    /// Non-JSON body, for decode-failure paths.
    pub fn text(status: u16, raw: impl Into<String>) -> Self {
        Self { status, body: None, raw: Some(raw.into()) }
    }

    pub fn detail(status: u16, detail: &str) -> Self {
        Self::status(status, json!({ "detail": detail }))
    }
}

/// A multipart part as received.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub file_name: Option<String>,
    pub text: Option<String>,
    pub len: usize,
}

/// A request as received by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub json: Option<Value>,
    pub fields: Vec<Field>,
}

impl Recorded {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockState {
    fn next_reply(&self, method: &str, path: &str) -> Reply {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes.get_mut(&(method.to_owned(), path.to_owned())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> Reply {
    Reply::detail(404, "Not Found")
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("mock backend stopped: {e}");
            }
        });
        Self { addr, state, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn upload_base(&self) -> String {
        format!("{}/uploads", self.base_url())
    }

    /// Script the reply for a route. Replaces any earlier script.
    pub fn on(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.on_sequence(method, path, vec![reply])
    }

    /// Replies are served in order; the last one repeats.
    pub fn on_sequence(&self, method: &str, path: &str, replies: Vec<Reply>) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert((method.to_owned(), path.to_owned()), replies.into());
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on, for connection-refused paths.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("free port address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn handle(State(state): State<Arc<MockState>>, req: Request) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
        .map(|Query(q)| q)
        .unwrap_or_default();
    let (authorization, content_type) = {
        let header_str = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        (header_str(header::AUTHORIZATION), header_str(header::CONTENT_TYPE))
    };

    let mut json_body = None;
    let mut fields = Vec::new();
    let is_multipart = content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        if let Ok(mut multipart) = Multipart::from_request(req, &()).await {
            while let Ok(Some(field)) = multipart.next_field().await {
                let name = field.name().unwrap_or_default().to_owned();
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await.unwrap_or_default();
                let text = if file_name.is_none() {
                    String::from_utf8(bytes.to_vec()).ok()
                } else {
                    None
                };
                fields.push(Field { name, file_name, text, len: bytes.len() });
            }
        }
    } else if req.method() != Method::GET {
        let bytes = to_bytes(req.into_body(), usize::MAX).await.unwrap_or_default();
        if !bytes.is_empty() {
            json_body = serde_json::from_slice(&bytes).ok();
        }
    }

    state
        .requests
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(Recorded {
            method: method.clone(),
            path: path.clone(),
            query,
            authorization,
            content_type,
            json: json_body,
            fields,
        });

    let reply = state.next_reply(&method, &path);
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match (reply.body, reply.raw) {
        (_, Some(raw)) => (status, Body::from(raw)).into_response(),
        (Some(body), None) => (status, Json(body)).into_response(),
        (None, None) => status.into_response(),
    }
}
