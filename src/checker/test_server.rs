// src/checker/test_server.rs
// =============================================================================
// A tiny axum stub server for tests, so requests never leave the machine.
//
// Each route answers one path (optionally one method) with a fixed status,
// headers and body. Unknown paths answer 404. Every request is counted, which
// lets tests prove that a skipped URL was never requested.
//
// All requests land in a single fallback handler: routes are matched on the
// raw method and path, so redirect chains and loops can be declared as data.
// =============================================================================

use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Route {
    method: Option<&'static str>,
    path: String,
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    delay: Option<Duration>,
}

impl Route {
    pub fn new(path: &str, status: u16) -> Self {
        Self {
            method: None,
            path: path.to_string(),
            status,
            headers: Vec::new(),
            body: String::new(),
            delay: None,
        }
    }

    pub fn method(mut self, method: &'static str) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Wait before answering, to provoke client timeouts
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.path == path && self.method.map_or(true, |m| m == method.as_str())
    }

    fn respond(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            response.headers_mut().append(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        response
    }
}

// Shared by every request the router handles
struct StubState {
    routes: Vec<Route>,
    hits: Arc<AtomicUsize>,
}

pub struct StubServer {
    listener: TcpListener,
    base: String,
}

pub struct StubHandle {
    pub base: String,
    hits: Arc<AtomicUsize>,
}

impl StubHandle {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl StubServer {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        Self { listener, base }
    }

    /// Base URL (`http://127.0.0.1:<port>`), known before routes are fixed
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn serve(self, routes: Vec<Route>) -> StubHandle {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(StubState {
            routes,
            hits: Arc::clone(&hits),
        });
        let app = Router::new().fallback(answer).with_state(state);

        let listener = self.listener;
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubHandle {
            base: self.base,
            hits,
        }
    }
}

async fn answer(State(stub): State<Arc<StubState>>, method: Method, uri: Uri) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);

    let route = stub
        .routes
        .iter()
        .find(|route| route.matches(&method, uri.path()))
        .cloned()
        .unwrap_or_else(|| Route::new(uri.path(), 404));

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    route.respond()
}
