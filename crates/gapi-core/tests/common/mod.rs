//! In-process stub of the dashboard server for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use gapi_core::{ApiClient, Credentials};
use tokio::net::TcpListener;

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(Method, String), (StatusCode, String)>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct StubServer {
    addr: std::net::SocketAddr,
    state: Arc<StubState>,
}

impl StubServer {
    /// Serve canned `(method, path, status, body)` responses. Unknown routes get 404.
    pub async fn start(routes: &[(Method, &str, u16, &str)]) -> Self {
        let routes = routes
            .iter()
            .map(|(method, path, status, body)| {
                let status = StatusCode::from_u16(*status).expect("invalid status in stub route");
                ((method.clone(), path.to_string()), (status, body.to_string()))
            })
            .collect();
        let state = Arc::new(StubState {
            routes,
            requests: Mutex::new(Vec::new()),
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("stub listener has no address");
        let app = Router::new().fallback(handle).with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.url(), Some(Credentials::parse("admin:admin")))
            .expect("Failed to build client")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("stub mutex poisoned").clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("stub received no requests")
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state
        .requests
        .lock()
        .expect("stub mutex poisoned")
        .push(Recorded {
            method: method.clone(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });

    let (status, body) = state
        .routes
        .get(&(method, uri.path().to_string()))
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, r#"{"message":"Not found"}"#.to_string()));
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
