//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use submit_relay::config::{ServerConfig, UpstreamSource};
use submit_relay::{HttpServer, RelayConfig, Shutdown};

#[allow(dead_code)]
pub const CREDENTIAL: &str = "k3y-for-tests";

/// How the mock upstream answers.
#[derive(Clone)]
#[allow(dead_code)]
pub enum MockReply {
    Respond {
        status: u16,
        content_type: Option<&'static str>,
        body: &'static str,
    },
    /// Accept the request and never answer.
    Hang,
}

/// One request as the mock upstream saw it.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedCall {
    pub query: HashMap<String, String>,
    pub request_id: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}/api/intake", self.addr)
    }

    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig::new(self.url(), CREDENTIAL)
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start a programmable upstream on an ephemeral port.
pub async fn start_mock_upstream(reply: MockReply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/api/intake", any(mock_handler))
        .layer(DefaultBodyLimit::disable())
        .with_state(MockState {
            reply,
            calls: calls.clone(),
        });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

async fn mock_handler(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.lock().unwrap().push(CapturedCall {
        query,
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match state.reply {
        MockReply::Respond {
            status,
            content_type,
            body,
        } => {
            let mut builder = Response::builder().status(status);
            if let Some(ct) = content_type {
                builder = builder.header(CONTENT_TYPE, ct);
            }
            builder.body(Body::from(body)).unwrap()
        }
        MockReply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            StatusCode::OK.into_response()
        }
    }
}

/// A running relay. Dropping it shuts the server down.
pub struct RelayHandle {
    pub base_url: String,
    _shutdown: Shutdown,
}

#[allow(dead_code)]
impl RelayHandle {
    pub fn submit_url(&self) -> String {
        format!("{}/api/submit", self.base_url)
    }
}

/// Start a relay with default settings on an ephemeral port.
#[allow(dead_code)]
pub async fn start_relay(source: UpstreamSource) -> RelayHandle {
    start_relay_with(ServerConfig::default(), source).await
}

#[allow(dead_code)]
pub async fn start_relay_with(config: ServerConfig, source: UpstreamSource) -> RelayHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, source).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RelayHandle {
        base_url: format!("http://{addr}"),
        _shutdown: shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn valid_submission() -> Value {
    json!({
        "EmployeeID": "E-1001",
        "RequestNumber": "REQ-42",
        "fileBase64": "aGVsbG8gd29ybGQ="
    })
}
