//! In-process mock of a WCPS endpoint.
//!
//! Accepts `POST` requests with an urlencoded `query` field, records every
//! query it receives and answers with a canned status, content type and body,
//! optionally after a delay.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned reply served for every request.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: content_type.to_string(),
            body: body.into(),
            delay: None,
        }
    }

    pub fn text(body: &str) -> Self {
        Self::ok("text/plain", body.as_bytes().to_vec())
    }

    pub fn error(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: "application/xml".to_string(),
            body: body.into(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Deserialize)]
struct QueryForm {
    query: String,
}

struct MockState {
    response: MockResponse,
    received: Mutex<Vec<String>>,
}

/// A running mock server. The server task is aborted on drop.
pub struct MockWcpsServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockWcpsServer {
    /// Bind to an ephemeral localhost port and start serving `response`.
    pub async fn start(response: MockResponse) -> Self {
        let state = Arc::new(MockState {
            response,
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/rasdaman/ows", post(handle_query))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock server");
        let addr = listener.local_addr().expect("mock server has no address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock WCPS server failed");
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Endpoint URL to point a client at.
    pub fn endpoint(&self) -> String {
        format!("http://{}/rasdaman/ows", self.addr)
    }

    /// Queries received so far, in arrival order.
    pub fn received_queries(&self) -> Vec<String> {
        self.state
            .received
            .lock()
            .expect("mock state poisoned")
            .clone()
    }
}

impl Drop for MockWcpsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_query(State(state): State<Arc<MockState>>, Form(form): Form<QueryForm>) -> Response {
    state
        .received
        .lock()
        .expect("mock state poisoned")
        .push(form.query);

    let reply = &state.response;
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, reply.content_type.clone())],
        reply.body.clone(),
    )
        .into_response()
}

/// Address on localhost with nothing listening, for connection-failure tests.
pub async fn unused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    format!("http://{}/rasdaman/ows", addr)
}
