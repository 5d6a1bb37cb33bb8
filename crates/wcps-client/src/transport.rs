//! Query transport.
//!
//! Failures are returned as values so callers can inspect status codes and
//! server messages instead of unwinding.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::exception::{parse_exception_report, ServiceException};

/// Why a request produced no usable payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportFailure {
    /// Server answered with a non-success status.
    #[error("HTTP error: {message}")]
    Http {
        status: u16,
        message: String,
        body: Bytes,
    },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// Any other client-side failure (request building, reading the body).
    #[error("Request failed: {message}")]
    Request { message: String },
}

impl TransportFailure {
    /// Only HTTP-level failures carry a status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportFailure::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TransportFailure::Http { message, .. }
            | TransportFailure::Timeout { message }
            | TransportFailure::Connection { message }
            | TransportFailure::Request { message } => message,
        }
    }

    pub fn body(&self) -> Option<&Bytes> {
        match self {
            TransportFailure::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Short fault class name for logs.
    pub fn class(&self) -> &'static str {
        match self {
            TransportFailure::Http { .. } => "http",
            TransportFailure::Timeout { .. } => "timeout",
            TransportFailure::Connection { .. } => "connection",
            TransportFailure::Request { .. } => "request",
        }
    }

    /// First exception of an OWS exception report in the error body.
    pub fn exception_report(&self) -> Option<ServiceException> {
        self.exceptions().into_iter().next()
    }

    /// Exceptions from an OWS exception report in the error body, if any.
    pub fn exceptions(&self) -> Vec<ServiceException> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        let text = String::from_utf8_lossy(body);
        match parse_exception_report(&text) {
            Ok(exceptions) => exceptions,
            Err(e) => {
                debug!(error = %e, "Error body is not an exception report");
                Vec::new()
            }
        }
    }
}

/// Outcome of sending one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Success { payload: Bytes, status: u16 },
    Failure(TransportFailure),
}

impl QueryResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryResponse::Success { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            QueryResponse::Success { status, .. } => Some(*status),
            QueryResponse::Failure(failure) => failure.status_code(),
        }
    }

    pub fn payload(&self) -> Option<&Bytes> {
        match self {
            QueryResponse::Success { payload, .. } => Some(payload),
            QueryResponse::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TransportFailure> {
        match self {
            QueryResponse::Failure(failure) => Some(failure),
            QueryResponse::Success { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(TransportFailure::message)
    }

    pub fn error_payload(&self) -> Option<&Bytes> {
        self.failure().and_then(TransportFailure::body)
    }
}

/// Sends finished query text to a WCPS server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, query: &str) -> QueryResponse;

    /// Endpoint queries are sent to, for logging.
    fn endpoint(&self) -> &str;
}

/// Posts queries as the urlencoded form field `query`.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

fn classify(err: reqwest::Error) -> TransportFailure {
    let message = err.to_string();
    if err.is_timeout() {
        TransportFailure::Timeout { message }
    } else if err.is_connect() {
        TransportFailure::Connection { message }
    } else {
        TransportFailure::Request { message }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, query: &str) -> QueryResponse {
        debug!(endpoint = %self.endpoint, query_len = query.len(), "Sending WCPS query");

        let result = self
            .client
            .post(&self.endpoint)
            .form(&[("query", query)])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let failure = classify(e);
                warn!(endpoint = %self.endpoint, class = failure.class(), error = %failure, "WCPS request failed");
                return QueryResponse::Failure(failure);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let failure = classify(e);
                warn!(endpoint = %self.endpoint, class = failure.class(), error = %failure, "Failed to read WCPS response");
                return QueryResponse::Failure(failure);
            }
        };

        if status.is_success() {
            debug!(status = status.as_u16(), bytes = body.len(), "WCPS query succeeded");
            QueryResponse::Success {
                payload: body,
                status: status.as_u16(),
            }
        } else {
            let failure = TransportFailure::Http {
                status: status.as_u16(),
                message: format!("{} for url: {}", status, self.endpoint),
                body,
            };
            warn!(status = status.as_u16(), class = failure.class(), "WCPS server returned an error");
            QueryResponse::Failure(failure)
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
