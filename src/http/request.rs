//! Inbound request descriptor and request IDs.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) for every request
//! - Describe an inbound request independently of the hosting server
//! - Carry non-UTF-8 bodies as base64 with an explicit flag
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Descriptor is immutable once built

use axum::http::header::ORIGIN;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tower_http::request_id::{MakeRequestId, RequestId};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Produces a fresh UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// One request as seen by the gateway.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Raw path, before any normalization.
    pub path: String,
    /// Raw query string without the leading `?`. `Some("")` for a bare `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// `body` holds base64 of the original bytes.
    pub is_base64_encoded: bool,
}

impl InboundRequest {
    /// Build from a method and a raw `path?query` string.
    pub fn new(method: Method, raw_url: &str) -> Self {
        let (path, query) = match raw_url.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (raw_url.to_string(), None),
        };
        Self {
            method,
            path,
            query,
            headers: HeaderMap::new(),
            body: None,
            is_base64_encoded: false,
        }
    }

    /// Add a header. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = false;
        self
    }

    /// Attach an already base64-encoded body.
    pub fn with_base64_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.is_base64_encoded = true;
        self
    }

    /// Attach raw bytes: UTF-8 stays text, anything else becomes base64.
    pub fn with_body_bytes(self, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return self;
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => self.with_body(text),
            Err(_) => self.with_base64_body(STANDARD.encode(bytes)),
        }
    }

    /// The `Origin` header, or an empty string.
    pub fn origin(&self) -> &str {
        self.header(ORIGIN.as_str()).unwrap_or("")
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn request_id(&self) -> &str {
        self.header(X_REQUEST_ID).unwrap_or("unknown")
    }
}
