//! Gateway response descriptor and upstream outcome translation.
//!
//! # Responsibilities
//! - Represent the single response produced for every request
//! - Merge CORS headers with the route's own headers
//! - Translate upstream responses and transport failures
//!
//! # Design Decisions
//! - Upstream status and body are relayed verbatim, 4xx/5xx included
//! - Transport failures become one fixed-shape JSON body; no internals leak
//! - Preflight and robots responses carry CORS headers only

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::upstream::{TransportError, UpstreamResponse};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Upstream connection failed";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Status, headers and text body returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl GatewayResponse {
    /// 200 with only the CORS headers and an empty body.
    pub fn empty(cors: HeaderMap) -> Self {
        Self {
            status: StatusCode::OK,
            headers: cors,
            body: String::new(),
        }
    }

    /// 200 JSON document.
    pub fn json(cors: HeaderMap, body: String) -> Self {
        let mut headers = cors;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self {
            status: StatusCode::OK,
            headers,
            body,
        }
    }

    /// Relay an upstream answer as-is.
    pub fn from_upstream(cors: HeaderMap, upstream: UpstreamResponse) -> Self {
        let mut headers = cors;
        let content_type = upstream
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok())
            .unwrap_or_else(|| HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(CONTENT_TYPE, content_type);
        Self {
            status: upstream.status,
            headers,
            body: upstream.body,
        }
    }

    /// Fixed-shape answer for an upstream that could not be reached.
    pub fn transport_failure(cors: HeaderMap, status: StatusCode, err: &TransportError) -> Self {
        let body = json!({
            "error": format!("{}: {}", TRANSPORT_ERROR_MESSAGE, err.message()),
            "details": err.message(),
        });
        let mut headers = cors;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self {
            status,
            headers,
            body: body.to_string(),
        }
    }

    /// 413 for an inbound body over the configured limit.
    pub fn payload_too_large(cors: HeaderMap) -> Self {
        let mut headers = cors;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Self {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            headers,
            body: json!({ "error": BODY_TOO_LARGE_MESSAGE }).to_string(),
        }
    }

    /// Header value as text, for tests and logging.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
