//! Cross-origin policy.
//!
//! # Responsibilities
//! - Decide the CORS response headers for every request, preflight included
//!
//! # Design Decisions
//! - Pure function of (origin, allow-list, mode); no per-request state
//! - Exact string match against the allow-list, entries are never patterns
//! - Unlisted origins are never echoed back; they get `null` (strict) or `*`
//!   (wildcard)

use std::collections::HashSet;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue};

use crate::config::{CorsConfig, CorsMode};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
pub const MAX_AGE_SECS: &str = "86400";

/// Origin allow-list plus the fallback for everyone else.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    mode: CorsMode,
    allowed: HashSet<String>,
}

impl CorsPolicy {
    pub fn new(mode: CorsMode, allowed_origins: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode,
            allowed: allowed_origins.into_iter().collect(),
        }
    }

    pub fn from_config(config: &CorsConfig) -> Self {
        Self::new(config.policy, config.allowed_origins.iter().cloned())
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.contains(origin)
    }

    /// Headers to attach to the response for a caller sending `origin`.
    pub fn decide(&self, origin: &str) -> HeaderMap {
        if self.is_allowed(origin) {
            if let Ok(value) = HeaderValue::from_str(origin) {
                return grant(value);
            }
        }

        match self.mode {
            CorsMode::Wildcard => grant(HeaderValue::from_static("*")),
            CorsMode::Strict => {
                let mut headers = HeaderMap::new();
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("null"));
                headers
            }
        }
    }
}

fn grant(origin: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    headers
}
