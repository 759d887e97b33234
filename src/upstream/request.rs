//! Outbound request construction.
//!
//! # Responsibilities
//! - Build the upstream URL from the forward path and the raw query string
//! - Synthesize the outbound header set from a small allow-list
//! - Decide whether the inbound body travels, decoding base64 bodies
//!
//! # Design Decisions
//! - The outbound request is a new synthetic request, not a tunnel: host,
//!   cookies, content-length and everything not named here are dropped
//! - Query string and path are appended verbatim, never re-encoded

use axum::http::header::{ACCEPT, CONNECTION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::config::{HeaderProfile, UpstreamConfig};
use crate::http::request::InboundRequest;

pub const X_APP_ENV: HeaderName = HeaderName::from_static("x-app-env");
pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
pub const X_APP_CLIENTID: HeaderName = HeaderName::from_static("x-app-clientid");

pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Accepts padded and unpadded input alike.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode base64 the way function hosts tolerate it: whitespace ignored,
/// URL-safe characters mapped to the standard alphabet, padding optional.
pub fn decode_base64_lenient(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    LENIENT.decode(normalized)
}

/// A request ready to be sent to the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Turns inbound requests into upstream requests for one fixed upstream.
#[derive(Debug, Clone)]
pub struct OutboundRequestBuilder {
    base_url: String,
    profile: HeaderProfile,
    default_env: HeaderValue,
    site_origin: Option<HeaderValue>,
    referer: Option<HeaderValue>,
    user_agent: Option<HeaderValue>,
}

impl OutboundRequestBuilder {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        let site_origin = config.site_origin.trim_end_matches('/');
        Self {
            base_url: config.base_url(),
            profile: config.header_profile,
            default_env: HeaderValue::from_str(&config.default_env)
                .unwrap_or_else(|_| HeaderValue::from_static("Production")),
            site_origin: HeaderValue::from_str(site_origin).ok(),
            referer: HeaderValue::from_str(&format!("{}/", site_origin)).ok(),
            user_agent: HeaderValue::from_str(&config.user_agent).ok(),
        }
    }

    /// `base_url + forward_path + ?query`, with no re-encoding.
    pub fn target_url(&self, forward_path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) => format!("{}{}?{}", self.base_url, forward_path, q),
            None => format!("{}{}", self.base_url, forward_path),
        }
    }

    pub fn build(&self, inbound: &InboundRequest, forward_path: &str) -> OutboundRequest {
        OutboundRequest {
            url: self.target_url(forward_path, inbound.query.as_deref()),
            method: inbound.method.clone(),
            headers: self.headers(inbound),
            body: self.body(inbound),
        }
    }

    fn headers(&self, inbound: &InboundRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let env = non_empty(inbound, &X_APP_ENV).unwrap_or_else(|| self.default_env.clone());
        headers.insert(X_APP_ENV, env);

        if self.profile == HeaderProfile::BrowserLike {
            if let Some(origin) = &self.site_origin {
                headers.insert(ORIGIN, origin.clone());
            }
            if let Some(referer) = &self.referer {
                headers.insert(REFERER, referer.clone());
            }
            if let Some(agent) = &self.user_agent {
                headers.insert(USER_AGENT, agent.clone());
            }
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        }

        for name in [X_AUTH_TOKEN, X_APP_CLIENTID] {
            if let Some(value) = non_empty(inbound, &name) {
                headers.insert(name, value);
            }
        }

        headers
    }

    fn carries_body(&self, method: &Method) -> bool {
        match *method {
            Method::POST | Method::PUT | Method::PATCH => true,
            Method::DELETE => self.profile == HeaderProfile::BrowserLike,
            _ => false,
        }
    }

    fn body(&self, inbound: &InboundRequest) -> Option<String> {
        if !self.carries_body(&inbound.method) {
            return None;
        }
        let body = inbound.body.as_deref().filter(|b| !b.is_empty())?;

        if !inbound.is_base64_encoded {
            return Some(body.to_string());
        }
        match decode_base64_lenient(body) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::warn!(error = %e, "Inbound body flagged base64 but did not decode, forwarding as-is");
                Some(body.to_string())
            }
        }
    }
}

fn non_empty(inbound: &InboundRequest, name: &HeaderName) -> Option<HeaderValue> {
    inbound
        .headers
        .get(name)
        .filter(|v| !v.as_bytes().is_empty())
        .cloned()
}
