//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// The single upstream API every non-local request is forwarded to.
    pub upstream: UpstreamConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Path normalization and local route literals.
    pub routing: RoutingConfig,

    /// Static catalog document.
    pub catalog: CatalogConfig,

    /// Append-only error log file.
    pub error_log: ErrorLogConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Which set of synthesized headers the outbound request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderProfile {
    /// Accept, Content-Type, X-App-Env and the pass-through auth headers.
    Minimal,
    /// Minimal plus Origin/Referer pinned to the upstream site, a browser
    /// User-Agent and `Connection: keep-alive`. Also forwards DELETE bodies.
    BrowserLike,
}

/// Upstream target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// URL scheme, "https" in production.
    pub scheme: String,

    /// Upstream host (and optional port), e.g. "api.mytonwallet.org".
    pub host: String,

    /// Outbound header synthesis profile.
    pub header_profile: HeaderProfile,

    /// Origin presented to the upstream under the browser-like profile.
    pub site_origin: String,

    /// User-Agent presented under the browser-like profile.
    pub user_agent: String,

    /// Value of `X-App-Env` when the caller does not send one.
    pub default_env: String,

    /// Status returned to the caller when the upstream cannot be reached.
    pub transport_error_status: u16,

    /// Optional connect timeout. Unset leaves timeouts to the network stack.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "api.mytonwallet.org".to_string(),
            header_profile: HeaderProfile::BrowserLike,
            site_origin: "https://mytonwallet.org".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            default_env: "Production".to_string(),
            transport_error_status: 502,
            connect_timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// `scheme://host`, the prefix of every outbound URL.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Fallback behavior for origins outside the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorsMode {
    /// Unlisted origins get `Access-Control-Allow-Origin: null` only.
    Strict,
    /// Unlisted origins get `*` with the full grant.
    Wildcard,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub policy: CorsMode,

    /// Exact-match origin allow-list.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let allowed_origins = [
            "http://localhost:4321",
            "http://127.0.0.1:4321",
            "http://localhost:4323",
            "http://127.0.0.1:4323",
            "http://localhost:4355",
            "http://127.0.0.1:4355",
            "http://localhost:8888",
            "http://127.0.0.1:8888",
            "https://dpsmult.netlify.app",
            "https://walletdpstg.netlify.app",
            "https://multisend-livid.vercel.app",
            "https://walletdps.vercel.app",
            "https://walletdps.netlify.app",
            "https://walletdps.netlify.com",
        ]
        .iter()
        .map(|o| o.to_string())
        .collect();

        Self {
            policy: CorsMode::Strict,
            allowed_origins,
        }
    }
}

/// A single path rewrite step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrefixRule {
    /// Leading path segment to match.
    pub prefix: String,

    /// Text substituted for the prefix (empty strips it).
    #[serde(default)]
    pub replacement: String,
}

impl PrefixRule {
    pub fn strip(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: String::new(),
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Rewrite rules, applied in order.
    pub prefix_rules: Vec<PrefixRule>,

    /// Clean path served from the in-memory catalog.
    pub catalog_path: String,

    /// Clean path answered locally with an empty body.
    pub robots_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            prefix_rules: vec![
                PrefixRule::strip("/.netlify/functions/proxy"),
                PrefixRule::strip("/proxy"),
            ],
            catalog_path: "/v2/dapp/catalog".to_string(),
            robots_path: "/robots.txt".to_string(),
        }
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file read at startup.
    pub path: String,

    /// Reload the catalog when the file changes.
    pub watch: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "catalog.json".to_string(),
            watch: false,
        }
    }
}

/// Error log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorLogConfig {
    pub enabled: bool,

    /// File the `[timestamp] [context] message` lines are appended to.
    pub path: String,
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "error.log".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
