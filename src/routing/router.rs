//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Classify a request into preflight, catalog, robots or proxy
//! - Return the forward path alongside the proxy decision
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact string equality on the clean path, no prefix or pattern routes
//! - Unmatched paths always fall through to Proxy

use axum::http::Method;

use crate::config::RoutingConfig;
use crate::routing::normalizer::PathNormalizer;

/// Terminal outcome chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Catalog,
    Robots,
    Proxy { forward_path: String },
}

impl Route {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Catalog => "catalog",
            Route::Robots => "robots",
            Route::Proxy { .. } => "proxy",
        }
    }
}

/// Route table compiled from config.
#[derive(Debug, Clone)]
pub struct Router {
    normalizer: PathNormalizer,
    catalog_path: String,
    robots_path: String,
}

impl Router {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            normalizer: PathNormalizer::new(config.prefix_rules.clone()),
            catalog_path: config.catalog_path.clone(),
            robots_path: config.robots_path.clone(),
        }
    }

    /// Evaluate the four outcomes in order.
    pub fn dispatch(&self, method: &Method, path: &str) -> Route {
        if *method == Method::OPTIONS {
            return Route::Preflight;
        }

        let normalized = self.normalizer.normalize(path);
        if normalized.clean == self.catalog_path {
            Route::Catalog
        } else if normalized.clean == self.robots_path {
            Route::Robots
        } else {
            Route::Proxy {
                forward_path: normalized.forward,
            }
        }
    }
}
