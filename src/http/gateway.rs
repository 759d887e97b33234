//! Request pipeline: preflight, local routes, or forward to the upstream.

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;

use crate::catalog::CatalogStore;
use crate::config::GatewayConfig;
use crate::http::request::InboundRequest;
use crate::http::response::GatewayResponse;
use crate::observability::{metrics, ErrorSink};
use crate::routing::{Route, Router};
use crate::security::CorsPolicy;
use crate::upstream::{OutboundRequestBuilder, UpstreamClient};

/// How much of a failing upstream body goes into the error log.
const LOGGED_BODY_CHARS: usize = 200;

/// The stateless per-request handler. Shared across requests behind an `Arc`.
pub struct Gateway {
    router: Router,
    cors: CorsPolicy,
    catalog: Arc<CatalogStore>,
    outbound: OutboundRequestBuilder,
    upstream: Arc<dyn UpstreamClient>,
    errors: Arc<dyn ErrorSink>,
    transport_error_status: StatusCode,
}

impl Gateway {
    pub fn new(
        config: &GatewayConfig,
        catalog: Arc<CatalogStore>,
        upstream: Arc<dyn UpstreamClient>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        let transport_error_status = StatusCode::from_u16(config.upstream.transport_error_status)
            .ok()
            .filter(StatusCode::is_server_error)
            .unwrap_or(StatusCode::BAD_GATEWAY);

        Self {
            router: Router::from_config(&config.routing),
            cors: CorsPolicy::from_config(&config.cors),
            catalog,
            outbound: OutboundRequestBuilder::from_config(&config.upstream),
            upstream,
            errors,
            transport_error_status,
        }
    }

    /// The catalog store, for reloads.
    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Produce the response for one request. Never fails.
    pub async fn handle(&self, request: &InboundRequest) -> GatewayResponse {
        let start = Instant::now();
        let cors = self.cors.decide(request.origin());
        let route = self.router.dispatch(&request.method, &request.path);

        tracing::debug!(
            request_id = %request.request_id(),
            method = %request.method,
            path = %request.path,
            route = route.label(),
            "Dispatching request"
        );

        let label = route.label();
        let response = match route {
            Route::Preflight | Route::Robots => GatewayResponse::empty(cors),
            Route::Catalog => GatewayResponse::json(cors, self.catalog.to_pretty_json()),
            Route::Proxy { forward_path } => self.forward(request, &forward_path, cors).await,
        };

        metrics::record_request(label, response.status.as_u16(), start);
        response
    }

    /// Response for a request whose body exceeded the listener limit.
    pub fn reject_body(&self, request: &InboundRequest) -> GatewayResponse {
        let start = Instant::now();
        let response = GatewayResponse::payload_too_large(self.cors.decide(request.origin()));
        metrics::record_request("rejected", response.status.as_u16(), start);
        response
    }

    async fn forward(
        &self,
        request: &InboundRequest,
        forward_path: &str,
        cors: axum::http::HeaderMap,
    ) -> GatewayResponse {
        let outbound = self.outbound.build(request, forward_path);
        tracing::info!(
            request_id = %request.request_id(),
            method = %outbound.method,
            target = %outbound.url,
            "Forwarding request"
        );

        match self.upstream.send(outbound).await {
            Ok(upstream) => {
                if !upstream.status.is_success() {
                    let excerpt: String = upstream.body.chars().take(LOGGED_BODY_CHARS).collect();
                    self.errors
                        .record(&format!("API Error {}", upstream.status.as_u16()), &excerpt);
                }
                GatewayResponse::from_upstream(cors, upstream)
            }
            Err(e) => {
                metrics::record_upstream_error();
                self.errors.record("Network Error", e.message());
                GatewayResponse::transport_failure(cors, self.transport_error_status, &e)
            }
        }
    }
}
