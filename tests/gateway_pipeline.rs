//! Request pipeline tests against a scripted upstream.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use edge_gateway::catalog::{missing_catalog, CatalogStore};
use edge_gateway::config::{CorsMode, GatewayConfig};
use edge_gateway::observability::MemoryErrorLog;
use edge_gateway::upstream::{TransportError, UpstreamResponse};
use edge_gateway::{Gateway, InboundRequest};
use serde_json::{json, Value};

mod common;
use common::ScriptedUpstream;

const ALLOWED: &str = "http://localhost:4321";

struct Harness {
    gateway: Gateway,
    upstream: Arc<ScriptedUpstream>,
    log: MemoryErrorLog,
}

fn harness_with(
    config: GatewayConfig,
    catalog: Value,
    result: Result<UpstreamResponse, TransportError>,
) -> Harness {
    let log = MemoryErrorLog::new();
    let upstream = ScriptedUpstream::responding(result);
    let catalog = Arc::new(CatalogStore::from_value(catalog, Arc::new(log.clone())));
    let gateway = Gateway::new(&config, catalog, upstream.clone(), Arc::new(log.clone()));
    Harness {
        gateway,
        upstream,
        log,
    }
}

fn harness(result: Result<UpstreamResponse, TransportError>) -> Harness {
    harness_with(
        GatewayConfig::default(),
        json!({"dapps": [{"name": "Swap", "url": "https://swap.example"}]}),
        result,
    )
}

fn upstream_ok(body: &str) -> Result<UpstreamResponse, TransportError> {
    Ok(UpstreamResponse {
        status: StatusCode::OK,
        content_type: Some("application/json".into()),
        body: body.into(),
    })
}

#[tokio::test]
async fn test_preflight_on_any_path_returns_only_cors() {
    let h = harness(upstream_ok("{}"));
    for path in ["/v2/dapp/catalog", "/robots.txt", "/proxy/v1/anything?x=1", "/"] {
        let req = InboundRequest::new(Method::OPTIONS, path).with_header("Origin", ALLOWED);
        let res = h.gateway.handle(&req).await;

        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.is_empty());
        assert_eq!(res.headers.len(), 4, "path {}", path);
        assert_eq!(res.header("access-control-allow-origin"), Some(ALLOWED));
        assert!(res.header("content-type").is_none());
    }
    assert!(h.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_catalog_served_under_every_prefix() {
    let h = harness(upstream_ok("{}"));
    for path in [
        "/.netlify/functions/proxy/v2/dapp/catalog",
        "/proxy/v2/dapp/catalog",
        "/v2/dapp/catalog",
        "/v2/dapp/catalog/",
    ] {
        let res = h.gateway.handle(&InboundRequest::new(Method::GET, path)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(&res.body).unwrap();
        assert_eq!(body, json!({"dapps": [{"name": "Swap", "url": "https://swap.example"}]}));
    }
    assert!(h.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_catalog_sentinel_when_load_failed() {
    let h = harness_with(GatewayConfig::default(), missing_catalog(), upstream_ok("{}"));
    let res = h.gateway.handle(&InboundRequest::new(Method::GET, "/v2/dapp/catalog")).await;
    let body: Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(body, json!({"error": "Catalog missing or invalid JSON"}));
}

#[tokio::test]
async fn test_robots_is_local_and_empty() {
    let h = harness(upstream_ok("{}"));
    let res = h
        .gateway
        .handle(&InboundRequest::new(Method::GET, "/.netlify/functions/proxy/robots.txt"))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty());
    assert!(res.header("content-type").is_none());
    assert!(h.upstream.calls().is_empty());
}

#[tokio::test]
async fn test_query_string_is_forwarded_verbatim() {
    let h = harness(upstream_ok("{}"));
    h.gateway.handle(&InboundRequest::new(Method::GET, "/foo?x=1")).await;

    let calls = h.upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://api.mytonwallet.org/foo?x=1");
    assert_eq!(calls[0].method, Method::GET);
}

#[tokio::test]
async fn test_prefixed_proxy_path_keeps_trailing_slash() {
    let h = harness(upstream_ok("{}"));
    h.gateway
        .handle(&InboundRequest::new(Method::GET, "/.netlify/functions/proxy/v1/tokens/?limit=5"))
        .await;
    assert_eq!(
        h.upstream.calls()[0].url,
        "https://api.mytonwallet.org/v1/tokens/?limit=5"
    );
}

#[tokio::test]
async fn test_base64_post_body_is_decoded() {
    let h = harness(upstream_ok("{}"));
    let req = InboundRequest::new(Method::POST, "/v1/swap").with_base64_body("eyJhIjoxfQ==");
    h.gateway.handle(&req).await;
    assert_eq!(h.upstream.calls()[0].body.as_deref(), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn test_outbound_headers_are_synthesized() {
    let h = harness(upstream_ok("{}"));
    let req = InboundRequest::new(Method::GET, "/v1/me")
        .with_header("Origin", ALLOWED)
        .with_header("Cookie", "sid=1")
        .with_header("x-auth-token", "secret")
        .with_header("X-App-Clientid", "client-1");
    h.gateway.handle(&req).await;

    let headers = &h.upstream.calls()[0].headers;
    assert_eq!(headers["origin"], "https://mytonwallet.org");
    assert_eq!(headers["x-auth-token"], "secret");
    assert_eq!(headers["x-app-clientid"], "client-1");
    assert_eq!(headers["x-app-env"], "Production");
    assert!(headers.get("cookie").is_none());
}

#[tokio::test]
async fn test_transport_failure_yields_gateway_error() {
    let h = harness(Err(TransportError::new("connection refused")));
    let req = InboundRequest::new(Method::GET, "/v1/rates").with_header("Origin", ALLOWED);
    let res = h.gateway.handle(&req).await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&res.body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
    assert_eq!(res.header("access-control-allow-origin"), Some(ALLOWED));
    assert_eq!(res.header("access-control-max-age"), Some("86400"));

    let entries = h.log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].context, "Network Error");
    assert_eq!(entries[0].message, "connection refused");
}

#[tokio::test]
async fn test_transport_failure_status_is_configurable() {
    let mut config = GatewayConfig::default();
    config.upstream.transport_error_status = 500;
    let h = harness_with(config, json!({}), Err(TransportError::new("timed out")));
    let res = h.gateway.handle(&InboundRequest::new(Method::GET, "/v1/rates")).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_upstream_404_is_relayed_and_logged() {
    let h = harness(Ok(UpstreamResponse {
        status: StatusCode::NOT_FOUND,
        content_type: None,
        body: r#"{"message":"not found"}"#.into(),
    }));
    let res = h.gateway.handle(&InboundRequest::new(Method::GET, "/v1/missing")).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, r#"{"message":"not found"}"#);
    assert_eq!(res.header("content-type"), Some("application/json"));

    let entries = h.log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].context, "API Error 404");
    assert_eq!(entries[0].message, r#"{"message":"not found"}"#);
}

#[tokio::test]
async fn test_strict_policy_denies_unknown_origin_on_every_route() {
    let h = harness(upstream_ok("{}"));
    for (method, path) in [
        (Method::OPTIONS, "/x"),
        (Method::GET, "/v2/dapp/catalog"),
        (Method::GET, "/v1/x"),
    ] {
        let req = InboundRequest::new(method, path).with_header("Origin", "https://evil.example");
        let res = h.gateway.handle(&req).await;
        assert_eq!(res.header("access-control-allow-origin"), Some("null"));
        assert!(res.header("access-control-allow-methods").is_none());
    }
}

#[tokio::test]
async fn test_wildcard_policy_grants_everyone() {
    let mut config = GatewayConfig::default();
    config.cors.policy = CorsMode::Wildcard;
    let h = harness_with(config, json!({}), upstream_ok("{}"));

    let req = InboundRequest::new(Method::OPTIONS, "/x").with_header("Origin", "https://evil.example");
    let res = h.gateway.handle(&req).await;
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        res.header("access-control-allow-methods"),
        Some("GET, POST, PUT, PATCH, DELETE, OPTIONS")
    );
}
