//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order: error log, catalog,
//!   upstream client, gateway, HTTP server
//! - Start optional background pieces (catalog watcher, metrics exporter)
//!
//! # Design Decisions
//! - Catalog problems never abort startup; everything else does
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use notify::RecommendedWatcher;

use crate::catalog::{CatalogStore, CatalogWatcher};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::{Gateway, HttpServer};
use crate::observability::{metrics, ErrorSink, FileErrorLog, NullErrorLog};
use crate::upstream::{HttpUpstream, UpstreamClient};

/// Everything `main` needs to serve traffic.
pub struct Runtime {
    pub server: HttpServer,
    pub gateway: Arc<Gateway>,
    /// Keeps the catalog watcher alive when enabled.
    pub watcher: Option<RecommendedWatcher>,
}

/// Error sink chosen by config. Must be called inside a Tokio runtime.
pub fn error_sink(config: &GatewayConfig) -> Arc<dyn ErrorSink> {
    if config.error_log.enabled {
        Arc::new(FileErrorLog::spawn(&config.error_log.path))
    } else {
        Arc::new(NullErrorLog)
    }
}

/// Build a gateway around an explicit upstream client and error sink.
pub fn build_gateway(
    config: &GatewayConfig,
    upstream: Arc<dyn UpstreamClient>,
    errors: Arc<dyn ErrorSink>,
) -> Arc<Gateway> {
    let catalog = Arc::new(CatalogStore::load(&config.catalog.path, errors.clone()));
    Arc::new(Gateway::new(config, catalog, upstream, errors))
}

/// Wire up the production gateway from config.
pub fn initialize(config: GatewayConfig) -> Result<Runtime, GatewayError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| GatewayError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr);
    }

    let errors = error_sink(&config);
    let upstream: Arc<dyn UpstreamClient> = Arc::new(HttpUpstream::new(&config.upstream)?);
    let gateway = build_gateway(&config, upstream, errors);

    let watcher = if config.catalog.watch {
        match CatalogWatcher::new(gateway.catalog().clone()) {
            Some(w) => Some(w.run()?),
            None => None,
        }
    } else {
        None
    };

    tracing::info!(
        upstream = %config.upstream.base_url(),
        cors_policy = ?config.cors.policy,
        header_profile = ?config.upstream.header_profile,
        catalog = %config.catalog.path,
        "Gateway initialized"
    );

    let server = HttpServer::new(config, gateway.clone());
    Ok(Runtime {
        server,
        gateway,
        watcher,
    })
}
