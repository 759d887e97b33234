//! Top-level errors for bringing the gateway up.
//!
//! Request handling has no error type: every failure on the request path is
//! turned into a response by the gateway itself.

use thiserror::Error;

use crate::config::ConfigError;
use crate::upstream::TransportError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build upstream client: {0}")]
    UpstreamClient(#[from] TransportError),

    #[error("failed to watch catalog: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid address '{0}'")]
    Address(String),
}
