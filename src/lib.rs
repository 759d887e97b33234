//! Edge gateway library.
//!
//! A stateless HTTP gateway in front of one upstream REST API: it
//! normalizes paths, applies an allow-listed CORS policy, serves a static
//! catalog document locally and forwards everything else.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use error::GatewayError;
pub use http::{Gateway, GatewayResponse, HttpServer, InboundRequest};
pub use lifecycle::Shutdown;
