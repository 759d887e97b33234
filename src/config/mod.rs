//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → handed to the Gateway and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the catalog document reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CatalogConfig, CorsConfig, CorsMode, ErrorLogConfig, GatewayConfig, HeaderProfile,
    ListenerConfig, ObservabilityConfig, PrefixRule, RoutingConfig, UpstreamConfig,
};
