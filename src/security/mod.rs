//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (Origin header → CORS response headers)
//!     → attached to every response the gateway produces
//! ```
//!
//! # Design Decisions
//! - Fail closed: unlisted origins never receive their own origin back
//! - No trust in client input

pub mod cors;

pub use cors::CorsPolicy;
