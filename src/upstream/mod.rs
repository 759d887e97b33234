//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest + forward path
//!     → request.rs (URL, synthesized headers, body rules)
//!     → client.rs (single outbound call)
//!     → UpstreamResponse | TransportError
//! ```

pub mod client;
pub mod request;

pub use client::{HttpUpstream, TransportError, UpstreamClient, UpstreamResponse};
pub use request::{OutboundRequest, OutboundRequestBuilder};
