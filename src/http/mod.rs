//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, body read)
//!     → request.rs (InboundRequest descriptor)
//!     → gateway.rs (CORS, route dispatch, forward)
//!     → response.rs (GatewayResponse, upstream translation)
//!     → Send to client
//! ```

pub mod gateway;
pub mod request;
pub mod response;
pub mod server;

pub use gateway::Gateway;
pub use request::{InboundRequest, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::GatewayResponse;
pub use server::HttpServer;
