//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway pipeline produces:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!     → error_log.rs (append-only error file)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the trace span of every request
//! - Metrics are cheap (atomic increments)
//! - Error log writes never sit on the response path

pub mod error_log;
pub mod logging;
pub mod metrics;

pub use error_log::{ErrorSink, FileErrorLog, LogEntry, MemoryErrorLog, NullErrorLog};
