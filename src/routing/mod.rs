//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, raw path)
//!     → normalizer.rs (ordered prefix rules → clean + forward path)
//!     → router.rs (preflight / catalog / robots / proxy)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins, in fixed order

pub mod normalizer;
pub mod router;

pub use normalizer::{NormalizedPath, PathNormalizer};
pub use router::{Route, Router};
