//! Catalog subsystem.
//!
//! # Data Flow
//! ```text
//! catalog.json
//!     → store.rs (read once at startup, sentinel on failure)
//!     → Arc<CatalogStore> injected into the Gateway
//!
//! On file change (optional):
//!     watcher.rs → CatalogStore::reload → atomic swap
//! ```
//!
//! # Design Decisions
//! - Load failures never abort startup
//! - Lock-free reads via ArcSwap; the only writer is an explicit reload

pub mod store;
pub mod watcher;

pub use store::{missing_catalog, CatalogError, CatalogStore, MISSING_CATALOG_MESSAGE};
pub use watcher::CatalogWatcher;
