//! In-memory catalog document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::{json, Value};
use thiserror::Error;

use crate::observability::ErrorSink;

/// Message of the document served when the catalog cannot be read.
pub const MISSING_CATALOG_MESSAGE: &str = "Catalog missing or invalid JSON";

/// The document served in place of an unreadable catalog.
pub fn missing_catalog() -> Value {
    json!({ "error": MISSING_CATALOG_MESSAGE })
}

/// Why a catalog file could not be used.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read and parse a catalog file.
pub fn read_catalog(path: &Path) -> Result<Value, CatalogError> {
    let data = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-mostly holder of the catalog.
///
/// Readers take a snapshot with [`CatalogStore::current`]; `reload` and
/// `replace` swap the whole document atomically so a reader never sees a
/// partial update.
pub struct CatalogStore {
    path: Option<PathBuf>,
    document: ArcSwap<Value>,
    sink: Arc<dyn ErrorSink>,
}

impl CatalogStore {
    /// Store holding a fixed document, with no backing file.
    pub fn from_value(document: Value, sink: Arc<dyn ErrorSink>) -> Self {
        Self {
            path: None,
            document: ArcSwap::from_pointee(document),
            sink,
        }
    }

    /// Load from `path`. Never fails: an unreadable file yields the
    /// missing-catalog document and an error log entry.
    pub fn load(path: impl AsRef<Path>, sink: Arc<dyn ErrorSink>) -> Self {
        let path = path.as_ref().to_path_buf();
        let document = read_or_default(&path, sink.as_ref());
        Self {
            path: Some(path),
            document: ArcSwap::from_pointee(document),
            sink,
        }
    }

    /// Snapshot of the current document.
    pub fn current(&self) -> Arc<Value> {
        self.document.load_full()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Re-read the backing file. A store without a file, or a file that no
    /// longer parses, keeps the current document.
    pub fn reload(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match read_catalog(path) {
            Ok(document) => {
                self.document.store(Arc::new(document));
                tracing::info!(path = ?path, "Catalog reloaded");
            }
            Err(e) => {
                self.sink.record("Catalog reload error", &e.to_string());
                tracing::warn!(path = ?path, "Keeping current catalog");
            }
        }
    }

    /// Swap in a new document directly.
    pub fn replace(&self, document: Value) {
        self.document.store(Arc::new(document));
    }

    /// Current document as two-space indented JSON.
    pub fn to_pretty_json(&self) -> String {
        let document = self.current();
        serde_json::to_string_pretty(document.as_ref())
            .unwrap_or_else(|_| missing_catalog().to_string())
    }
}

fn read_or_default(path: &Path, sink: &dyn ErrorSink) -> Value {
    match read_catalog(path) {
        Ok(document) => {
            tracing::info!(path = ?path, "Catalog loaded");
            document
        }
        Err(e) => {
            sink.record("Catalog load error", &e.to_string());
            missing_catalog()
        }
    }
}
