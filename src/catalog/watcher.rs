//! Catalog file watcher for hot reload.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::catalog::store::CatalogStore;

/// Reloads a [`CatalogStore`] whenever its file changes.
pub struct CatalogWatcher {
    path: PathBuf,
    store: Arc<CatalogStore>,
}

impl CatalogWatcher {
    /// `None` when the store has no backing file.
    pub fn new(store: Arc<CatalogStore>) -> Option<Self> {
        let path = store.path()?.to_path_buf();
        Some(Self { path, store })
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = self.store.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Catalog file change detected, reloading...");
                        store.reload();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Catalog watcher started");
        Ok(watcher)
    }
}
