//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Error log → Catalog → Upstream client → Gateway → Server
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown:
//!     trigger → every `requested()` future resolves → server drains → exit
//! ```

use std::future::Future;

use tokio::sync::broadcast;

pub mod signals;
pub mod startup;

/// One-shot stop signal shared by `main`, the signal handler and tests.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A future that resolves once `trigger` is called, or once every
    /// `Shutdown` handle is gone. Subscribes immediately, so a trigger that
    /// happens before the future is polled is not missed.
    pub fn requested(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Fire the signal. A no-op when nobody is waiting.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
