//! Append-only error log sink.
//!
//! # Responsibilities
//! - Record upstream failures and catalog problems as
//!   `[timestamp] [context] message` lines
//! - Mirror every entry into `tracing`
//!
//! # Design Decisions
//! - `record` never blocks and never fails; file writes happen on a
//!   background task fed by an unbounded channel
//! - Write failures only surface as `tracing` warnings

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

/// Destination for gateway error entries.
pub trait ErrorSink: Send + Sync {
    fn record(&self, context: &str, message: &str);
}

/// Render one log line, newline included.
pub fn format_line(timestamp: DateTime<Utc>, context: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        context,
        message
    )
}

enum Command {
    Append(String),
    Flush(oneshot::Sender<()>),
}

/// File-backed sink. Cheap to clone; all clones share one writer task.
#[derive(Clone)]
pub struct FileErrorLog {
    path: PathBuf,
    tx: mpsc::UnboundedSender<Command>,
}

impl FileErrorLog {
    /// Start the writer task. Must be called inside a Tokio runtime.
    pub fn spawn(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(write_loop(path.clone(), rx));
        Self { path, tx }
    }

    /// Wait until every entry recorded so far has been written (or dropped).
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }
}

impl ErrorSink for FileErrorLog {
    fn record(&self, context: &str, message: &str) {
        tracing::error!(context = %context, "{}", message);
        let line = format_line(Utc::now(), context, message);
        if self.tx.send(Command::Append(line)).is_err() {
            tracing::warn!(path = ?self.path, "Error log writer is gone, entry dropped");
        }
    }
}

async fn write_loop(path: PathBuf, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Append(line) => {
                if let Err(e) = append(&path, &line).await {
                    tracing::warn!(path = ?path, error = %e, "Failed to write error log");
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

async fn append(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

/// Sink used when the error log is disabled. Entries still reach `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullErrorLog;

impl ErrorSink for NullErrorLog {
    fn record(&self, context: &str, message: &str) {
        tracing::error!(context = %context, "{}", message);
    }
}

/// A recorded entry, as kept by [`MemoryErrorLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub context: String,
    pub message: String,
}

/// In-memory sink for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryErrorLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for MemoryErrorLog {
    fn record(&self, context: &str, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(LogEntry {
                context: context.to_string(),
                message: message.to_string(),
            });
        }
    }
}
