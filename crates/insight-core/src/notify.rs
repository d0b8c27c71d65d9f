//! Advisory notice contracts.
//!
//! The ingestion pipeline reports user-facing advisories (non-fatal warnings
//! and per-file failures) through an explicit [`NoticeSink`] passed into each
//! call, so the core carries no dependency on any global event mechanism.
//! The host environment decides how notices reach the user.

use serde::{Deserialize, Serialize};

// ── Notice ────────────────────────────────────────────────────────────────────

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Something went wrong; the operation that raised it failed.
    Error,
    /// Informational advisory; processing continues.
    Info,
}

/// A single user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

// ── NoticeSink ────────────────────────────────────────────────────────────────

/// Receiver for user-facing advisories.
///
/// Implementations must be cheap and non-blocking; the pipeline calls
/// [`NoticeSink::notify`] inline while parsing.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Forwards notices to the `tracing` log, for callers that have no user
/// interface of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => tracing::error!("{}", notice.message),
            NoticeKind::Info => tracing::info!("{}", notice.message),
        }
    }
}

/// Collects notices in memory. Intended for tests and for hosts that render
/// notices after the fact.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: std::sync::Mutex<Vec<Notice>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notices received so far, in arrival order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice lock poisoned").clone()
    }
}

impl NoticeSink for MemorySink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notice lock poisoned")
            .push(notice);
    }
}

// ── Error announcement ────────────────────────────────────────────────────────

/// Announce a fatal error through the sink before returning it to the caller.
///
/// Every fatal ingestion error passes through here so the user-facing message
/// and the returned error always agree.
pub fn announce(sink: &dyn NoticeSink, err: crate::error::BackupError) -> crate::error::BackupError {
    sink.notify(Notice::error(err.to_string()));
    err
}

// ── Tests ─────────────────────────────────────────────────────────────────────
