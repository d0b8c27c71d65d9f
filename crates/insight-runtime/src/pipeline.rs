//! Async ingestion pipeline.
//!
//! Same semantics as the synchronous pipeline in `insight-data`: file I/O
//! goes through `tokio::fs` and the CPU-bound XML parse is offloaded to a
//! blocking worker so the runtime's reactor threads never stall on a large
//! document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use insight_core::error::{BackupError, Result};
use insight_core::models::{BackupKind, ParseResult};
use insight_core::notify::{announce, NoticeSink};
use insight_data::batch::{merge_results, BatchProgress};
use insight_data::document::{self, FileInfo};
use insight_data::validator;

/// Validate, read and parse one backup file without blocking the runtime.
///
/// Failure taxonomy and notice announcements are identical to the
/// synchronous [`document::parse_file`].
pub async fn parse_backup(
    path: &Path,
    kind: BackupKind,
    chunk_size: usize,
    sink: Arc<dyn NoticeSink>,
) -> Result<ParseResult> {
    // Name checks come before any filesystem access, matching the
    // synchronous validator's ordering.
    let name = file_name(path);
    validator::check_extension(&name, sink.as_ref())?;

    let metadata = tokio::fs::metadata(path).await.map_err(|source| {
        announce(
            sink.as_ref(),
            BackupError::FileRead {
                path: path.to_path_buf(),
                source,
            },
        )
    })?;

    validator::validate_named(&name, metadata.len(), kind, sink.as_ref())?;

    let text = tokio::fs::read_to_string(path).await.map_err(|source| {
        announce(
            sink.as_ref(),
            BackupError::FileRead {
                path: path.to_path_buf(),
                source,
            },
        )
    })?;

    let info = FileInfo::new(name, text.len() as u64);
    let worker_sink = Arc::clone(&sink);
    tokio::task::spawn_blocking(move || {
        document::parse_text(&text, kind, &info, worker_sink.as_ref(), chunk_size)
    })
    .await
    .unwrap_or_else(|join_err| std::panic::resume_unwind(join_err.into_panic()))
}

/// Ingest `paths` strictly in order, merging all successfully parsed files.
///
/// Mirrors the synchronous batch orchestrator: per-file failures are logged,
/// announced and skipped; `on_progress` fires exactly once per file; only an
/// empty list is fatal.
pub async fn parse_batch(
    paths: &[PathBuf],
    kind: BackupKind,
    chunk_size: usize,
    on_progress: &mut (dyn FnMut(BatchProgress) + Send),
    sink: Arc<dyn NoticeSink>,
) -> Result<ParseResult> {
    if paths.is_empty() {
        return Err(announce(sink.as_ref(), BackupError::NoFilesProvided));
    }

    let total = paths.len();
    let mut parsed: Vec<ParseResult> = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        match parse_backup(path, kind, chunk_size, Arc::clone(&sink)).await {
            Ok(result) => parsed.push(result),
            // Already announced through the sink by the failing stage.
            Err(e) => warn!(file = %path.display(), error = %e, "skipping file in batch"),
        }
        on_progress(BatchProgress::new(index + 1, total, file_name(path)));
    }

    Ok(merge_results(kind, parsed))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
