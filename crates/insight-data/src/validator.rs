//! Pre-parse file validation.
//!
//! Cheap structural checks that run before any XML decoding. A file that
//! fails here never reaches the document parser.

use std::path::Path;

use insight_core::error::{BackupError, Result};
use insight_core::models::BackupKind;
use insight_core::notify::{announce, Notice, NoticeSink};

/// Ingestion size ceiling. The sole safeguard against unbounded parse work.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Extension check alone: the name must end in `.xml` (case-insensitive).
///
/// First validation stage. Needs only the name, so callers run it before
/// touching the filesystem at all.
pub fn check_extension(file_name: &str, sink: &dyn NoticeSink) -> Result<()> {
    if !file_name.to_lowercase().ends_with(".xml") {
        return Err(announce(
            sink,
            BackupError::InvalidFormat {
                file: file_name.to_string(),
            },
        ));
    }
    Ok(())
}

/// Validate a backup file by name and size.
///
/// Checks, in order:
/// 1. The name ends in `.xml` (case-insensitive) — [`BackupError::InvalidFormat`].
/// 2. The size is at most [`MAX_FILE_SIZE`] — [`BackupError::FileTooLarge`].
/// 3. Soft check: the name contains the kind's keyword (`"sms"` / `"call"`).
///    A miss emits an [`Notice::info`] advisory and validation still passes.
pub fn validate_named(
    file_name: &str,
    size: u64,
    kind: BackupKind,
    sink: &dyn NoticeSink,
) -> Result<()> {
    check_extension(file_name, sink)?;

    if size > MAX_FILE_SIZE {
        return Err(announce(
            sink,
            BackupError::FileTooLarge {
                file: file_name.to_string(),
                size,
            },
        ));
    }

    if !file_name.to_lowercase().contains(kind.file_keyword()) {
        sink.notify(Notice::info(format!(
            "{} may not be a standard {} backup file",
            file_name,
            kind.label()
        )));
    }

    Ok(())
}

/// Validate `path` by name, then stat it and validate the size.
///
/// The extension check runs before the file is stat-ed, so a missing file
/// with the wrong extension reports the format error, not a read error.
pub fn validate(path: &Path, kind: BackupKind, sink: &dyn NoticeSink) -> Result<()> {
    let name = file_name_of(path);
    check_extension(&name, sink)?;

    let metadata = std::fs::metadata(path).map_err(|source| {
        announce(
            sink,
            BackupError::FileRead {
                path: path.to_path_buf(),
                source,
            },
        )
    })?;

    validate_named(&name, metadata.len(), kind, sink)
}

/// The final path component as a display string.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
