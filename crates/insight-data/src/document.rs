//! Backup document decoding.
//!
//! Turns the full decoded text of one backup export into a [`ParseResult`]:
//! structural XML checks, root-attribute statistics, and record mapping in
//! document order. The whole document is held in memory; streaming parse is
//! deliberately out of scope.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use insight_core::error::{BackupError, Result};
use insight_core::models::{BackupKind, BackupMetadata, ParseResult, Records};
use insight_core::notify::{announce, NoticeSink};
use insight_core::time_utils::parse_epoch_millis;

use crate::mapper;
use crate::validator;

// ── FileInfo ──────────────────────────────────────────────────────────────────

/// Provenance of the text being parsed, carried into [`BackupMetadata`].
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse one backup document from its decoded text.
///
/// Fails with [`BackupError::EmptyInput`] for blank text (before any XML
/// decoding), [`BackupError::MalformedXml`] for structural XML errors,
/// [`BackupError::WrongBackupType`] when the root tag does not match `kind`,
/// and [`BackupError::EmptyBackup`] when no matching child elements exist.
/// All failures are announced through `sink` before being returned.
///
/// The root `count` attribute is recorded as declared metadata only; it is
/// never checked against the number of records actually mapped.
pub fn parse_text(
    text: &str,
    kind: BackupKind,
    file: &FileInfo,
    sink: &dyn NoticeSink,
    chunk_size: usize,
) -> Result<ParseResult> {
    if text.trim().is_empty() {
        return Err(announce(
            sink,
            BackupError::EmptyInput {
                file: file.name.clone(),
            },
        ));
    }

    let doc = roxmltree::Document::parse(text).map_err(|source| {
        announce(
            sink,
            BackupError::MalformedXml {
                file: file.name.clone(),
                source,
            },
        )
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != kind.root_tag() {
        return Err(announce(
            sink,
            BackupError::WrongBackupType {
                file: file.name.clone(),
                expected: kind.root_tag(),
                found: root.tag_name().name().to_string(),
            },
        ));
    }

    let declared_count: u64 = root
        .attribute("count")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);
    let backup_date: DateTime<Utc> = root
        .attribute("backup_date")
        .and_then(parse_epoch_millis)
        .unwrap_or(DateTime::UNIX_EPOCH);

    let elements: Vec<roxmltree::Node<'_, '_>> = root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == kind.child_tag())
        .collect();

    if elements.is_empty() {
        return Err(announce(
            sink,
            BackupError::EmptyBackup {
                file: file.name.clone(),
                expected: kind.child_tag(),
            },
        ));
    }

    let mut on_chunk = |mapped: usize| {
        debug!(file = %file.name, mapped, "mapping chunk complete");
    };
    let records = match kind {
        BackupKind::Messages => {
            Records::Messages(mapper::map_messages(&elements, chunk_size, &mut on_chunk))
        }
        BackupKind::Calls => {
            Records::Calls(mapper::map_calls(&elements, chunk_size, &mut on_chunk))
        }
    };

    debug!(
        file = %file.name,
        declared = declared_count,
        parsed = records.len(),
        "parsed backup document"
    );

    Ok(ParseResult {
        records,
        metadata: BackupMetadata {
            declared_count,
            backup_date,
            file_name: file.name.clone(),
            file_size: file.size,
            file_count: 1,
        },
    })
}

/// Synchronous single-file pipeline: validate, read, parse.
///
/// This is the fallback path for callers without an async runtime; the async
/// facade in `insight-runtime` offloads the same parse to a blocking worker.
pub fn parse_file(
    path: &Path,
    kind: BackupKind,
    sink: &dyn NoticeSink,
    chunk_size: usize,
) -> Result<ParseResult> {
    validator::validate(path, kind, sink)?;

    let text = std::fs::read_to_string(path).map_err(|source| {
        announce(
            sink,
            BackupError::FileRead {
                path: path.to_path_buf(),
                source,
            },
        )
    })?;

    let info = FileInfo::new(validator::file_name_of(path), text.len() as u64);
    parse_text(&text, kind, &info, sink, chunk_size)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
