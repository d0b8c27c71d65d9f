//! Multi-file batch ingestion.
//!
//! Drives validation and parsing over an ordered list of backup files,
//! reporting per-file progress and merging the successful results. A file
//! that fails is logged, announced through the notice sink and skipped; the
//! batch itself fails only when the file list is empty.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use insight_core::error::{BackupError, Result};
use insight_core::models::{BackupKind, BackupMetadata, ParseResult, Records};
use insight_core::notify::{announce, NoticeSink};

use crate::document;
use crate::validator::file_name_of;

// ── Progress reporting ────────────────────────────────────────────────────────

/// Snapshot passed to the progress callback after every file attempt,
/// success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// 1-based index of the file just attempted.
    pub current: usize,
    /// Total number of files in the batch.
    pub total: usize,
    /// Name of the file just attempted.
    pub file_name: String,
    /// `round(current / total * 100)`.
    pub percentage: u32,
}

impl BatchProgress {
    pub fn new(current: usize, total: usize, file_name: impl Into<String>) -> Self {
        let percentage = ((current as f64 / total as f64) * 100.0).round() as u32;
        Self {
            current,
            total,
            file_name: file_name.into(),
            percentage,
        }
    }
}

// ── Batch ingestion ───────────────────────────────────────────────────────────

/// Ingest `paths` strictly in order, merging all successfully parsed files.
///
/// Fails only with [`BackupError::NoFilesProvided`] for an empty list.
/// `on_progress` is invoked exactly once per file, after the attempt.
/// Per-file failure detail is observable through logs and the notice sink
/// only; the merged metadata counts successes.
pub fn ingest_all(
    paths: &[PathBuf],
    kind: BackupKind,
    chunk_size: usize,
    on_progress: &mut dyn FnMut(BatchProgress),
    sink: &dyn NoticeSink,
) -> Result<ParseResult> {
    if paths.is_empty() {
        return Err(announce(sink, BackupError::NoFilesProvided));
    }

    let total = paths.len();
    let mut parsed: Vec<ParseResult> = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        match document::parse_file(path, kind, sink, chunk_size) {
            Ok(result) => parsed.push(result),
            // Already announced through the sink by the failing stage.
            Err(e) => log_skip(path, &e),
        }
        on_progress(BatchProgress::new(index + 1, total, file_name_of(path)));
    }

    Ok(merge_results(kind, parsed))
}

/// Concatenate per-file results in file order under synthesized metadata.
///
/// The merged backup instant is the orchestration time; multiple source
/// backup dates cannot be collapsed into one.
pub fn merge_results(kind: BackupKind, results: Vec<ParseResult>) -> ParseResult {
    let file_count = results.len() as u32;
    let mut records = Records::empty(kind);
    for result in results {
        records.append(result.records);
    }

    let metadata = BackupMetadata {
        declared_count: records.len() as u64,
        backup_date: Utc::now(),
        file_name: String::new(),
        file_size: 0,
        file_count,
    };

    ParseResult { records, metadata }
}

pub(crate) fn log_skip(path: &Path, err: &BackupError) {
    warn!(file = %path.display(), error = %err, "skipping file in batch");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::notify::{MemorySink, NoticeKind};
    use tempfile::TempDir;

    fn write_sms_file(dir: &TempDir, name: &str, bodies: &[(&str, i64)]) -> PathBuf {
        let mut xml = format!(r#"<smses count="{}" backup_date="1705312800000">"#, bodies.len());
        for (i, (contact, msg_type)) in bodies.iter().enumerate() {
            xml.push_str(&format!(
                r#"<sms address="+{i}" date="{}" type="{msg_type}" body="hi" contact_name="{contact}"/>"#,
                1_705_312_800_000_i64 + i as i64 * 1000,
            ));
        }
        xml.push_str("</smses>");
        let path = dir.path().join(name);
        std::fs::write(&path, xml).unwrap();
        path
    }

    fn write_calls_file(dir: &TempDir, name: &str) -> PathBuf {
        let xml = r#"<calls count="1"><call number="+1" duration="5" date="1705312800000" type="3"/></calls>"#;
        let path = dir.path().join(name);
        std::fs::write(&path, xml).unwrap();
        path
    }

    // ── progress + merging ────────────────────────────────────────────────────

    #[test]
    fn test_empty_file_list_fails() {
        let sink = MemorySink::new();
        let err = ingest_all(&[], BackupKind::Messages, 500, &mut |_| {}, &sink).unwrap_err();
        assert!(matches!(err, BackupError::NoFilesProvided));
        assert_eq!(sink.notices().len(), 1);
    }

    #[test]
    fn test_two_good_files_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let a = write_sms_file(&dir, "sms-a.xml", &[("Alice", 1), ("Bob", 2)]);
        let b = write_sms_file(&dir, "sms-b.xml", &[("Carol", 1)]);

        let mut progress = Vec::new();
        let result = ingest_all(
            &[a, b],
            BackupKind::Messages,
            500,
            &mut |p| progress.push(p),
            &MemorySink::new(),
        )
        .unwrap();

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.metadata.file_count, 2);
        assert_eq!(result.metadata.declared_count, 3);

        let messages = result.records.as_messages().unwrap();
        // File order preserved: Alice, Bob from file a, then Carol from b.
        assert_eq!(messages[0].contact_name, "Alice");
        assert_eq!(messages[2].contact_name, "Carol");

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0], BatchProgress::new(1, 2, "sms-a.xml"));
        assert_eq!(progress[1].percentage, 100);
    }

    #[test]
    fn test_wrong_type_file_skipped_batch_continues() {
        let dir = TempDir::new().unwrap();
        let good = write_sms_file(&dir, "sms-good.xml", &[("Alice", 1)]);
        // A calls document offered to a message batch.
        let bad = write_calls_file(&dir, "sms-actually-calls.xml");

        let sink = MemorySink::new();
        let mut progress = Vec::new();
        let result = ingest_all(
            &[good, bad],
            BackupKind::Messages,
            500,
            &mut |p| progress.push(p),
            &sink,
        )
        .unwrap();

        // Only the first file's records survive.
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.metadata.file_count, 1);

        // Progress fired exactly twice, current = 1 then 2.
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].current, 1);
        assert_eq!(progress[1].current, 2);

        // The failure surfaced as an error notice.
        assert!(sink
            .notices()
            .iter()
            .any(|n| n.kind == NoticeKind::Error && n.message.contains("sms-actually-calls.xml")));
    }

    #[test]
    fn test_invalid_extension_never_reaches_parser() {
        // An all-failure batch still succeeds with an empty merge; the .txt
        // file fails validation, so no XML error for its (valid) content
        // ever appears.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sms-backup.txt");
        std::fs::write(&path, r#"<smses count="1"><sms address="+1" type="1"/></smses>"#).unwrap();

        let sink = MemorySink::new();
        let mut count = 0;
        let result = ingest_all(
            &[path],
            BackupKind::Messages,
            500,
            &mut |_| count += 1,
            &sink,
        )
        .unwrap();

        assert!(result.records.is_empty());
        assert_eq!(result.metadata.file_count, 0);
        assert_eq!(count, 1);

        let notices = sink.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("not an XML file"));
    }

    #[test]
    fn test_progress_percentage_rounds() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| write_sms_file(&dir, &format!("sms-{i}.xml"), &[("A", 1)]))
            .collect();

        let mut percentages = Vec::new();
        ingest_all(
            &paths,
            BackupKind::Messages,
            500,
            &mut |p| percentages.push(p.percentage),
            &MemorySink::new(),
        )
        .unwrap();

        // 1/3 → 33, 2/3 → 67, 3/3 → 100.
        assert_eq!(percentages, vec![33, 67, 100]);
    }

    // ── merge_results ─────────────────────────────────────────────────────────

    #[test]
    fn test_merge_results_empty() {
        let merged = merge_results(BackupKind::Calls, Vec::new());
        assert!(merged.records.is_empty());
        assert_eq!(merged.metadata.file_count, 0);
        assert_eq!(merged.metadata.declared_count, 0);
        assert_eq!(merged.metadata.file_name, "");
    }

    #[test]
    fn test_merge_backup_date_is_orchestration_time() {
        let before = Utc::now();
        let merged = merge_results(BackupKind::Messages, Vec::new());
        let after = Utc::now();
        assert!(merged.metadata.backup_date >= before);
        assert!(merged.metadata.backup_date <= after);
    }
}
