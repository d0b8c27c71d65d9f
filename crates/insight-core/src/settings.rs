use clap::Parser;
use std::path::PathBuf;

use crate::models::BackupKind;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyze SMS/call backup XML exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "backup-insight",
    about = "Parse SMS Backup & Restore XML exports and print usage statistics",
    version
)]
pub struct Settings {
    /// Backup files or directories to ingest (directories are searched
    /// recursively for .xml files)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Backup kind; "auto" detects it from each file name
    #[arg(long, default_value = "auto", value_parser = ["auto", "sms", "calls"])]
    pub kind: String,

    /// Timezone for date display (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Mapper chunk size for large documents
    #[arg(long, default_value = "500", value_parser = clap::value_parser!(usize))]
    pub chunk_size: usize,

    /// Suppress per-file progress lines on stderr
    #[arg(long)]
    pub quiet: bool,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

impl Settings {
    /// The explicit backup kind, or `None` when `--kind auto` was given and
    /// the kind must be detected from file names.
    pub fn explicit_kind(&self) -> Option<BackupKind> {
        match self.kind.as_str() {
            "sms" => Some(BackupKind::Messages),
            "calls" => Some(BackupKind::Calls),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
