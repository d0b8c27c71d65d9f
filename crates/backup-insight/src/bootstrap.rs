use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use insight_core::models::BackupKind;
use insight_core::settings::Settings;
use insight_data::discover::find_backup_files;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"` if the level string is not recognised. All
/// output goes to stderr so report output on stdout stays clean.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Input expansion ────────────────────────────────────────────────────────────

/// Expand the command-line path arguments into a flat file list.
///
/// Directories are searched recursively for `.xml` files; explicit file
/// paths pass through unchanged so the validator can report on them even
/// when the extension is wrong.
pub fn collect_input_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(find_backup_files(path));
        } else {
            files.push(path.clone());
        }
    }
    files
}

// ── Kind resolution ────────────────────────────────────────────────────────────

/// Resolve the backup kind from settings, else from file names.
///
/// An explicit `--kind` always wins. Otherwise the first file name carrying
/// a recognisable keyword decides; if no name is recognisable the kind
/// defaults to messages with a warning.
pub fn resolve_kind(settings: &Settings, files: &[PathBuf]) -> BackupKind {
    if let Some(kind) = settings.explicit_kind() {
        return kind;
    }

    for file in files {
        if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
            if let Some(kind) = BackupKind::detect(name) {
                tracing::debug!(file = name, kind = kind.label(), "detected backup kind");
                return kind;
            }
        }
    }

    tracing::warn!("could not detect backup kind from file names; assuming sms");
    BackupKind::Messages
}

// ── Tests ──────────────────────────────────────────────────────────────────────
