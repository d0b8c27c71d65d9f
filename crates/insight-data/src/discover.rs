//! Backup file discovery.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Find all `.xml` files (case-insensitive) recursively under `root`,
/// sorted by path. A single `.xml` file path is returned as-is.
pub fn find_backup_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        warn!("Input path does not exist: {}", root.display());
        return Vec::new();
    }

    if root.is_file() {
        return if is_xml(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_xml(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
