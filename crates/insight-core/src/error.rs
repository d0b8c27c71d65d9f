use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the backup ingestion pipeline.
///
/// Every variant is fatal to the single-file operation that raised it; the
/// batch orchestrator downgrades per-file failures to logged advisories and
/// continues with the remaining files.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The file name does not carry a recognised backup extension.
    #[error("{file} is not an XML file; expected a .xml backup export")]
    InvalidFormat { file: String },

    /// The file exceeds the ingestion size ceiling.
    #[error("{file} is too large ({size} bytes); the limit is 100 MiB")]
    FileTooLarge { file: String, size: u64 },

    /// The file content is blank or whitespace-only.
    #[error("{file} is empty")]
    EmptyInput { file: String },

    /// The content is not well-formed XML.
    #[error("{file} is not valid XML: {source}")]
    MalformedXml {
        file: String,
        #[source]
        source: roxmltree::Error,
    },

    /// The document root does not match the expected backup kind.
    #[error("{file} is not a {expected} backup (root element is <{found}>)")]
    WrongBackupType {
        file: String,
        expected: &'static str,
        found: String,
    },

    /// The document contains no records of the expected kind.
    #[error("{file} contains no {expected} records")]
    EmptyBackup {
        file: String,
        expected: &'static str,
    },

    /// Batch ingestion was invoked with an empty file list.
    #[error("no backup files provided")]
    NoFilesProvided,

    /// A file could not be opened or read from disk.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the insight crates.
pub type Result<T> = std::result::Result<T, BackupError>;
