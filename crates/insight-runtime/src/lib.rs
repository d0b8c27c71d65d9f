//! Async runtime layer for backup ingestion.
//!
//! Wraps the synchronous parsing pipeline in non-blocking file I/O and
//! blocking-worker offload for use inside a tokio runtime.

pub mod pipeline;

pub use insight_core as core;
pub use insight_data as data;
