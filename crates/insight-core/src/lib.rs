//! Core types for Backup Insight.
//!
//! Data models for decoded backup records, the error taxonomy, advisory
//! notice contracts, display formatting helpers and CLI settings. This crate
//! has no I/O of its own; the ingestion pipeline lives in `insight-data`.

pub mod error;
pub mod formatting;
pub mod models;
pub mod notify;
pub mod settings;
pub mod time_utils;
