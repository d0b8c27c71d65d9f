//! Backup ingestion layer for Backup Insight.
//!
//! Responsible for validating, decoding and mapping SMS/call backup XML
//! documents into typed records, driving multi-file batch ingestion and
//! aggregating record collections into display statistics.

pub mod batch;
pub mod discover;
pub mod document;
pub mod mapper;
pub mod stats;
pub mod validator;

pub use insight_core as core;
