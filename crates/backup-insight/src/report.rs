//! Report rendering.
//!
//! Turns a parse result plus its statistics into either a human-readable
//! text report or a JSON document. Pure string builders, no I/O, so the
//! exact output is testable.

use std::fmt::Write as _;

use chrono_tz::Tz;

use insight_core::formatting::{format_date_time, format_duration, format_duration_long};
use insight_core::models::ParseResult;
use insight_data::stats::{CallStats, MessageStats, Statistics};

/// Render the full text report for one ingestion run.
pub fn render_text(result: &ParseResult, stats: &Statistics, tz: Tz) -> String {
    let mut out = String::new();

    match stats {
        Statistics::Messages(m) => render_messages(&mut out, result, m, tz),
        Statistics::Calls(c) => render_calls(&mut out, result, c, tz),
    }

    out
}

/// Render the metadata plus statistics as a pretty JSON document.
pub fn render_json(result: &ParseResult, stats: &Statistics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "metadata": result.metadata,
        "statistics": stats,
    }))
}

fn render_messages(out: &mut String, result: &ParseResult, stats: &MessageStats, tz: Tz) {
    let _ = writeln!(out, "Message backup report");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out, "Files parsed:     {}", result.metadata.file_count);
    let _ = writeln!(
        out,
        "Messages:         {} ({} sent, {} received)",
        stats.total_count, stats.sent_count, stats.received_count
    );
    let _ = writeln!(out, "Contacts:         {}", stats.contact_count);
    if let Some(range) = stats.date_range {
        let _ = writeln!(
            out,
            "Date range:       {} to {}",
            format_date_time(Some(range.start), false, tz),
            format_date_time(Some(range.end), false, tz)
        );
    }
    let _ = writeln!(out, "Average length:   {} characters", stats.average_length);

    if !stats.by_contact.is_empty() {
        let _ = writeln!(out, "\nTop contacts:");
        for contact in &stats.by_contact {
            let _ = writeln!(
                out,
                "  {:<24} {:>6}  ({} sent, {} received, last {})",
                contact.name,
                contact.count,
                contact.sent,
                contact.received,
                format_date_time(contact.last_date, false, tz)
            );
        }
    }

    if !stats.by_month.is_empty() {
        let _ = writeln!(out, "\nBy month:");
        for bucket in &stats.by_month {
            let _ = writeln!(
                out,
                "  {}  {:>6}  ({} sent, {} received)",
                bucket.month, bucket.count, bucket.sent, bucket.received
            );
        }
    }

    if !stats.by_type.is_empty() {
        let _ = writeln!(out, "\nBy type:");
        for bucket in &stats.by_type {
            let _ = writeln!(out, "  {:<12} {:>6}", bucket.label, bucket.count);
        }
    }
}

fn render_calls(out: &mut String, result: &ParseResult, stats: &CallStats, tz: Tz) {
    let _ = writeln!(out, "Call backup report");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "Files parsed:     {}", result.metadata.file_count);
    let _ = writeln!(
        out,
        "Calls:            {} ({} incoming, {} outgoing, {} missed)",
        stats.total_count, stats.incoming_count, stats.outgoing_count, stats.missed_count
    );
    let _ = writeln!(
        out,
        "Total talk time:  {}",
        format_duration_long(stats.total_duration)
    );
    let _ = writeln!(
        out,
        "Average duration: {}",
        format_duration(stats.average_duration.round() as u64)
    );
    if let Some(range) = stats.date_range {
        let _ = writeln!(
            out,
            "Date range:       {} to {} ({} days, {:.1} calls/day)",
            format_date_time(Some(range.start), false, tz),
            format_date_time(Some(range.end), false, tz),
            stats.days_span,
            stats.average_per_day
        );
    }

    if !stats.frequent_contacts.is_empty() {
        let _ = writeln!(out, "\nMost frequent contacts:");
        for contact in &stats.frequent_contacts {
            let _ = writeln!(
                out,
                "  {:<24} {:>4} calls  ({} in, {} out, {} missed)",
                contact.name,
                contact.total_count,
                contact.incoming_count,
                contact.outgoing_count,
                contact.missed_count
            );
        }
    }

    if !stats.longest_contacts.is_empty() {
        let _ = writeln!(out, "\nLongest total talk time:");
        for contact in &stats.longest_contacts {
            let _ = writeln!(
                out,
                "  {:<24} {}",
                contact.name,
                format_duration(contact.total_duration)
            );
        }
    }

    if !stats.by_month.is_empty() {
        let _ = writeln!(out, "\nBy month:");
        for bucket in &stats.by_month {
            let _ = writeln!(
                out,
                "  {}  {:>6}  ({} in, {} out, {} missed)",
                bucket.month, bucket.count, bucket.incoming, bucket.outgoing, bucket.missed
            );
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
