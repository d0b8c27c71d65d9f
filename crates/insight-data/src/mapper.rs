//! Attribute-to-record mapping.
//!
//! Each `<sms>` / `<call>` element is mapped independently through a uniform
//! attribute-reading policy: string fields default to the empty string,
//! numeric fields to 0, timestamps to "explicitly absent", and the contact
//! label falls back from `contact_name` to the raw address/number to
//! [`UNKNOWN_CONTACT`]. Defaulting makes mapping total: every element the
//! document parser hands over produces a record, so mapping never fails.
//!
//! Large documents are processed in fixed-size chunks with a hook invoked
//! between chunks so a cooperative scheduler can interleave other work. The
//! produced order is document order regardless of chunk size.

use chrono::{DateTime, Utc};
use roxmltree::Node;

use insight_core::models::{CallRecord, CallType, MessageRecord, MessageType, UNKNOWN_CONTACT};
use insight_core::time_utils::parse_epoch_millis;

/// Default number of elements mapped between chunk-hook invocations.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

// ── Attribute reading policy ──────────────────────────────────────────────────

/// Uniform attribute extraction over one record element.
///
/// One reader method per logical field type; every record field goes through
/// exactly one of them, so the defaulting rules live in a single place.
struct Attrs<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Attrs<'a, 'input> {
    fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// String field; absent → `""`.
    fn text(&self, name: &str) -> String {
        self.node.attribute(name).unwrap_or_default().to_string()
    }

    /// Integer field; absent or unparseable → 0.
    fn int(&self, name: &str) -> i64 {
        self.node
            .attribute(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Epoch-millisecond timestamp field; absent or non-numeric → `None`.
    ///
    /// The record keeps the explicit absence so date-range and time-series
    /// maths can exclude it; display falls back to an "unknown time" label.
    fn timestamp_ms(&self, name: &str) -> Option<DateTime<Utc>> {
        self.node.attribute(name).and_then(parse_epoch_millis)
    }

    /// Contact label; empty/absent falls back to the `fallback` attribute,
    /// then to [`UNKNOWN_CONTACT`].
    fn label(&self, name: &str, fallback: &str) -> String {
        match self.node.attribute(name) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => match self.node.attribute(fallback) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => UNKNOWN_CONTACT.to_string(),
            },
        }
    }
}

// ── Per-element mapping ───────────────────────────────────────────────────────

/// Map one `<sms>` element.
pub fn map_message(node: Node<'_, '_>) -> MessageRecord {
    let attrs = Attrs::new(node);
    MessageRecord {
        address: attrs.text("address"),
        timestamp: attrs.timestamp_ms("date"),
        message_type: MessageType::from_code(attrs.int("type")),
        subject: attrs.text("subject"),
        body: attrs.text("body"),
        toa: attrs.text("toa"),
        sc_toa: attrs.text("sc_toa"),
        service_center: attrs.text("service_center"),
        read: attrs.int("read"),
        status: attrs.int("status"),
        protocol: attrs.int("protocol"),
        locked: attrs.int("locked"),
        readable_date: attrs.text("readable_date"),
        contact_name: attrs.label("contact_name", "address"),
    }
}

/// Map one `<call>` element.
pub fn map_call(node: Node<'_, '_>) -> CallRecord {
    let attrs = Attrs::new(node);
    CallRecord {
        number: attrs.text("number"),
        duration: attrs.int("duration").max(0) as u64,
        timestamp: attrs.timestamp_ms("date"),
        call_type: CallType::from_code(attrs.int("type")),
        presentation: attrs.int("presentation"),
        subscription_id: attrs.text("subscription_id"),
        post_dial_digits: attrs.text("post_dial_digits"),
        subscription_component_name: attrs.text("subscription_component_name"),
        readable_date: attrs.text("readable_date"),
        contact_name: attrs.label("contact_name", "number"),
    }
}

// ── Chunked drivers ───────────────────────────────────────────────────────────

/// Map all message elements in document order.
///
/// `on_chunk` is invoked between chunks (never after the final one) with the
/// number of records produced so far; it is the cooperative-yield point for
/// callers that must stay responsive during huge documents.
pub fn map_messages(
    elements: &[Node<'_, '_>],
    chunk_size: usize,
    on_chunk: &mut dyn FnMut(usize),
) -> Vec<MessageRecord> {
    map_chunked(elements, chunk_size, on_chunk, map_message)
}

/// Map all call elements in document order. Same chunking contract as
/// [`map_messages`].
pub fn map_calls(
    elements: &[Node<'_, '_>],
    chunk_size: usize,
    on_chunk: &mut dyn FnMut(usize),
) -> Vec<CallRecord> {
    map_chunked(elements, chunk_size, on_chunk, map_call)
}

fn map_chunked<'a, 'input, T>(
    elements: &[Node<'a, 'input>],
    chunk_size: usize,
    on_chunk: &mut dyn FnMut(usize),
    map_one: impl Fn(Node<'a, 'input>) -> T,
) -> Vec<T> {
    let chunk_size = chunk_size.max(1);
    let mut records = Vec::with_capacity(elements.len());

    for (index, chunk) in elements.chunks(chunk_size).enumerate() {
        for node in chunk {
            records.push(map_one(*node));
        }
        // Yield between chunks only; the final chunk falls through to return.
        if (index + 1) * chunk_size < elements.len() {
            on_chunk(records.len());
        }
    }

    records
}

// ── Tests ─────────────────────────────────────────────────────────────────────
