//! Statistics aggregation over parsed record collections.
//!
//! Pure functions of their input: no side effects, no hidden state, so
//! summarizing the same collection twice yields identical output. Records
//! without a decodable timestamp still count toward totals but are excluded
//! from date ranges and month buckets.
//!
//! Contact labels are grouped exactly as encoded in the source attributes,
//! with no case folding or normalization. All "top N" rankings use a stable
//! sort, so ties keep first-seen order.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use insight_core::models::{CallRecord, CallType, MessageRecord, MessageType, Records};

// ── Output types ──────────────────────────────────────────────────────────────

/// Inclusive earliest/latest instants over records with a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One `"YYYY-MM"` bucket of message counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: u64,
    pub sent: u64,
    pub received: u64,
}

/// One `"YYYY-MM"` bucket of call counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMonthBucket {
    pub month: String,
    pub count: u64,
    pub incoming: u64,
    pub outgoing: u64,
    pub missed: u64,
}

/// Count of one message type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBucket {
    pub label: String,
    pub count: u64,
}

/// Per-contact message rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub name: String,
    pub count: u64,
    pub sent: u64,
    pub received: u64,
    pub last_date: Option<DateTime<Utc>>,
}

/// Per-contact call rollup with direction sub-counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContactSummary {
    pub name: String,
    pub total_count: u64,
    pub total_duration: u64,
    pub incoming_count: u64,
    pub outgoing_count: u64,
    pub missed_count: u64,
    pub last_date: Option<DateTime<Utc>>,
}

/// Aggregate message statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageStats {
    pub total_count: u64,
    /// Messages with type code 2.
    pub sent_count: u64,
    /// Messages with type code 1.
    pub received_count: u64,
    /// Number of distinct contact labels.
    pub contact_count: u64,
    pub date_range: Option<DateRange>,
    /// Mean body length in characters, rounded to the nearest integer.
    pub average_length: u64,
    /// Ascending by month key; only records with a timestamp contribute.
    pub by_month: Vec<MonthBucket>,
    /// Top 20 contacts by message count, descending.
    pub by_contact: Vec<ContactSummary>,
    /// All seen type labels, descending by count.
    pub by_type: Vec<TypeBucket>,
}

/// Aggregate call statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallStats {
    pub total_count: u64,
    /// Sum of all durations in seconds.
    pub total_duration: u64,
    pub incoming_count: u64,
    pub outgoing_count: u64,
    pub missed_count: u64,
    /// Mean duration over connected calls (total minus missed, floored at 1
    /// to avoid dividing by zero when every call is missed).
    pub average_duration: f64,
    pub date_range: Option<DateRange>,
    /// Calendar span of the date range in whole days, floored at 1.
    pub days_span: u64,
    pub average_per_day: f64,
    /// All contacts in first-seen order.
    pub contacts: Vec<CallContactSummary>,
    /// Top 10 contacts by call count, descending.
    pub frequent_contacts: Vec<CallContactSummary>,
    /// Top 10 contacts by total duration, descending.
    pub longest_contacts: Vec<CallContactSummary>,
    /// Ascending by month key; only records with a timestamp contribute.
    pub by_month: Vec<CallMonthBucket>,
}

/// Statistics for either record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statistics {
    Messages(MessageStats),
    Calls(CallStats),
}

/// Summarize a record collection of either kind.
pub fn summarize(records: &Records) -> Statistics {
    match records {
        Records::Messages(messages) => Statistics::Messages(analyze_messages(messages)),
        Records::Calls(calls) => Statistics::Calls(analyze_calls(calls)),
    }
}

// ── Message statistics ────────────────────────────────────────────────────────

/// Aggregate a message collection. An empty slice yields the all-zero
/// default.
pub fn analyze_messages(messages: &[MessageRecord]) -> MessageStats {
    if messages.is_empty() {
        return MessageStats::default();
    }

    let mut sent_count = 0u64;
    let mut received_count = 0u64;
    let mut total_length = 0u64;
    let mut range = RangeTracker::default();

    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();
    let mut contacts = FirstSeen::<ContactSummary>::default();
    let mut types = FirstSeen::<TypeBucket>::default();

    for message in messages {
        let sent = message.message_type == MessageType::Sent;
        let received = message.message_type == MessageType::Received;
        if sent {
            sent_count += 1;
        } else if received {
            received_count += 1;
        }

        total_length += message.body.chars().count() as u64;

        if let Some(ts) = message.timestamp {
            range.update(ts);

            let bucket = months.entry(month_key(ts)).or_default();
            if bucket.month.is_empty() {
                bucket.month = month_key(ts);
            }
            bucket.count += 1;
            if sent {
                bucket.sent += 1;
            } else if received {
                bucket.received += 1;
            }
        }

        let contact = contacts.entry(message.contact_label(), |name| ContactSummary {
            name: name.to_string(),
            count: 0,
            sent: 0,
            received: 0,
            last_date: None,
        });
        contact.count += 1;
        if sent {
            contact.sent += 1;
        } else if received {
            contact.received += 1;
        }
        if let Some(ts) = message.timestamp {
            if contact.last_date.map_or(true, |last| ts > last) {
                contact.last_date = Some(ts);
            }
        }

        let type_bucket = types.entry(message.message_type.label(), |label| TypeBucket {
            label: label.to_string(),
            count: 0,
        });
        type_bucket.count += 1;
    }

    let total_count = messages.len() as u64;
    let average_length = (total_length as f64 / total_count as f64).round() as u64;

    let contact_count = contacts.len() as u64;
    let by_contact = top_n(contacts.into_vec(), 20, |c| c.count);
    let by_type = top_n(types.into_vec(), usize::MAX, |t| t.count);

    MessageStats {
        total_count,
        sent_count,
        received_count,
        contact_count,
        date_range: range.into_range(),
        average_length,
        by_month: months.into_values().collect(),
        by_contact,
        by_type,
    }
}

// ── Call statistics ───────────────────────────────────────────────────────────

/// Aggregate a call collection. An empty slice yields the all-zero default.
pub fn analyze_calls(calls: &[CallRecord]) -> CallStats {
    if calls.is_empty() {
        return CallStats::default();
    }

    let mut total_duration = 0u64;
    let mut incoming_count = 0u64;
    let mut outgoing_count = 0u64;
    let mut missed_count = 0u64;
    let mut range = RangeTracker::default();

    let mut months: BTreeMap<String, CallMonthBucket> = BTreeMap::new();
    let mut contacts = FirstSeen::<CallContactSummary>::default();

    for call in calls {
        total_duration += call.duration;
        match call.call_type {
            CallType::Incoming => incoming_count += 1,
            CallType::Outgoing => outgoing_count += 1,
            CallType::Missed => missed_count += 1,
            _ => {}
        }

        if let Some(ts) = call.timestamp {
            range.update(ts);

            let bucket = months.entry(month_key(ts)).or_default();
            if bucket.month.is_empty() {
                bucket.month = month_key(ts);
            }
            bucket.count += 1;
            match call.call_type {
                CallType::Incoming => bucket.incoming += 1,
                CallType::Outgoing => bucket.outgoing += 1,
                CallType::Missed => bucket.missed += 1,
                _ => {}
            }
        }

        let contact = contacts.entry(call.contact_label(), |name| CallContactSummary {
            name: name.to_string(),
            total_count: 0,
            total_duration: 0,
            incoming_count: 0,
            outgoing_count: 0,
            missed_count: 0,
            last_date: None,
        });
        contact.total_count += 1;
        contact.total_duration += call.duration;
        match call.call_type {
            CallType::Incoming => contact.incoming_count += 1,
            CallType::Outgoing => contact.outgoing_count += 1,
            CallType::Missed => contact.missed_count += 1,
            _ => {}
        }
        if let Some(ts) = call.timestamp {
            if contact.last_date.map_or(true, |last| ts > last) {
                contact.last_date = Some(ts);
            }
        }
    }

    let total_count = calls.len() as u64;
    // Average over connected calls; a zero denominator (every call missed)
    // divides by 1 instead.
    let connected = total_count.saturating_sub(missed_count).max(1);
    let average_duration = total_duration as f64 / connected as f64;

    let date_range = range.into_range();
    let days_span = date_range.map_or(1, |r| span_days(r));
    let average_per_day = total_count as f64 / days_span as f64;

    let contacts = contacts.into_vec();
    let frequent_contacts = top_n(contacts.clone(), 10, |c| c.total_count);
    let longest_contacts = top_n(contacts.clone(), 10, |c| c.total_duration);

    CallStats {
        total_count,
        total_duration,
        incoming_count,
        outgoing_count,
        missed_count,
        average_duration,
        date_range,
        days_span,
        average_per_day,
        contacts,
        frequent_contacts,
        longest_contacts,
        by_month: months.into_values().collect(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Accumulates an optional inclusive date range.
#[derive(Debug, Default)]
struct RangeTracker {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl RangeTracker {
    fn update(&mut self, ts: DateTime<Utc>) {
        if self.start.map_or(true, |s| ts < s) {
            self.start = Some(ts);
        }
        if self.end.map_or(true, |e| ts > e) {
            self.end = Some(ts);
        }
    }

    fn into_range(self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }
}

/// Insertion-ordered grouping map: values keep the order their keys were
/// first seen, which is what makes top-N tie-breaking deterministic.
struct FirstSeen<T> {
    index: HashMap<String, usize>,
    values: Vec<T>,
}

impl<T> Default for FirstSeen<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<T> FirstSeen<T> {
    fn entry(&mut self, key: &str, make: impl FnOnce(&str) -> T) -> &mut T {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.values.push(make(key));
                let idx = self.values.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.values[idx]
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn into_vec(self) -> Vec<T> {
        self.values
    }
}

/// Stable descending sort by `key`, truncated to `n`.
fn top_n<T: Clone>(mut values: Vec<T>, n: usize, key: impl Fn(&T) -> u64) -> Vec<T> {
    values.sort_by(|a, b| key(b).cmp(&key(a)));
    values.truncate(n);
    values
}

/// `"YYYY-MM"` bucket key; lexicographic order is chronological order.
fn month_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m").to_string()
}

/// Calendar span of a range in whole days, rounded up and floored at 1.
fn span_days(range: DateRange) -> u64 {
    let millis = (range.end - range.start).num_milliseconds();
    let days = (millis as f64 / 86_400_000.0).ceil() as i64;
    days.max(1) as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    fn message(
        contact: &str,
        message_type: MessageType,
        body: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> MessageRecord {
        MessageRecord {
            address: contact.to_string(),
            timestamp,
            message_type,
            subject: String::new(),
            body: body.to_string(),
            toa: String::new(),
            sc_toa: String::new(),
            service_center: String::new(),
            read: 1,
            status: 0,
            protocol: 0,
            locked: 0,
            readable_date: String::new(),
            contact_name: contact.to_string(),
        }
    }

    fn call(
        contact: &str,
        call_type: CallType,
        duration: u64,
        timestamp: Option<DateTime<Utc>>,
    ) -> CallRecord {
        CallRecord {
            number: contact.to_string(),
            duration,
            timestamp,
            call_type,
            presentation: 1,
            subscription_id: String::new(),
            post_dial_digits: String::new(),
            subscription_component_name: String::new(),
            readable_date: String::new(),
            contact_name: contact.to_string(),
        }
    }

    // ── empty input ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_messages_all_zero() {
        let stats = analyze_messages(&[]);
        assert_eq!(stats, MessageStats::default());
        assert_eq!(stats.total_count, 0);
        assert!(stats.date_range.is_none());
        assert!(stats.by_month.is_empty());
        assert!(stats.by_contact.is_empty());
    }

    #[test]
    fn test_empty_calls_all_zero() {
        let stats = analyze_calls(&[]);
        assert_eq!(stats, CallStats::default());
        assert_eq!(stats.days_span, 0);
        assert_eq!(stats.average_per_day, 0.0);
    }

    // ── message scenarios ─────────────────────────────────────────────────────

    #[test]
    fn test_sent_received_contact_counts() {
        // Two sent, one received, three distinct contacts.
        let messages = vec![
            message("Alice", MessageType::Sent, "a", Some(ts(2024, 1, 10))),
            message("Bob", MessageType::Sent, "b", Some(ts(2024, 1, 11))),
            message("Carol", MessageType::Received, "c", Some(ts(2024, 1, 12))),
        ];
        let stats = analyze_messages(&messages);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.sent_count, 2);
        assert_eq!(stats.received_count, 1);
        assert_eq!(stats.contact_count, 3);
    }

    #[test]
    fn test_other_types_counted_in_total_only() {
        let messages = vec![
            message("A", MessageType::Draft, "x", Some(ts(2024, 1, 10))),
            message("A", MessageType::Failed, "x", Some(ts(2024, 1, 11))),
        ];
        let stats = analyze_messages(&messages);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.sent_count, 0);
        assert_eq!(stats.received_count, 0);
    }

    #[test]
    fn test_average_length_rounds() {
        let messages = vec![
            message("A", MessageType::Sent, "ab", Some(ts(2024, 1, 10))),
            message("A", MessageType::Sent, "abc", Some(ts(2024, 1, 11))),
        ];
        // (2 + 3) / 2 = 2.5 → 3.
        assert_eq!(analyze_messages(&messages).average_length, 3);
    }

    #[test]
    fn test_missing_timestamp_excluded_from_range_and_months() {
        let messages = vec![
            message("A", MessageType::Received, "x", Some(ts(2024, 1, 10))),
            message("B", MessageType::Received, "y", None),
        ];
        let stats = analyze_messages(&messages);
        // Both retained in totals.
        assert_eq!(stats.total_count, 2);
        // Only the dated one shapes the range and buckets.
        let range = stats.date_range.unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(stats.by_month.len(), 1);
        assert_eq!(stats.by_month[0].count, 1);
    }

    #[test]
    fn test_no_timestamps_means_no_range() {
        let messages = vec![message("A", MessageType::Received, "x", None)];
        let stats = analyze_messages(&messages);
        assert!(stats.date_range.is_none());
        assert!(stats.by_month.is_empty());
    }

    #[test]
    fn test_month_buckets_ascending() {
        let messages = vec![
            message("A", MessageType::Sent, "x", Some(ts(2024, 3, 1))),
            message("A", MessageType::Received, "x", Some(ts(2024, 1, 1))),
            message("A", MessageType::Sent, "x", Some(ts(2024, 1, 20))),
        ];
        let stats = analyze_messages(&messages);
        let keys: Vec<&str> = stats.by_month.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-03"]);
        assert_eq!(stats.by_month[0].count, 2);
        assert_eq!(stats.by_month[0].sent, 1);
        assert_eq!(stats.by_month[0].received, 1);
    }

    #[test]
    fn test_by_contact_descending_top_20() {
        let mut messages = Vec::new();
        // 25 contacts, contact i sends i+1 messages.
        for i in 0..25u32 {
            for _ in 0..=i {
                messages.push(message(
                    &format!("contact-{i:02}"),
                    MessageType::Sent,
                    "x",
                    Some(ts(2024, 1, 10)),
                ));
            }
        }
        let stats = analyze_messages(&messages);
        assert_eq!(stats.contact_count, 25);
        assert_eq!(stats.by_contact.len(), 20);
        assert_eq!(stats.by_contact[0].name, "contact-24");
        assert_eq!(stats.by_contact[0].count, 25);
        // Descending throughout.
        for pair in stats.by_contact.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn test_contact_ties_keep_first_seen_order() {
        let messages = vec![
            message("Zeta", MessageType::Sent, "x", Some(ts(2024, 1, 10))),
            message("Alpha", MessageType::Sent, "x", Some(ts(2024, 1, 11))),
        ];
        let stats = analyze_messages(&messages);
        assert_eq!(stats.by_contact[0].name, "Zeta");
        assert_eq!(stats.by_contact[1].name, "Alpha");
    }

    #[test]
    fn test_contact_labels_case_sensitive() {
        let messages = vec![
            message("alice", MessageType::Sent, "x", None),
            message("Alice", MessageType::Sent, "x", None),
        ];
        assert_eq!(analyze_messages(&messages).contact_count, 2);
    }

    #[test]
    fn test_by_type_counts() {
        let messages = vec![
            message("A", MessageType::Received, "x", None),
            message("A", MessageType::Received, "x", None),
            message("A", MessageType::Sent, "x", None),
            message("A", MessageType::Draft, "x", None),
        ];
        let stats = analyze_messages(&messages);
        assert_eq!(stats.by_type[0].label, "received");
        assert_eq!(stats.by_type[0].count, 2);
        assert_eq!(stats.by_type.len(), 3);
    }

    #[test]
    fn test_contact_last_date_tracks_maximum() {
        let messages = vec![
            message("A", MessageType::Sent, "x", Some(ts(2024, 2, 1))),
            message("A", MessageType::Sent, "x", Some(ts(2024, 1, 1))),
        ];
        let stats = analyze_messages(&messages);
        assert_eq!(stats.by_contact[0].last_date, Some(ts(2024, 2, 1)));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records = Records::Messages(vec![
            message("A", MessageType::Sent, "hello", Some(ts(2024, 1, 10))),
            message("B", MessageType::Received, "hi", None),
        ]);
        let first = summarize(&records);
        let second = summarize(&records);
        assert_eq!(first, second);
    }

    // ── call scenarios ────────────────────────────────────────────────────────

    #[test]
    fn test_call_direction_counts_and_duration() {
        let calls = vec![
            call("A", CallType::Incoming, 60, Some(ts(2024, 1, 10))),
            call("B", CallType::Outgoing, 120, Some(ts(2024, 1, 11))),
            call("C", CallType::Missed, 0, Some(ts(2024, 1, 12))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.total_duration, 180);
        assert_eq!(stats.incoming_count, 1);
        assert_eq!(stats.outgoing_count, 1);
        assert_eq!(stats.missed_count, 1);
        // Average over connected calls: 180 / (3 - 1) = 90.
        assert_eq!(stats.average_duration, 90.0);
    }

    #[test]
    fn test_all_missed_average_divides_by_one() {
        let calls = vec![
            call("A", CallType::Missed, 0, Some(ts(2024, 1, 10))),
            call("B", CallType::Missed, 0, Some(ts(2024, 1, 11))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.average_duration, 0.0);
    }

    #[test]
    fn test_voicemail_and_rejected_not_in_direction_counts() {
        let calls = vec![
            call("A", CallType::Voicemail, 30, Some(ts(2024, 1, 10))),
            call("A", CallType::Rejected, 0, Some(ts(2024, 1, 11))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.incoming_count, 0);
        assert_eq!(stats.outgoing_count, 0);
        assert_eq!(stats.missed_count, 0);
        assert_eq!(stats.total_count, 2);
    }

    #[test]
    fn test_days_span_and_average_per_day() {
        let calls = vec![
            call("A", CallType::Incoming, 10, Some(ts(2024, 1, 10))),
            call("A", CallType::Incoming, 10, Some(ts(2024, 1, 19))),
        ];
        let stats = analyze_calls(&calls);
        // 9 whole days between the two noon instants.
        assert_eq!(stats.days_span, 9);
        assert!((stats.average_per_day - 2.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_span_floors_at_one() {
        let calls = vec![call("A", CallType::Incoming, 10, Some(ts(2024, 1, 10)))];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.days_span, 1);
        assert_eq!(stats.average_per_day, 1.0);
    }

    #[test]
    fn test_undated_calls_span_floors_at_one() {
        let calls = vec![
            call("A", CallType::Incoming, 10, None),
            call("B", CallType::Missed, 0, None),
        ];
        let stats = analyze_calls(&calls);
        assert!(stats.date_range.is_none());
        assert_eq!(stats.days_span, 1);
        assert_eq!(stats.average_per_day, 2.0);
        assert!(stats.by_month.is_empty());
    }

    #[test]
    fn test_undated_call_retained_but_excluded_from_date_maths() {
        let calls = vec![
            call("A", CallType::Incoming, 60, Some(ts(2024, 1, 10))),
            call("B", CallType::Incoming, 30, None),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_duration, 90);
        let range = stats.date_range.unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(stats.by_month.len(), 1);
        assert_eq!(stats.by_month[0].count, 1);
    }

    #[test]
    fn test_frequent_and_longest_contacts() {
        let calls = vec![
            call("Chatty", CallType::Incoming, 10, Some(ts(2024, 1, 1))),
            call("Chatty", CallType::Incoming, 10, Some(ts(2024, 1, 2))),
            call("Chatty", CallType::Incoming, 10, Some(ts(2024, 1, 3))),
            call("LongWinded", CallType::Outgoing, 900, Some(ts(2024, 1, 4))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.frequent_contacts[0].name, "Chatty");
        assert_eq!(stats.frequent_contacts[0].total_count, 3);
        assert_eq!(stats.longest_contacts[0].name, "LongWinded");
        assert_eq!(stats.longest_contacts[0].total_duration, 900);
    }

    #[test]
    fn test_top_ten_truncation() {
        let mut calls = Vec::new();
        for i in 0..12u32 {
            for _ in 0..=i {
                calls.push(call(
                    &format!("c{i}"),
                    CallType::Incoming,
                    5,
                    Some(ts(2024, 1, 5)),
                ));
            }
        }
        let stats = analyze_calls(&calls);
        assert_eq!(stats.contacts.len(), 12);
        assert_eq!(stats.frequent_contacts.len(), 10);
        assert_eq!(stats.longest_contacts.len(), 10);
    }

    #[test]
    fn test_call_contact_rollup() {
        let calls = vec![
            call("A", CallType::Incoming, 60, Some(ts(2024, 1, 10))),
            call("A", CallType::Missed, 0, Some(ts(2024, 2, 1))),
            call("A", CallType::Outgoing, 30, Some(ts(2024, 1, 20))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.contacts.len(), 1);
        let contact = &stats.contacts[0];
        assert_eq!(contact.total_count, 3);
        assert_eq!(contact.total_duration, 90);
        assert_eq!(contact.incoming_count, 1);
        assert_eq!(contact.outgoing_count, 1);
        assert_eq!(contact.missed_count, 1);
        assert_eq!(contact.last_date, Some(ts(2024, 2, 1)));
    }

    #[test]
    fn test_call_month_buckets() {
        let calls = vec![
            call("A", CallType::Incoming, 10, Some(ts(2024, 1, 10))),
            call("A", CallType::Missed, 0, Some(ts(2024, 1, 11))),
            call("A", CallType::Outgoing, 20, Some(ts(2024, 2, 1))),
        ];
        let stats = analyze_calls(&calls);
        assert_eq!(stats.by_month.len(), 2);
        assert_eq!(stats.by_month[0].month, "2024-01");
        assert_eq!(stats.by_month[0].incoming, 1);
        assert_eq!(stats.by_month[0].missed, 1);
        assert_eq!(stats.by_month[1].outgoing, 1);
    }

    #[test]
    fn test_summarize_dispatches_calls() {
        let records = Records::Calls(vec![call("A", CallType::Incoming, 5, None)]);
        match summarize(&records) {
            Statistics::Calls(stats) => assert_eq!(stats.total_count, 1),
            Statistics::Messages(_) => panic!("wrong statistics kind"),
        }
    }
}
