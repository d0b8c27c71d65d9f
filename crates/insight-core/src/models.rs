use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact label used when neither a contact name nor an address/number is
/// present in the source attributes. Matches the marker the backup tool
/// itself writes for unresolved contacts.
pub const UNKNOWN_CONTACT: &str = "(Unknown)";

// ── BackupKind ────────────────────────────────────────────────────────────────

/// The two backup document kinds produced by the SMS/Call backup tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    /// An `<smses>` document containing `<sms>` elements.
    Messages,
    /// A `<calls>` document containing `<call>` elements.
    Calls,
}

impl BackupKind {
    /// Expected tag name of the document root element.
    pub fn root_tag(self) -> &'static str {
        match self {
            BackupKind::Messages => "smses",
            BackupKind::Calls => "calls",
        }
    }

    /// Tag name of the child elements holding one record each.
    pub fn child_tag(self) -> &'static str {
        match self {
            BackupKind::Messages => "sms",
            BackupKind::Calls => "call",
        }
    }

    /// Keyword expected somewhere in a backup file name of this kind.
    ///
    /// Used only for the validator's soft advisory check.
    pub fn file_keyword(self) -> &'static str {
        match self {
            BackupKind::Messages => "sms",
            BackupKind::Calls => "call",
        }
    }

    /// Human-readable kind name for log and notice messages.
    pub fn label(self) -> &'static str {
        match self {
            BackupKind::Messages => "message",
            BackupKind::Calls => "call",
        }
    }

    /// Guess the backup kind from a file name.
    ///
    /// The backup tool names its exports `sms-20240101.xml` /
    /// `calls-20240101.xml`. Returns `None` when the name matches neither
    /// keyword.
    pub fn detect(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.contains("call") {
            Some(BackupKind::Calls)
        } else if lower.contains("sms") {
            Some(BackupKind::Messages)
        } else {
            None
        }
    }
}

// ── Record type codes ─────────────────────────────────────────────────────────

/// Direction / disposition of a message, decoded from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Received,
    Sent,
    Draft,
    Outbox,
    Failed,
    Queued,
    Unknown,
}

impl MessageType {
    /// Decode the numeric `type` attribute. Unrecognised codes map to
    /// [`MessageType::Unknown`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => MessageType::Received,
            2 => MessageType::Sent,
            3 => MessageType::Draft,
            4 => MessageType::Outbox,
            5 => MessageType::Failed,
            6 => MessageType::Queued,
            _ => MessageType::Unknown,
        }
    }

    /// Lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            MessageType::Received => "received",
            MessageType::Sent => "sent",
            MessageType::Draft => "draft",
            MessageType::Outbox => "outbox",
            MessageType::Failed => "failed",
            MessageType::Queued => "queued",
            MessageType::Unknown => "unknown",
        }
    }
}

/// Call disposition, decoded from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallType {
    Missed,
    Outgoing,
    Incoming,
    Voicemail,
    Rejected,
    ListingInfo,
    Unknown,
}

impl CallType {
    /// Decode the numeric `type` attribute. Unrecognised codes map to
    /// [`CallType::Unknown`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => CallType::Missed,
            2 => CallType::Outgoing,
            3 => CallType::Incoming,
            4 => CallType::Voicemail,
            5 => CallType::Rejected,
            6 => CallType::ListingInfo,
            _ => CallType::Unknown,
        }
    }

    /// Lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            CallType::Missed => "missed",
            CallType::Outgoing => "outgoing",
            CallType::Incoming => "incoming",
            CallType::Voicemail => "voicemail",
            CallType::Rejected => "rejected",
            CallType::ListingInfo => "listing info",
            CallType::Unknown => "unknown",
        }
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One decoded `<sms>` element. Immutable once produced by the mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Sender or recipient address (phone number).
    pub address: String,
    /// UTC instant of the message, or `None` when the `date` attribute was
    /// absent or not a valid epoch-millisecond integer.
    pub timestamp: Option<DateTime<Utc>>,
    /// Decoded message direction.
    pub message_type: MessageType,
    #[serde(default)]
    pub subject: String,
    /// Message body text.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub toa: String,
    #[serde(default)]
    pub sc_toa: String,
    /// Service-center address.
    #[serde(default)]
    pub service_center: String,
    /// Read flag as stored in the backup (0/1).
    #[serde(default)]
    pub read: i64,
    /// Delivery status code as stored in the backup.
    #[serde(default)]
    pub status: i64,
    /// SMS protocol code.
    #[serde(default)]
    pub protocol: i64,
    /// Locked flag (0/1).
    #[serde(default)]
    pub locked: i64,
    /// Human-readable date string as written by the backup tool. Display
    /// only; never used for date arithmetic.
    #[serde(default)]
    pub readable_date: String,
    /// Resolved contact label: the `contact_name` attribute, falling back to
    /// the address, then [`UNKNOWN_CONTACT`].
    pub contact_name: String,
}

impl MessageRecord {
    /// Grouping key for per-contact statistics. Label uniqueness and casing
    /// are preserved exactly as resolved from the source attributes.
    pub fn contact_label(&self) -> &str {
        &self.contact_name
    }
}

/// One decoded `<call>` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Counterpart phone number.
    pub number: String,
    /// Call duration in whole seconds. Zero means the call never connected.
    pub duration: u64,
    /// UTC instant of the call, or `None` when the `date` attribute was
    /// absent or unparseable.
    pub timestamp: Option<DateTime<Utc>>,
    /// Decoded call disposition.
    pub call_type: CallType,
    /// Caller-ID presentation code.
    #[serde(default)]
    pub presentation: i64,
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub post_dial_digits: String,
    #[serde(default)]
    pub subscription_component_name: String,
    #[serde(default)]
    pub readable_date: String,
    /// Resolved contact label: the `contact_name` attribute, falling back to
    /// the number, then [`UNKNOWN_CONTACT`].
    pub contact_name: String,
}

impl CallRecord {
    /// Grouping key for per-contact statistics.
    pub fn contact_label(&self) -> &str {
        &self.contact_name
    }
}

// ── Parse output ──────────────────────────────────────────────────────────────

/// Root-level statistics and provenance of a parsed backup document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Record count as declared by the root `count` attribute. Metadata only;
    /// it may disagree with the number of records actually parsed and that is
    /// not an error.
    pub declared_count: u64,
    /// Backup instant from the root `backup_date` attribute (epoch
    /// milliseconds). Epoch 0 when absent or unparseable. For merged batch
    /// results this is the orchestration time instead.
    pub backup_date: DateTime<Utc>,
    /// Source file name; empty for merged batch results.
    pub file_name: String,
    /// Source file size in bytes; 0 for merged batch results.
    pub file_size: u64,
    /// Number of source files. 1 for a single parse; for batches, the number
    /// of files that parsed successfully.
    pub file_count: u32,
}

/// The record collection of one backup kind, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Records {
    Messages(Vec<MessageRecord>),
    Calls(Vec<CallRecord>),
}

impl Records {
    /// Empty collection of the given kind.
    pub fn empty(kind: BackupKind) -> Self {
        match kind {
            BackupKind::Messages => Records::Messages(Vec::new()),
            BackupKind::Calls => Records::Calls(Vec::new()),
        }
    }

    /// The backup kind these records belong to.
    pub fn kind(&self) -> BackupKind {
        match self {
            Records::Messages(_) => BackupKind::Messages,
            Records::Calls(_) => BackupKind::Calls,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Records::Messages(v) => v.len(),
            Records::Calls(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `other` onto `self`, preserving order.
    ///
    /// Kinds always match in practice because the batch orchestrator rejects
    /// wrong-kind documents before this point; a mismatch is logged and the
    /// records are dropped.
    pub fn append(&mut self, other: Records) {
        match (self, other) {
            (Records::Messages(dst), Records::Messages(mut src)) => dst.append(&mut src),
            (Records::Calls(dst), Records::Calls(mut src)) => dst.append(&mut src),
            (dst, src) => {
                tracing::warn!(
                    expected = dst.kind().label(),
                    found = src.kind().label(),
                    dropped = src.len(),
                    "record kind mismatch while merging; dropping records"
                );
            }
        }
    }

    /// The message records, or `None` for a call collection.
    pub fn as_messages(&self) -> Option<&[MessageRecord]> {
        match self {
            Records::Messages(v) => Some(v),
            Records::Calls(_) => None,
        }
    }

    /// The call records, or `None` for a message collection.
    pub fn as_calls(&self) -> Option<&[CallRecord]> {
        match self {
            Records::Calls(v) => Some(v),
            Records::Messages(_) => None,
        }
    }
}

/// Everything produced by parsing one backup document (or a merged batch).
///
/// Owned by the caller after return; the parser retains no reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub records: Records,
    pub metadata: BackupMetadata,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
