//! # Audit Events
//!
//! The four events the custody core emits. They are the only integration
//! surface the dashboard layer reads; it never touches component state.
//!
//! ## Security Invariant
//!
//! [`EventLog`] is append-only. Entries are never trimmed or rewritten, so
//! a cursor obtained from [`EventLog::len`] stays valid forever. Appending
//! needs `&mut EventLog`, which only the owning component's write lock
//! hands out.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::field::Nullifier;
use crate::identity::Address;
use crate::temporal::Timestamp;

/// An event emitted by a committed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A recipient joined the withdrawal whitelist.
    RecipientAdded {
        /// The whitelisted address.
        recipient: Address,
        /// Commit time.
        timestamp: Timestamp,
    },
    /// A recipient left the withdrawal whitelist.
    RecipientRemoved {
        /// The removed address.
        recipient: Address,
        /// Commit time.
        timestamp: Timestamp,
    },
    /// Funds left custody.
    WithdrawalExecuted {
        /// Where the funds went.
        recipient: Address,
        /// How much.
        amount: Amount,
        /// Commit time.
        timestamp: Timestamp,
    },
    /// An anonymous contribution was accepted.
    DonationRecorded {
        /// The proof's nullifier.
        nullifier: Nullifier,
        /// The registry that received the funds.
        custody_target: Address,
        /// How much.
        amount: Amount,
        /// Commit time.
        timestamp: Timestamp,
    },
}

impl AuditEvent {
    /// Stable event name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecipientAdded { .. } => "recipient_added",
            Self::RecipientRemoved { .. } => "recipient_removed",
            Self::WithdrawalExecuted { .. } => "withdrawal_executed",
            Self::DonationRecorded { .. } => "donation_recorded",
        }
    }

    /// When the event was committed.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::RecipientAdded { timestamp, .. }
            | Self::RecipientRemoved { timestamp, .. }
            | Self::WithdrawalExecuted { timestamp, .. }
            | Self::DonationRecorded { timestamp, .. } => *timestamp,
        }
    }
}

/// Append-only event log.
///
/// Owned by a component's state and written only through `&mut self`, so
/// appends happen under that component's write lock. Components hand out
/// copies of the entries, never the log itself.
///
/// ```compile_fail
/// use isw_core::{Address, AuditEvent, EventLog, Timestamp};
///
/// let log = EventLog::new();
/// let shared: &EventLog = &log;
/// shared.append(AuditEvent::RecipientAdded {
///     recipient: Address::from_low_u64(1),
///     timestamp: Timestamp::from_unix(1),
/// });
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<AuditEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn append(&mut self, event: AuditEvent) {
        self.entries.push(event);
    }

    /// Every event, oldest first.
    pub fn entries(&self) -> &[AuditEvent] {
        &self.entries
    }

    /// Events at positions `cursor..`, for polling consumers.
    pub fn events_since(&self, cursor: usize) -> Vec<AuditEvent> {
        self.entries
            .get(cursor..)
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
