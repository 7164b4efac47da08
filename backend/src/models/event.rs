//! Event logging for session replay and auditing.
//!
//! Every mutation the orchestrator applies, and every sync failure and
//! compensating rollback, is appended here. The log enables:
//! - Debugging (what did each team do, and in what order)
//! - Auditing (verify the approval gate and rollback behavior)
//! - Driver output (the CLI prints a closing summary)
//!
//! Events are strictly ordered: edits are applied in the order their
//! triggering inputs fire, and the log preserves that order via a
//! monotonically increasing sequence number.

use crate::models::approval::Approval;
use crate::models::terms::TermField;

/// Session event capturing one state change or sync outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Session registered with the backend
    SessionCreated { session_id: String },

    /// Team 1 edited a negotiable term (its approval flag was reset)
    TermEdited { field: TermField },

    /// Team 2 flipped an approval flag
    ApprovalToggled { field: TermField, to: Approval },

    /// Team 1 changed a company's unit price
    PriceSet { company: usize, from: i64, to: i64 },

    /// Team 1 changed a company's share supply
    SupplySet { company: usize, from: i64, to: i64 },

    /// Team 2 changed one bid quantity
    BidPlaced {
        investor: usize,
        company: usize,
        from: i64,
        to: i64,
    },

    /// A push to the sync backend failed; reported once, never retried
    SyncFailed {
        operation: &'static str,
        error: String,
    },

    /// The optimistic local write was compensated after a sync failure
    RolledBack { operation: &'static str },
}

/// A logged event with its position in the session history
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEvent {
    /// Monotonically increasing sequence number (0-based)
    pub seq: u64,

    /// The event itself
    pub event: Event,
}

/// Append-only session event log
///
/// # Example
/// ```
/// use deal_simulator_core_rs::models::event::{Event, EventLog};
/// use deal_simulator_core_rs::TermField;
///
/// let mut log = EventLog::new();
/// log.push(Event::TermEdited { field: TermField::Ebitda });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number
    pub fn push(&mut self, event: Event) -> u64 {
        let seq = self.next_seq;
        self.entries.push(LoggedEvent { seq, event });
        self.next_seq += 1;
        seq
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.last()
    }

    /// Number of sync failures recorded so far
    pub fn sync_failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, Event::SyncFailed { .. }))
            .count()
    }

    /// Number of compensating rollbacks recorded so far
    pub fn rollback_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.event, Event::RolledBack { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_monotonic() {
        let mut log = EventLog::new();
        let a = log.push(Event::TermEdited {
            field: TermField::Ebitda,
        });
        let b = log.push(Event::ApprovalToggled {
            field: TermField::Ebitda,
            to: Approval::Approved,
        });
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_failure_and_rollback_counts() {
        let mut log = EventLog::new();
        log.push(Event::SyncFailed {
            operation: "game1_input",
            error: "HTTP 500".to_string(),
        });
        log.push(Event::RolledBack {
            operation: "game1_input",
        });
        assert_eq!(log.sync_failure_count(), 1);
        assert_eq!(log.rollback_count(), 1);
    }
}
