//! Approval ledger
//!
//! Tracks one approval flag per negotiable term for the valuation game.
//! Flags are owned by Team 2; Team 1 resets them implicitly by editing the
//! bound term.
//!
//! # Critical Invariants
//!
//! 1. **Reset on edit**: whenever a term's value changes, its flag returns
//!    to `Pending`; approval never survives a value edit, even when the new
//!    value equals the old one
//! 2. **Isolation**: toggling or resetting one flag never affects another
//! 3. **Self-inverse toggle**: toggling the same flag twice restores it

use serde::{Deserialize, Serialize};

use crate::models::terms::TermField;

/// Per-term approval flag
///
/// Serialized with the wire sentinels "TBD"/"OK" so payloads crossing the
/// sync boundary match the backend's fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approval {
    /// Team 2 has not (or no longer) signed off on the bound term
    #[serde(rename = "TBD")]
    Pending,

    /// Team 2 has signed off on the current value of the bound term
    #[serde(rename = "OK")]
    Approved,
}

impl Approval {
    /// The opposite flag value
    pub fn toggled(&self) -> Approval {
        match self {
            Approval::Pending => Approval::Approved,
            Approval::Approved => Approval::Pending,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Approval::Approved)
    }
}

impl std::fmt::Display for Approval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Approval::Pending => write!(f, "TBD"),
            Approval::Approved => write!(f, "OK"),
        }
    }
}

/// One approval flag per negotiable term
///
/// # Example
/// ```
/// use deal_simulator_core_rs::{Approval, ApprovalLedger, TermField};
///
/// let mut ledger = ApprovalLedger::new();
/// assert!(!ledger.all_approved());
///
/// ledger.toggle(TermField::Ebitda);
/// assert_eq!(ledger.get(TermField::Ebitda), Approval::Approved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalLedger {
    flags: [Approval; TermField::COUNT],
}

impl ApprovalLedger {
    /// Create a ledger with every flag pending
    pub fn new() -> Self {
        Self {
            flags: [Approval::Pending; TermField::COUNT],
        }
    }

    /// Current flag for a term
    pub fn get(&self, field: TermField) -> Approval {
        self.flags[field.index()]
    }

    /// Set a flag explicitly (used by rollback restoration)
    pub fn set(&mut self, field: TermField, value: Approval) {
        self.flags[field.index()] = value;
    }

    /// Reset a single flag to `Pending`; all other flags are untouched
    pub fn reset(&mut self, field: TermField) {
        self.flags[field.index()] = Approval::Pending;
    }

    /// Flip exactly one flag, returning the new value
    ///
    /// Not idempotent: two toggles of the same flag restore the original
    /// state.
    pub fn toggle(&mut self, field: TermField) -> Approval {
        let next = self.flags[field.index()].toggled();
        self.flags[field.index()] = next;
        next
    }

    /// True iff every flag is `Approved`; this is the gate for valuation
    pub fn all_approved(&self) -> bool {
        self.flags.iter().all(Approval::is_approved)
    }

    /// Number of flags still pending
    pub fn pending_count(&self) -> usize {
        self.flags.iter().filter(|f| !f.is_approved()).count()
    }

    /// Iterate flags in ledger order
    pub fn iter(&self) -> impl Iterator<Item = (TermField, Approval)> + '_ {
        TermField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

impl Default for ApprovalLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_all_pending() {
        let ledger = ApprovalLedger::new();
        assert_eq!(ledger.pending_count(), TermField::COUNT);
        assert!(!ledger.all_approved());
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut ledger = ApprovalLedger::new();
        let original = ledger.get(TermField::Multiple);

        ledger.toggle(TermField::Multiple);
        assert_ne!(ledger.get(TermField::Multiple), original);

        ledger.toggle(TermField::Multiple);
        assert_eq!(ledger.get(TermField::Multiple), original);
    }

    #[test]
    fn test_toggle_touches_exactly_one_flag() {
        let mut ledger = ApprovalLedger::new();
        ledger.toggle(TermField::Ebitda);

        for (field, flag) in ledger.iter() {
            if field == TermField::Ebitda {
                assert_eq!(flag, Approval::Approved);
            } else {
                assert_eq!(flag, Approval::Pending);
            }
        }
    }

    #[test]
    fn test_all_approved_gate() {
        let mut ledger = ApprovalLedger::new();
        for field in TermField::ALL {
            ledger.set(field, Approval::Approved);
        }
        assert!(ledger.all_approved());

        ledger.reset(TermField::Description);
        assert!(!ledger.all_approved());
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn test_wire_sentinel_serialization() {
        let json = serde_json::to_string(&Approval::Pending).unwrap();
        assert_eq!(json, "\"TBD\"");
        let json = serde_json::to_string(&Approval::Approved).unwrap();
        assert_eq!(json, "\"OK\"");

        let back: Approval = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(back, Approval::Approved);
    }
}
