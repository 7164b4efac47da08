//! Simulation session
//!
//! A session aggregates both games' in-memory state under one opaque
//! identifier. Sessions are created at simulation start and discarded when
//! the simulation ends; nothing here persists.
//!
//! Write ownership is split by team: Team 1 writes the deal terms and the
//! offering book, Team 2 writes the approval ledger and the bid grid. The
//! orchestrator enforces that split (see `orchestrator::engine`).

use serde::{Deserialize, Serialize};

use crate::models::approval::ApprovalLedger;
use crate::models::offering::{BidGrid, OfferingBook};
use crate::models::terms::DealTerms;

/// Opaque session identifier
///
/// Generated as a UUID v4; the backend treats it as an arbitrary token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SessionId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Negotiating role within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    /// Originates negotiable values (deal terms, offering book)
    One,

    /// Approves values (Game 1) or places bids (Game 2)
    Two,
}

impl Team {
    /// Team number used in wire paths (`/{session}/{team}`)
    pub fn wire_number(&self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.wire_number())
    }
}

/// Complete in-memory state of one simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token, assigned at creation
    id: SessionId,

    /// Game 1: Team-1 negotiable terms
    terms: DealTerms,

    /// Game 1: Team-2 approval flags, one per term
    ledger: ApprovalLedger,

    /// Game 2: Team-1 offering book (price/supply per company)
    book: OfferingBook,

    /// Game 2: Team-2 investor bid grid
    bids: BidGrid,
}

impl Session {
    /// Create a session with seed state for both games
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            terms: DealTerms::default(),
            ledger: ApprovalLedger::new(),
            book: OfferingBook::default(),
            bids: BidGrid::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn terms(&self) -> &DealTerms {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut DealTerms {
        &mut self.terms
    }

    pub fn ledger(&self) -> &ApprovalLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ApprovalLedger {
        &mut self.ledger
    }

    /// Split borrow for the mutation rule, which writes both at once
    pub fn terms_and_ledger_mut(&mut self) -> (&mut DealTerms, &mut ApprovalLedger) {
        (&mut self.terms, &mut self.ledger)
    }

    pub fn book(&self) -> &OfferingBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OfferingBook {
        &mut self.book
    }

    pub fn bids(&self) -> &BidGrid {
        &self.bids
    }

    pub fn bids_mut(&mut self) -> &mut BidGrid {
        &mut self.bids
    }
}
