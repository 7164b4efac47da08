//! Deal Simulator Core - Rust Engine
//!
//! Negotiation state engine for a two-team business simulation: a
//! valuation negotiation (Team 1 proposes terms, Team 2 approves each one,
//! a valuation is gated on full approval) and an investment bidding round
//! (Team 1 prices share offerings, Team 2 bids, subscription metrics are
//! derived).
//!
//! # Architecture
//!
//! - **models**: Domain types (DealTerms, ApprovalLedger, OfferingBook,
//!   BidGrid, Session, EventLog)
//! - **engine**: Pure calculators (field mutation rule, valuation, bid
//!   aggregation)
//! - **sync**: Wire vocabulary and the remote backend adapter
//! - **orchestrator**: Team-gated mutations with optimistic local writes
//!   and compensating rollback
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (whole USD)
//! 2. Editing a term always resets exactly its own approval flag
//! 3. Derived outputs are recomputed on every read, never cached
//! 4. Every optimistic write is rolled back if its sync push fails

// Module declarations
pub mod engine;
pub mod models;
pub mod orchestrator;
pub mod sync;

// Re-exports for convenience
pub use engine::{
    bids::{compute_bid_outputs, BidAggregate, CompanySummary, Subscription},
    mutation::{apply_term_edit, coerce_decimal, coerce_integer, coerce_quantity, TermEdit},
    valuation::{
        compute_valuation, format_usd, gauge_percentage, ValuationResult, SENTINEL_GAUGE,
        SENTINEL_TEXT,
    },
};
pub use models::{
    approval::{Approval, ApprovalLedger},
    event::{Event, EventLog, LoggedEvent},
    offering::{
        company_label, investor_label, BidGrid, CompanyOffering, GridError, OfferingBook,
        COMPANY_COUNT, INVESTOR_COUNT,
    },
    session::{Session, SessionId, Team},
    terms::{DealTerms, TermField, FACTOR_SCORE_MAX, FACTOR_SCORE_MIN},
};
pub use orchestrator::{SessionError, SessionOrchestrator};
pub use sync::{
    client::{HttpSyncClient, MockSyncBackend, RecordedPush, SyncBackend, SyncError},
    wire::{Game1ApprovalUpdate, Game1InputUpdate, Game2InputUpdate, InvestorBidsUpdate},
};
