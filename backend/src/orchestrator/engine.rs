//! Session orchestrator
//!
//! Drives one simulation session: applies team mutations to the in-memory
//! state, pushes each confirmed mutation through the sync backend, and
//! logs everything to the event log.
//!
//! # Write model
//!
//! Single-threaded and cooperative. Each mutation is:
//!
//! ```text
//! 1. Validate the writing team (and any grid indices)
//! 2. Snapshot the prior value(s)
//! 3. Apply the mutation locally (optimistic - the local view always
//!    reflects the pending edit)
//! 4. Push the mutation to the sync backend (the only blocking point)
//! 5. On failure: restore the snapshot, log the failure and the rollback,
//!    surface the error once
//! ```
//!
//! Rollback is uniform: every optimistic write (term edits, approval
//! toggles, offering edits and bids) is compensated on sync failure, so
//! local and remote state cannot silently diverge.
//!
//! # Critical Invariants
//!
//! - **Single writer per surface**: Team 1 owns terms and the offering
//!   book, Team 2 owns approvals and bids; the other team's writes are
//!   rejected before any state changes
//! - **Ordering**: mutations apply in call order; the event log preserves it
//! - **No retry**: a failed push surfaces exactly once

use thiserror::Error;
use tracing::info;

use crate::engine::bids::{compute_bid_outputs, BidAggregate};
use crate::engine::mutation::{apply_term_edit, coerce_quantity, TermEdit};
use crate::engine::valuation::{compute_valuation, ValuationResult};
use crate::models::approval::Approval;
use crate::models::event::{Event, EventLog};
use crate::models::offering::GridError;
use crate::models::session::{Session, SessionId, Team};
use crate::models::terms::TermField;
use crate::sync::client::{SyncBackend, SyncError};
use crate::sync::wire::{
    Game1ApprovalUpdate, Game1InputUpdate, Game2InputUpdate, InvestorBidsUpdate,
};

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// The surface is owned by the other team
    #[error("{surface} is read-only for {team}")]
    ReadOnlyForTeam {
        team: Team,
        surface: &'static str,
    },

    /// A company or investor index was out of range
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The remote push failed; the optimistic write was rolled back
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Owns one session's state, its sync backend and its event log
pub struct SessionOrchestrator {
    session: Session,
    backend: Box<dyn SyncBackend>,
    events: EventLog,
}

impl SessionOrchestrator {
    /// Create a fresh session with a generated identifier and register it
    /// with the backend
    pub fn new(backend: Box<dyn SyncBackend>) -> Result<Self, SessionError> {
        Self::with_session(Session::new(SessionId::generate()), backend)
    }

    /// Register an existing session (e.g. a caller-chosen token) with the
    /// backend
    pub fn with_session(
        session: Session,
        backend: Box<dyn SyncBackend>,
    ) -> Result<Self, SessionError> {
        backend.create_session(session.id())?;

        let mut events = EventLog::new();
        events.push(Event::SessionCreated {
            session_id: session.id().to_string(),
        });
        info!(session = %session.id(), "simulation session created");

        Ok(Self {
            session,
            backend,
            events,
        })
    }

    // ========================================================================
    // Game 1: valuation negotiation
    // ========================================================================

    /// Team-1 edit of one negotiable term
    ///
    /// Coerces the raw input, resets the bound approval flag, then pushes
    /// the new value. On sync failure both the value and the flag are
    /// restored.
    pub fn edit_term(&mut self, team: Team, edit: TermEdit) -> Result<(), SessionError> {
        if team != Team::One {
            return Err(SessionError::ReadOnlyForTeam {
                team,
                surface: "deal terms",
            });
        }

        let prior_terms = self.session.terms().clone();
        let prior_flag = self.session.ledger().get(edit.field());

        let field = {
            let (terms, ledger) = self.session.terms_and_ledger_mut();
            apply_term_edit(terms, ledger, edit)
        };
        self.events.push(Event::TermEdited { field });

        let update = Game1InputUpdate::for_field(self.session.terms(), field);
        if let Err(err) = self.backend.push_game1_input(self.session.id(), team, &update) {
            *self.session.terms_mut() = prior_terms;
            self.session.ledger_mut().set(field, prior_flag);
            self.log_failure("game1_input", &err);
            return Err(err.into());
        }

        Ok(())
    }

    /// Team-2 toggle of one approval flag, returning the new flag value
    pub fn toggle_approval(
        &mut self,
        team: Team,
        field: TermField,
    ) -> Result<Approval, SessionError> {
        if team != Team::Two {
            return Err(SessionError::ReadOnlyForTeam {
                team,
                surface: "approval ledger",
            });
        }

        let to = self.session.ledger_mut().toggle(field);
        self.events.push(Event::ApprovalToggled { field, to });

        let update = Game1ApprovalUpdate::for_field(self.session.ledger(), field);
        if let Err(err) = self
            .backend
            .push_game1_approval(self.session.id(), team, &update)
        {
            // Toggle is self-inverse; flipping again restores the prior flag.
            self.session.ledger_mut().toggle(field);
            self.log_failure("game1_approval", &err);
            return Err(err.into());
        }

        Ok(to)
    }

    /// Current valuation, recomputed from the live snapshot
    pub fn valuation(&self) -> ValuationResult {
        compute_valuation(self.session.terms(), self.session.ledger())
    }

    // ========================================================================
    // Game 2: investment bidding
    // ========================================================================

    /// Team-1 edit of one company's unit price (raw input, coerced)
    pub fn set_offering_price(
        &mut self,
        team: Team,
        company: usize,
        raw: &str,
    ) -> Result<i64, SessionError> {
        if team != Team::One {
            return Err(SessionError::ReadOnlyForTeam {
                team,
                surface: "offering book",
            });
        }

        let price = coerce_quantity(raw);
        // Building the payload first also validates the index before any
        // local state changes.
        let update = Game2InputUpdate::price(company, price)?;
        let prior = self.session.book_mut().set_price(company, price)?;
        self.events.push(Event::PriceSet {
            company,
            from: prior,
            to: price,
        });

        if let Err(err) = self.backend.push_game2_input(self.session.id(), team, &update) {
            self.session
                .book_mut()
                .set_price(company, prior)
                .expect("company index validated above");
            self.log_failure("game2_input", &err);
            return Err(err.into());
        }

        Ok(price)
    }

    /// Team-1 edit of one company's share supply (raw input, coerced)
    pub fn set_offering_supply(
        &mut self,
        team: Team,
        company: usize,
        raw: &str,
    ) -> Result<i64, SessionError> {
        if team != Team::One {
            return Err(SessionError::ReadOnlyForTeam {
                team,
                surface: "offering book",
            });
        }

        let supply = coerce_quantity(raw);
        let update = Game2InputUpdate::shares(company, supply)?;
        let prior = self.session.book_mut().set_supply(company, supply)?;
        self.events.push(Event::SupplySet {
            company,
            from: prior,
            to: supply,
        });

        if let Err(err) = self.backend.push_game2_input(self.session.id(), team, &update) {
            self.session
                .book_mut()
                .set_supply(company, prior)
                .expect("company index validated above");
            self.log_failure("game2_input", &err);
            return Err(err.into());
        }

        Ok(supply)
    }

    /// Team-2 edit of one bid quantity (raw input, coerced)
    pub fn place_bid(
        &mut self,
        team: Team,
        investor: usize,
        company: usize,
        raw: &str,
    ) -> Result<i64, SessionError> {
        if team != Team::Two {
            return Err(SessionError::ReadOnlyForTeam {
                team,
                surface: "bid grid",
            });
        }

        let quantity = coerce_quantity(raw);
        let update = InvestorBidsUpdate::bid(investor, company, quantity)?;
        let prior = self.session.bids_mut().set(investor, company, quantity)?;
        self.events.push(Event::BidPlaced {
            investor,
            company,
            from: prior,
            to: quantity,
        });

        if let Err(err) = self.backend.push_game2_bids(self.session.id(), team, &update) {
            self.session
                .bids_mut()
                .set(investor, company, prior)
                .expect("indices validated above");
            self.log_failure("game2_bids", &err);
            return Err(err.into());
        }

        Ok(quantity)
    }

    /// Current bid aggregate, recomputed from the live snapshot
    pub fn bid_summary(&self) -> BidAggregate {
        compute_bid_outputs(self.session.book(), self.session.bids())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn log_failure(&mut self, operation: &'static str, err: &SyncError) {
        self.events.push(Event::SyncFailed {
            operation,
            error: err.to_string(),
        });
        self.events.push(Event::RolledBack { operation });
    }
}
