//! Orchestrator Sync Tests
//!
//! End-to-end session flows against the scripted mock backend: team gating,
//! optimistic application, one push per mutation, and uniform compensating
//! rollback when a push fails.

use std::sync::Arc;

use deal_simulator_core_rs::{
    Approval, MockSyncBackend, RecordedPush, Session, SessionError, SessionId,
    SessionOrchestrator, Subscription, Team, TermEdit, TermField, ValuationResult,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn orchestrator() -> (SessionOrchestrator, Arc<MockSyncBackend>) {
    let mock = Arc::new(MockSyncBackend::new());
    let session = Session::new(SessionId::from("test-session"));
    let orch = SessionOrchestrator::with_session(session, Box::new(Arc::clone(&mock)))
        .expect("mock accepts session creation");
    (orch, mock)
}

/// Drive Team 2 through approving every term
fn approve_all(orch: &mut SessionOrchestrator) {
    for field in TermField::ALL {
        let flag = orch.toggle_approval(Team::Two, field).expect("push succeeds");
        assert_eq!(flag, Approval::Approved);
    }
}

// ============================================================================
// Session Creation
// ============================================================================

#[test]
fn test_creation_registers_the_session() {
    let (orch, mock) = orchestrator();

    assert_eq!(
        mock.pushes(),
        vec![RecordedPush::SessionCreate(SessionId::from("test-session"))]
    );
    assert_eq!(orch.events().len(), 1, "creation is the first logged event");
}

#[test]
fn test_creation_failure_surfaces() {
    let mock = Arc::new(MockSyncBackend::new());
    mock.fail_next(1);

    let result = SessionOrchestrator::with_session(
        Session::new(SessionId::from("doomed")),
        Box::new(Arc::clone(&mock)),
    );
    assert!(matches!(result, Err(SessionError::Sync(_))));
}

// ============================================================================
// Team Gating
// ============================================================================

#[test]
fn test_team2_cannot_write_team1_surfaces() {
    let (mut orch, mock) = orchestrator();
    let pushes_before = mock.push_count();

    let err = orch
        .edit_term(Team::Two, TermEdit::Ebitda("1".to_string()))
        .unwrap_err();
    assert!(matches!(err, SessionError::ReadOnlyForTeam { .. }));

    let err = orch.set_offering_price(Team::Two, 0, "9").unwrap_err();
    assert!(matches!(err, SessionError::ReadOnlyForTeam { .. }));

    assert_eq!(orch.session().terms().ebitda(), 100_000_000, "no state change");
    assert_eq!(mock.push_count(), pushes_before, "nothing was pushed");
}

#[test]
fn test_team1_cannot_write_team2_surfaces() {
    let (mut orch, mock) = orchestrator();
    let pushes_before = mock.push_count();

    let err = orch.toggle_approval(Team::One, TermField::Ebitda).unwrap_err();
    assert!(matches!(err, SessionError::ReadOnlyForTeam { .. }));

    let err = orch.place_bid(Team::One, 0, 0, "500").unwrap_err();
    assert!(matches!(err, SessionError::ReadOnlyForTeam { .. }));

    assert_eq!(
        orch.session().ledger().get(TermField::Ebitda),
        Approval::Pending
    );
    assert_eq!(mock.push_count(), pushes_before);
}

#[test]
fn test_out_of_range_indices_are_rejected_before_push() {
    let (mut orch, mock) = orchestrator();
    let pushes_before = mock.push_count();

    assert!(matches!(
        orch.set_offering_price(Team::One, 7, "5"),
        Err(SessionError::Grid(_))
    ));
    assert!(matches!(
        orch.place_bid(Team::Two, 3, 0, "100"),
        Err(SessionError::Grid(_))
    ));
    assert_eq!(mock.push_count(), pushes_before);
}

// ============================================================================
// Game 1 Flow
// ============================================================================

#[test]
fn test_edit_pushes_partial_value_update() {
    let (mut orch, mock) = orchestrator();

    orch.edit_term(Team::One, TermEdit::Multiple("4".to_string()))
        .expect("push succeeds");

    assert_eq!(orch.session().terms().multiple(), 4);
    let last = mock.pushes().pop().unwrap();
    match last {
        RecordedPush::Game1Input(team, update) => {
            assert_eq!(team, Team::One);
            assert_eq!(update.multiple, Some(4));
            assert_eq!(update.ebitda, None, "untouched terms stay off the wire");
        }
        other => panic!("expected a Game 1 input push, got {other:?}"),
    }
}

#[test]
fn test_full_negotiation_reaches_agreement() {
    let (mut orch, _mock) = orchestrator();

    orch.edit_term(Team::One, TermEdit::CompanyName("Northwind".to_string()))
        .unwrap();
    assert!(
        !orch.valuation().is_agreed(),
        "valuation withheld until Team 2 approves everything"
    );

    approve_all(&mut orch);

    assert_eq!(
        orch.valuation(),
        ValuationResult::Agreed {
            amount: 600_000_000,
            gauge_pct: 60,
        }
    );
}

#[test]
fn test_reedit_after_agreement_reopens_the_gate() {
    let (mut orch, _mock) = orchestrator();
    approve_all(&mut orch);
    assert!(orch.valuation().is_agreed());

    orch.edit_term(Team::One, TermEdit::Ebitda("200000000".to_string()))
        .unwrap();

    assert!(!orch.valuation().is_agreed(), "the edited flag reopened");
    assert_eq!(orch.session().ledger().pending_count(), 1);
}

// ============================================================================
// Game 2 Flow
// ============================================================================

#[test]
fn test_demo_bidding_round() {
    let (mut orch, _mock) = orchestrator();

    let rows = [[1_000, 4_000, 1_300], [1_500, 2_000, 4_000], [6_000, 1_000, 1_000]];
    for (investor, row) in rows.iter().enumerate() {
        for (company, quantity) in row.iter().enumerate() {
            orch.place_bid(Team::Two, investor, company, &quantity.to_string())
                .unwrap();
        }
    }

    let agg = orch.bid_summary();
    assert_eq!(agg.summary(0).demand, 8_500);
    assert_eq!(agg.summary(2).capital_raised, 94_500);
    assert_eq!(agg.summary(2).subscription, Subscription::Over);
    assert_eq!(agg.most_demanded, 0);
}

#[test]
fn test_repricing_moves_derived_outputs() {
    let (mut orch, _mock) = orchestrator();

    orch.place_bid(Team::Two, 0, 0, "2000").unwrap();
    assert_eq!(orch.bid_summary().summary(0).capital_raised, 8_000);

    orch.set_offering_price(Team::One, 0, "10").unwrap();
    assert_eq!(
        orch.bid_summary().summary(0).capital_raised,
        20_000,
        "capital is recomputed from the live book"
    );

    orch.set_offering_supply(Team::One, 0, "2000").unwrap();
    assert_eq!(orch.bid_summary().summary(0).subscription, Subscription::Exact);
}

#[test]
fn test_garbage_quantity_coerces_to_zero() {
    let (mut orch, _mock) = orchestrator();

    orch.place_bid(Team::Two, 1, 1, "9000").unwrap();
    let placed = orch.place_bid(Team::Two, 1, 1, "lots").unwrap();

    assert_eq!(placed, 0);
    assert_eq!(orch.session().bids().get(1, 1).unwrap(), 0);
}

// ============================================================================
// Rollback on Sync Failure
// ============================================================================

#[test]
fn test_failed_term_edit_restores_value_and_flag() {
    let (mut orch, mock) = orchestrator();
    approve_all(&mut orch);

    mock.fail_next(1);
    let err = orch
        .edit_term(Team::One, TermEdit::Ebitda("999".to_string()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Sync(_)));

    assert_eq!(orch.session().terms().ebitda(), 100_000_000, "value restored");
    assert_eq!(
        orch.session().ledger().get(TermField::Ebitda),
        Approval::Approved,
        "the reset flag is restored too"
    );
    assert!(orch.valuation().is_agreed(), "agreement survives the failed edit");
}

#[test]
fn test_failed_toggle_restores_the_flag() {
    let (mut orch, mock) = orchestrator();

    mock.fail_next(1);
    orch.toggle_approval(Team::Two, TermField::Multiple).unwrap_err();

    assert_eq!(
        orch.session().ledger().get(TermField::Multiple),
        Approval::Pending
    );
}

#[test]
fn test_failed_offering_edit_restores_the_book() {
    let (mut orch, mock) = orchestrator();

    mock.fail_next(1);
    orch.set_offering_price(Team::One, 1, "99").unwrap_err();
    assert_eq!(orch.session().book().price(1).unwrap(), 12);

    mock.fail_next(1);
    orch.set_offering_supply(Team::One, 1, "1").unwrap_err();
    assert_eq!(orch.session().book().supply(1).unwrap(), 8_000);
}

#[test]
fn test_failed_bid_restores_the_grid() {
    let (mut orch, mock) = orchestrator();
    orch.place_bid(Team::Two, 2, 0, "6000").unwrap();

    mock.fail_next(1);
    orch.place_bid(Team::Two, 2, 0, "1").unwrap_err();

    assert_eq!(orch.session().bids().get(2, 0).unwrap(), 6_000);
    assert_eq!(orch.bid_summary().summary(0).demand, 6_000);
}

#[test]
fn test_failures_are_logged_and_not_retried() {
    let (mut orch, mock) = orchestrator();
    let pushes_before = mock.push_count();

    mock.fail_next(1);
    orch.edit_term(Team::One, TermEdit::Ebitda("5".to_string()))
        .unwrap_err();

    assert_eq!(orch.events().sync_failure_count(), 1);
    assert_eq!(orch.events().rollback_count(), 1);
    assert_eq!(mock.push_count(), pushes_before, "no retry after the failure");

    // The next mutation goes through untouched.
    orch.edit_term(Team::One, TermEdit::Ebitda("5".to_string()))
        .unwrap();
    assert_eq!(orch.session().terms().ebitda(), 5);
    assert_eq!(orch.events().sync_failure_count(), 1);
}
