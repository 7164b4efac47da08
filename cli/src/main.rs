//! Headless driver for the deal simulator: runs both games of a scripted
//! demo session and prints the derived outputs.
//!
//! By default mutations are pushed to the session backend named by
//! `DEAL_BACKEND_URL` (falling back to localhost); `--offline` swaps in the
//! in-process mock so the demo runs without a server.

use anyhow::Result;
use deal_simulator_core_rs::{
    company_label, format_usd, HttpSyncClient, MockSyncBackend, Session, SessionId,
    SessionOrchestrator, SyncBackend, Team, TermEdit, TermField,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    base_url: Option<String>,
    session: Option<String>,
    offline: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        base_url: None,
        session: None,
        offline: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--base-url" => args.base_url = it.next(),
            "--session" => args.session = it.next(),
            "--offline" => args.offline = true,
            _ => {}
        }
    }
    args
}

fn build_backend(args: &Args) -> Box<dyn SyncBackend> {
    if args.offline {
        Box::new(MockSyncBackend::new())
    } else {
        match &args.base_url {
            Some(url) => Box::new(HttpSyncClient::new(url.clone())),
            None => Box::new(HttpSyncClient::from_env()),
        }
    }
}

/// Game 1 demo: Team 1 restates the seed terms, Team 2 approves them all.
fn run_negotiation(orch: &mut SessionOrchestrator) -> Result<()> {
    orch.edit_term(Team::One, TermEdit::CompanyName("Acme Holdings".to_string()))?;
    orch.edit_term(
        Team::One,
        TermEdit::Description("Leveraged buyout of a regional manufacturer".to_string()),
    )?;
    orch.edit_term(Team::One, TermEdit::Ebitda("100000000".to_string()))?;
    orch.edit_term(Team::One, TermEdit::InterestRate("15".to_string()))?;
    orch.edit_term(Team::One, TermEdit::Multiple("3".to_string()))?;
    orch.edit_term(Team::One, TermEdit::FactorScore(2))?;

    let pending = orch.valuation();
    println!("Game 1 | before approval: {}", pending.display());

    for field in TermField::ALL {
        orch.toggle_approval(Team::Two, field)?;
    }

    let agreed = orch.valuation();
    println!(
        "Game 1 | agreed valuation: {} | gauge: {}%",
        agreed.display(),
        agreed.gauge_pct()
    );
    Ok(())
}

/// Game 2 demo: seed offering book, demo bid grid, derived outputs.
fn run_bidding(orch: &mut SessionOrchestrator) -> Result<()> {
    let rows = [
        [1_000, 4_000, 1_300],
        [1_500, 2_000, 4_000],
        [6_000, 1_000, 1_000],
    ];
    for (investor, row) in rows.iter().enumerate() {
        for (company, quantity) in row.iter().enumerate() {
            orch.place_bid(Team::Two, investor, company, &quantity.to_string())?;
        }
    }

    let agg = orch.bid_summary();
    for company in 0..rows[0].len() {
        let summary = agg.summary(company);
        println!(
            "Game 2 | {} | demand: {} | capital: {} | {}-subscribed",
            company_label(company),
            summary.demand,
            format_usd(summary.capital_raised),
            summary.subscription
        );
    }
    println!(
        "Game 2 | most demanded: {}",
        company_label(agg.most_demanded)
    );
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    let backend = build_backend(&args);

    let mut orch = match &args.session {
        Some(token) => SessionOrchestrator::with_session(
            Session::new(SessionId::from(token.as_str())),
            backend,
        )?,
        None => SessionOrchestrator::new(backend)?,
    };
    info!(session = %orch.session().id(), offline = args.offline, "demo session started");

    println!("Session {}", orch.session().id());
    run_negotiation(&mut orch)?;
    run_bidding(&mut orch)?;

    println!(
        "Events | {} logged | {} sync failures | {} rollbacks",
        orch.events().len(),
        orch.events().sync_failure_count(),
        orch.events().rollback_count()
    );

    Ok(())
}
