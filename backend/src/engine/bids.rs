//! Bid aggregation engine
//!
//! Pure, total function over the offering book and the bid grid. The grid
//! is fixed-shape, so there are no missing entries and no failure modes.
//!
//! Per company:
//! - demand = sum of every investor's bid for that company
//! - capital raised = demand × unit price
//! - subscription = Over / Under / Exact versus share supply
//!
//! Across companies, the single most-demanded company is the argmax of
//! demand; ties resolve to the lowest-indexed company. That tie-break is a
//! defined, tested contract and is deterministic on every call.

use serde::Serialize;

use crate::models::offering::{BidGrid, OfferingBook, COMPANY_COUNT};

/// Classification of aggregate demand against available supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Subscription {
    /// Demand exceeds supply
    Over,

    /// Demand falls short of supply
    Under,

    /// Demand equals supply
    Exact,
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subscription::Over => write!(f, "Over"),
            Subscription::Under => write!(f, "Under"),
            Subscription::Exact => write!(f, "Exact"),
        }
    }
}

/// Derived outputs for one company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    /// Total shares bid for across all investors
    pub demand: i64,

    /// demand × unit price (USD)
    pub capital_raised: i64,

    /// Demand versus supply
    pub subscription: Subscription,
}

/// Derived outputs for the whole offering round
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidAggregate {
    /// Per-company summaries, in company order
    pub companies: [CompanySummary; COMPANY_COUNT],

    /// Index of the company with the greatest demand (lowest index wins ties)
    pub most_demanded: usize,
}

impl BidAggregate {
    pub fn summary(&self, company: usize) -> &CompanySummary {
        &self.companies[company]
    }
}

/// Aggregate the bid grid against the offering book
///
/// # Example
/// ```
/// use deal_simulator_core_rs::{compute_bid_outputs, BidGrid, OfferingBook, Subscription};
///
/// let book = OfferingBook::default();
/// let grid = BidGrid::from_rows([
///     [1_000, 4_000, 1_300],
///     [1_500, 2_000, 4_000],
///     [6_000, 1_000, 1_000],
/// ]);
///
/// let agg = compute_bid_outputs(&book, &grid);
/// assert_eq!(agg.summary(0).demand, 8_500);
/// assert_eq!(agg.summary(2).subscription, Subscription::Over);
/// assert_eq!(agg.most_demanded, 0);
/// ```
pub fn compute_bid_outputs(book: &OfferingBook, grid: &BidGrid) -> BidAggregate {
    let mut companies = [CompanySummary {
        demand: 0,
        capital_raised: 0,
        subscription: Subscription::Exact,
    }; COMPANY_COUNT];

    let demand = grid.column_totals();
    for (company, offering) in book.offerings().iter().enumerate() {
        companies[company] = CompanySummary {
            demand: demand[company],
            capital_raised: demand[company].saturating_mul(offering.price()),
            subscription: classify(demand[company], offering.supply()),
        };
    }

    let mut most_demanded = 0;
    for (company, summary) in companies.iter().enumerate().skip(1) {
        // Strict comparison keeps the first occurrence on ties.
        if summary.demand > companies[most_demanded].demand {
            most_demanded = company;
        }
    }

    BidAggregate {
        companies,
        most_demanded,
    }
}

fn classify(demand: i64, supply: i64) -> Subscription {
    match demand.cmp(&supply) {
        std::cmp::Ordering::Greater => Subscription::Over,
        std::cmp::Ordering::Less => Subscription::Under,
        std::cmp::Ordering::Equal => Subscription::Exact,
    }
}
