//! Investment bidding model
//!
//! Game 2 state: a fixed book of company offerings (Team-1-owned price and
//! share supply per company) and a fixed-shape grid of investor bids
//! (Team-2-owned quantities). There is no approval gating here; bids are
//! the reviewer team's substitute for approval.
//!
//! Prices, supplies and bid quantities accept any integer, including zero
//! and negative values; over/under-subscription is a derived classification
//! (see `engine::bids`), never a write-time rejection.
//!
//! CRITICAL: All money values are i64 (whole USD)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of companies on offer
pub const COMPANY_COUNT: usize = 3;

/// Number of bidding investors
pub const INVESTOR_COUNT: usize = 3;

/// Errors for out-of-range grid addressing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("company index {index} out of range (companies: {COMPANY_COUNT})")]
    CompanyOutOfRange { index: usize },

    #[error("investor index {index} out of range (investors: {INVESTOR_COUNT})")]
    InvestorOutOfRange { index: usize },
}

fn check_company(index: usize) -> Result<(), GridError> {
    if index < COMPANY_COUNT {
        Ok(())
    } else {
        Err(GridError::CompanyOutOfRange { index })
    }
}

fn check_investor(index: usize) -> Result<(), GridError> {
    if index < INVESTOR_COUNT {
        Ok(())
    } else {
        Err(GridError::InvestorOutOfRange { index })
    }
}

/// Display label for a company index ("Company 1" .. "Company 3")
pub fn company_label(index: usize) -> String {
    format!("Company {}", index + 1)
}

/// Display label for an investor index ("Investor 1" .. "Investor 3")
pub fn investor_label(index: usize) -> String {
    format!("Investor {}", index + 1)
}

/// One company's offering terms: unit price and share supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOffering {
    /// Unit share price (USD)
    price: i64,

    /// Number of shares on offer
    supply: i64,
}

impl CompanyOffering {
    pub fn new(price: i64, supply: i64) -> Self {
        Self { price, supply }
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn supply(&self) -> i64 {
        self.supply
    }
}

/// The Team-1-owned offering book, one entry per company
///
/// Price and supply are independently mutable; setters return the prior
/// value so a failed remote sync can restore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingBook {
    offerings: [CompanyOffering; COMPANY_COUNT],
}

impl OfferingBook {
    pub fn new(offerings: [CompanyOffering; COMPANY_COUNT]) -> Self {
        Self { offerings }
    }

    pub fn price(&self, company: usize) -> Result<i64, GridError> {
        check_company(company)?;
        Ok(self.offerings[company].price)
    }

    pub fn supply(&self, company: usize) -> Result<i64, GridError> {
        check_company(company)?;
        Ok(self.offerings[company].supply)
    }

    /// Set a company's unit price, returning the prior price
    pub fn set_price(&mut self, company: usize, price: i64) -> Result<i64, GridError> {
        check_company(company)?;
        let prior = self.offerings[company].price;
        self.offerings[company].price = price;
        Ok(prior)
    }

    /// Set a company's share supply, returning the prior supply
    pub fn set_supply(&mut self, company: usize, supply: i64) -> Result<i64, GridError> {
        check_company(company)?;
        let prior = self.offerings[company].supply;
        self.offerings[company].supply = supply;
        Ok(prior)
    }

    pub fn offerings(&self) -> &[CompanyOffering; COMPANY_COUNT] {
        &self.offerings
    }
}

impl Default for OfferingBook {
    /// Opening book for a fresh session
    fn default() -> Self {
        Self::new([
            CompanyOffering::new(4, 10_000),
            CompanyOffering::new(12, 8_000),
            CompanyOffering::new(15, 5_000),
        ])
    }
}

/// Team-2-owned bid quantities, investor-major fixed-shape grid
///
/// Bids are unconstrained by supply at entry time: an investor may bid for
/// more shares than exist. Missing entries cannot occur; the grid is fixed
/// shape and zero-initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidGrid {
    bids: [[i64; COMPANY_COUNT]; INVESTOR_COUNT],
}

impl BidGrid {
    /// Create an all-zero grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from investor-major rows
    pub fn from_rows(rows: [[i64; COMPANY_COUNT]; INVESTOR_COUNT]) -> Self {
        Self { bids: rows }
    }

    /// Current bid of one investor for one company
    pub fn get(&self, investor: usize, company: usize) -> Result<i64, GridError> {
        check_investor(investor)?;
        check_company(company)?;
        Ok(self.bids[investor][company])
    }

    /// Set one bid quantity, returning the prior quantity
    pub fn set(&mut self, investor: usize, company: usize, quantity: i64) -> Result<i64, GridError> {
        check_investor(investor)?;
        check_company(company)?;
        let prior = self.bids[investor][company];
        self.bids[investor][company] = quantity;
        Ok(prior)
    }

    /// Total demand for one company: sum of all investors' bids
    pub fn demand(&self, company: usize) -> Result<i64, GridError> {
        check_company(company)?;
        Ok(self
            .bids
            .iter()
            .fold(0i64, |acc, row| acc.saturating_add(row[company])))
    }

    /// Total demand per company, in company order
    pub fn column_totals(&self) -> [i64; COMPANY_COUNT] {
        let mut totals = [0i64; COMPANY_COUNT];
        for row in &self.bids {
            for (company, bid) in row.iter().enumerate() {
                totals[company] = totals[company].saturating_add(*bid);
            }
        }
        totals
    }
}
