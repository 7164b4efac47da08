//! Deal terms model
//!
//! Represents the Team-1-owned negotiable terms for the valuation game.
//! Each term has:
//! - A semantic type (integer money, decimal percent, bounded ordinal, text)
//! - A current value, mutable only by Team 1
//! - A bound approval flag in the `ApprovalLedger` (see `models::approval`)
//!
//! CRITICAL: All money values are i64 (whole USD)

use serde::{Deserialize, Serialize};

/// Lowest admissible factor score (bounded ordinal)
pub const FACTOR_SCORE_MIN: u8 = 1;

/// Highest admissible factor score (bounded ordinal)
pub const FACTOR_SCORE_MAX: u8 = 5;

/// Identifies one negotiable term of the deal
///
/// Every term is owned by Team 1 and gated by exactly one approval flag
/// owned by Team 2. The order of `ALL` fixes the ledger layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermField {
    /// Earnings before interest, taxes, depreciation and amortization (USD)
    Ebitda,

    /// Annual interest rate in percent (decimal)
    InterestRate,

    /// Valuation multiple (integer)
    Multiple,

    /// Qualitative factor score, bounded ordinal in [1, 5]
    FactorScore,

    /// Company name (short text)
    CompanyName,

    /// Deal description (long text)
    Description,
}

impl TermField {
    /// All negotiable terms, in ledger order
    pub const ALL: [TermField; 6] = [
        TermField::Ebitda,
        TermField::InterestRate,
        TermField::Multiple,
        TermField::FactorScore,
        TermField::CompanyName,
        TermField::Description,
    ];

    /// Number of negotiable terms
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this term in the ledger layout
    pub fn index(&self) -> usize {
        match self {
            TermField::Ebitda => 0,
            TermField::InterestRate => 1,
            TermField::Multiple => 2,
            TermField::FactorScore => 3,
            TermField::CompanyName => 4,
            TermField::Description => 5,
        }
    }

    /// Wire-vocabulary name of the term's value field
    ///
    /// Used by the sync boundary; core code never builds wire payloads from
    /// anything but this table (see `sync::wire`).
    pub fn wire_name(&self) -> &'static str {
        match self {
            TermField::Ebitda => "ebitda",
            TermField::InterestRate => "interest_rate",
            TermField::Multiple => "multiple",
            TermField::FactorScore => "factor_score",
            TermField::CompanyName => "company_name",
            TermField::Description => "description",
        }
    }

    /// Human-readable label for display surfaces
    pub fn label(&self) -> &'static str {
        match self {
            TermField::Ebitda => "EBITDA",
            TermField::InterestRate => "Interest Rate",
            TermField::Multiple => "Multiple",
            TermField::FactorScore => "Factor Score",
            TermField::CompanyName => "Company Name",
            TermField::Description => "Description",
        }
    }
}

impl std::fmt::Display for TermField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Current values of all Team-1 negotiable terms
///
/// Mutated only through typed setters; the mutation rule in
/// `engine::mutation` is responsible for raw-input coercion and for
/// resetting the bound approval flag on every edit.
///
/// # Example
/// ```
/// use deal_simulator_core_rs::DealTerms;
///
/// let mut terms = DealTerms::default();
/// terms.set_ebitda(250_000_000);
/// assert_eq!(terms.ebitda(), 250_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealTerms {
    /// EBITDA in whole USD
    ebitda: i64,

    /// Interest rate in percent
    interest_rate: f64,

    /// Valuation multiple
    multiple: i64,

    /// Factor score, always within [FACTOR_SCORE_MIN, FACTOR_SCORE_MAX]
    factor_score: u8,

    /// Company name
    company_name: String,

    /// Free-text deal description
    description: String,
}

impl DealTerms {
    /// Create terms with explicit values
    ///
    /// The factor score is clamped into the admissible [1, 5] range; the
    /// slider surface that produces it is trusted but not blindly.
    pub fn new(
        ebitda: i64,
        interest_rate: f64,
        multiple: i64,
        factor_score: u8,
        company_name: String,
        description: String,
    ) -> Self {
        Self {
            ebitda,
            interest_rate,
            multiple,
            factor_score: clamp_factor_score(factor_score),
            company_name,
            description,
        }
    }

    pub fn ebitda(&self) -> i64 {
        self.ebitda
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn multiple(&self) -> i64 {
        self.multiple
    }

    pub fn factor_score(&self) -> u8 {
        self.factor_score
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_ebitda(&mut self, value: i64) {
        self.ebitda = value;
    }

    pub fn set_interest_rate(&mut self, value: f64) {
        self.interest_rate = value;
    }

    pub fn set_multiple(&mut self, value: i64) {
        self.multiple = value;
    }

    /// Set the factor score, clamping into [1, 5]
    pub fn set_factor_score(&mut self, value: u8) {
        self.factor_score = clamp_factor_score(value);
    }

    pub fn set_company_name(&mut self, value: String) {
        self.company_name = value;
    }

    pub fn set_description(&mut self, value: String) {
        self.description = value;
    }
}

impl Default for DealTerms {
    /// Opening position of the negotiation (session seed values)
    fn default() -> Self {
        Self {
            ebitda: 100_000_000,
            interest_rate: 15.0,
            multiple: 3,
            factor_score: 2,
            company_name: String::new(),
            description: String::new(),
        }
    }
}

fn clamp_factor_score(value: u8) -> u8 {
    value.clamp(FACTOR_SCORE_MIN, FACTOR_SCORE_MAX)
}
