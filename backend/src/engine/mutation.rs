//! Field mutation rule
//!
//! Applies a Team-1 edit to the deal terms: coerces the raw input to the
//! term's semantic type, writes the value, and unconditionally resets the
//! bound approval flag to `Pending`.
//!
//! # Coercion policy
//!
//! - Integer terms (EBITDA, multiple) parse as i64, defaulting to 0 on
//!   failure
//! - The decimal interest rate parses as f64, defaulting to 0.0 on failure
//!   (same default policy as the integer terms)
//! - Text terms pass through unchanged
//! - The factor score arrives pre-validated from its slider surface and is
//!   clamped into [1, 5], never free-text-parsed
//!
//! Coercion failures are silently absorbed into the default; they are not
//! errors and are never surfaced.

use crate::models::approval::ApprovalLedger;
use crate::models::terms::{DealTerms, TermField};

/// One Team-1 edit, carrying the raw input exactly as the input surface
/// produced it
#[derive(Debug, Clone, PartialEq)]
pub enum TermEdit {
    /// Raw text from the EBITDA input
    Ebitda(String),

    /// Raw text from the interest-rate input
    InterestRate(String),

    /// Raw text from the multiple input
    Multiple(String),

    /// Pre-validated ordinal from the factor-score slider
    FactorScore(u8),

    /// Company name text
    CompanyName(String),

    /// Description text
    Description(String),
}

impl TermEdit {
    /// The term this edit targets
    pub fn field(&self) -> TermField {
        match self {
            TermEdit::Ebitda(_) => TermField::Ebitda,
            TermEdit::InterestRate(_) => TermField::InterestRate,
            TermEdit::Multiple(_) => TermField::Multiple,
            TermEdit::FactorScore(_) => TermField::FactorScore,
            TermEdit::CompanyName(_) => TermField::CompanyName,
            TermEdit::Description(_) => TermField::Description,
        }
    }
}

/// Apply one Team-1 edit and reset the bound approval flag
///
/// The flag is reset even when the coerced value equals the current value:
/// the reviewer signed off on a submission, not on a number, and a
/// re-submission demands a fresh review.
///
/// Returns the edited field so callers can build the wire payload.
///
/// # Example
/// ```
/// use deal_simulator_core_rs::{apply_term_edit, Approval, ApprovalLedger, DealTerms, TermEdit, TermField};
///
/// let mut terms = DealTerms::default();
/// let mut ledger = ApprovalLedger::new();
/// ledger.set(TermField::Multiple, Approval::Approved);
///
/// apply_term_edit(&mut terms, &mut ledger, TermEdit::Multiple("5".to_string()));
/// assert_eq!(terms.multiple(), 5);
/// assert_eq!(ledger.get(TermField::Multiple), Approval::Pending);
/// ```
pub fn apply_term_edit(
    terms: &mut DealTerms,
    ledger: &mut ApprovalLedger,
    edit: TermEdit,
) -> TermField {
    let field = edit.field();

    match edit {
        TermEdit::Ebitda(raw) => terms.set_ebitda(coerce_integer(&raw)),
        TermEdit::InterestRate(raw) => terms.set_interest_rate(coerce_decimal(&raw)),
        TermEdit::Multiple(raw) => terms.set_multiple(coerce_integer(&raw)),
        TermEdit::FactorScore(score) => terms.set_factor_score(score),
        TermEdit::CompanyName(text) => terms.set_company_name(text),
        TermEdit::Description(text) => terms.set_description(text),
    }

    ledger.reset(field);
    field
}

/// Coerce raw text to an integer, defaulting to 0 on parse failure
pub fn coerce_integer(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Coerce raw text to a decimal, defaulting to 0.0 on parse failure
pub fn coerce_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Coerce raw text to a Game-2 quantity (price, supply or bid)
///
/// Same integer policy as Game 1: parse failure means zero. Negative
/// quantities pass through; there is no domain rejection at entry time.
pub fn coerce_quantity(raw: &str) -> i64 {
    coerce_integer(raw)
}
