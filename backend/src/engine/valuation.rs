//! Valuation calculator
//!
//! Pure function over a snapshot of the deal terms and the approval ledger.
//! Nothing here is cached: the result is recomputed on every read and is
//! never partially valid.
//!
//! # The gate
//!
//! While any approval flag is pending, the calculator returns the sentinel
//! result, "Not yet agreed by Team 2" at a fixed gauge position, no
//! matter what the term values are.
//!
//! # The formula
//!
//! The canonical valuation is `EBITDA × Multiple × FactorScore`. The
//! interest rate is a negotiable, approval-gated term but deliberately does
//! not enter the product (see DESIGN.md for the rejected variant).

use serde::Serialize;

use crate::models::approval::ApprovalLedger;
use crate::models::terms::DealTerms;

/// Display text while at least one approval flag is pending
pub const SENTINEL_TEXT: &str = "Not yet agreed by Team 2";

/// Gauge position shown for the sentinel result
pub const SENTINEL_GAUGE: u8 = 20;

/// Valuation magnitude that maps to 100 before clamping
const GAUGE_FULL_SCALE: f64 = 1_000_000_000.0;

/// Lower clamp of the gauge percentage
const GAUGE_MIN: f64 = 10.0;

/// Upper clamp of the gauge percentage
const GAUGE_MAX: f64 = 90.0;

/// Derived valuation output
///
/// Never stored: always recomputed from the current terms and the full
/// flag set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValuationResult {
    /// At least one flag is pending; the valuation is withheld
    AwaitingApproval,

    /// Every flag is approved; the valuation is in force
    Agreed {
        /// Valuation amount in whole USD
        amount: i64,

        /// Gauge percentage in [10, 90]
        gauge_pct: u8,
    },
}

impl ValuationResult {
    /// Formatted display value: the sentinel text, or the currency amount
    pub fn display(&self) -> String {
        match self {
            ValuationResult::AwaitingApproval => SENTINEL_TEXT.to_string(),
            ValuationResult::Agreed { amount, .. } => format_usd(*amount),
        }
    }

    /// Gauge percentage for the progress indicator
    pub fn gauge_pct(&self) -> u8 {
        match self {
            ValuationResult::AwaitingApproval => SENTINEL_GAUGE,
            ValuationResult::Agreed { gauge_pct, .. } => *gauge_pct,
        }
    }

    pub fn is_agreed(&self) -> bool {
        matches!(self, ValuationResult::Agreed { .. })
    }
}

/// Compute the valuation from current terms, gated by the approval ledger
///
/// # Example
/// ```
/// use deal_simulator_core_rs::{compute_valuation, Approval, ApprovalLedger, DealTerms, TermField, ValuationResult};
///
/// let terms = DealTerms::new(100_000_000, 15.0, 3, 2, String::new(), String::new());
/// let mut ledger = ApprovalLedger::new();
/// assert!(!compute_valuation(&terms, &ledger).is_agreed());
///
/// for field in TermField::ALL {
///     ledger.set(field, Approval::Approved);
/// }
/// let result = compute_valuation(&terms, &ledger);
/// assert_eq!(result.display(), "$600,000,000");
/// assert_eq!(result.gauge_pct(), 60);
/// ```
pub fn compute_valuation(terms: &DealTerms, ledger: &ApprovalLedger) -> ValuationResult {
    if !ledger.all_approved() {
        return ValuationResult::AwaitingApproval;
    }

    // Terms arrive from raw-input coercion and may be arbitrarily large;
    // the product saturates instead of wrapping.
    let amount = terms
        .ebitda()
        .saturating_mul(terms.multiple())
        .saturating_mul(i64::from(terms.factor_score()));

    ValuationResult::Agreed {
        amount,
        gauge_pct: gauge_percentage(amount),
    }
}

/// Map a valuation magnitude onto the bounded gauge
///
/// `clamp(amount / 1e9 × 100, 10, 90)`, rounded to the nearest integer.
/// Out-of-range magnitudes are clamped, never reported out of bounds.
pub fn gauge_percentage(amount: i64) -> u8 {
    let pct = (amount as f64 / GAUGE_FULL_SCALE * 100.0).clamp(GAUGE_MIN, GAUGE_MAX);
    pct.round() as u8
}

/// Format whole USD with thousands grouping, no fractional units
///
/// The dollar glyph is a presentation default; callers that need another
/// symbol own that concern.
pub fn format_usd(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::approval::Approval;
    use crate::models::terms::TermField;

    fn approved_ledger() -> ApprovalLedger {
        let mut ledger = ApprovalLedger::new();
        for field in TermField::ALL {
            ledger.set(field, Approval::Approved);
        }
        ledger
    }

    #[test]
    fn test_sentinel_while_any_flag_pending() {
        let terms = DealTerms::new(10, 0.0, 10, 2, String::new(), String::new());
        let mut ledger = approved_ledger();
        ledger.reset(TermField::FactorScore);

        let result = compute_valuation(&terms, &ledger);
        assert_eq!(result, ValuationResult::AwaitingApproval);
        assert_eq!(result.display(), SENTINEL_TEXT);
        assert_eq!(result.gauge_pct(), SENTINEL_GAUGE);
    }

    #[test]
    fn test_worked_example() {
        let terms = DealTerms::new(100_000_000, 15.0, 3, 2, String::new(), String::new());
        let result = compute_valuation(&terms, &approved_ledger());

        assert_eq!(
            result,
            ValuationResult::Agreed {
                amount: 600_000_000,
                gauge_pct: 60
            }
        );
    }

    #[test]
    fn test_interest_rate_excluded_from_product() {
        let flat = DealTerms::new(100_000_000, 0.0, 3, 2, String::new(), String::new());
        let steep = DealTerms::new(100_000_000, 99.0, 3, 2, String::new(), String::new());
        let ledger = approved_ledger();

        assert_eq!(compute_valuation(&flat, &ledger), compute_valuation(&steep, &ledger));
    }

    #[test]
    fn test_extreme_terms_saturate() {
        let terms = DealTerms::new(i64::MAX, 15.0, 3, 2, String::new(), String::new());
        let result = compute_valuation(&terms, &approved_ledger());
        assert_eq!(
            result,
            ValuationResult::Agreed {
                amount: i64::MAX,
                gauge_pct: 90
            }
        );
    }

    #[test]
    fn test_gauge_clamps() {
        assert_eq!(gauge_percentage(0), 10);
        assert_eq!(gauge_percentage(200), 10);
        assert_eq!(gauge_percentage(600_000_000), 60);
        assert_eq!(gauge_percentage(900_000_000), 90);
        assert_eq!(gauge_percentage(2_000_000_000), 90);
    }

    #[test]
    fn test_gauge_rounds_to_nearest() {
        // 0.345e9 → 34.5 → 35 (round half away from zero)
        assert_eq!(gauge_percentage(345_000_000), 35);
        assert_eq!(gauge_percentage(344_000_000), 34);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1_000), "$1,000");
        assert_eq!(format_usd(600_000_000), "$600,000,000");
        assert_eq!(format_usd(-34_000), "-$34,000");
    }
}
