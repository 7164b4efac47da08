//! Wire-vocabulary translation for the sync boundary
//!
//! The backend speaks a fixed, flat field vocabulary that differs from the
//! core's names: `interest_rate` rather than `TermField::InterestRate`,
//! `company2_shares` rather than an offering-book index, and compound
//! `investor<i>_company<c>_bid` keys for the grid. Everything crossing the
//! boundary goes through this module; core types never serialize their own
//! names onto the wire.
//!
//! Updates are partial: every payload field is optional and only the edited
//! key is populated, so an untouched key is absent rather than null.

use serde::Serialize;

use crate::models::approval::{Approval, ApprovalLedger};
use crate::models::offering::{GridError, COMPANY_COUNT, INVESTOR_COUNT};
use crate::models::terms::{DealTerms, TermField};

/// Game-1 Team-1 value update (partial)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Game1InputUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_score: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Game1InputUpdate {
    /// Build the partial payload carrying only the edited term's current value
    pub fn for_field(terms: &DealTerms, field: TermField) -> Self {
        let mut update = Self::default();
        match field {
            TermField::Ebitda => update.ebitda = Some(terms.ebitda()),
            TermField::InterestRate => update.interest_rate = Some(terms.interest_rate()),
            TermField::Multiple => update.multiple = Some(terms.multiple()),
            TermField::FactorScore => update.factor_score = Some(terms.factor_score()),
            TermField::CompanyName => {
                update.company_name = Some(terms.company_name().to_string())
            }
            TermField::Description => {
                update.description = Some(terms.description().to_string())
            }
        }
        update
    }
}

/// Game-1 Team-2 approval update (partial), values are "TBD"/"OK"
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Game1ApprovalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda_approval: Option<Approval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_approval: Option<Approval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_approval: Option<Approval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor_score_approval: Option<Approval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name_approval: Option<Approval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_approval: Option<Approval>,
}

impl Game1ApprovalUpdate {
    /// Build the partial payload carrying only one term's current flag
    pub fn for_field(ledger: &ApprovalLedger, field: TermField) -> Self {
        let flag = Some(ledger.get(field));
        let mut update = Self::default();
        match field {
            TermField::Ebitda => update.ebitda_approval = flag,
            TermField::InterestRate => update.interest_rate_approval = flag,
            TermField::Multiple => update.multiple_approval = flag,
            TermField::FactorScore => update.factor_score_approval = flag,
            TermField::CompanyName => update.company_name_approval = flag,
            TermField::Description => update.description_approval = flag,
        }
        update
    }
}

/// Game-2 Team-1 pricing/supply update (partial)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Game2InputUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company1_price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company2_price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company3_price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company1_shares: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company2_shares: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company3_shares: Option<i64>,
}

impl Game2InputUpdate {
    /// Payload carrying one company's new unit price
    pub fn price(company: usize, value: i64) -> Result<Self, GridError> {
        let mut update = Self::default();
        match company {
            0 => update.company1_price = Some(value),
            1 => update.company2_price = Some(value),
            2 => update.company3_price = Some(value),
            _ => return Err(GridError::CompanyOutOfRange { index: company }),
        }
        Ok(update)
    }

    /// Payload carrying one company's new share supply
    pub fn shares(company: usize, value: i64) -> Result<Self, GridError> {
        let mut update = Self::default();
        match company {
            0 => update.company1_shares = Some(value),
            1 => update.company2_shares = Some(value),
            2 => update.company3_shares = Some(value),
            _ => return Err(GridError::CompanyOutOfRange { index: company }),
        }
        Ok(update)
    }
}

/// Game-2 Team-2 bid update (partial), compound `investor<i>_company<c>_bid`
/// keys
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvestorBidsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor1_company1_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor1_company2_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor1_company3_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor2_company1_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor2_company2_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor2_company3_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor3_company1_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor3_company2_bid: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor3_company3_bid: Option<i64>,
}

impl InvestorBidsUpdate {
    /// Payload carrying one (investor, company) bid quantity
    pub fn bid(investor: usize, company: usize, quantity: i64) -> Result<Self, GridError> {
        if investor >= INVESTOR_COUNT {
            return Err(GridError::InvestorOutOfRange { index: investor });
        }
        if company >= COMPANY_COUNT {
            return Err(GridError::CompanyOutOfRange { index: company });
        }

        let mut update = Self::default();
        let slot = match (investor, company) {
            (0, 0) => &mut update.investor1_company1_bid,
            (0, 1) => &mut update.investor1_company2_bid,
            (0, _) => &mut update.investor1_company3_bid,
            (1, 0) => &mut update.investor2_company1_bid,
            (1, 1) => &mut update.investor2_company2_bid,
            (1, _) => &mut update.investor2_company3_bid,
            (_, 0) => &mut update.investor3_company1_bid,
            (_, 1) => &mut update.investor3_company2_bid,
            (_, _) => &mut update.investor3_company3_bid,
        };
        *slot = Some(quantity);
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_input_payload_has_single_key() {
        let terms = DealTerms::default();
        let update = Game1InputUpdate::for_field(&terms, TermField::InterestRate);

        let json = serde_json::to_value(&update).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["interest_rate"], 15.0);
    }

    #[test]
    fn test_approval_payload_uses_wire_sentinels() {
        let ledger = ApprovalLedger::new();
        let update = Game1ApprovalUpdate::for_field(&ledger, TermField::CompanyName);

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["company_name_approval"], "TBD");
    }

    #[test]
    fn test_game2_price_key() {
        let update = Game2InputUpdate::price(1, 20).unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["company2_price"], 20);
    }

    #[test]
    fn test_bid_compound_key() {
        let update = InvestorBidsUpdate::bid(2, 0, 6_000).unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["investor3_company1_bid"], 6_000);
    }

    #[test]
    fn test_out_of_range_indices_are_typed_errors() {
        assert_eq!(
            Game2InputUpdate::price(COMPANY_COUNT, 1),
            Err(GridError::CompanyOutOfRange {
                index: COMPANY_COUNT
            })
        );
        assert_eq!(
            Game2InputUpdate::shares(9, 1),
            Err(GridError::CompanyOutOfRange { index: 9 })
        );
        assert_eq!(
            InvestorBidsUpdate::bid(INVESTOR_COUNT, 0, 1),
            Err(GridError::InvestorOutOfRange {
                index: INVESTOR_COUNT
            })
        );
        assert_eq!(
            InvestorBidsUpdate::bid(0, COMPANY_COUNT, 1),
            Err(GridError::CompanyOutOfRange {
                index: COMPANY_COUNT
            })
        );
    }
}
