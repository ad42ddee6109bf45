use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::ReviewStatus;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFundTransferRequest {
    pub transfer_date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub mode: String,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub transaction_number: String,
    pub receipt_path: Option<String>,
}

fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("amount_must_be_positive"))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewFundTransferRequest {
    pub status: ReviewStatus,
    pub remarks: Option<String>,
}

/// Scope for the fee aggregation: a whole event, optionally narrowed to one
/// institution. Both dashboards run through the same query.
#[derive(Debug, Clone, Copy)]
pub struct FinanceScope {
    pub event_id: Uuid,
    pub institution_id: Option<Uuid>,
}

impl FinanceScope {
    pub fn event(event_id: Uuid) -> Self {
        Self {
            event_id,
            institution_id: None,
        }
    }

    pub fn institution(event_id: Uuid, institution_id: Uuid) -> Self {
        Self {
            event_id,
            institution_id: Some(institution_id),
        }
    }
}

/// Liability and remittance breakdown for one scope. Committed registrations
/// owe immediately; only verified transfers are credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeeBreakdown {
    pub participant_fees: Decimal,
    pub team_fees: Decimal,
    pub institution_fees: Decimal,
    pub total_due: Decimal,
    pub fund_pending: Decimal,
    pub fund_approved: Decimal,
    pub fund_total: Decimal,
    pub balance: Decimal,
}

impl FeeBreakdown {
    pub fn from_parts(
        participant_fees: Decimal,
        team_fees: Decimal,
        institution_fees: Decimal,
        fund_pending: Decimal,
        fund_approved: Decimal,
    ) -> Self {
        let total_due = participant_fees + team_fees + institution_fees;
        let balance = (total_due - fund_approved).max(Decimal::ZERO);
        Self {
            participant_fees,
            team_fees,
            institution_fees,
            total_due,
            fund_pending,
            fund_approved,
            fund_total: fund_pending + fund_approved,
            balance,
        }
    }

    pub fn zero() -> Self {
        Self::from_parts(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn breakdown_sums_subtotals_and_credits_only_approved_funds() {
        // One submitted participant fee counts, the draft one does not; the
        // pending transfer never reduces the balance.
        let breakdown = FeeBreakdown::from_parts(dec(100), dec(50), dec(30), dec(10), dec(20));
        assert_eq!(breakdown.total_due, dec(180));
        assert_eq!(breakdown.fund_approved, dec(20));
        assert_eq!(breakdown.fund_total, dec(30));
        assert_eq!(breakdown.balance, dec(160));
    }

    #[test]
    fn balance_is_clamped_at_zero_on_overpayment() {
        let breakdown = FeeBreakdown::from_parts(dec(40), dec(0), dec(0), dec(0), dec(100));
        assert_eq!(breakdown.balance, Decimal::ZERO);
        assert_eq!(breakdown.fund_approved, dec(100));
    }

    #[test]
    fn empty_scope_yields_all_zero_breakdown() {
        let breakdown = FeeBreakdown::zero();
        assert_eq!(breakdown.total_due, Decimal::ZERO);
        assert_eq!(breakdown.balance, Decimal::ZERO);
        assert_eq!(breakdown.fund_total, Decimal::ZERO);
    }

    #[test]
    fn amount_validation_rejects_non_positive_values() {
        assert!(positive_amount(&dec(1)).is_ok());
        assert!(positive_amount(&Decimal::ZERO).is_err());
        assert!(positive_amount(&dec(-5)).is_err());
    }
}
