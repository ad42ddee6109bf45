use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ReviewStatus;

/// A manually attested remittance. The receipt itself lives with the upload
/// collaborator; only its path is stored here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FundTransfer {
    pub fund_transfer_id: Uuid,
    pub event_id: Uuid,
    pub institution_id: Uuid,
    pub transfer_date: NaiveDate,
    pub mode: String,
    pub amount: Decimal,
    pub transaction_number: String,
    pub receipt_path: Option<String>,
    pub status: ReviewStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub remarks: Option<String>,
    pub created_at: NaiveDateTime,
}
