use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ResultKey;

/// Informational entry-progress label per event master. No ordering is
/// enforced between the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "result_status_label", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResultStatusLabel {
    Pending,
    Entry,
    Published,
}

impl ResultStatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatusLabel::Pending => "pending",
            ResultStatusLabel::Entry => "entry",
            ResultStatusLabel::Published => "published",
        }
    }
}

/// Placement outcome for one participant in one competition. `points` is a
/// snapshot of the configured value at write time, not a live join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct IndividualEventResult {
    pub result_id: Uuid,
    pub event_master_id: Uuid,
    pub participant_id: Uuid,
    pub result_key: ResultKey,
    pub score_text: Option<String>,
    pub points: Decimal,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamEventResult {
    pub result_id: Uuid,
    pub event_master_id: Uuid,
    pub team_entry_id: Uuid,
    pub result_key: ResultKey,
    pub score_text: Option<String>,
    pub points: Decimal,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InstitutionEventResult {
    pub result_id: Uuid,
    pub event_master_id: Uuid,
    pub institution_id: Uuid,
    pub result_key: ResultKey,
    pub score_text: Option<String>,
    pub points: Decimal,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResultStatus {
    pub event_master_id: Uuid,
    pub label: ResultStatusLabel,
    pub updated_at: NaiveDateTime,
}
