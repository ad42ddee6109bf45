use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ReviewStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InstitutionEventRegistration {
    pub registration_id: Uuid,
    pub institution_id: Uuid,
    pub event_master_id: Uuid,
    pub status: ReviewStatus,
    pub submitted_by: Uuid,
    pub submitted_at: NaiveDateTime,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
}
