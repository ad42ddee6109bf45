use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Age bracket expressed as a date-of-birth window; an open bound means no limit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AgeCategory {
    pub age_category_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub born_on_or_after: Option<NaiveDate>,
    pub born_on_or_before: Option<NaiveDate>,
}
