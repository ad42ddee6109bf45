use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Institution {
    pub institution_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}
