use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "event_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Individual,
    Team,
    Institution,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Individual => "individual",
            EventKind::Team => "team",
            EventKind::Institution => "institution",
        }
    }
}

/// A specific competition within a parent event. The fee here is a list price;
/// participant assignments snapshot it so later edits do not reprice them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventMaster {
    pub event_master_id: Uuid,
    pub event_id: Uuid,
    pub age_category_id: Uuid,
    pub gender: Gender,
    pub kind: EventKind,
    pub fee: Decimal,
    pub code: String,
    pub label: String,
}
