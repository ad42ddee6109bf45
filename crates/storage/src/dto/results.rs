use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{Gender, ResultKey, ResultStatusLabel};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordResultRequest {
    pub subject_id: Uuid,
    pub result_key: ResultKey,
    pub score_text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetResultStatusRequest {
    pub label: ResultStatusLabel,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TopParticipantsQuery {
    pub age_category_id: Option<Uuid>,
    pub gender: Option<Gender>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl TopParticipantsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > 500 {
            return Err("limit must be between 1 and 500".to_string());
        }
        Ok(())
    }
}

/// One line of the points standings: summed individual-point snapshots.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ParticipantStanding {
    pub participant_id: Uuid,
    pub name: String,
    pub institution_name: String,
    pub chest_number: Option<i32>,
    pub total_points: Decimal,
}

/// One entered result joined with its subject's display name, for result
/// sheets and print views.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ResultSheetEntry {
    pub subject_id: Uuid,
    pub subject_name: String,
    pub result_key: ResultKey,
    pub score_text: Option<String>,
    pub points: Decimal,
}
