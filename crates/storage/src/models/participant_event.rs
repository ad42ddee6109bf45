use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Assignment of a participant to an individual-type competition. The fee is
/// snapshotted from the event master at assignment time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ParticipantEvent {
    pub participant_event_id: Uuid,
    pub participant_id: Uuid,
    pub event_master_id: Uuid,
    pub fee: Decimal,
}
