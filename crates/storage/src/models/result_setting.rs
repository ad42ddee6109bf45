use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EventKind;

/// Fixed placement vocabulary used to look up configured point values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "result_key", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResultKey {
    Participant,
    FirstPlace,
    SecondPlace,
    ThirdPlace,
    FourthPlace,
    FifthPlace,
    SixthPlace,
    SeventhPlace,
    EighthPlace,
    Absent,
    Withheld,
}

impl ResultKey {
    pub const ALL: [ResultKey; 11] = [
        ResultKey::Participant,
        ResultKey::FirstPlace,
        ResultKey::SecondPlace,
        ResultKey::ThirdPlace,
        ResultKey::FourthPlace,
        ResultKey::FifthPlace,
        ResultKey::SixthPlace,
        ResultKey::SeventhPlace,
        ResultKey::EighthPlace,
        ResultKey::Absent,
        ResultKey::Withheld,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKey::Participant => "participant",
            ResultKey::FirstPlace => "first_place",
            ResultKey::SecondPlace => "second_place",
            ResultKey::ThirdPlace => "third_place",
            ResultKey::FourthPlace => "fourth_place",
            ResultKey::FifthPlace => "fifth_place",
            ResultKey::SixthPlace => "sixth_place",
            ResultKey::SeventhPlace => "seventh_place",
            ResultKey::EighthPlace => "eighth_place",
            ResultKey::Absent => "absent",
            ResultKey::Withheld => "withheld",
        }
    }

    /// Label shown when no row is configured for this key.
    pub fn default_label(&self) -> &'static str {
        match self {
            ResultKey::Participant => "Participant",
            ResultKey::FirstPlace => "First Place",
            ResultKey::SecondPlace => "Second Place",
            ResultKey::ThirdPlace => "Third Place",
            ResultKey::FourthPlace => "Fourth Place",
            ResultKey::FifthPlace => "Fifth Place",
            ResultKey::SixthPlace => "Sixth Place",
            ResultKey::SeventhPlace => "Seventh Place",
            ResultKey::EighthPlace => "Eighth Place",
            ResultKey::Absent => "Absent",
            ResultKey::Withheld => "Withheld",
        }
    }

    /// Institution-level competitions only award places up to third.
    pub fn allowed_for(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Individual | EventKind::Team => true,
            EventKind::Institution => matches!(
                self,
                ResultKey::Participant
                    | ResultKey::FirstPlace
                    | ResultKey::SecondPlace
                    | ResultKey::ThirdPlace
            ),
        }
    }
}

/// Operator-configured points for one result key within an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultMasterSetting {
    pub setting_id: Uuid,
    pub event_id: Uuid,
    pub result_key: ResultKey,
    pub label: String,
    pub individual_points: Decimal,
    pub team_points: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn institution_events_stop_at_third_place() {
        for key in ResultKey::ALL {
            assert!(key.allowed_for(EventKind::Individual));
            assert!(key.allowed_for(EventKind::Team));
        }
        assert!(ResultKey::Participant.allowed_for(EventKind::Institution));
        assert!(ResultKey::ThirdPlace.allowed_for(EventKind::Institution));
        assert!(!ResultKey::FourthPlace.allowed_for(EventKind::Institution));
        assert!(!ResultKey::Absent.allowed_for(EventKind::Institution));
        assert!(!ResultKey::Withheld.allowed_for(EventKind::Institution));
    }
}
