use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Gender, TransitionCheck};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "participant_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Draft => "draft",
            ParticipantStatus::Submitted => "submitted",
            ParticipantStatus::Approved => "approved",
            ParticipantStatus::Rejected => "rejected",
        }
    }

    /// Institution self-service submit: only a draft may be submitted.
    pub fn check_submit(self) -> TransitionCheck {
        match self {
            ParticipantStatus::Draft => TransitionCheck::Allowed,
            ParticipantStatus::Submitted => TransitionCheck::AlreadyThere,
            _ => TransitionCheck::Invalid,
        }
    }

    /// Staff review: submitted participants may be approved or rejected.
    pub fn check_review(self, target: ParticipantStatus) -> TransitionCheck {
        if self == target {
            return TransitionCheck::AlreadyThere;
        }
        match (self, target) {
            (ParticipantStatus::Submitted, ParticipantStatus::Approved)
            | (ParticipantStatus::Submitted, ParticipantStatus::Rejected) => {
                TransitionCheck::Allowed
            }
            _ => TransitionCheck::Invalid,
        }
    }

    /// Only drafts may be edited or deleted by the owning institution.
    pub fn allows_self_service_edit(self) -> bool {
        matches!(self, ParticipantStatus::Draft)
    }

    /// Event-master assignments may change while the record is not yet reviewed.
    pub fn allows_event_assignment(self) -> bool {
        matches!(self, ParticipantStatus::Draft | ParticipantStatus::Submitted)
    }

    /// Participants in these statuses are eligible to be added to a team.
    pub fn is_team_eligible(self) -> bool {
        matches!(
            self,
            ParticipantStatus::Submitted | ParticipantStatus::Approved
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub institution_id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub photo_path: Option<String>,
    pub status: ParticipantStatus,
    pub chest_number: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_draft() {
        assert_eq!(
            ParticipantStatus::Draft.check_submit(),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ParticipantStatus::Submitted.check_submit(),
            TransitionCheck::AlreadyThere
        );
        assert_eq!(
            ParticipantStatus::Approved.check_submit(),
            TransitionCheck::Invalid
        );
        assert_eq!(
            ParticipantStatus::Rejected.check_submit(),
            TransitionCheck::Invalid
        );
    }

    #[test]
    fn review_only_from_submitted() {
        assert_eq!(
            ParticipantStatus::Submitted.check_review(ParticipantStatus::Approved),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ParticipantStatus::Submitted.check_review(ParticipantStatus::Rejected),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ParticipantStatus::Draft.check_review(ParticipantStatus::Approved),
            TransitionCheck::Invalid
        );
        assert_eq!(
            ParticipantStatus::Rejected.check_review(ParticipantStatus::Approved),
            TransitionCheck::Invalid
        );
    }

    #[test]
    fn review_to_same_status_is_a_noop() {
        assert_eq!(
            ParticipantStatus::Approved.check_review(ParticipantStatus::Approved),
            TransitionCheck::AlreadyThere
        );
    }

    #[test]
    fn team_eligibility() {
        assert!(ParticipantStatus::Submitted.is_team_eligible());
        assert!(ParticipantStatus::Approved.is_team_eligible());
        assert!(!ParticipantStatus::Draft.is_team_eligible());
        assert!(!ParticipantStatus::Rejected.is_team_eligible());
    }
}
