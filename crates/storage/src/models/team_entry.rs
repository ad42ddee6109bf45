use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::TransitionCheck;

/// Review lifecycle shared by team entries, institution-event registrations
/// and fund transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Legal review moves: pending <-> approved and pending <-> rejected.
    /// An approved row cannot be rejected directly; it must pass back
    /// through pending first, and the reverse likewise for rejected rows.
    pub fn check_review(self, target: ReviewStatus) -> TransitionCheck {
        if self == target {
            return TransitionCheck::AlreadyThere;
        }
        match (self, target) {
            (ReviewStatus::Pending, _) => TransitionCheck::Allowed,
            (_, ReviewStatus::Pending) => TransitionCheck::Allowed,
            _ => TransitionCheck::Invalid,
        }
    }

    /// Approved rows are protected from deletion.
    pub fn allows_deletion(self) -> bool {
        matches!(self, ReviewStatus::Pending | ReviewStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamEntry {
    pub team_entry_id: Uuid,
    pub institution_id: Uuid,
    pub event_master_id: Uuid,
    pub team_name: String,
    pub status: ReviewStatus,
    pub submitted_at: NaiveDateTime,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamEntryMember {
    pub team_entry_id: Uuid,
    pub participant_id: Uuid,
    pub position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_both_ways() {
        assert_eq!(
            ReviewStatus::Pending.check_review(ReviewStatus::Approved),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ReviewStatus::Pending.check_review(ReviewStatus::Rejected),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ReviewStatus::Approved.check_review(ReviewStatus::Pending),
            TransitionCheck::Allowed
        );
        assert_eq!(
            ReviewStatus::Rejected.check_review(ReviewStatus::Pending),
            TransitionCheck::Allowed
        );
    }

    #[test]
    fn approved_is_sticky_against_rejection() {
        assert_eq!(
            ReviewStatus::Approved.check_review(ReviewStatus::Rejected),
            TransitionCheck::Invalid
        );
        assert_eq!(
            ReviewStatus::Rejected.check_review(ReviewStatus::Approved),
            TransitionCheck::Invalid
        );
    }

    #[test]
    fn same_status_is_a_noop() {
        assert_eq!(
            ReviewStatus::Approved.check_review(ReviewStatus::Approved),
            TransitionCheck::AlreadyThere
        );
    }

    #[test]
    fn deletion_blocked_while_approved() {
        assert!(ReviewStatus::Pending.allows_deletion());
        assert!(ReviewStatus::Rejected.allows_deletion());
        assert!(!ReviewStatus::Approved.allows_deletion());
    }
}
