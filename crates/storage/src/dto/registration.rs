use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Gender, ParticipantStatus, ReviewStatus};

/// Keeps an explicit JSON null distinguishable from an absent field, so a
/// patch can clear a value instead of only replacing it.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateParticipantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub photo_path: Option<String>,
}

/// Self-service edit, applied only while the participant is a draft.
/// `photo_path` is a tri-state patch: absent keeps the stored path, an
/// explicit null clears it, a string replaces it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_path: Option<Option<String>>,
}

/// Staff review verdict for a submitted participant.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ParticipantReviewRequest {
    pub status: ParticipantStatus,
}

/// Staff-only edit path: may rewrite fields and set any status directly.
/// Approval allocates a chest number; any other target clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StaffEditParticipantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_path: Option<Option<String>>,
    pub status: Option<ParticipantStatus>,
}

/// Resolve a tri-state `photo_path` patch against the stored value: an
/// absent field keeps it, an explicit null clears it, a string replaces it.
pub fn resolve_photo_path<'a>(
    patch: &'a Option<Option<String>>,
    current: &'a Option<String>,
) -> Option<&'a str> {
    match patch {
        None => current.as_deref(),
        Some(value) => value.as_deref(),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignEventRequest {
    pub event_master_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamEntryRequest {
    pub event_master_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub team_name: String,
    #[validate(length(min = 1))]
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInstitutionRegistrationRequest {
    pub event_master_id: Uuid,
}

/// Staff review verdict for team entries, institution registrations and
/// fund transfers. Moving back to pending reopens the row.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub status: ReviewStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_photo_patch_keeps_the_stored_path() {
        let current = Some("photos/a.jpg".to_string());
        assert_eq!(resolve_photo_path(&None, &current), Some("photos/a.jpg"));
        assert_eq!(resolve_photo_path(&None, &None), None);
    }

    #[test]
    fn explicit_null_clears_the_stored_path() {
        let current = Some("photos/a.jpg".to_string());
        assert_eq!(resolve_photo_path(&Some(None), &current), None);
    }

    #[test]
    fn a_new_value_replaces_the_stored_path() {
        let current = Some("photos/a.jpg".to_string());
        assert_eq!(
            resolve_photo_path(&Some(Some("photos/b.jpg".to_string())), &current),
            Some("photos/b.jpg")
        );
    }

    #[test]
    fn tri_state_patch_deserializes_all_three_shapes() {
        let absent: UpdateParticipantRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.photo_path, None);

        let null: UpdateParticipantRequest =
            serde_json::from_str(r#"{"photo_path": null}"#).unwrap();
        assert_eq!(null.photo_path, Some(None));

        let value: UpdateParticipantRequest =
            serde_json::from_str(r#"{"photo_path": "photos/b.jpg"}"#).unwrap();
        assert_eq!(value.photo_path, Some(Some("photos/b.jpg".to_string())));
    }
}
