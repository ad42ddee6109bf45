use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::registration::CreateParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::{Participant, ParticipantEvent, ParticipantStatus};

const PARTICIPANT_COLUMNS: &str = "participant_id, institution_id, event_id, name, gender, \
     date_of_birth, photo_path, status, chest_number, created_at";

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    pub async fn list_for_institution(&self, institution_id: Uuid) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE institution_id = $1 ORDER BY name"
        ))
        .bind(institution_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        status: Option<ParticipantStatus>,
    ) -> Result<Vec<Participant>> {
        let mut query = sqlx::QueryBuilder::new(format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE event_id = "
        ));
        query.push_bind(event_id);
        if let Some(status) = status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        query.push(" ORDER BY name");

        let participants = query
            .build_query_as::<Participant>()
            .fetch_all(self.pool)
            .await?;

        Ok(participants)
    }

    pub async fn create(
        &self,
        institution_id: Uuid,
        event_id: Uuid,
        req: &CreateParticipantRequest,
    ) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants (institution_id, event_id, name, gender, date_of_birth, photo_path)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(institution_id)
        .bind(event_id)
        .bind(&req.name)
        .bind(req.gender)
        .bind(req.date_of_birth)
        .bind(req.photo_path.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(participant)
    }

    /// Delete a draft participant. The status guard has already run; the
    /// predicate here keeps a concurrent submit from racing the delete.
    pub async fn delete_draft(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM participants WHERE participant_id = $1 AND status = 'draft'")
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn list_event_assignments(&self, participant_id: Uuid) -> Result<Vec<ParticipantEvent>> {
        let assignments = sqlx::query_as::<_, ParticipantEvent>(
            r#"
            SELECT participant_event_id, participant_id, event_master_id, fee
            FROM participant_events
            WHERE participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(assignments)
    }
}

/// Transaction-scoped statements used by the registration state machine.
pub async fn fetch_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Participant> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(participant)
}

pub async fn set_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: ParticipantStatus,
    chest_number: Option<i32>,
) -> Result<Participant> {
    let participant = sqlx::query_as::<_, Participant>(&format!(
        r#"
        UPDATE participants
        SET status = $2, chest_number = $3
        WHERE participant_id = $1
        RETURNING {PARTICIPANT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(chest_number)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(participant)
}

pub async fn max_chest_number(conn: &mut PgConnection) -> Result<Option<i32>> {
    let max = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(chest_number) FROM participants")
        .fetch_one(conn)
        .await?;

    Ok(max)
}
