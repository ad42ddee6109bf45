use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{TeamEntry, TeamEntryMember};

const TEAM_ENTRY_COLUMNS: &str = "team_entry_id, institution_id, event_master_id, team_name, \
     status, submitted_at, reviewed_by, reviewed_at";

pub struct TeamEntryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamEntryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TeamEntry> {
        let entry = sqlx::query_as::<_, TeamEntry>(&format!(
            "SELECT {TEAM_ENTRY_COLUMNS} FROM team_entries WHERE team_entry_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }

    pub async fn list_for_institution(&self, institution_id: Uuid) -> Result<Vec<TeamEntry>> {
        let entries = sqlx::query_as::<_, TeamEntry>(&format!(
            "SELECT {TEAM_ENTRY_COLUMNS} FROM team_entries WHERE institution_id = $1 ORDER BY submitted_at"
        ))
        .bind(institution_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_for_event_master(&self, event_master_id: Uuid) -> Result<Vec<TeamEntry>> {
        let entries = sqlx::query_as::<_, TeamEntry>(&format!(
            "SELECT {TEAM_ENTRY_COLUMNS} FROM team_entries WHERE event_master_id = $1 ORDER BY submitted_at"
        ))
        .bind(event_master_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_members(&self, team_entry_id: Uuid) -> Result<Vec<TeamEntryMember>> {
        let members = sqlx::query_as::<_, TeamEntryMember>(
            r#"
            SELECT team_entry_id, participant_id, position
            FROM team_entry_members
            WHERE team_entry_id = $1
            ORDER BY position
            "#,
        )
        .bind(team_entry_id)
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM team_entries WHERE team_entry_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Transaction-scoped statements used by the compound create and the review
/// state machine.
pub async fn insert_entry(
    conn: &mut PgConnection,
    institution_id: Uuid,
    event_master_id: Uuid,
    team_name: &str,
) -> Result<TeamEntry> {
    let entry = sqlx::query_as::<_, TeamEntry>(&format!(
        r#"
        INSERT INTO team_entries (institution_id, event_master_id, team_name)
        VALUES ($1, $2, $3)
        RETURNING {TEAM_ENTRY_COLUMNS}
        "#
    ))
    .bind(institution_id)
    .bind(event_master_id)
    .bind(team_name)
    .fetch_one(conn)
    .await?;

    Ok(entry)
}

pub async fn insert_member(
    conn: &mut PgConnection,
    team_entry_id: Uuid,
    participant_id: Uuid,
    position: i32,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO team_entry_members (team_entry_id, participant_id, position) VALUES ($1, $2, $3)",
    )
    .bind(team_entry_id)
    .bind(participant_id)
    .bind(position)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn fetch_for_update(conn: &mut PgConnection, id: Uuid) -> Result<TeamEntry> {
    let entry = sqlx::query_as::<_, TeamEntry>(&format!(
        "SELECT {TEAM_ENTRY_COLUMNS} FROM team_entries WHERE team_entry_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(entry)
}

pub async fn set_review(
    conn: &mut PgConnection,
    id: Uuid,
    status: crate::models::ReviewStatus,
    reviewed_by: Option<Uuid>,
) -> Result<TeamEntry> {
    let entry = sqlx::query_as::<_, TeamEntry>(&format!(
        r#"
        UPDATE team_entries
        SET status = $2,
            reviewed_by = $3,
            reviewed_at = CASE WHEN $3::uuid IS NULL THEN NULL ELSE now() END
        WHERE team_entry_id = $1
        RETURNING {TEAM_ENTRY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(reviewed_by)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(entry)
}
