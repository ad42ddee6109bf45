use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{InstitutionEventRegistration, ReviewStatus};

const REGISTRATION_COLUMNS: &str = "registration_id, institution_id, event_master_id, status, \
     submitted_by, submitted_at, reviewed_by, reviewed_at";

pub struct InstitutionEventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InstitutionEventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<InstitutionEventRegistration> {
        let registration = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM institution_event_registrations WHERE registration_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    pub async fn list_for_institution(
        &self,
        institution_id: Uuid,
    ) -> Result<Vec<InstitutionEventRegistration>> {
        let registrations = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM institution_event_registrations \
             WHERE institution_id = $1 ORDER BY submitted_at"
        ))
        .bind(institution_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn list_for_event_master(
        &self,
        event_master_id: Uuid,
    ) -> Result<Vec<InstitutionEventRegistration>> {
        let registrations = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM institution_event_registrations \
             WHERE event_master_id = $1 ORDER BY submitted_at"
        ))
        .bind(event_master_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    /// Unique per (institution, event_master); a duplicate surfaces as an
    /// integrity violation.
    pub async fn create(
        &self,
        institution_id: Uuid,
        event_master_id: Uuid,
        submitted_by: Uuid,
    ) -> Result<InstitutionEventRegistration> {
        let registration = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
            r#"
            INSERT INTO institution_event_registrations (institution_id, event_master_id, submitted_by)
            VALUES ($1, $2, $3)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(institution_id)
        .bind(event_master_id)
        .bind(submitted_by)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(registration)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM institution_event_registrations WHERE registration_id = $1")
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

pub async fn fetch_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<InstitutionEventRegistration> {
    let registration = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
        "SELECT {REGISTRATION_COLUMNS} FROM institution_event_registrations \
         WHERE registration_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(registration)
}

pub async fn set_review(
    conn: &mut PgConnection,
    id: Uuid,
    status: ReviewStatus,
    reviewed_by: Option<Uuid>,
) -> Result<InstitutionEventRegistration> {
    let registration = sqlx::query_as::<_, InstitutionEventRegistration>(&format!(
        r#"
        UPDATE institution_event_registrations
        SET status = $2,
            reviewed_by = $3,
            reviewed_at = CASE WHEN $3::uuid IS NULL THEN NULL ELSE now() END
        WHERE registration_id = $1
        RETURNING {REGISTRATION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(reviewed_by)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(registration)
}
