use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reference::CreateInstitutionRequest;
use crate::error::Result;
use crate::models::Institution;

pub struct InstitutionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InstitutionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Institution>> {
        let institutions = sqlx::query_as::<_, Institution>(
            r#"
            SELECT institution_id, event_id, name, created_at
            FROM institutions
            WHERE event_id = $1
            ORDER BY name
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(institutions)
    }

    pub async fn create(
        &self,
        event_id: Uuid,
        req: &CreateInstitutionRequest,
    ) -> Result<Institution> {
        let institution = sqlx::query_as::<_, Institution>(
            r#"
            INSERT INTO institutions (event_id, name)
            VALUES ($1, $2)
            RETURNING institution_id, event_id, name, created_at
            "#,
        )
        .bind(event_id)
        .bind(&req.name)
        .fetch_one(self.pool)
        .await?;

        Ok(institution)
    }
}
