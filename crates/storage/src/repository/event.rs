use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reference::{
    CreateAgeCategoryRequest, CreateEventMasterRequest, CreateEventRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{AgeCategory, Event, EventMaster};

const EVENT_COLUMNS: &str = "event_id, name, start_date, end_date, location, created_at";
const EVENT_MASTER_COLUMNS: &str =
    "event_master_id, event_id, age_category_id, gender, kind, fee, code, label";

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (name, start_date, end_date, location)
            VALUES ($1, $2, $3, $4)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(&req.location)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn list_age_categories(&self, event_id: Uuid) -> Result<Vec<AgeCategory>> {
        let categories = sqlx::query_as::<_, AgeCategory>(
            r#"
            SELECT age_category_id, event_id, name, born_on_or_after, born_on_or_before
            FROM age_categories
            WHERE event_id = $1
            ORDER BY name
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create_age_category(
        &self,
        event_id: Uuid,
        req: &CreateAgeCategoryRequest,
    ) -> Result<AgeCategory> {
        let category = sqlx::query_as::<_, AgeCategory>(
            r#"
            INSERT INTO age_categories (event_id, name, born_on_or_after, born_on_or_before)
            VALUES ($1, $2, $3, $4)
            RETURNING age_category_id, event_id, name, born_on_or_after, born_on_or_before
            "#,
        )
        .bind(event_id)
        .bind(&req.name)
        .bind(req.born_on_or_after)
        .bind(req.born_on_or_before)
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list_event_masters(&self, event_id: Uuid) -> Result<Vec<EventMaster>> {
        let masters = sqlx::query_as::<_, EventMaster>(&format!(
            "SELECT {EVENT_MASTER_COLUMNS} FROM event_masters WHERE event_id = $1 ORDER BY code"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(masters)
    }

    pub async fn find_event_master(&self, id: Uuid) -> Result<EventMaster> {
        let master = sqlx::query_as::<_, EventMaster>(&format!(
            "SELECT {EVENT_MASTER_COLUMNS} FROM event_masters WHERE event_master_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(master)
    }

    pub async fn create_event_master(
        &self,
        event_id: Uuid,
        req: &CreateEventMasterRequest,
    ) -> Result<EventMaster> {
        let master = sqlx::query_as::<_, EventMaster>(&format!(
            r#"
            INSERT INTO event_masters (event_id, age_category_id, gender, kind, fee, code, label)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVENT_MASTER_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(req.age_category_id)
        .bind(req.gender)
        .bind(req.kind)
        .bind(req.fee)
        .bind(&req.code)
        .bind(&req.label)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())?;

        Ok(master)
    }
}
