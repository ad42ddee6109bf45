use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::results::{ParticipantStanding, ResultSheetEntry};
use crate::error::Result;
use crate::models::{
    EventResultStatus, Gender, IndividualEventResult, InstitutionEventResult, ResultKey,
    ResultMasterSetting, ResultStatusLabel, TeamEventResult,
};

const RESULT_COLUMNS: &str = "result_id, event_master_id, {subject}, result_key, score_text, \
     points, recorded_at";

pub struct ResultsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_settings(&self, event_id: Uuid) -> Result<Vec<ResultMasterSetting>> {
        let settings = sqlx::query_as::<_, ResultMasterSetting>(
            r#"
            SELECT setting_id, event_id, result_key, label, individual_points, team_points
            FROM result_master_settings
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(settings)
    }

    pub async fn upsert_setting(
        &self,
        event_id: Uuid,
        result_key: ResultKey,
        label: &str,
        individual_points: Decimal,
        team_points: Decimal,
    ) -> Result<ResultMasterSetting> {
        let setting = sqlx::query_as::<_, ResultMasterSetting>(
            r#"
            INSERT INTO result_master_settings (event_id, result_key, label, individual_points, team_points)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (event_id, result_key) DO UPDATE
                SET label = EXCLUDED.label,
                    individual_points = EXCLUDED.individual_points,
                    team_points = EXCLUDED.team_points
            RETURNING setting_id, event_id, result_key, label, individual_points, team_points
            "#,
        )
        .bind(event_id)
        .bind(result_key)
        .bind(label)
        .bind(individual_points)
        .bind(team_points)
        .fetch_one(self.pool)
        .await?;

        Ok(setting)
    }

    /// The status record defaults to pending until a label has been set.
    pub async fn result_status(&self, event_master_id: Uuid) -> Result<EventResultStatus> {
        let status = sqlx::query_as::<_, EventResultStatus>(
            "SELECT event_master_id, label, updated_at FROM event_result_statuses WHERE event_master_id = $1",
        )
        .bind(event_master_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(status.unwrap_or(EventResultStatus {
            event_master_id,
            label: ResultStatusLabel::Pending,
            updated_at: chrono::Utc::now().naive_utc(),
        }))
    }

    /// Unconditional overwrite; any label is reachable from any other.
    pub async fn set_result_status(
        &self,
        event_master_id: Uuid,
        label: ResultStatusLabel,
    ) -> Result<EventResultStatus> {
        let status = sqlx::query_as::<_, EventResultStatus>(
            r#"
            INSERT INTO event_result_statuses (event_master_id, label)
            VALUES ($1, $2)
            ON CONFLICT (event_master_id) DO UPDATE
                SET label = EXCLUDED.label, updated_at = now()
            RETURNING event_master_id, label, updated_at
            "#,
        )
        .bind(event_master_id)
        .bind(label)
        .fetch_one(self.pool)
        .await?;

        Ok(status)
    }

    pub async fn individual_result_sheet(
        &self,
        event_master_id: Uuid,
    ) -> Result<Vec<ResultSheetEntry>> {
        let entries = sqlx::query_as::<_, ResultSheetEntry>(
            r#"
            SELECT r.participant_id AS subject_id, p.name AS subject_name,
                   r.result_key, r.score_text, r.points
            FROM individual_event_results r
            INNER JOIN participants p ON r.participant_id = p.participant_id
            WHERE r.event_master_id = $1
            ORDER BY r.points DESC, p.name
            "#,
        )
        .bind(event_master_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn team_result_sheet(&self, event_master_id: Uuid) -> Result<Vec<ResultSheetEntry>> {
        let entries = sqlx::query_as::<_, ResultSheetEntry>(
            r#"
            SELECT r.team_entry_id AS subject_id, te.team_name AS subject_name,
                   r.result_key, r.score_text, r.points
            FROM team_event_results r
            INNER JOIN team_entries te ON r.team_entry_id = te.team_entry_id
            WHERE r.event_master_id = $1
            ORDER BY r.points DESC, te.team_name
            "#,
        )
        .bind(event_master_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn institution_result_sheet(
        &self,
        event_master_id: Uuid,
    ) -> Result<Vec<ResultSheetEntry>> {
        let entries = sqlx::query_as::<_, ResultSheetEntry>(
            r#"
            SELECT r.institution_id AS subject_id, i.name AS subject_name,
                   r.result_key, r.score_text, r.points
            FROM institution_event_results r
            INNER JOIN institutions i ON r.institution_id = i.institution_id
            WHERE r.event_master_id = $1
            ORDER BY r.points DESC, i.name
            "#,
        )
        .bind(event_master_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Summed individual-point snapshots per participant for the standings
    /// report. Ordering and truncation happen in the service layer.
    pub async fn participant_point_sums(
        &self,
        event_id: Uuid,
        age_category_id: Option<Uuid>,
        gender: Option<Gender>,
    ) -> Result<Vec<ParticipantStanding>> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT p.participant_id, p.name, i.name AS institution_name,
                   p.chest_number, COALESCE(SUM(r.points), 0) AS total_points
            FROM individual_event_results r
            INNER JOIN participants p ON r.participant_id = p.participant_id
            INNER JOIN institutions i ON p.institution_id = i.institution_id
            INNER JOIN event_masters em ON r.event_master_id = em.event_master_id
            WHERE em.event_id =
            "#,
        );
        query.push_bind(event_id);
        if let Some(age_category_id) = age_category_id {
            query.push(" AND em.age_category_id = ");
            query.push_bind(age_category_id);
        }
        if let Some(gender) = gender {
            query.push(" AND p.gender = ");
            query.push_bind(gender);
        }
        query.push(" GROUP BY p.participant_id, p.name, i.name, p.chest_number");

        let standings = query
            .build_query_as::<ParticipantStanding>()
            .fetch_all(self.pool)
            .await?;

        Ok(standings)
    }
}

/// Transaction-scoped upserts: one row per (event master, subject), last
/// write wins.
pub async fn upsert_individual_result(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    participant_id: Uuid,
    result_key: ResultKey,
    score_text: Option<&str>,
    points: Decimal,
) -> Result<IndividualEventResult> {
    let result = sqlx::query_as::<_, IndividualEventResult>(&format!(
        r#"
        INSERT INTO individual_event_results
            (event_master_id, participant_id, result_key, score_text, points)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (event_master_id, participant_id) DO UPDATE
            SET result_key = EXCLUDED.result_key,
                score_text = EXCLUDED.score_text,
                points = EXCLUDED.points,
                recorded_at = now()
        RETURNING {}
        "#,
        RESULT_COLUMNS.replace("{subject}", "participant_id")
    ))
    .bind(event_master_id)
    .bind(participant_id)
    .bind(result_key)
    .bind(score_text)
    .bind(points)
    .fetch_one(conn)
    .await?;

    Ok(result)
}

pub async fn upsert_team_result(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    team_entry_id: Uuid,
    result_key: ResultKey,
    score_text: Option<&str>,
    points: Decimal,
) -> Result<TeamEventResult> {
    let result = sqlx::query_as::<_, TeamEventResult>(&format!(
        r#"
        INSERT INTO team_event_results
            (event_master_id, team_entry_id, result_key, score_text, points)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (event_master_id, team_entry_id) DO UPDATE
            SET result_key = EXCLUDED.result_key,
                score_text = EXCLUDED.score_text,
                points = EXCLUDED.points,
                recorded_at = now()
        RETURNING {}
        "#,
        RESULT_COLUMNS.replace("{subject}", "team_entry_id")
    ))
    .bind(event_master_id)
    .bind(team_entry_id)
    .bind(result_key)
    .bind(score_text)
    .bind(points)
    .fetch_one(conn)
    .await?;

    Ok(result)
}

pub async fn upsert_institution_result(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    institution_id: Uuid,
    result_key: ResultKey,
    score_text: Option<&str>,
    points: Decimal,
) -> Result<InstitutionEventResult> {
    let result = sqlx::query_as::<_, InstitutionEventResult>(&format!(
        r#"
        INSERT INTO institution_event_results
            (event_master_id, institution_id, result_key, score_text, points)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (event_master_id, institution_id) DO UPDATE
            SET result_key = EXCLUDED.result_key,
                score_text = EXCLUDED.score_text,
                points = EXCLUDED.points,
                recorded_at = now()
        RETURNING {}
        "#,
        RESULT_COLUMNS.replace("{subject}", "institution_id")
    ))
    .bind(event_master_id)
    .bind(institution_id)
    .bind(result_key)
    .bind(score_text)
    .bind(points)
    .fetch_one(conn)
    .await?;

    Ok(result)
}
