use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::actor::{Actor, ActorRole};
use crate::dto::results::{
    ParticipantStanding, RecordResultRequest, ResultSheetEntry, TopParticipantsQuery,
};
use crate::error::{Result, StorageError};
use crate::models::{
    EventKind, EventMaster, EventResultStatus, IndividualEventResult, InstitutionEventResult,
    ParticipantStatus, ResultKey, ResultMasterSetting, ResultStatusLabel, ReviewStatus,
    TeamEventResult,
};
use crate::repository::results::{
    self, ResultsRepository,
};

/// Point values configured per event, resolved once at write time. Missing
/// keys fall back to zero points and the key's default label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsPair {
    pub individual: Decimal,
    pub team: Decimal,
}

#[derive(Debug, Default)]
pub struct PointsConfig {
    entries: HashMap<ResultKey, (String, PointsPair)>,
}

impl PointsConfig {
    pub fn from_settings(settings: Vec<ResultMasterSetting>) -> Self {
        let entries = settings
            .into_iter()
            .map(|s| {
                (
                    s.result_key,
                    (
                        s.label,
                        PointsPair {
                            individual: s.individual_points,
                            team: s.team_points,
                        },
                    ),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn points_for(&self, key: ResultKey) -> PointsPair {
        self.entries
            .get(&key)
            .map(|(_, points)| *points)
            .unwrap_or(PointsPair {
                individual: Decimal::ZERO,
                team: Decimal::ZERO,
            })
    }

    pub fn label_for(&self, key: ResultKey) -> &str {
        self.entries
            .get(&key)
            .map(|(label, _)| label.as_str())
            .unwrap_or_else(|| key.default_label())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RecordedResult {
    Individual(IndividualEventResult),
    Team(TeamEventResult),
    Institution(InstitutionEventResult),
}

/// Record a placement outcome for an approved subject. The configured points
/// are snapshotted onto the row; a second write for the same subject
/// overwrites the first.
pub async fn record_result(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
    req: &RecordResultRequest,
) -> Result<RecordedResult> {
    let master = fetch_event_master(pool, event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    if !req.result_key.allowed_for(master.kind) {
        return Err(StorageError::Validation(format!(
            "result key '{}' is not defined for {} events",
            req.result_key.as_str(),
            master.kind.as_str()
        )));
    }

    let repo = ResultsRepository::new(pool);
    let config = PointsConfig::from_settings(repo.list_settings(master.event_id).await?);
    let points = config.points_for(req.result_key);
    let score_text = req.score_text.as_deref();

    let mut tx = pool.begin().await?;

    let recorded = match master.kind {
        EventKind::Individual => {
            ensure_participant_subject(&mut tx, event_master_id, req.subject_id).await?;
            let row = results::upsert_individual_result(
                &mut tx,
                event_master_id,
                req.subject_id,
                req.result_key,
                score_text,
                points.individual,
            )
            .await?;
            RecordedResult::Individual(row)
        }
        EventKind::Team => {
            ensure_team_subject(&mut tx, event_master_id, req.subject_id).await?;
            let row = results::upsert_team_result(
                &mut tx,
                event_master_id,
                req.subject_id,
                req.result_key,
                score_text,
                points.team,
            )
            .await?;
            RecordedResult::Team(row)
        }
        EventKind::Institution => {
            ensure_institution_subject(&mut tx, event_master_id, req.subject_id).await?;
            let row = results::upsert_institution_result(
                &mut tx,
                event_master_id,
                req.subject_id,
                req.result_key,
                score_text,
                points.team,
            )
            .await?;
            RecordedResult::Institution(row)
        }
    };

    tx.commit().await?;

    tracing::info!(
        %event_master_id,
        subject_id = %req.subject_id,
        result_key = req.result_key.as_str(),
        "result recorded"
    );
    Ok(recorded)
}

pub async fn list_settings(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
) -> Result<Vec<ResultMasterSetting>> {
    actor.require_staff_for_event(event_id)?;

    let repo = ResultsRepository::new(pool);
    repo.list_settings(event_id).await
}

/// Operator configuration of the point table. Changes apply to results
/// recorded after this write; existing rows keep their snapshots.
pub async fn upsert_setting(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    req: &crate::dto::reference::UpsertResultSettingRequest,
) -> Result<ResultMasterSetting> {
    actor.require_staff_for_event(event_id)?;

    let label = req
        .label
        .as_deref()
        .unwrap_or_else(|| req.result_key.default_label());

    let repo = ResultsRepository::new(pool);
    repo.upsert_setting(
        event_id,
        req.result_key,
        label,
        req.individual_points,
        req.team_points,
    )
    .await
}

pub async fn set_result_status(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
    label: ResultStatusLabel,
) -> Result<EventResultStatus> {
    let master = fetch_event_master(pool, event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    let repo = ResultsRepository::new(pool);
    repo.set_result_status(event_master_id, label).await
}

pub async fn result_status(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
) -> Result<EventResultStatus> {
    let master = fetch_event_master(pool, event_master_id).await?;
    ensure_event_scope(pool, actor, master.event_id).await?;

    let repo = ResultsRepository::new(pool);
    repo.result_status(event_master_id).await
}

pub async fn result_sheet(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
) -> Result<Vec<ResultSheetEntry>> {
    let master = fetch_event_master(pool, event_master_id).await?;
    ensure_event_scope(pool, actor, master.event_id).await?;

    let repo = ResultsRepository::new(pool);
    match master.kind {
        EventKind::Individual => repo.individual_result_sheet(event_master_id).await,
        EventKind::Team => repo.team_result_sheet(event_master_id).await,
        EventKind::Institution => repo.institution_result_sheet(event_master_id).await,
    }
}

/// Points standings across all individual results in the event, truncated to
/// the requested size. Ordering is deterministic: points descending, then
/// name, then id.
pub async fn top_participants(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    query: &TopParticipantsQuery,
) -> Result<Vec<ParticipantStanding>> {
    ensure_event_scope(pool, actor, event_id).await?;

    let repo = ResultsRepository::new(pool);
    let mut standings = repo
        .participant_point_sums(event_id, query.age_category_id, query.gender)
        .await?;

    order_standings(&mut standings, query.limit as usize);
    Ok(standings)
}

fn order_standings(standings: &mut Vec<ParticipantStanding>, limit: usize) {
    standings.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    standings.truncate(limit);
}

/// Staff see their own event; institution actors see the event their
/// institution belongs to. Everything else reads as absent.
async fn ensure_event_scope(pool: &PgPool, actor: &Actor, event_id: Uuid) -> Result<()> {
    match actor.role {
        ActorRole::Staff => actor.require_staff_for_event(event_id),
        ActorRole::Institution => {
            let institution_id = actor.own_institution()?;
            let own_event = sqlx::query_scalar::<_, Uuid>(
                "SELECT event_id FROM institutions WHERE institution_id = $1",
            )
            .bind(institution_id)
            .fetch_optional(pool)
            .await?
            .ok_or(StorageError::NotFound)?;

            if own_event == event_id {
                Ok(())
            } else {
                Err(StorageError::NotFound)
            }
        }
    }
}

async fn fetch_event_master(pool: &PgPool, id: Uuid) -> Result<EventMaster> {
    let master = sqlx::query_as::<_, EventMaster>(
        "SELECT event_master_id, event_id, age_category_id, gender, kind, fee, code, label \
         FROM event_masters WHERE event_master_id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(master)
}

async fn ensure_participant_subject(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    participant_id: Uuid,
) -> Result<()> {
    let status = sqlx::query_scalar::<_, ParticipantStatus>(
        "SELECT status FROM participants WHERE participant_id = $1",
    )
    .bind(participant_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    if status != ParticipantStatus::Approved {
        return Err(StorageError::Validation(
            "results can only be recorded for approved participants".to_string(),
        ));
    }

    let assigned = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM participant_events WHERE participant_id = $1 AND event_master_id = $2)",
    )
    .bind(participant_id)
    .bind(event_master_id)
    .fetch_one(conn)
    .await?;

    if !assigned {
        return Err(StorageError::Validation(
            "participant is not assigned to this event".to_string(),
        ));
    }

    Ok(())
}

async fn ensure_team_subject(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    team_entry_id: Uuid,
) -> Result<()> {
    let row = sqlx::query_as::<_, (Uuid, ReviewStatus)>(
        "SELECT event_master_id, status FROM team_entries WHERE team_entry_id = $1",
    )
    .bind(team_entry_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    if row.0 != event_master_id {
        return Err(StorageError::NotFound);
    }
    if row.1 != ReviewStatus::Approved {
        return Err(StorageError::Validation(
            "results can only be recorded for approved team entries".to_string(),
        ));
    }

    Ok(())
}

async fn ensure_institution_subject(
    conn: &mut PgConnection,
    event_master_id: Uuid,
    institution_id: Uuid,
) -> Result<()> {
    let status = sqlx::query_scalar::<_, ReviewStatus>(
        "SELECT status FROM institution_event_registrations \
         WHERE institution_id = $1 AND event_master_id = $2",
    )
    .bind(institution_id)
    .bind(event_master_id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    if status != ReviewStatus::Approved {
        return Err(StorageError::Validation(
            "results can only be recorded for approved institution registrations".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(key: ResultKey, individual: i64, team: i64) -> ResultMasterSetting {
        ResultMasterSetting {
            setting_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            result_key: key,
            label: key.default_label().to_string(),
            individual_points: Decimal::from(individual),
            team_points: Decimal::from(team),
        }
    }

    fn standing(name: &str, points: i64) -> ParticipantStanding {
        ParticipantStanding {
            participant_id: Uuid::new_v4(),
            name: name.to_string(),
            institution_name: "North High".to_string(),
            chest_number: None,
            total_points: Decimal::from(points),
        }
    }

    #[test]
    fn configured_keys_resolve_to_their_points() {
        let config = PointsConfig::from_settings(vec![
            setting(ResultKey::FirstPlace, 10, 20),
            setting(ResultKey::SecondPlace, 7, 14),
        ]);

        assert_eq!(
            config.points_for(ResultKey::FirstPlace),
            PointsPair {
                individual: Decimal::from(10),
                team: Decimal::from(20)
            }
        );
    }

    #[test]
    fn unconfigured_keys_fall_back_to_zero_and_default_label() {
        let config = PointsConfig::from_settings(vec![setting(ResultKey::FirstPlace, 10, 20)]);

        assert_eq!(
            config.points_for(ResultKey::Absent),
            PointsPair {
                individual: Decimal::ZERO,
                team: Decimal::ZERO
            }
        );
        assert_eq!(config.label_for(ResultKey::Absent), "Absent");
    }

    #[test]
    fn standings_order_by_points_then_name() {
        let mut standings = vec![
            standing("Mira", 12),
            standing("Anil", 12),
            standing("Zara", 30),
            standing("Kiran", 5),
        ];
        order_standings(&mut standings, 10);

        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zara", "Anil", "Mira", "Kiran"]);
    }

    #[test]
    fn standings_ordering_is_stable_across_runs() {
        let base = vec![
            standing("Anil", 12),
            standing("Mira", 12),
            standing("Zara", 30),
        ];

        let mut first = base.clone();
        let mut second: Vec<ParticipantStanding> = base.into_iter().rev().collect();
        order_standings(&mut first, 10);
        order_standings(&mut second, 10);

        let first_names: Vec<&str> = first.iter().map(|s| s.name.as_str()).collect();
        let second_names: Vec<&str> = second.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(first_names, second_names);
    }

    #[test]
    fn standings_truncate_to_the_requested_limit() {
        let mut standings = vec![standing("A", 3), standing("B", 2), standing("C", 1)];
        order_standings(&mut standings, 2);
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].name, "A");
    }
}
