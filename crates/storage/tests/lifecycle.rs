use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use storage::dto::actor::{Actor, ActorRole};
use storage::dto::reference::{
    CreateAgeCategoryRequest, CreateEventMasterRequest, CreateEventRequest,
    CreateInstitutionRequest,
};
use storage::dto::registration::{
    CreateParticipantRequest, CreateTeamEntryRequest, StaffEditParticipantRequest,
};
use storage::dto::results::RecordResultRequest;
use storage::error::StorageError;
use storage::models::{EventKind, EventMaster, Gender, Participant, ParticipantStatus, ResultKey};
use storage::repository::event::EventRepository;
use storage::repository::institution::InstitutionRepository;
use storage::services::{registration, results};

struct Fixture {
    event_id: Uuid,
    staff: Actor,
    institution: Actor,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let event = EventRepository::new(pool)
        .create(&CreateEventRequest {
            name: "Annual Meet".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            location: "City Arena".to_string(),
        })
        .await
        .unwrap();

    let institution = InstitutionRepository::new(pool)
        .create(
            event.event_id,
            &CreateInstitutionRequest {
                name: "North High".to_string(),
            },
        )
        .await
        .unwrap();

    Fixture {
        event_id: event.event_id,
        staff: Actor {
            user_id: Uuid::new_v4(),
            role: ActorRole::Staff,
            event_id: Some(event.event_id),
            institution_id: None,
        },
        institution: Actor {
            user_id: Uuid::new_v4(),
            role: ActorRole::Institution,
            event_id: None,
            institution_id: Some(institution.institution_id),
        },
    }
}

async fn event_master(pool: &PgPool, event_id: Uuid, kind: EventKind, code: &str) -> EventMaster {
    let repo = EventRepository::new(pool);
    let category = repo
        .create_age_category(
            event_id,
            &CreateAgeCategoryRequest {
                name: format!("U19 {code}"),
                born_on_or_after: None,
                born_on_or_before: None,
            },
        )
        .await
        .unwrap();

    repo.create_event_master(
        event_id,
        &CreateEventMasterRequest {
            age_category_id: category.age_category_id,
            gender: Gender::Open,
            kind,
            fee: Decimal::from(50),
            code: code.to_string(),
            label: format!("Competition {code}"),
        },
    )
    .await
    .unwrap()
}

async fn draft_participant(pool: &PgPool, actor: &Actor, name: &str) -> Participant {
    registration::create_participant(
        pool,
        actor,
        &CreateParticipantRequest {
            name: name.to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(2008, 5, 1).unwrap(),
            photo_path: None,
        },
    )
    .await
    .unwrap()
}

async fn approved_participant(pool: &PgPool, fx: &Fixture, name: &str) -> Participant {
    let participant = draft_participant(pool, &fx.institution, name).await;
    registration::submit_participant(pool, &fx.institution, participant.participant_id)
        .await
        .unwrap();
    registration::review_participant(
        pool,
        &fx.staff,
        participant.participant_id,
        ParticipantStatus::Approved,
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn rejected_team_entry_creation_writes_no_rows(pool: PgPool) {
    let fx = fixture(&pool).await;
    let master = event_master(&pool, fx.event_id, EventKind::Team, "RELAY").await;

    let eligible = draft_participant(&pool, &fx.institution, "Mira").await;
    registration::submit_participant(&pool, &fx.institution, eligible.participant_id)
        .await
        .unwrap();
    // Stays a draft, which disqualifies the whole roster.
    let ineligible = draft_participant(&pool, &fx.institution, "Anil").await;

    let err = registration::create_team_entry(
        &pool,
        &fx.institution,
        &CreateTeamEntryRequest {
            event_master_id: master.event_master_id,
            team_name: "Relay A".to_string(),
            member_ids: vec![eligible.participant_id, ineligible.participant_id],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));

    let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_entries")
        .fetch_one(&pool)
        .await
        .unwrap();
    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_entry_members")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(entries, 0);
    assert_eq!(members, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn recording_a_result_twice_keeps_one_row_with_the_last_verdict(pool: PgPool) {
    let fx = fixture(&pool).await;
    let master = event_master(&pool, fx.event_id, EventKind::Individual, "SPRINT").await;

    let participant = draft_participant(&pool, &fx.institution, "Zara").await;
    registration::assign_event(
        &pool,
        &fx.institution,
        participant.participant_id,
        master.event_master_id,
    )
    .await
    .unwrap();
    registration::submit_participant(&pool, &fx.institution, participant.participant_id)
        .await
        .unwrap();
    registration::review_participant(
        &pool,
        &fx.staff,
        participant.participant_id,
        ParticipantStatus::Approved,
    )
    .await
    .unwrap();

    results::record_result(
        &pool,
        &fx.staff,
        master.event_master_id,
        &RecordResultRequest {
            subject_id: participant.participant_id,
            result_key: ResultKey::SecondPlace,
            score_text: Some("11.2s".to_string()),
        },
    )
    .await
    .unwrap();
    results::record_result(
        &pool,
        &fx.staff,
        master.event_master_id,
        &RecordResultRequest {
            subject_id: participant.participant_id,
            result_key: ResultKey::FirstPlace,
            score_text: Some("10.9s".to_string()),
        },
    )
    .await
    .unwrap();

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM individual_event_results \
         WHERE event_master_id = $1 AND participant_id = $2",
    )
    .bind(master.event_master_id)
    .bind(participant.participant_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    let key: ResultKey = sqlx::query_scalar(
        "SELECT result_key FROM individual_event_results \
         WHERE event_master_id = $1 AND participant_id = $2",
    )
    .bind(master.event_master_id)
    .bind(participant.participant_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(key, ResultKey::FirstPlace);
}

#[sqlx::test(migrations = "./migrations")]
async fn approvals_allocate_unique_numbers_and_never_reissue_freed_ones(pool: PgPool) {
    let fx = fixture(&pool).await;

    let first = approved_participant(&pool, &fx, "Mira").await;
    let second = approved_participant(&pool, &fx, "Anil").await;
    assert_eq!(first.chest_number, Some(1001));
    assert_eq!(second.chest_number, Some(1002));

    // Staff rejection frees 1001, but the gap is never handed out again.
    registration::staff_edit_participant(
        &pool,
        &fx.staff,
        first.participant_id,
        &StaffEditParticipantRequest {
            name: None,
            gender: None,
            date_of_birth: None,
            photo_path: None,
            status: Some(ParticipantStatus::Rejected),
        },
    )
    .await
    .unwrap();

    let third = approved_participant(&pool, &fx, "Zara").await;
    assert_eq!(third.chest_number, Some(1003));
}
