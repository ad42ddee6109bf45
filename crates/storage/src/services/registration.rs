use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::actor::{Actor, ActorRole};
use crate::dto::registration::{
    CreateParticipantRequest, CreateTeamEntryRequest, StaffEditParticipantRequest,
    UpdateParticipantRequest, resolve_photo_path,
};
use crate::error::{Result, StorageError};
use crate::models::{
    EventKind, EventMaster, FundTransfer, InstitutionEventRegistration, Participant,
    ParticipantEvent, ParticipantStatus, ReviewStatus, TeamEntry, TeamEntryMember,
    TransitionCheck,
};
use crate::repository::{
    fund_transfer, institution_event, participant, team_entry,
};
use crate::services::chest_numbers;

/// New participants always start as drafts owned by the caller's institution.
pub async fn create_participant(
    pool: &PgPool,
    actor: &Actor,
    req: &CreateParticipantRequest,
) -> Result<Participant> {
    let institution_id = actor.own_institution()?;
    let event_id = fetch_institution_event_id_pool(pool, institution_id).await?;

    let repo = participant::ParticipantRepository::new(pool);
    repo.create(institution_id, event_id, req).await
}

pub async fn get_participant(pool: &PgPool, actor: &Actor, id: Uuid) -> Result<Participant> {
    let repo = participant::ParticipantRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    match actor.role {
        ActorRole::Staff => actor.require_staff_for_event(existing.event_id)?,
        ActorRole::Institution => {
            actor.require_institution(existing.institution_id)?;
        }
    }
    Ok(existing)
}

pub async fn list_own_participants(pool: &PgPool, actor: &Actor) -> Result<Vec<Participant>> {
    let institution_id = actor.own_institution()?;
    let repo = participant::ParticipantRepository::new(pool);
    repo.list_for_institution(institution_id).await
}

pub async fn list_event_participants(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    status: Option<ParticipantStatus>,
) -> Result<Vec<Participant>> {
    actor.require_staff_for_event(event_id)?;
    let repo = participant::ParticipantRepository::new(pool);
    repo.list_for_event(event_id, status).await
}

pub async fn list_event_assignments(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
) -> Result<Vec<ParticipantEvent>> {
    // Reuses the participant scope rules: owners and event staff may look.
    get_participant(pool, actor, participant_id).await?;
    let repo = participant::ParticipantRepository::new(pool);
    repo.list_event_assignments(participant_id).await
}

/// Institution self-service: move a draft participant into review.
pub async fn submit_participant(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
) -> Result<Participant> {
    let mut tx = pool.begin().await?;

    let existing = participant::fetch_for_update(&mut tx, participant_id).await?;
    actor.require_institution(existing.institution_id)?;

    match existing.status.check_submit() {
        TransitionCheck::Allowed => {}
        TransitionCheck::AlreadyThere => return Err(StorageError::AlreadyInTargetState),
        TransitionCheck::Invalid => {
            return Err(StorageError::invalid_transition(
                existing.status.as_str(),
                ParticipantStatus::Submitted.as_str(),
            ));
        }
    }

    let updated =
        participant::set_status(&mut tx, participant_id, ParticipantStatus::Submitted, None)
            .await?;
    tx.commit().await?;

    tracing::info!(%participant_id, "participant submitted for review");
    Ok(updated)
}

/// Staff review of a submitted participant. Approval allocates a chest number
/// inside the same transaction; rejection leaves none assigned.
pub async fn review_participant(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
    target: ParticipantStatus,
) -> Result<Participant> {
    if !matches!(
        target,
        ParticipantStatus::Approved | ParticipantStatus::Rejected
    ) {
        return Err(StorageError::Validation(
            "review target must be approved or rejected".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let existing = participant::fetch_for_update(&mut tx, participant_id).await?;
    actor.require_staff_for_event(existing.event_id)?;

    match existing.status.check_review(target) {
        TransitionCheck::Allowed => {}
        TransitionCheck::AlreadyThere => return Err(StorageError::AlreadyInTargetState),
        TransitionCheck::Invalid => {
            return Err(StorageError::invalid_transition(
                existing.status.as_str(),
                target.as_str(),
            ));
        }
    }

    let chest_number = if target == ParticipantStatus::Approved {
        Some(chest_numbers::allocate(&mut tx, existing.chest_number).await?)
    } else {
        None
    };

    let updated = participant::set_status(&mut tx, participant_id, target, chest_number).await?;
    tx.commit().await?;

    tracing::info!(
        %participant_id,
        status = target.as_str(),
        chest_number,
        "participant reviewed"
    );
    Ok(updated)
}

/// Staff-only edit path: rewrites fields and may set any status directly.
/// Moving to approved allocates a chest number (idempotently); any other
/// target clears it.
pub async fn staff_edit_participant(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
    req: &StaffEditParticipantRequest,
) -> Result<Participant> {
    let mut tx = pool.begin().await?;

    let existing = participant::fetch_for_update(&mut tx, participant_id).await?;
    actor.require_staff_for_event(existing.event_id)?;

    let status = req.status.unwrap_or(existing.status);
    let chest_number = if status == ParticipantStatus::Approved {
        Some(chest_numbers::allocate(&mut tx, existing.chest_number).await?)
    } else {
        None
    };

    let name = req.name.as_ref().unwrap_or(&existing.name);
    let gender = req.gender.unwrap_or(existing.gender);
    let date_of_birth = req.date_of_birth.unwrap_or(existing.date_of_birth);
    let photo_path = resolve_photo_path(&req.photo_path, &existing.photo_path);

    let updated = sqlx::query_as::<_, Participant>(
        r#"
        UPDATE participants
        SET name = $2, gender = $3, date_of_birth = $4, photo_path = $5,
            status = $6, chest_number = $7
        WHERE participant_id = $1
        RETURNING participant_id, institution_id, event_id, name, gender,
                  date_of_birth, photo_path, status, chest_number, created_at
        "#,
    )
    .bind(participant_id)
    .bind(name)
    .bind(gender)
    .bind(date_of_birth)
    .bind(photo_path)
    .bind(status)
    .bind(chest_number)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StorageError::NotFound)?;

    tx.commit().await?;
    Ok(updated)
}

/// Institution self-service edit, legal only while the record is a draft.
pub async fn update_participant(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
    req: &UpdateParticipantRequest,
) -> Result<Participant> {
    let repo = participant::ParticipantRepository::new(pool);
    let existing = repo.find_by_id(participant_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_self_service_edit() {
        return Err(StorageError::invalid_transition(
            existing.status.as_str(),
            "edited",
        ));
    }

    let updated = sqlx::query_as::<_, Participant>(
        r#"
        UPDATE participants
        SET name = $2, gender = $3, date_of_birth = $4, photo_path = $5
        WHERE participant_id = $1 AND status = 'draft'
        RETURNING participant_id, institution_id, event_id, name, gender,
                  date_of_birth, photo_path, status, chest_number, created_at
        "#,
    )
    .bind(participant_id)
    .bind(req.name.as_ref().unwrap_or(&existing.name))
    .bind(req.gender.unwrap_or(existing.gender))
    .bind(req.date_of_birth.unwrap_or(existing.date_of_birth))
    .bind(resolve_photo_path(&req.photo_path, &existing.photo_path))
    .fetch_optional(pool)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(updated)
}

pub async fn delete_participant(pool: &PgPool, actor: &Actor, participant_id: Uuid) -> Result<()> {
    let repo = participant::ParticipantRepository::new(pool);
    let existing = repo.find_by_id(participant_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_self_service_edit() {
        return Err(StorageError::invalid_transition(
            existing.status.as_str(),
            "deleted",
        ));
    }

    repo.delete_draft(participant_id).await
}

/// Assign an individual-type competition to a participant, snapshotting the
/// fee so later event-master edits do not reprice the assignment.
pub async fn assign_event(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
    event_master_id: Uuid,
) -> Result<ParticipantEvent> {
    let repo = participant::ParticipantRepository::new(pool);
    let existing = repo.find_by_id(participant_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_event_assignment() {
        return Err(StorageError::Validation(
            "event assignments are frozen once the participant is reviewed".to_string(),
        ));
    }

    let master = fetch_event_master(pool, event_master_id).await?;
    if master.event_id != existing.event_id {
        return Err(StorageError::NotFound);
    }
    if master.kind != EventKind::Individual {
        return Err(StorageError::Validation(
            "participants can only be assigned to individual events".to_string(),
        ));
    }

    let assignment = sqlx::query_as::<_, ParticipantEvent>(
        r#"
        INSERT INTO participant_events (participant_id, event_master_id, fee)
        VALUES ($1, $2, $3)
        RETURNING participant_event_id, participant_id, event_master_id, fee
        "#,
    )
    .bind(participant_id)
    .bind(event_master_id)
    .bind(master.fee)
    .fetch_one(pool)
    .await
    .map_err(|e| StorageError::from(e).classify())?;

    Ok(assignment)
}

pub async fn unassign_event(
    pool: &PgPool,
    actor: &Actor,
    participant_id: Uuid,
    event_master_id: Uuid,
) -> Result<()> {
    let repo = participant::ParticipantRepository::new(pool);
    let existing = repo.find_by_id(participant_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_event_assignment() {
        return Err(StorageError::Validation(
            "event assignments are frozen once the participant is reviewed".to_string(),
        ));
    }

    let result = sqlx::query(
        "DELETE FROM participant_events WHERE participant_id = $1 AND event_master_id = $2",
    )
    .bind(participant_id)
    .bind(event_master_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound);
    }

    Ok(())
}

/// Compound create: the entry and all member rows are inserted in one
/// transaction, after every member has passed the same-institution and
/// status checks. A single failing member aborts the whole creation with
/// nothing written.
pub async fn create_team_entry(
    pool: &PgPool,
    actor: &Actor,
    req: &CreateTeamEntryRequest,
) -> Result<(TeamEntry, Vec<TeamEntryMember>)> {
    let institution_id = actor.own_institution()?;

    let mut tx = pool.begin().await?;

    let institution_event_id = fetch_institution_event_id(&mut tx, institution_id).await?;
    let master = fetch_event_master_tx(&mut tx, req.event_master_id).await?;
    if master.event_id != institution_event_id {
        return Err(StorageError::NotFound);
    }
    if master.kind != EventKind::Team {
        return Err(StorageError::Validation(
            "team entries require a team-type event".to_string(),
        ));
    }

    // Validate the full roster before writing anything.
    for member_id in &req.member_ids {
        let member = fetch_participant_tx(&mut tx, *member_id).await?;
        if member.institution_id != institution_id {
            return Err(StorageError::Validation(format!(
                "participant {member_id} belongs to another institution"
            )));
        }
        if !member.status.is_team_eligible() {
            return Err(StorageError::Validation(format!(
                "participant {member_id} is not submitted or approved"
            )));
        }
    }

    let entry = team_entry::insert_entry(
        &mut tx,
        institution_id,
        req.event_master_id,
        &req.team_name,
    )
    .await?;

    let mut members = Vec::with_capacity(req.member_ids.len());
    for (position, member_id) in req.member_ids.iter().enumerate() {
        team_entry::insert_member(&mut tx, entry.team_entry_id, *member_id, position as i32)
            .await
            .map_err(StorageError::classify)?;
        members.push(TeamEntryMember {
            team_entry_id: entry.team_entry_id,
            participant_id: *member_id,
            position: position as i32,
        });
    }

    tx.commit().await?;

    tracing::info!(team_entry_id = %entry.team_entry_id, members = members.len(), "team entry created");
    Ok((entry, members))
}

pub async fn get_team_entry(
    pool: &PgPool,
    actor: &Actor,
    team_entry_id: Uuid,
) -> Result<(TeamEntry, Vec<TeamEntryMember>)> {
    let repo = team_entry::TeamEntryRepository::new(pool);
    let entry = repo.find_by_id(team_entry_id).await?;

    match actor.role {
        ActorRole::Staff => {
            let master = fetch_event_master(pool, entry.event_master_id).await?;
            actor.require_staff_for_event(master.event_id)?;
        }
        ActorRole::Institution => {
            actor.require_institution(entry.institution_id)?;
        }
    }

    let members = repo.list_members(team_entry_id).await?;
    Ok((entry, members))
}

pub async fn list_own_team_entries(pool: &PgPool, actor: &Actor) -> Result<Vec<TeamEntry>> {
    let institution_id = actor.own_institution()?;
    let repo = team_entry::TeamEntryRepository::new(pool);
    repo.list_for_institution(institution_id).await
}

pub async fn list_team_entries_for_event_master(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
) -> Result<Vec<TeamEntry>> {
    let master = fetch_event_master(pool, event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    let repo = team_entry::TeamEntryRepository::new(pool);
    repo.list_for_event_master(event_master_id).await
}

pub async fn review_team_entry(
    pool: &PgPool,
    actor: &Actor,
    team_entry_id: Uuid,
    target: ReviewStatus,
) -> Result<TeamEntry> {
    let mut tx = pool.begin().await?;

    let existing = team_entry::fetch_for_update(&mut tx, team_entry_id).await?;
    let master = fetch_event_master_tx(&mut tx, existing.event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    check_review(existing.status, target)?;

    let reviewer = reviewer_stamp(actor, target);
    let updated = team_entry::set_review(&mut tx, team_entry_id, target, reviewer).await?;
    tx.commit().await?;

    Ok(updated)
}

pub async fn delete_team_entry(pool: &PgPool, actor: &Actor, team_entry_id: Uuid) -> Result<()> {
    let repo = team_entry::TeamEntryRepository::new(pool);
    let existing = repo.find_by_id(team_entry_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_deletion() {
        return Err(StorageError::invalid_transition(
            existing.status.as_str(),
            "deleted",
        ));
    }

    repo.delete(team_entry_id).await
}

/// Register the whole institution into an institution-type competition.
pub async fn register_institution_event(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
) -> Result<InstitutionEventRegistration> {
    let institution_id = actor.own_institution()?;

    let institution_event_id = fetch_institution_event_id_pool(pool, institution_id).await?;
    let master = fetch_event_master(pool, event_master_id).await?;
    if master.event_id != institution_event_id {
        return Err(StorageError::NotFound);
    }
    if master.kind != EventKind::Institution {
        return Err(StorageError::Validation(
            "institution registrations require an institution-type event".to_string(),
        ));
    }

    let repo = institution_event::InstitutionEventRepository::new(pool);
    repo.create(institution_id, event_master_id, actor.user_id)
        .await
}

pub async fn list_own_registrations(
    pool: &PgPool,
    actor: &Actor,
) -> Result<Vec<InstitutionEventRegistration>> {
    let institution_id = actor.own_institution()?;
    let repo = institution_event::InstitutionEventRepository::new(pool);
    repo.list_for_institution(institution_id).await
}

pub async fn list_registrations_for_event_master(
    pool: &PgPool,
    actor: &Actor,
    event_master_id: Uuid,
) -> Result<Vec<InstitutionEventRegistration>> {
    let master = fetch_event_master(pool, event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    let repo = institution_event::InstitutionEventRepository::new(pool);
    repo.list_for_event_master(event_master_id).await
}

pub async fn review_institution_registration(
    pool: &PgPool,
    actor: &Actor,
    registration_id: Uuid,
    target: ReviewStatus,
) -> Result<InstitutionEventRegistration> {
    let mut tx = pool.begin().await?;

    let existing = institution_event::fetch_for_update(&mut tx, registration_id).await?;
    let master = fetch_event_master_tx(&mut tx, existing.event_master_id).await?;
    actor.require_staff_for_event(master.event_id)?;

    check_review(existing.status, target)?;

    let reviewer = reviewer_stamp(actor, target);
    let updated =
        institution_event::set_review(&mut tx, registration_id, target, reviewer).await?;
    tx.commit().await?;

    Ok(updated)
}

pub async fn delete_institution_registration(
    pool: &PgPool,
    actor: &Actor,
    registration_id: Uuid,
) -> Result<()> {
    let repo = institution_event::InstitutionEventRepository::new(pool);
    let existing = repo.find_by_id(registration_id).await?;
    actor.require_institution(existing.institution_id)?;

    if !existing.status.allows_deletion() {
        return Err(StorageError::invalid_transition(
            existing.status.as_str(),
            "deleted",
        ));
    }

    repo.delete(registration_id).await
}

pub async fn review_fund_transfer(
    pool: &PgPool,
    actor: &Actor,
    fund_transfer_id: Uuid,
    target: ReviewStatus,
    remarks: Option<&str>,
) -> Result<FundTransfer> {
    let mut tx = pool.begin().await?;

    let existing = fund_transfer::fetch_for_update(&mut tx, fund_transfer_id).await?;
    actor.require_staff_for_event(existing.event_id)?;

    check_review(existing.status, target)?;

    let reviewer = reviewer_stamp(actor, target);
    let updated =
        fund_transfer::set_review(&mut tx, fund_transfer_id, target, reviewer, remarks).await?;
    tx.commit().await?;

    Ok(updated)
}

fn check_review(from: ReviewStatus, to: ReviewStatus) -> Result<()> {
    match from.check_review(to) {
        TransitionCheck::Allowed => Ok(()),
        TransitionCheck::AlreadyThere => Err(StorageError::AlreadyInTargetState),
        TransitionCheck::Invalid => Err(StorageError::invalid_transition(
            from.as_str(),
            to.as_str(),
        )),
    }
}

/// Moving back to pending clears the reviewer attribution; approve and reject
/// stamp the acting staff member.
fn reviewer_stamp(actor: &Actor, target: ReviewStatus) -> Option<Uuid> {
    match target {
        ReviewStatus::Pending => None,
        ReviewStatus::Approved | ReviewStatus::Rejected => Some(actor.user_id),
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

async fn fetch_event_master_tx(conn: &mut PgConnection, id: Uuid) -> Result<EventMaster> {
    let master = sqlx::query_as::<_, EventMaster>(
        "SELECT event_master_id, event_id, age_category_id, gender, kind, fee, code, label \
         FROM event_masters WHERE event_master_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(master)
}

async fn fetch_participant_tx(conn: &mut PgConnection, id: Uuid) -> Result<Participant> {
    let row = sqlx::query_as::<_, Participant>(
        "SELECT participant_id, institution_id, event_id, name, gender, date_of_birth, \
         photo_path, status, chest_number, created_at \
         FROM participants WHERE participant_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(row)
}

async fn fetch_institution_event_id(conn: &mut PgConnection, id: Uuid) -> Result<Uuid> {
    let event_id =
        sqlx::query_scalar::<_, Uuid>("SELECT event_id FROM institutions WHERE institution_id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or(StorageError::NotFound)?;

    Ok(event_id)
}

async fn fetch_institution_event_id_pool(pool: &PgPool, id: Uuid) -> Result<Uuid> {
    let event_id =
        sqlx::query_scalar::<_, Uuid>("SELECT event_id FROM institutions WHERE institution_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(StorageError::NotFound)?;

    Ok(event_id)
}
