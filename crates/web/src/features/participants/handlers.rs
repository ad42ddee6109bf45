use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use storage::{
    Database,
    dto::registration::{
        AssignEventRequest, CreateParticipantRequest, ParticipantReviewRequest,
        StaffEditParticipantRequest, UpdateParticipantRequest,
    },
    models::{Participant, ParticipantEvent, ParticipantStatus},
    services::registration,
};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;
use crate::middleware::actor::ActorContext;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ParticipantListQuery {
    pub status: Option<ParticipantStatus>,
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    responses((status = 201, description = "Draft participant created", body = Participant)),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Json(req): Json<CreateParticipantRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let participant = registration::create_participant(db.pool(), &actor, &req).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

#[utoipa::path(
    get,
    path = "/api/participants",
    responses((status = 200, description = "Participants of the caller's institution", body = [Participant])),
    tag = "participants"
)]
pub async fn list_own_participants(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
) -> WebResult<impl IntoResponse> {
    let participants = registration::list_own_participants(db.pool(), &actor).await?;
    Ok(Json(participants))
}

#[utoipa::path(
    get,
    path = "/api/participants/{participant_id}",
    responses(
        (status = 200, description = "Participant found", body = Participant),
        (status = 404, description = "Participant absent or out of scope")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let participant = registration::get_participant(db.pool(), &actor, participant_id).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    put,
    path = "/api/participants/{participant_id}",
    request_body = UpdateParticipantRequest,
    responses(
        (status = 200, description = "Draft updated", body = Participant),
        (status = 409, description = "Participant is no longer a draft")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
    Json(req): Json<UpdateParticipantRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let participant =
        registration::update_participant(db.pool(), &actor, participant_id, &req).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    delete,
    path = "/api/participants/{participant_id}",
    responses(
        (status = 204, description = "Draft deleted"),
        (status = 409, description = "Participant is no longer a draft")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    registration::delete_participant(db.pool(), &actor, participant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/participants/{participant_id}/submit",
    responses(
        (status = 200, description = "Participant submitted for review", body = Participant),
        (status = 409, description = "Not a draft, or already submitted")
    ),
    tag = "participants"
)]
pub async fn submit_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let participant = registration::submit_participant(db.pool(), &actor, participant_id).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    post,
    path = "/api/participants/{participant_id}/review",
    request_body = ParticipantReviewRequest,
    responses(
        (status = 200, description = "Verdict applied; approval carries the chest number", body = Participant),
        (status = 409, description = "Participant is not awaiting review")
    ),
    tag = "participants"
)]
pub async fn review_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
    Json(req): Json<ParticipantReviewRequest>,
) -> WebResult<impl IntoResponse> {
    let participant =
        registration::review_participant(db.pool(), &actor, participant_id, req.status).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    put,
    path = "/api/participants/{participant_id}/staff-edit",
    request_body = StaffEditParticipantRequest,
    responses((status = 200, description = "Participant rewritten", body = Participant)),
    tag = "participants"
)]
pub async fn staff_edit_participant(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
    Json(req): Json<StaffEditParticipantRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let participant =
        registration::staff_edit_participant(db.pool(), &actor, participant_id, &req).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    get,
    path = "/api/participants/{participant_id}/events",
    responses((status = 200, description = "Event assignments with fee snapshots", body = [ParticipantEvent])),
    tag = "participants"
)]
pub async fn list_participant_events(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let assignments =
        registration::list_event_assignments(db.pool(), &actor, participant_id).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    post,
    path = "/api/participants/{participant_id}/events",
    request_body = AssignEventRequest,
    responses(
        (status = 201, description = "Assignment created with fee snapshot", body = ParticipantEvent),
        (status = 409, description = "Already assigned")
    ),
    tag = "participants"
)]
pub async fn assign_event(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(participant_id): Path<Uuid>,
    Json(req): Json<AssignEventRequest>,
) -> WebResult<impl IntoResponse> {
    let assignment =
        registration::assign_event(db.pool(), &actor, participant_id, req.event_master_id).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    delete,
    path = "/api/participants/{participant_id}/events/{event_master_id}",
    responses((status = 204, description = "Assignment removed")),
    tag = "participants"
)]
pub async fn unassign_event(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path((participant_id, event_master_id)): Path<(Uuid, Uuid)>,
) -> WebResult<impl IntoResponse> {
    registration::unassign_event(db.pool(), &actor, participant_id, event_master_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/participants",
    params(ParticipantListQuery),
    responses((status = 200, description = "Participants in the event, optionally filtered by status", body = [Participant])),
    tag = "participants"
)]
pub async fn list_event_participants(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ParticipantListQuery>,
) -> WebResult<impl IntoResponse> {
    let participants =
        registration::list_event_participants(db.pool(), &actor, event_id, query.status).await?;
    Ok(Json(participants))
}
