use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use storage::{
    Database,
    dto::registration::{CreateTeamEntryRequest, ReviewRequest},
    models::{TeamEntry, TeamEntryMember},
    services::registration,
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;
use crate::middleware::actor::ActorContext;

#[derive(Debug, Serialize, ToSchema)]
pub struct TeamEntryResponse {
    #[serde(flatten)]
    pub entry: TeamEntry,
    pub members: Vec<TeamEntryMember>,
}

#[utoipa::path(
    post,
    path = "/api/team-entries",
    request_body = CreateTeamEntryRequest,
    responses(
        (status = 201, description = "Team entry and all members created atomically", body = TeamEntryResponse),
        (status = 400, description = "A member failed the institution or status check")
    ),
    tag = "teams"
)]
pub async fn create_team_entry(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Json(req): Json<CreateTeamEntryRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let (entry, members) = registration::create_team_entry(db.pool(), &actor, &req).await?;
    Ok((StatusCode::CREATED, Json(TeamEntryResponse { entry, members })))
}

#[utoipa::path(
    get,
    path = "/api/team-entries",
    responses((status = 200, description = "Team entries of the caller's institution", body = [TeamEntry])),
    tag = "teams"
)]
pub async fn list_own_team_entries(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
) -> WebResult<impl IntoResponse> {
    let entries = registration::list_own_team_entries(db.pool(), &actor).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/team-entries/{team_entry_id}",
    responses(
        (status = 200, description = "Team entry with its roster", body = TeamEntryResponse),
        (status = 404, description = "Entry absent or out of scope")
    ),
    tag = "teams"
)]
pub async fn get_team_entry(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(team_entry_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let (entry, members) = registration::get_team_entry(db.pool(), &actor, team_entry_id).await?;
    Ok(Json(TeamEntryResponse { entry, members }))
}

#[utoipa::path(
    delete,
    path = "/api/team-entries/{team_entry_id}",
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 409, description = "Approved entries cannot be deleted")
    ),
    tag = "teams"
)]
pub async fn delete_team_entry(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(team_entry_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    registration::delete_team_entry(db.pool(), &actor, team_entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/team-entries/{team_entry_id}/review",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review applied", body = TeamEntry),
        (status = 409, description = "Illegal review transition")
    ),
    tag = "teams"
)]
pub async fn review_team_entry(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(team_entry_id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> WebResult<impl IntoResponse> {
    let entry =
        registration::review_team_entry(db.pool(), &actor, team_entry_id, req.status).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    get,
    path = "/api/event-masters/{event_master_id}/team-entries",
    responses((status = 200, description = "Entries submitted for the competition", body = [TeamEntry])),
    tag = "teams"
)]
pub async fn list_event_master_team_entries(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let entries =
        registration::list_team_entries_for_event_master(db.pool(), &actor, event_master_id)
            .await?;
    Ok(Json(entries))
}
