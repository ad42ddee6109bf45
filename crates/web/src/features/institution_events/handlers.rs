use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use storage::{
    Database,
    dto::registration::{CreateInstitutionRegistrationRequest, ReviewRequest},
    models::InstitutionEventRegistration,
    services::registration,
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::middleware::actor::ActorContext;

#[utoipa::path(
    post,
    path = "/api/institution-registrations",
    request_body = CreateInstitutionRegistrationRequest,
    responses(
        (status = 201, description = "Institution registered for the competition", body = InstitutionEventRegistration),
        (status = 409, description = "Already registered")
    ),
    tag = "institution-events"
)]
pub async fn create_registration(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Json(req): Json<CreateInstitutionRegistrationRequest>,
) -> WebResult<impl IntoResponse> {
    let registration =
        registration::register_institution_event(db.pool(), &actor, req.event_master_id).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/institution-registrations",
    responses((status = 200, description = "Registrations of the caller's institution", body = [InstitutionEventRegistration])),
    tag = "institution-events"
)]
pub async fn list_own_registrations(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
) -> WebResult<impl IntoResponse> {
    let registrations = registration::list_own_registrations(db.pool(), &actor).await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    delete,
    path = "/api/institution-registrations/{registration_id}",
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 409, description = "Approved registrations cannot be deleted")
    ),
    tag = "institution-events"
)]
pub async fn delete_registration(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(registration_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    registration::delete_institution_registration(db.pool(), &actor, registration_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/institution-registrations/{registration_id}/review",
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review applied", body = InstitutionEventRegistration),
        (status = 409, description = "Illegal review transition")
    ),
    tag = "institution-events"
)]
pub async fn review_registration(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(registration_id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> WebResult<impl IntoResponse> {
    let registration =
        registration::review_institution_registration(db.pool(), &actor, registration_id, req.status)
            .await?;
    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/event-masters/{event_master_id}/institution-registrations",
    responses((status = 200, description = "Registrations submitted for the competition", body = [InstitutionEventRegistration])),
    tag = "institution-events"
)]
pub async fn list_event_master_registrations(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let registrations =
        registration::list_registrations_for_event_master(db.pool(), &actor, event_master_id)
            .await?;
    Ok(Json(registrations))
}
