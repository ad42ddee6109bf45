use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use storage::{
    Database,
    dto::reference::{
        CreateAgeCategoryRequest, CreateEventMasterRequest, CreateEventRequest,
        CreateInstitutionRequest,
    },
    models::{AgeCategory, Event, EventMaster, Institution},
    repository::{event::EventRepository, institution::InstitutionRepository},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;

#[utoipa::path(
    get,
    path = "/api/events",
    responses((status = 200, description = "All events", body = [Event])),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> WebResult<impl IntoResponse> {
    let events = EventRepository::new(db.pool()).list().await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}",
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let event = EventRepository::new(db.pool()).find_by_id(event_id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses((status = 201, description = "Event created", body = Event)),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(req): Json<CreateEventRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let event = EventRepository::new(db.pool()).create(&req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/age-categories",
    responses((status = 200, description = "Age categories for the event", body = [AgeCategory])),
    tag = "events"
)]
pub async fn list_age_categories(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let categories = EventRepository::new(db.pool())
        .list_age_categories(event_id)
        .await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/age-categories",
    request_body = CreateAgeCategoryRequest,
    responses((status = 201, description = "Age category created", body = AgeCategory)),
    tag = "events"
)]
pub async fn create_age_category(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<CreateAgeCategoryRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let category = EventRepository::new(db.pool())
        .create_age_category(event_id, &req)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/event-masters",
    responses((status = 200, description = "Competitions within the event", body = [EventMaster])),
    tag = "events"
)]
pub async fn list_event_masters(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let masters = EventRepository::new(db.pool())
        .list_event_masters(event_id)
        .await?;
    Ok(Json(masters))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/event-masters",
    request_body = CreateEventMasterRequest,
    responses(
        (status = 201, description = "Competition created", body = EventMaster),
        (status = 409, description = "Duplicate code within the event")
    ),
    tag = "events"
)]
pub async fn create_event_master(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<CreateEventMasterRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let master = EventRepository::new(db.pool())
        .create_event_master(event_id, &req)
        .await?;
    Ok((StatusCode::CREATED, Json(master)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/institutions",
    responses((status = 200, description = "Institutions registered for the event", body = [Institution])),
    tag = "events"
)]
pub async fn list_institutions(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let institutions = InstitutionRepository::new(db.pool())
        .list_for_event(event_id)
        .await?;
    Ok(Json(institutions))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/institutions",
    request_body = CreateInstitutionRequest,
    responses((status = 201, description = "Institution created", body = Institution)),
    tag = "events"
)]
pub async fn create_institution(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<CreateInstitutionRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let institution = InstitutionRepository::new(db.pool())
        .create(event_id, &req)
        .await?;
    Ok((StatusCode::CREATED, Json(institution)))
}
