use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use storage::{
    Database,
    dto::{
        reference::UpsertResultSettingRequest,
        results::{
            ParticipantStanding, RecordResultRequest, ResultSheetEntry, SetResultStatusRequest,
            TopParticipantsQuery,
        },
    },
    models::{EventResultStatus, ResultMasterSetting},
    services::results,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{WebError, WebResult};
use crate::middleware::actor::ActorContext;

#[utoipa::path(
    post,
    path = "/api/event-masters/{event_master_id}/results",
    request_body = RecordResultRequest,
    responses(
        (status = 201, description = "Result recorded with a points snapshot"),
        (status = 400, description = "Result key not allowed for this competition kind")
    ),
    tag = "results"
)]
pub async fn record_result(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
    Json(req): Json<RecordResultRequest>,
) -> WebResult<impl IntoResponse> {
    let recorded = results::record_result(db.pool(), &actor, event_master_id, &req).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

#[utoipa::path(
    get,
    path = "/api/event-masters/{event_master_id}/results",
    responses((status = 200, description = "Result sheet for the competition", body = [ResultSheetEntry])),
    tag = "results"
)]
pub async fn get_result_sheet(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let sheet = results::result_sheet(db.pool(), &actor, event_master_id).await?;
    Ok(Json(sheet))
}

#[utoipa::path(
    get,
    path = "/api/event-masters/{event_master_id}/result-status",
    responses((status = 200, description = "Publication status, pending when never set", body = EventResultStatus)),
    tag = "results"
)]
pub async fn get_result_status(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let status = results::result_status(db.pool(), &actor, event_master_id).await?;
    Ok(Json(status))
}

#[utoipa::path(
    put,
    path = "/api/event-masters/{event_master_id}/result-status",
    request_body = SetResultStatusRequest,
    responses((status = 200, description = "Status stored", body = EventResultStatus)),
    tag = "results"
)]
pub async fn set_result_status(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_master_id): Path<Uuid>,
    Json(req): Json<SetResultStatusRequest>,
) -> WebResult<impl IntoResponse> {
    let status = results::set_result_status(db.pool(), &actor, event_master_id, req.label).await?;
    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/top-participants",
    params(TopParticipantsQuery),
    responses((status = 200, description = "Standings ordered by points, then name", body = [ParticipantStanding])),
    tag = "results"
)]
pub async fn top_participants(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
    Query(query): Query<TopParticipantsQuery>,
) -> WebResult<impl IntoResponse> {
    query.validate().map_err(WebError::BadRequest)?;
    let standings = results::top_participants(db.pool(), &actor, event_id, &query).await?;
    Ok(Json(standings))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/result-settings",
    responses((status = 200, description = "Per-event point and label overrides", body = [ResultMasterSetting])),
    tag = "results"
)]
pub async fn list_result_settings(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let settings = results::list_settings(db.pool(), &actor, event_id).await?;
    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/events/{event_id}/result-settings",
    request_body = UpsertResultSettingRequest,
    responses((status = 200, description = "Setting stored", body = ResultMasterSetting)),
    tag = "results"
)]
pub async fn upsert_result_setting(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
    Json(req): Json<UpsertResultSettingRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let setting = results::upsert_setting(db.pool(), &actor, event_id, &req).await?;
    Ok(Json(setting))
}
