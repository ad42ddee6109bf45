use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use storage::{
    Database,
    dto::finance::{CreateFundTransferRequest, FeeBreakdown, ReviewFundTransferRequest},
    models::{FundTransfer, ReviewStatus},
    services::{finance, registration},
};
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;
use crate::middleware::actor::ActorContext;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FundTransferListQuery {
    pub status: Option<ReviewStatus>,
}

#[utoipa::path(
    post,
    path = "/api/fund-transfers",
    request_body = CreateFundTransferRequest,
    responses((status = 201, description = "Transfer recorded as pending", body = FundTransfer)),
    tag = "finance"
)]
pub async fn create_fund_transfer(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Json(req): Json<CreateFundTransferRequest>,
) -> WebResult<impl IntoResponse> {
    req.validate()?;
    let transfer = finance::submit_fund_transfer(db.pool(), &actor, &req).await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

#[utoipa::path(
    get,
    path = "/api/fund-transfers",
    responses((status = 200, description = "Transfers of the caller's institution", body = [FundTransfer])),
    tag = "finance"
)]
pub async fn list_own_fund_transfers(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
) -> WebResult<impl IntoResponse> {
    let transfers = finance::list_own_fund_transfers(db.pool(), &actor).await?;
    Ok(Json(transfers))
}

#[utoipa::path(
    post,
    path = "/api/fund-transfers/{fund_transfer_id}/review",
    request_body = ReviewFundTransferRequest,
    responses(
        (status = 200, description = "Verdict applied", body = FundTransfer),
        (status = 409, description = "Illegal review transition")
    ),
    tag = "finance"
)]
pub async fn review_fund_transfer(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(fund_transfer_id): Path<Uuid>,
    Json(req): Json<ReviewFundTransferRequest>,
) -> WebResult<impl IntoResponse> {
    let transfer = registration::review_fund_transfer(
        db.pool(),
        &actor,
        fund_transfer_id,
        req.status,
        req.remarks.as_deref(),
    )
    .await?;
    Ok(Json(transfer))
}

#[utoipa::path(
    get,
    path = "/api/finance/summary",
    responses((status = 200, description = "Fee breakdown for the caller's institution", body = FeeBreakdown)),
    tag = "finance"
)]
pub async fn own_finance_summary(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
) -> WebResult<impl IntoResponse> {
    let breakdown = finance::own_fee_breakdown(db.pool(), &actor).await?;
    Ok(Json(breakdown))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/fund-transfers",
    params(FundTransferListQuery),
    responses((status = 200, description = "Transfers across the event, optionally filtered by status", body = [FundTransfer])),
    tag = "finance"
)]
pub async fn list_event_fund_transfers(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
    Query(query): Query<FundTransferListQuery>,
) -> WebResult<impl IntoResponse> {
    let transfers =
        finance::list_event_fund_transfers(db.pool(), &actor, event_id, query.status).await?;
    Ok(Json(transfers))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/finance",
    responses((status = 200, description = "Event-wide fee breakdown", body = FeeBreakdown)),
    tag = "finance"
)]
pub async fn event_finance_summary(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path(event_id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let breakdown = finance::event_fee_breakdown(db.pool(), &actor, event_id).await?;
    Ok(Json(breakdown))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/institutions/{institution_id}/finance",
    responses((status = 200, description = "Fee breakdown for one institution", body = FeeBreakdown)),
    tag = "finance"
)]
pub async fn institution_finance_summary(
    State(db): State<Database>,
    ActorContext(actor): ActorContext,
    Path((event_id, institution_id)): Path<(Uuid, Uuid)>,
) -> WebResult<impl IntoResponse> {
    let breakdown =
        finance::institution_fee_breakdown_for_staff(db.pool(), &actor, event_id, institution_id)
            .await?;
    Ok(Json(breakdown))
}
