use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::actor::Actor;
use crate::dto::finance::{CreateFundTransferRequest, FeeBreakdown, FinanceScope};
use crate::error::{Result, StorageError};
use crate::models::{FundTransfer, ReviewStatus};
use crate::repository::finance::FinanceRepository;
use crate::repository::fund_transfer::FundTransferRepository;

/// Staff dashboard: liabilities and remittances summed across every
/// institution in the event.
pub async fn event_fee_breakdown(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
) -> Result<FeeBreakdown> {
    actor.require_staff_for_event(event_id)?;

    let repo = FinanceRepository::new(pool);
    repo.fee_breakdown(FinanceScope::event(event_id)).await
}

/// Staff view of a single institution's position within the event.
pub async fn institution_fee_breakdown_for_staff(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    institution_id: Uuid,
) -> Result<FeeBreakdown> {
    actor.require_staff_for_event(event_id)?;

    let repo = FinanceRepository::new(pool);
    repo.fee_breakdown(FinanceScope::institution(event_id, institution_id))
        .await
}

/// Institution-facing dashboard and receipt figures. An institution with no
/// registrations yet gets an all-zero breakdown, not an error.
pub async fn own_fee_breakdown(pool: &PgPool, actor: &Actor) -> Result<FeeBreakdown> {
    let institution_id = actor.own_institution()?;

    let event_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT event_id FROM institutions WHERE institution_id = $1",
    )
    .bind(institution_id)
    .fetch_optional(pool)
    .await?;

    let Some(event_id) = event_id else {
        return Ok(FeeBreakdown::zero());
    };

    let repo = FinanceRepository::new(pool);
    repo.fee_breakdown(FinanceScope::institution(event_id, institution_id))
        .await
}

/// Record a manually attested remittance; it stays pending until a staff
/// reviewer verifies it, and only then does it reduce the balance.
pub async fn submit_fund_transfer(
    pool: &PgPool,
    actor: &Actor,
    req: &CreateFundTransferRequest,
) -> Result<FundTransfer> {
    let institution_id = actor.own_institution()?;

    let event_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT event_id FROM institutions WHERE institution_id = $1",
    )
    .bind(institution_id)
    .fetch_optional(pool)
    .await?
    .ok_or(StorageError::NotFound)?;

    let repo = FundTransferRepository::new(pool);
    let transfer = repo.create(event_id, institution_id, req).await?;

    tracing::info!(
        fund_transfer_id = %transfer.fund_transfer_id,
        amount = %transfer.amount,
        "fund transfer submitted"
    );
    Ok(transfer)
}

pub async fn list_own_fund_transfers(pool: &PgPool, actor: &Actor) -> Result<Vec<FundTransfer>> {
    let institution_id = actor.own_institution()?;
    let repo = FundTransferRepository::new(pool);
    repo.list_for_institution(institution_id).await
}

pub async fn list_event_fund_transfers(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    status: Option<ReviewStatus>,
) -> Result<Vec<FundTransfer>> {
    actor.require_staff_for_event(event_id)?;
    let repo = FundTransferRepository::new(pool);
    repo.list_for_event(event_id, status).await
}
