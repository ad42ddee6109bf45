use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::finance::CreateFundTransferRequest;
use crate::error::{Result, StorageError};
use crate::models::{FundTransfer, ReviewStatus};

const FUND_TRANSFER_COLUMNS: &str = "fund_transfer_id, event_id, institution_id, transfer_date, \
     mode, amount, transaction_number, receipt_path, status, reviewed_by, reviewed_at, remarks, \
     created_at";

pub struct FundTransferRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FundTransferRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_institution(&self, institution_id: Uuid) -> Result<Vec<FundTransfer>> {
        let transfers = sqlx::query_as::<_, FundTransfer>(&format!(
            "SELECT {FUND_TRANSFER_COLUMNS} FROM fund_transfers \
             WHERE institution_id = $1 ORDER BY created_at"
        ))
        .bind(institution_id)
        .fetch_all(self.pool)
        .await?;

        Ok(transfers)
    }

    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<FundTransfer>> {
        let mut query = sqlx::QueryBuilder::new(format!(
            "SELECT {FUND_TRANSFER_COLUMNS} FROM fund_transfers WHERE event_id = "
        ));
        query.push_bind(event_id);
        if let Some(status) = status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        query.push(" ORDER BY created_at");

        let transfers = query
            .build_query_as::<FundTransfer>()
            .fetch_all(self.pool)
            .await?;

        Ok(transfers)
    }

    pub async fn create(
        &self,
        event_id: Uuid,
        institution_id: Uuid,
        req: &CreateFundTransferRequest,
    ) -> Result<FundTransfer> {
        let transfer = sqlx::query_as::<_, FundTransfer>(&format!(
            r#"
            INSERT INTO fund_transfers
                (event_id, institution_id, transfer_date, mode, amount, transaction_number, receipt_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FUND_TRANSFER_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(institution_id)
        .bind(req.transfer_date)
        .bind(&req.mode)
        .bind(req.amount)
        .bind(&req.transaction_number)
        .bind(req.receipt_path.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(transfer)
    }
}

pub async fn fetch_for_update(conn: &mut PgConnection, id: Uuid) -> Result<FundTransfer> {
    let transfer = sqlx::query_as::<_, FundTransfer>(&format!(
        "SELECT {FUND_TRANSFER_COLUMNS} FROM fund_transfers WHERE fund_transfer_id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(transfer)
}

pub async fn set_review(
    conn: &mut PgConnection,
    id: Uuid,
    status: ReviewStatus,
    reviewed_by: Option<Uuid>,
    remarks: Option<&str>,
) -> Result<FundTransfer> {
    let transfer = sqlx::query_as::<_, FundTransfer>(&format!(
        r#"
        UPDATE fund_transfers
        SET status = $2,
            reviewed_by = $3,
            reviewed_at = CASE WHEN $3::uuid IS NULL THEN NULL ELSE now() END,
            remarks = $4
        WHERE fund_transfer_id = $1
        RETURNING {FUND_TRANSFER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(reviewed_by)
    .bind(remarks)
    .fetch_optional(conn)
    .await?
    .ok_or(StorageError::NotFound)?;

    Ok(transfer)
}
