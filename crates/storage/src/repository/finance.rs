use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};

use crate::dto::finance::{FeeBreakdown, FinanceScope};
use crate::error::Result;

/// Read-only fee-liability aggregation. One parameterized query set serves
/// both the per-event and per-institution dashboards; the scope filter is the
/// only difference.
pub struct FinanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FinanceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn fee_breakdown(&self, scope: FinanceScope) -> Result<FeeBreakdown> {
        let participant_fees = self.participant_fees(scope).await?;
        let team_fees = self.team_fees(scope).await?;
        let institution_fees = self.institution_fees(scope).await?;
        let (fund_pending, fund_approved) = self.fund_totals(scope).await?;

        Ok(FeeBreakdown::from_parts(
            participant_fees,
            team_fees,
            institution_fees,
            fund_pending,
            fund_approved,
        ))
    }

    /// Snapshotted assignment fees for participants in committed statuses.
    /// Draft and rejected rows never contribute.
    async fn participant_fees(&self, scope: FinanceScope) -> Result<Decimal> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COALESCE(SUM(pe.fee), 0)
            FROM participant_events pe
            INNER JOIN participants p ON pe.participant_id = p.participant_id
            WHERE p.status IN ('submitted', 'approved')
              AND p.event_id =
            "#,
        );
        query.push_bind(scope.event_id);
        if let Some(institution_id) = scope.institution_id {
            query.push(" AND p.institution_id = ");
            query.push_bind(institution_id);
        }

        let total = query
            .build_query_scalar::<Decimal>()
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }

    async fn team_fees(&self, scope: FinanceScope) -> Result<Decimal> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COALESCE(SUM(em.fee), 0)
            FROM team_entries te
            INNER JOIN event_masters em ON te.event_master_id = em.event_master_id
            WHERE te.status IN ('pending', 'approved')
              AND em.event_id =
            "#,
        );
        query.push_bind(scope.event_id);
        if let Some(institution_id) = scope.institution_id {
            query.push(" AND te.institution_id = ");
            query.push_bind(institution_id);
        }

        let total = query
            .build_query_scalar::<Decimal>()
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }

    async fn institution_fees(&self, scope: FinanceScope) -> Result<Decimal> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT COALESCE(SUM(em.fee), 0)
            FROM institution_event_registrations ier
            INNER JOIN event_masters em ON ier.event_master_id = em.event_master_id
            WHERE ier.status IN ('pending', 'approved')
              AND em.event_id =
            "#,
        );
        query.push_bind(scope.event_id);
        if let Some(institution_id) = scope.institution_id {
            query.push(" AND ier.institution_id = ");
            query.push_bind(institution_id);
        }

        let total = query
            .build_query_scalar::<Decimal>()
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }

    async fn fund_totals(&self, scope: FinanceScope) -> Result<(Decimal, Decimal)> {
        let mut query = QueryBuilder::new(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE status = 'pending'), 0),
                COALESCE(SUM(amount) FILTER (WHERE status = 'approved'), 0)
            FROM fund_transfers
            WHERE event_id =
            "#,
        );
        query.push_bind(scope.event_id);
        if let Some(institution_id) = scope.institution_id {
            query.push(" AND institution_id = ");
            query.push_bind(institution_id);
        }

        let totals = query
            .build_query_as::<(Decimal, Decimal)>()
            .fetch_one(self.pool)
            .await?;

        Ok(totals)
    }
}
