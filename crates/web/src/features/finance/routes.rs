use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    create_fund_transfer, event_finance_summary, institution_finance_summary,
    list_event_fund_transfers, list_own_fund_transfers, own_finance_summary, review_fund_transfer,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/fund-transfers", post(create_fund_transfer))
        .route("/api/fund-transfers", get(list_own_fund_transfers))
        .route(
            "/api/fund-transfers/:fund_transfer_id/review",
            post(review_fund_transfer),
        )
        .route("/api/finance/summary", get(own_finance_summary))
        .route(
            "/api/events/:event_id/fund-transfers",
            get(list_event_fund_transfers),
        )
        .route("/api/events/:event_id/finance", get(event_finance_summary))
        .route(
            "/api/events/:event_id/institutions/:institution_id/finance",
            get(institution_finance_summary),
        )
}
