use axum::{
    Router,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    get_result_sheet, get_result_status, list_result_settings, record_result, set_result_status,
    top_participants, upsert_result_setting,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/event-masters/:event_master_id/results", post(record_result))
        .route("/api/event-masters/:event_master_id/results", get(get_result_sheet))
        .route(
            "/api/event-masters/:event_master_id/result-status",
            get(get_result_status),
        )
        .route(
            "/api/event-masters/:event_master_id/result-status",
            put(set_result_status),
        )
        .route("/api/events/:event_id/top-participants", get(top_participants))
        .route("/api/events/:event_id/result-settings", get(list_result_settings))
        .route("/api/events/:event_id/result-settings", put(upsert_result_setting))
}
