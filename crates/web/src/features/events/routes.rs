use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{
    create_age_category, create_event, create_event_master, create_institution, get_event,
    list_age_categories, list_event_masters, list_events, list_institutions,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/events", get(list_events))
        .route("/api/events", post(create_event))
        .route("/api/events/:event_id", get(get_event))
        .route("/api/events/:event_id/age-categories", get(list_age_categories))
        .route("/api/events/:event_id/age-categories", post(create_age_category))
        .route("/api/events/:event_id/event-masters", get(list_event_masters))
        .route("/api/events/:event_id/event-masters", post(create_event_master))
        .route("/api/events/:event_id/institutions", get(list_institutions))
        .route("/api/events/:event_id/institutions", post(create_institution))
}
