use axum::{
    Router,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    create_registration, delete_registration, list_event_master_registrations,
    list_own_registrations, review_registration,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/institution-registrations", post(create_registration))
        .route("/api/institution-registrations", get(list_own_registrations))
        .route(
            "/api/institution-registrations/:registration_id",
            delete(delete_registration),
        )
        .route(
            "/api/institution-registrations/:registration_id/review",
            post(review_registration),
        )
        .route(
            "/api/event-masters/:event_master_id/institution-registrations",
            get(list_event_master_registrations),
        )
}
