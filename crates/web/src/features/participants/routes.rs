use axum::{
    Router,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    assign_event, create_participant, delete_participant, get_participant,
    list_event_participants, list_own_participants, list_participant_events, review_participant,
    staff_edit_participant, submit_participant, unassign_event, update_participant,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/participants", post(create_participant))
        .route("/api/participants", get(list_own_participants))
        .route("/api/participants/:participant_id", get(get_participant))
        .route("/api/participants/:participant_id", put(update_participant))
        .route("/api/participants/:participant_id", delete(delete_participant))
        .route("/api/participants/:participant_id/submit", post(submit_participant))
        .route("/api/participants/:participant_id/review", post(review_participant))
        .route("/api/participants/:participant_id/staff-edit", put(staff_edit_participant))
        .route("/api/participants/:participant_id/events", get(list_participant_events))
        .route("/api/participants/:participant_id/events", post(assign_event))
        .route(
            "/api/participants/:participant_id/events/:event_master_id",
            delete(unassign_event),
        )
        .route("/api/events/:event_id/participants", get(list_event_participants))
}
