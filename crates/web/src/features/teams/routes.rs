use axum::{
    Router,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    create_team_entry, delete_team_entry, get_team_entry, list_event_master_team_entries,
    list_own_team_entries, review_team_entry,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/api/team-entries", post(create_team_entry))
        .route("/api/team-entries", get(list_own_team_entries))
        .route("/api/team-entries/:team_entry_id", get(get_team_entry))
        .route("/api/team-entries/:team_entry_id", delete(delete_team_entry))
        .route("/api/team-entries/:team_entry_id/review", post(review_team_entry))
        .route(
            "/api/event-masters/:event_master_id/team-entries",
            get(list_event_master_team_entries),
        )
}
