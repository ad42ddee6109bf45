use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::list_age_categories,
        features::events::handlers::create_age_category,
        features::events::handlers::list_event_masters,
        features::events::handlers::create_event_master,
        features::events::handlers::list_institutions,
        features::events::handlers::create_institution,
        features::participants::handlers::create_participant,
        features::participants::handlers::list_own_participants,
        features::participants::handlers::get_participant,
        features::participants::handlers::update_participant,
        features::participants::handlers::delete_participant,
        features::participants::handlers::submit_participant,
        features::participants::handlers::review_participant,
        features::participants::handlers::staff_edit_participant,
        features::participants::handlers::list_participant_events,
        features::participants::handlers::assign_event,
        features::participants::handlers::unassign_event,
        features::participants::handlers::list_event_participants,
        features::teams::handlers::create_team_entry,
        features::teams::handlers::list_own_team_entries,
        features::teams::handlers::get_team_entry,
        features::teams::handlers::delete_team_entry,
        features::teams::handlers::review_team_entry,
        features::teams::handlers::list_event_master_team_entries,
        features::institution_events::handlers::create_registration,
        features::institution_events::handlers::list_own_registrations,
        features::institution_events::handlers::delete_registration,
        features::institution_events::handlers::review_registration,
        features::institution_events::handlers::list_event_master_registrations,
        features::finance::handlers::create_fund_transfer,
        features::finance::handlers::list_own_fund_transfers,
        features::finance::handlers::review_fund_transfer,
        features::finance::handlers::own_finance_summary,
        features::finance::handlers::list_event_fund_transfers,
        features::finance::handlers::event_finance_summary,
        features::finance::handlers::institution_finance_summary,
        features::results::handlers::record_result,
        features::results::handlers::get_result_sheet,
        features::results::handlers::get_result_status,
        features::results::handlers::set_result_status,
        features::results::handlers::top_participants,
        features::results::handlers::list_result_settings,
        features::results::handlers::upsert_result_setting,
    ),
    components(
        schemas(
            storage::dto::reference::CreateEventRequest,
            storage::dto::reference::CreateAgeCategoryRequest,
            storage::dto::reference::CreateEventMasterRequest,
            storage::dto::reference::CreateInstitutionRequest,
            storage::dto::reference::UpsertResultSettingRequest,
            storage::dto::registration::CreateParticipantRequest,
            storage::dto::registration::UpdateParticipantRequest,
            storage::dto::registration::ParticipantReviewRequest,
            storage::dto::registration::StaffEditParticipantRequest,
            storage::dto::registration::AssignEventRequest,
            storage::dto::registration::CreateTeamEntryRequest,
            storage::dto::registration::CreateInstitutionRegistrationRequest,
            storage::dto::registration::ReviewRequest,
            storage::dto::finance::CreateFundTransferRequest,
            storage::dto::finance::ReviewFundTransferRequest,
            storage::dto::finance::FeeBreakdown,
            storage::dto::results::RecordResultRequest,
            storage::dto::results::SetResultStatusRequest,
            storage::dto::results::ParticipantStanding,
            storage::dto::results::ResultSheetEntry,
            storage::models::Event,
            storage::models::AgeCategory,
            storage::models::EventMaster,
            storage::models::Gender,
            storage::models::EventKind,
            storage::models::Institution,
            storage::models::Participant,
            storage::models::ParticipantStatus,
            storage::models::ParticipantEvent,
            storage::models::TeamEntry,
            storage::models::TeamEntryMember,
            storage::models::ReviewStatus,
            storage::models::InstitutionEventRegistration,
            storage::models::FundTransfer,
            storage::models::ResultKey,
            storage::models::ResultMasterSetting,
            storage::models::ResultStatusLabel,
            storage::models::EventResultStatus,
            storage::models::IndividualEventResult,
            storage::models::TeamEventResult,
            storage::models::InstitutionEventResult,
            features::teams::handlers::TeamEntryResponse,
        )
    ),
    tags(
        (name = "events", description = "Events, age categories, competitions and institutions"),
        (name = "participants", description = "Participant lifecycle and event assignment"),
        (name = "teams", description = "Team entry lifecycle"),
        (name = "institution-events", description = "Institution competition registrations"),
        (name = "finance", description = "Fund transfers and fee dashboards"),
        (name = "results", description = "Result entry, publication and standings"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting meet registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = Router::new()
        .merge(features::events::routes::routes())
        .merge(features::participants::routes::routes())
        .merge(features::teams::routes::routes())
        .merge(features::institution_events::routes::routes())
        .merge(features::finance::routes::routes())
        .merge(features::results::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(db);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
