use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the TucuGol backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::session::login,
        crate::routes::session::logout,
        crate::routes::play::form_snapshot,
        crate::routes::play::submit_serial,
        crate::routes::play::edit_score,
        crate::routes::play::request_confirmation,
        crate::routes::play::cancel_confirmation,
        crate::routes::play::confirm,
        crate::routes::play::list_plays,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::session::SessionRequest,
            crate::dto::session::SessionResponse,
            crate::dto::play::SerialRequest,
            crate::dto::play::ScoreEditRequest,
            crate::dto::play::ScoreEditResponse,
            crate::dto::play::FormSnapshot,
            crate::dto::play::PredictionDto,
            crate::dto::play::PlayDto,
            crate::dto::play::VisibleFormPhase,
            crate::dto::play::GateStatusDto,
            crate::dto::play::PeriodDto,
            crate::dto::play::TeamDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "session", description = "Session lifecycle"),
        (name = "play", description = "Play submission workflow and receipts"),
    )
)]
pub struct ApiDoc;
