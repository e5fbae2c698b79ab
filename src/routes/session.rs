use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::session::{SessionRequest, SessionResponse},
    error::AppError,
    services::session_service,
    state::SharedState,
};

/// Routes handling the session lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new().route("/session", post(login).delete(logout))
}

/// Install a session for the supplied identity, replacing any previous one.
#[utoipa::path(
    post,
    path = "/session",
    tag = "session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session installed", body = SessionResponse),
        (status = 400, description = "Invalid email")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    payload.validate()?;
    let response = session_service::login(&state, payload).await?;
    Ok(Json(response))
}

/// Tear down the active session and discard its plays.
#[utoipa::path(
    delete,
    path = "/session",
    tag = "session",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout(State(state): State<SharedState>) -> Result<axum::http::StatusCode, AppError> {
    session_service::logout(&state).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
