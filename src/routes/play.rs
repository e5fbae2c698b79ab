use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::play::{FormSnapshot, PlayDto, ScoreEditRequest, ScoreEditResponse, SerialRequest},
    error::AppError,
    services::play_service,
    state::SharedState,
};

/// Routes driving the play-submission workflow and the receipt listing.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/play", get(form_snapshot))
        .route("/play/serial", post(submit_serial))
        .route("/play/scores", put(edit_score))
        .route("/play/submit", post(request_confirmation))
        .route("/play/cancel", post(cancel_confirmation))
        .route("/play/confirm", post(confirm))
        .route("/plays", get(list_plays))
}

/// Current state of the working form.
#[utoipa::path(
    get,
    path = "/play",
    tag = "play",
    responses(
        (status = 200, description = "Form snapshot", body = FormSnapshot),
        (status = 401, description = "No active session")
    )
)]
pub async fn form_snapshot(
    State(state): State<SharedState>,
) -> Result<Json<FormSnapshot>, AppError> {
    Ok(Json(play_service::form_snapshot(&state).await?))
}

/// Submit a serial code for verification against the external registry.
#[utoipa::path(
    post,
    path = "/play/serial",
    tag = "play",
    request_body = SerialRequest,
    responses(
        (status = 200, description = "Serial verified, scores can be entered", body = FormSnapshot),
        (status = 400, description = "Blank or rejected serial"),
        (status = 409, description = "Window closed or verification already in flight")
    )
)]
pub async fn submit_serial(
    State(state): State<SharedState>,
    Json(payload): Json<SerialRequest>,
) -> Result<Json<FormSnapshot>, AppError> {
    Ok(Json(play_service::submit_serial(&state, payload).await?))
}

/// Edit one half-score field of the working prediction.
#[utoipa::path(
    put,
    path = "/play/scores",
    tag = "play",
    request_body = ScoreEditRequest,
    responses(
        (status = 200, description = "Edit processed; `applied` tells whether it took effect", body = ScoreEditResponse),
        (status = 409, description = "Form is not in score entry")
    )
)]
pub async fn edit_score(
    State(state): State<SharedState>,
    Json(payload): Json<ScoreEditRequest>,
) -> Result<Json<ScoreEditResponse>, AppError> {
    Ok(Json(play_service::edit_score(&state, payload).await?))
}

/// Freeze the prediction and ask for the explicit confirmation.
#[utoipa::path(
    post,
    path = "/play/submit",
    tag = "play",
    responses(
        (status = 200, description = "Awaiting confirmation", body = FormSnapshot),
        (status = 409, description = "Form is not in score entry or the window closed")
    )
)]
pub async fn request_confirmation(
    State(state): State<SharedState>,
) -> Result<Json<FormSnapshot>, AppError> {
    Ok(Json(play_service::request_confirmation(&state).await?))
}

/// Back out of the confirmation step.
#[utoipa::path(
    post,
    path = "/play/cancel",
    tag = "play",
    responses(
        (status = 200, description = "Back in score entry", body = FormSnapshot),
        (status = 409, description = "Nothing to cancel")
    )
)]
pub async fn cancel_confirmation(
    State(state): State<SharedState>,
) -> Result<Json<FormSnapshot>, AppError> {
    Ok(Json(play_service::cancel_confirmation(&state).await?))
}

/// Commit the confirmed play and receive the immutable receipt.
#[utoipa::path(
    post,
    path = "/play/confirm",
    tag = "play",
    responses(
        (status = 200, description = "Play committed", body = PlayDto),
        (status = 409, description = "No confirmation pending")
    )
)]
pub async fn confirm(State(state): State<SharedState>) -> Result<Json<PlayDto>, AppError> {
    Ok(Json(play_service::confirm(&state).await?))
}

/// List the caller's receipts, newest first.
#[utoipa::path(
    get,
    path = "/plays",
    tag = "play",
    responses(
        (status = 200, description = "Receipts owned by the session", body = [PlayDto]),
        (status = 401, description = "No active session")
    )
)]
pub async fn list_plays(State(state): State<SharedState>) -> Result<Json<Vec<PlayDto>>, AppError> {
    Ok(Json(play_service::list_plays(&state).await?))
}
