use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the health payload; the backend is in-memory so the only
/// interesting signal is whether a session is active.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let session_active = state.session().read().await.is_some();
    HealthResponse::ok(session_active)
}
