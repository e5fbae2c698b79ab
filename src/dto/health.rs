use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" for this in-memory backend.
    pub status: String,
    /// Whether a participant session is currently active.
    pub session_active: bool,
}

impl HealthResponse {
    /// Health response indicating the system is operational.
    pub fn ok(session_active: bool) -> Self {
        Self {
            status: "ok".to_string(),
            session_active,
        }
    }
}
