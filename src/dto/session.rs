//! Session lifecycle payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login or registration request. Identity is an opaque email key; no
/// credential is checked here.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SessionRequest {
    /// Owner key for the session.
    #[validate(email)]
    pub email: String,
    /// When true, acts as a fresh registration: the session starts with an
    /// empty play collection instead of the demo seed.
    #[serde(default)]
    pub register: bool,
}

/// Summary returned once a session has been installed.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Owner key of the new session.
    pub email: String,
    /// Number of plays visible to the owner right after login.
    pub play_count: usize,
}
