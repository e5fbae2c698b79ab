//! Per-login session context owning the participant's play collection.

use crate::dao::play_store::PlayStore;

/// State scoped to one logged-in participant.
///
/// Constructed at login, torn down wholesale at logout; the identity is an
/// opaque email key supplied by the caller, never authenticated here.
#[derive(Debug)]
pub struct SessionContext {
    user_email: String,
    plays: PlayStore,
}

impl SessionContext {
    /// Fresh session for `user_email` with an empty play collection.
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            plays: PlayStore::new(),
        }
    }

    /// Owner key for this session.
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    /// Read access to the session's plays.
    pub fn plays(&self) -> &PlayStore {
        &self.plays
    }

    /// Write access to the session's plays.
    pub fn plays_mut(&mut self) -> &mut PlayStore {
        &mut self.plays
    }
}
