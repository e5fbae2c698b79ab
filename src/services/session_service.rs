//! Session lifecycle: install a session at login, tear it down at logout.

use std::time::Duration;

use tracing::info;

use crate::{
    dto::session::{SessionRequest, SessionResponse},
    error::ServiceError,
    state::{
        SharedState,
        form::PredictionForm,
        prediction::{HalfPeriod, MatchPrediction, TeamSide},
        session::SessionContext,
    },
};

/// Serial code of the demo play seeded into fresh login sessions.
pub const DEMO_SERIAL: &str = "ABC-123-DEMO";

/// Age of the seeded demo play relative to login time.
const DEMO_PLAY_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Install a session for `request.email`, replacing any previous session
/// wholesale, and reset the working form for a fresh cycle.
///
/// A login seeds the demo play when configured; a registration always starts
/// with an empty collection.
pub async fn login(
    state: &SharedState,
    request: SessionRequest,
) -> Result<SessionResponse, ServiceError> {
    let mut session = SessionContext::new(request.email.clone());

    if !request.register && state.config().seed_demo_play() {
        let prediction = demo_prediction(state);
        let committed_at = state.now() - DEMO_PLAY_AGE;
        session.plays_mut().create(
            DEMO_SERIAL.to_owned(),
            prediction,
            request.email.clone(),
            committed_at,
        );
    }

    let play_count = session.plays().list_for(session.user_email()).len();

    {
        let mut guard = state.session().write().await;
        *guard = Some(session);
    }
    {
        let mut form = state.form().write().await;
        *form = PredictionForm::new(state.config().team_a(), state.config().team_b());
    }

    info!(owner = %request.email, registered = request.register, play_count, "session installed");
    Ok(SessionResponse {
        email: request.email,
        play_count,
    })
}

/// Tear down the active session, clearing its play collection wholesale, and
/// reset the working form.
pub async fn logout(state: &SharedState) -> Result<(), ServiceError> {
    let mut session = {
        let mut guard = state.session().write().await;
        guard.take().ok_or(ServiceError::NoSession)?
    };
    session.plays_mut().clear();

    let mut form = state.form().write().await;
    *form = PredictionForm::new(state.config().team_a(), state.config().team_b());

    info!(owner = %session.user_email(), "session closed");
    Ok(())
}

/// The demo receipt every returning participant sees: 1-0 at half time,
/// 1-1 in the second half, 2-1 full time.
fn demo_prediction(state: &SharedState) -> MatchPrediction {
    let mut prediction =
        MatchPrediction::new(state.config().team_a(), state.config().team_b());
    for (period, side, value) in [
        (HalfPeriod::First, TeamSide::A, 1),
        (HalfPeriod::Second, TeamSide::A, 1),
        (HalfPeriod::Second, TeamSide::B, 1),
    ] {
        prediction.try_set_half(period, side, value);
    }
    prediction
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::{
        config::AppConfig,
        services::notifier::RecordingNotifier,
        services::play_service,
        services::verifier::{ScriptedVerifier, VerifierDecision},
        state::AppState,
        state::clock::ManualClock,
    };

    use super::*;

    fn kickoff() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(2_000_000_000)
    }

    fn state(seed_demo_play: bool) -> crate::state::SharedState {
        AppState::new(
            AppConfig::for_tests("Atlético Tucumán", "San Martín", kickoff(), seed_demo_play),
            Arc::new(ManualClock::new(kickoff() - Duration::from_secs(3600))),
            Arc::new(ScriptedVerifier::always(VerifierDecision::Verified)),
            Arc::new(RecordingNotifier::default()),
        )
    }

    fn request(email: &str, register: bool) -> SessionRequest {
        SessionRequest {
            email: email.into(),
            register,
        }
    }

    #[tokio::test]
    async fn login_seeds_the_demo_play_when_configured() {
        let state = state(true);
        let response = login(&state, request("ana@example.com", false)).await.unwrap();
        assert_eq!(response.play_count, 1);

        let listed = play_service::list_plays(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].serial_number, DEMO_SERIAL);
        assert_eq!(listed[0].prediction.final_a, 2);
        assert_eq!(listed[0].prediction.final_b, 1);
    }

    #[tokio::test]
    async fn registration_starts_with_an_empty_collection() {
        let state = state(true);
        let response = login(&state, request("nuevo@example.com", true)).await.unwrap();
        assert_eq!(response.play_count, 0);
        assert!(play_service::list_plays(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn logout_discards_the_previous_sessions_plays() {
        let state = state(true);
        login(&state, request("ana@example.com", false)).await.unwrap();
        logout(&state).await.unwrap();

        assert!(matches!(
            play_service::list_plays(&state).await.unwrap_err(),
            crate::error::ServiceError::NoSession
        ));

        // A fresh registration after logout sees nothing from before.
        login(&state, request("ana@example.com", true)).await.unwrap();
        assert!(play_service::list_plays(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn logout_without_a_session_is_an_error() {
        let state = state(false);
        assert!(matches!(
            logout(&state).await.unwrap_err(),
            ServiceError::NoSession
        ));
    }

    #[tokio::test]
    async fn a_new_login_replaces_the_session_and_resets_the_form() {
        let state = state(false);
        login(&state, request("ana@example.com", false)).await.unwrap();
        play_service::submit_serial(
            &state,
            crate::dto::play::SerialRequest {
                serial: "ABC-123".into(),
            },
        )
        .await
        .unwrap();

        login(&state, request("bruno@example.com", false)).await.unwrap();

        let snapshot = play_service::form_snapshot(&state).await.unwrap();
        assert!(matches!(
            snapshot.phase,
            crate::dto::play::VisibleFormPhase::EnteringSerial
        ));
        assert!(snapshot.verified_serial.is_none());
    }
}
