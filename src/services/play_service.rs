//! Orchestration of the play-submission workflow: serial verification, score
//! entry, confirmation and the commit that produces a receipt.

use tracing::info;

use crate::{
    dto::play::{FormSnapshot, PlayDto, ScoreEditRequest, ScoreEditResponse, SerialRequest},
    error::ServiceError,
    services::verifier::VerifierDecision,
    state::{SharedState, form::FormError},
};

/// Snapshot of the working form for the logged-in participant.
pub async fn form_snapshot(state: &SharedState) -> Result<FormSnapshot, ServiceError> {
    ensure_session(state).await?;

    let gate = state.refresh_gate().await;
    let form = state.form().read().await;
    Ok(FormSnapshot::capture(&form, gate))
}

/// Submit a serial code: local blank check, then the external verification.
///
/// While the verification is outstanding the form sits in the verifying
/// phase, which also rejects any second submission attempt. A rejected code
/// returns the form to serial entry and surfaces the rejection.
pub async fn submit_serial(
    state: &SharedState,
    request: SerialRequest,
) -> Result<FormSnapshot, ServiceError> {
    ensure_session(state).await?;

    let gate = state.refresh_gate().await;
    let serial = {
        let mut form = state.form().write().await;
        form.begin_verification(&request.serial, gate)?;
        form.serial_entry().to_owned()
    };

    // The registry call happens without holding the form lock; the verifying
    // phase is what keeps the form single-flight.
    let decision = state.verifier().verify(&serial).await;

    let gate = state.gate_status();
    let mut form = state.form().write().await;
    match decision {
        VerifierDecision::Verified => {
            let phase = form.verification_passed(gate)?;
            info!(%serial, ?phase, "serial verified");
            Ok(FormSnapshot::capture(&form, gate))
        }
        VerifierDecision::Rejected => {
            form.verification_rejected()?;
            Err(FormError::SerialRejected { serial }.into())
        }
    }
}

/// Apply one half-score edit to the working prediction.
///
/// Out-of-range and non-numeric values are ignored rather than rejected; the
/// response reports whether the prediction changed.
pub async fn edit_score(
    state: &SharedState,
    request: ScoreEditRequest,
) -> Result<ScoreEditResponse, ServiceError> {
    ensure_session(state).await?;

    let gate = state.gate_status();
    let mut form = state.form().write().await;
    let applied = form.edit_score(request.period.into(), request.team.into(), &request.value, gate)?;
    Ok(ScoreEditResponse {
        applied,
        form: FormSnapshot::capture(&form, gate),
    })
}

/// Freeze the prediction and move to the confirmation step.
pub async fn request_confirmation(state: &SharedState) -> Result<FormSnapshot, ServiceError> {
    ensure_session(state).await?;

    let gate = state.gate_status();
    let mut form = state.form().write().await;
    form.request_confirmation(gate)?;
    Ok(FormSnapshot::capture(&form, gate))
}

/// Back out of the confirmation step; the working copy stays intact.
pub async fn cancel_confirmation(state: &SharedState) -> Result<FormSnapshot, ServiceError> {
    ensure_session(state).await?;

    let gate = state.gate_status();
    let mut form = state.form().write().await;
    form.cancel_confirmation()?;
    Ok(FormSnapshot::capture(&form, gate))
}

/// Commit the confirmed prediction: append the play to the session's store,
/// notify the receipt collaborator exactly once, and reset the form for the
/// next cycle.
pub async fn confirm(state: &SharedState) -> Result<PlayDto, ServiceError> {
    // The session lock is held across the whole commit so a logout can never
    // interleave once the submitting phase is entered.
    let mut session_guard = state.session().write().await;
    let session = session_guard.as_mut().ok_or(ServiceError::NoSession)?;
    let owner = session.user_email().to_owned();

    let mut form = state.form().write().await;
    let (serial, prediction) = form.begin_commit()?;

    let play = session
        .plays_mut()
        .create(serial, prediction, owner, state.now());
    state.notifier().notify(&play);
    form.finish_commit()?;

    info!(
        play_id = %play.id(),
        owner = %play.user_email(),
        serial = %play.serial_number(),
        "play committed"
    );
    Ok(PlayDto::from(&play))
}

/// Receipts owned by the logged-in participant, newest first.
pub async fn list_plays(state: &SharedState) -> Result<Vec<PlayDto>, ServiceError> {
    let guard = state.session().read().await;
    let session = guard.as_ref().ok_or(ServiceError::NoSession)?;

    Ok(session
        .plays()
        .list_for(session.user_email())
        .iter()
        .map(PlayDto::from)
        .collect())
}

async fn ensure_session(state: &SharedState) -> Result<(), ServiceError> {
    let guard = state.session().read().await;
    if guard.is_none() {
        return Err(ServiceError::NoSession);
    }
    Ok(())
}
