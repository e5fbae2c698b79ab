//! State machine driving the serial entry, score entry, confirmation and
//! submission steps of a play.

use thiserror::Error;

use crate::state::prediction::{HalfPeriod, MatchPrediction, TeamSide};
use crate::state::time_gate::GateStatus;

/// Step of the play-submission workflow the form is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for a participation serial code.
    EnteringSerial,
    /// A verification request is outstanding with the external verifier.
    Verifying,
    /// Serial accepted; the working prediction can be edited.
    EnteringScores,
    /// Prediction frozen on screen, waiting for an explicit confirmation.
    Confirming,
    /// Commit in flight; no further input accepted.
    Submitting,
    /// Submission window closed for this cycle; display-only.
    Closed,
}

/// Operations that can be attempted on the form, used in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Submit a serial code for verification.
    SubmitSerial,
    /// Deliver the verifier's decision.
    ResolveVerification,
    /// Edit one half-score field.
    EditScore,
    /// Move the completed prediction to the confirmation step.
    RequestConfirmation,
    /// Back out of the confirmation step.
    CancelConfirmation,
    /// Commit the confirmed prediction.
    Commit,
    /// Finish a commit in flight.
    FinishCommit,
}

/// Errors surfaced by the form. None of them is fatal: each leaves the form
/// in a well-defined phase from which the user can continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A blank serial code was submitted; the verifier is never consulted.
    #[error("a serial number is required before verification")]
    EmptySerial,
    /// The external verifier declined the code.
    #[error("serial number `{serial}` was rejected by the verifier")]
    SerialRejected {
        /// The code that was declined.
        serial: String,
    },
    /// The submission window for the fixture has closed.
    #[error("the submission window for this match has closed")]
    WindowClosed,
    /// The operation is not valid in the current phase.
    #[error("invalid transition: {action:?} cannot be applied while in {phase:?}")]
    InvalidTransition {
        /// Phase the form was in when the operation was attempted.
        phase: FormPhase,
        /// The operation that cannot be applied from this phase.
        action: FormAction,
    },
}

/// Mutable working state for one play, owned by the session.
///
/// The phase doubles as the concurrency guard: only one verification and one
/// commit can ever be outstanding because re-entering [`FormPhase::Verifying`]
/// or [`FormPhase::Submitting`] is an invalid transition.
#[derive(Debug, Clone)]
pub struct PredictionForm {
    phase: FormPhase,
    serial_entry: String,
    verified_serial: String,
    prediction: MatchPrediction,
}

impl PredictionForm {
    /// Fresh form for the given pairing, waiting for a serial code.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            phase: FormPhase::EnteringSerial,
            serial_entry: String::new(),
            verified_serial: String::new(),
            prediction: MatchPrediction::new(team_a, team_b),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Serial text last submitted for verification.
    pub fn serial_entry(&self) -> &str {
        &self.serial_entry
    }

    /// Serial code accepted by the verifier, if any.
    pub fn verified_serial(&self) -> Option<&str> {
        if self.verified_serial.is_empty() {
            None
        } else {
            Some(&self.verified_serial)
        }
    }

    /// Working prediction, totals always in sync.
    pub fn prediction(&self) -> &MatchPrediction {
        &self.prediction
    }

    /// Flag the window as closed if the gate says so and the form has not
    /// progressed past score entry. Returns whether the phase changed.
    pub fn apply_gate(&mut self, gate: GateStatus) -> bool {
        if gate == GateStatus::Closed
            && matches!(
                self.phase,
                FormPhase::EnteringSerial | FormPhase::Verifying | FormPhase::EnteringScores
            )
        {
            self.phase = FormPhase::Closed;
            return true;
        }
        false
    }

    /// Accept a serial code and move to [`FormPhase::Verifying`].
    ///
    /// Blank input fails locally with [`FormError::EmptySerial`] and never
    /// reaches the verifier. `gate` is the window status observed immediately
    /// before the operation.
    pub fn begin_verification(&mut self, serial: &str, gate: GateStatus) -> Result<(), FormError> {
        match self.phase {
            FormPhase::EnteringSerial => {
                if gate == GateStatus::Closed {
                    self.phase = FormPhase::Closed;
                    return Err(FormError::WindowClosed);
                }
                let trimmed = serial.trim();
                if trimmed.is_empty() {
                    return Err(FormError::EmptySerial);
                }
                self.serial_entry = trimmed.to_owned();
                self.phase = FormPhase::Verifying;
                Ok(())
            }
            FormPhase::Closed => Err(FormError::WindowClosed),
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::SubmitSerial,
            }),
        }
    }

    /// Record that the verifier accepted the outstanding serial.
    ///
    /// If the window closed while the verification was in flight the form
    /// lands in [`FormPhase::Closed`] but keeps the verified code.
    pub fn verification_passed(&mut self, gate: GateStatus) -> Result<FormPhase, FormError> {
        match self.phase {
            FormPhase::Verifying => {
                self.verified_serial = self.serial_entry.clone();
                self.prediction.reset_scores();
                self.phase = if gate == GateStatus::Closed {
                    FormPhase::Closed
                } else {
                    FormPhase::EnteringScores
                };
                Ok(self.phase)
            }
            // The poll task closed the window mid-verification; the code is
            // still verified and must not be discarded.
            FormPhase::Closed => {
                self.verified_serial = self.serial_entry.clone();
                Ok(FormPhase::Closed)
            }
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::ResolveVerification,
            }),
        }
    }

    /// Record that the verifier declined the outstanding serial. The entry is
    /// kept on screen so the user can correct it.
    pub fn verification_rejected(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Verifying => {
                self.phase = FormPhase::EnteringSerial;
                Ok(())
            }
            FormPhase::Closed => Ok(()),
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::ResolveVerification,
            }),
        }
    }

    /// Apply one half-score edit from raw field text.
    ///
    /// Non-numeric and out-of-range values are ignored without an error, the
    /// same way the original form field kept its prior value. Returns whether
    /// the edit changed the prediction. Edits after the window closed are
    /// also ignored.
    pub fn edit_score(
        &mut self,
        period: HalfPeriod,
        side: TeamSide,
        raw: &str,
        gate: GateStatus,
    ) -> Result<bool, FormError> {
        match self.phase {
            FormPhase::EnteringScores => {
                if self.apply_gate(gate) {
                    return Ok(false);
                }
                let applied = raw
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .map(|value| self.prediction.try_set_half(period, side, value))
                    .unwrap_or(false);
                Ok(applied)
            }
            FormPhase::Closed => Ok(false),
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::EditScore,
            }),
        }
    }

    /// Freeze the prediction and ask for confirmation. The store is not
    /// touched by this step.
    pub fn request_confirmation(&mut self, gate: GateStatus) -> Result<(), FormError> {
        match self.phase {
            FormPhase::EnteringScores => {
                if self.apply_gate(gate) {
                    return Err(FormError::WindowClosed);
                }
                self.phase = FormPhase::Confirming;
                Ok(())
            }
            FormPhase::Closed => Err(FormError::WindowClosed),
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::RequestConfirmation,
            }),
        }
    }

    /// Back out of the confirmation step; the working copy is untouched.
    pub fn cancel_confirmation(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Confirming => {
                self.phase = FormPhase::EnteringScores;
                Ok(())
            }
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::CancelConfirmation,
            }),
        }
    }

    /// Enter [`FormPhase::Submitting`], returning the serial and prediction
    /// snapshot to commit. Once entered the commit is neither retryable nor
    /// cancelable.
    pub fn begin_commit(&mut self) -> Result<(String, MatchPrediction), FormError> {
        match self.phase {
            FormPhase::Confirming => {
                self.phase = FormPhase::Submitting;
                Ok((self.verified_serial.clone(), self.prediction.clone()))
            }
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::Commit,
            }),
        }
    }

    /// Complete a commit: reset serial and scores and loop back to
    /// [`FormPhase::EnteringSerial`].
    pub fn finish_commit(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Submitting => {
                self.serial_entry.clear();
                self.verified_serial.clear();
                self.prediction.reset_scores();
                self.phase = FormPhase::EnteringSerial;
                Ok(())
            }
            phase => Err(FormError::InvalidTransition {
                phase,
                action: FormAction::FinishCommit,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::state::prediction::{HalfPeriod, TeamSide};
    use crate::state::time_gate::GateStatus;

    use super::*;

    fn form() -> PredictionForm {
        PredictionForm::new("Atlético Tucumán", "San Martín")
    }

    fn verified_form() -> PredictionForm {
        let mut f = form();
        f.begin_verification("ABC-123", GateStatus::Open).unwrap();
        f.verification_passed(GateStatus::Open).unwrap();
        f
    }

    #[test]
    fn full_cycle_through_commit() {
        let mut f = form();

        f.begin_verification("ABC-123", GateStatus::Open).unwrap();
        assert_eq!(f.phase(), FormPhase::Verifying);

        f.verification_passed(GateStatus::Open).unwrap();
        assert_eq!(f.phase(), FormPhase::EnteringScores);
        assert_eq!(f.verified_serial(), Some("ABC-123"));

        assert!(
            f.edit_score(HalfPeriod::First, TeamSide::A, "1", GateStatus::Open)
                .unwrap()
        );
        assert!(
            f.edit_score(HalfPeriod::Second, TeamSide::A, "1", GateStatus::Open)
                .unwrap()
        );
        assert!(
            f.edit_score(HalfPeriod::Second, TeamSide::B, "1", GateStatus::Open)
                .unwrap()
        );
        assert_eq!(f.prediction().final_score(TeamSide::A), 2);
        assert_eq!(f.prediction().final_score(TeamSide::B), 1);

        f.request_confirmation(GateStatus::Open).unwrap();
        assert_eq!(f.phase(), FormPhase::Confirming);

        let (serial, prediction) = f.begin_commit().unwrap();
        assert_eq!(serial, "ABC-123");
        assert_eq!(prediction.final_score(TeamSide::A), 2);
        assert_eq!(f.phase(), FormPhase::Submitting);

        f.finish_commit().unwrap();
        assert_eq!(f.phase(), FormPhase::EnteringSerial);
        assert_eq!(f.verified_serial(), None);
        assert_eq!(f.prediction().final_score(TeamSide::A), 0);
    }

    #[test]
    fn blank_serial_fails_locally_and_stays_in_entry() {
        let mut f = form();
        assert_eq!(
            f.begin_verification("   ", GateStatus::Open),
            Err(FormError::EmptySerial)
        );
        assert_eq!(f.phase(), FormPhase::EnteringSerial);
    }

    #[test]
    fn rejection_returns_to_serial_entry_keeping_the_text() {
        let mut f = form();
        f.begin_verification("BAD-999", GateStatus::Open).unwrap();
        f.verification_rejected().unwrap();

        assert_eq!(f.phase(), FormPhase::EnteringSerial);
        assert_eq!(f.serial_entry(), "BAD-999");
        assert_eq!(f.verified_serial(), None);
    }

    #[test]
    fn second_verification_while_one_is_outstanding_is_invalid() {
        let mut f = form();
        f.begin_verification("ABC-123", GateStatus::Open).unwrap();

        let err = f.begin_verification("DEF-456", GateStatus::Open).unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidTransition {
                phase: FormPhase::Verifying,
                action: FormAction::SubmitSerial,
            }
        );
    }

    #[test]
    fn closed_gate_blocks_serial_entry() {
        let mut f = form();
        assert_eq!(
            f.begin_verification("ABC-123", GateStatus::Closed),
            Err(FormError::WindowClosed)
        );
        assert_eq!(f.phase(), FormPhase::Closed);
    }

    #[test]
    fn gate_closing_during_score_entry_silences_further_edits() {
        let mut f = verified_form();
        assert!(
            f.edit_score(HalfPeriod::First, TeamSide::A, "2", GateStatus::Open)
                .unwrap()
        );

        // The poll task notices the closed window.
        assert!(f.apply_gate(GateStatus::Closed));
        assert_eq!(f.phase(), FormPhase::Closed);

        assert!(
            !f.edit_score(HalfPeriod::First, TeamSide::A, "5", GateStatus::Closed)
                .unwrap()
        );
        assert_eq!(f.prediction().first_half(TeamSide::A), 2);
    }

    #[test]
    fn window_closing_mid_verification_keeps_the_verified_serial() {
        let mut f = form();
        f.begin_verification("ABC-123", GateStatus::Open).unwrap();

        assert!(f.apply_gate(GateStatus::Closed));
        assert_eq!(f.verification_passed(GateStatus::Closed), Ok(FormPhase::Closed));
        assert_eq!(f.verified_serial(), Some("ABC-123"));
    }

    #[test]
    fn verified_result_landing_on_a_closed_gate_goes_to_closed() {
        let mut f = form();
        f.begin_verification("ABC-123", GateStatus::Open).unwrap();

        assert_eq!(f.verification_passed(GateStatus::Closed), Ok(FormPhase::Closed));
        assert_eq!(f.verified_serial(), Some("ABC-123"));
    }

    #[test]
    fn non_numeric_edits_are_ignored() {
        let mut f = verified_form();
        assert!(
            f.edit_score(HalfPeriod::First, TeamSide::B, "3", GateStatus::Open)
                .unwrap()
        );
        assert!(
            !f.edit_score(HalfPeriod::First, TeamSide::B, "abc", GateStatus::Open)
                .unwrap()
        );
        assert!(
            !f.edit_score(HalfPeriod::First, TeamSide::B, "", GateStatus::Open)
                .unwrap()
        );
        assert_eq!(f.prediction().first_half(TeamSide::B), 3);
    }

    #[test]
    fn cancel_returns_to_score_entry_with_the_working_copy_intact() {
        let mut f = verified_form();
        f.edit_score(HalfPeriod::First, TeamSide::A, "1", GateStatus::Open)
            .unwrap();
        f.request_confirmation(GateStatus::Open).unwrap();

        f.cancel_confirmation().unwrap();
        assert_eq!(f.phase(), FormPhase::EnteringScores);
        assert_eq!(f.prediction().first_half(TeamSide::A), 1);
    }

    #[test]
    fn gate_closing_does_not_interrupt_confirmation_or_commit() {
        let mut f = verified_form();
        f.request_confirmation(GateStatus::Open).unwrap();

        assert!(!f.apply_gate(GateStatus::Closed));
        assert_eq!(f.phase(), FormPhase::Confirming);

        f.begin_commit().unwrap();
        assert!(!f.apply_gate(GateStatus::Closed));
        f.finish_commit().unwrap();
        assert_eq!(f.phase(), FormPhase::EnteringSerial);
    }

    #[test]
    fn commit_requires_confirmation_first() {
        let mut f = verified_form();
        let err = f.begin_commit().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidTransition {
                phase: FormPhase::EnteringScores,
                action: FormAction::Commit,
            }
        );
    }
}
