//! Payloads for the play-submission workflow and receipt listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::play_store::Play;
use crate::dto::format_system_time;
use crate::state::form::{FormPhase, PredictionForm};
use crate::state::prediction::{HalfPeriod, MatchPrediction, TeamSide};
use crate::state::time_gate::GateStatus;

/// Serial code submitted for verification.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SerialRequest {
    /// Participation code as typed by the user.
    pub serial: String,
}

/// Which half a score edit targets.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeriodDto {
    /// First half.
    FirstHalf,
    /// Second half.
    SecondHalf,
}

impl From<PeriodDto> for HalfPeriod {
    fn from(value: PeriodDto) -> Self {
        match value {
            PeriodDto::FirstHalf => HalfPeriod::First,
            PeriodDto::SecondHalf => HalfPeriod::Second,
        }
    }
}

/// Which team a score edit targets.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamDto {
    /// Home team.
    A,
    /// Away team.
    B,
}

impl From<TeamDto> for TeamSide {
    fn from(value: TeamDto) -> Self {
        match value {
            TeamDto::A => TeamSide::A,
            TeamDto::B => TeamSide::B,
        }
    }
}

/// One half-score edit, carrying the raw field text.
///
/// The value is deliberately a string: non-numeric input is ignored the same
/// way the original form field ignored it, rather than rejected at the
/// protocol level.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreEditRequest {
    /// Half the edit targets.
    pub period: PeriodDto,
    /// Team the edit targets.
    pub team: TeamDto,
    /// Raw field text, expected to parse to an integer in `[0, 99]`.
    pub value: String,
}

/// Publicly visible form phase exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum VisibleFormPhase {
    /// Waiting for a serial code.
    EnteringSerial,
    /// Verification outstanding with the registry.
    Verifying,
    /// Scores can be edited.
    EnteringScores,
    /// Waiting for the explicit confirmation.
    Confirming,
    /// Commit in flight.
    Submitting,
    /// Submission window closed for this cycle.
    Closed,
}

impl From<FormPhase> for VisibleFormPhase {
    fn from(value: FormPhase) -> Self {
        match value {
            FormPhase::EnteringSerial => VisibleFormPhase::EnteringSerial,
            FormPhase::Verifying => VisibleFormPhase::Verifying,
            FormPhase::EnteringScores => VisibleFormPhase::EnteringScores,
            FormPhase::Confirming => VisibleFormPhase::Confirming,
            FormPhase::Submitting => VisibleFormPhase::Submitting,
            FormPhase::Closed => VisibleFormPhase::Closed,
        }
    }
}

/// Submission window status exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GateStatusDto {
    /// Plays can still be entered.
    Open,
    /// The cutoff has passed.
    Closed,
}

impl From<GateStatus> for GateStatusDto {
    fn from(value: GateStatus) -> Self {
        match value {
            GateStatus::Open => GateStatusDto::Open,
            GateStatus::Closed => GateStatusDto::Closed,
        }
    }
}

/// Prediction scores with the derived totals.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct PredictionDto {
    /// Home team name.
    pub team_a: String,
    /// Away team name.
    pub team_b: String,
    /// First-half score for the home team.
    pub first_half_a: u8,
    /// First-half score for the away team.
    pub first_half_b: u8,
    /// Second-half score for the home team.
    pub second_half_a: u8,
    /// Second-half score for the away team.
    pub second_half_b: u8,
    /// Derived full-time score for the home team.
    pub final_a: u8,
    /// Derived full-time score for the away team.
    pub final_b: u8,
}

impl From<&MatchPrediction> for PredictionDto {
    fn from(value: &MatchPrediction) -> Self {
        Self {
            team_a: value.team_a().to_owned(),
            team_b: value.team_b().to_owned(),
            first_half_a: value.first_half(TeamSide::A),
            first_half_b: value.first_half(TeamSide::B),
            second_half_a: value.second_half(TeamSide::A),
            second_half_b: value.second_half(TeamSide::B),
            final_a: value.final_score(TeamSide::A),
            final_b: value.final_score(TeamSide::B),
        }
    }
}

/// Snapshot of the working form, enough for a client to render the
/// three-step flow.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormSnapshot {
    /// Current workflow phase.
    pub phase: VisibleFormPhase,
    /// Serial text last submitted for verification.
    pub serial_entry: String,
    /// Serial accepted by the registry, if any.
    pub verified_serial: Option<String>,
    /// Working prediction with derived totals.
    pub prediction: PredictionDto,
    /// Submission window status at snapshot time.
    pub gate: GateStatusDto,
}

impl FormSnapshot {
    /// Snapshot the form together with the gate status observed alongside it.
    pub fn capture(form: &PredictionForm, gate: GateStatus) -> Self {
        Self {
            phase: form.phase().into(),
            serial_entry: form.serial_entry().to_owned(),
            verified_serial: form.verified_serial().map(str::to_owned),
            prediction: form.prediction().into(),
            gate: gate.into(),
        }
    }
}

/// Result of a score edit: whether it was applied, plus the updated form.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreEditResponse {
    /// Whether the edit changed the prediction. Out-of-range and non-numeric
    /// input comes back as `false` with the form unchanged.
    pub applied: bool,
    /// Form state after the edit.
    pub form: FormSnapshot,
}

/// Committed play receipt.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayDto {
    /// Unique play identifier.
    pub id: Uuid,
    /// Serial code the play was committed under.
    pub serial_number: String,
    /// Prediction snapshot at commit time.
    pub prediction: PredictionDto,
    /// Commit timestamp, RFC 3339.
    pub timestamp: String,
    /// Owner the receipt belongs to.
    pub user_email: String,
}

impl From<&Play> for PlayDto {
    fn from(value: &Play) -> Self {
        Self {
            id: value.id(),
            serial_number: value.serial_number().to_owned(),
            prediction: value.prediction().into(),
            timestamp: format_system_time(value.timestamp()),
            user_email: value.user_email().to_owned(),
        }
    }
}
