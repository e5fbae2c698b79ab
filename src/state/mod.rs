//! Shared application state: the session, the working form and the gate.

/// Injectable time source.
pub mod clock;
/// Play-submission form state machine.
pub mod form;
/// Prediction value type with derived totals.
pub mod prediction;
/// Per-login session context.
pub mod session;
/// Submission window computation.
pub mod time_gate;

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::services::notifier::ReceiptNotifier;
use crate::services::verifier::SerialVerifier;
use crate::state::clock::Clock;
use crate::state::form::PredictionForm;
use crate::state::session::SessionContext;
use crate::state::time_gate::{GateStatus, TimeGate};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state for the single active session.
///
/// All mutation of the form and the play collection goes through the two
/// `RwLock`s, so operations within one session are sequential; the injected
/// collaborators make every time- and verifier-dependent path substitutable
/// in tests.
pub struct AppState {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    verifier: Arc<dyn SerialVerifier>,
    notifier: Arc<dyn ReceiptNotifier>,
    gate: TimeGate,
    form: RwLock<PredictionForm>,
    session: RwLock<Option<SessionContext>>,
}

impl AppState {
    /// Build the state for the configured fixture, wrapped in an [`Arc`].
    pub fn new(
        config: AppConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SerialVerifier>,
        notifier: Arc<dyn ReceiptNotifier>,
    ) -> SharedState {
        let gate = TimeGate::new(config.match_start());
        let form = PredictionForm::new(config.team_a(), config.team_b());
        Arc::new(Self {
            config,
            clock,
            verifier,
            notifier,
            gate,
            form: RwLock::new(form),
            session: RwLock::new(None),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }

    /// External serial registry collaborator.
    pub fn verifier(&self) -> &dyn SerialVerifier {
        self.verifier.as_ref()
    }

    /// Receipt notification collaborator.
    pub fn notifier(&self) -> &dyn ReceiptNotifier {
        self.notifier.as_ref()
    }

    /// Gate guarding the fixture's submission window.
    pub fn gate(&self) -> &TimeGate {
        &self.gate
    }

    /// Evaluate the submission window against the current instant.
    pub fn gate_status(&self) -> GateStatus {
        self.gate.evaluate(self.clock.now())
    }

    /// Working form for the current cycle.
    pub fn form(&self) -> &RwLock<PredictionForm> {
        &self.form
    }

    /// Currently active session, if a participant is logged in.
    pub fn session(&self) -> &RwLock<Option<SessionContext>> {
        &self.session
    }

    /// Re-evaluate the gate and lock the form if the window has closed.
    ///
    /// Called by the recurring poll task and on demand before
    /// state-sensitive form operations.
    pub async fn refresh_gate(&self) -> GateStatus {
        let status = self.gate_status();
        if status == GateStatus::Closed {
            let mut form = self.form.write().await;
            if form.apply_gate(GateStatus::Closed) {
                info!("submission window closed; play entry locked for this cycle");
            }
        }
        status
    }
}
