//! External serial registry boundary consumed by the play workflow.

use std::time::Duration;

use futures::future::BoxFuture;
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

/// Outcome of checking a serial code against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierDecision {
    /// The code is valid and unused.
    Verified,
    /// The registry declined the code.
    Rejected,
}

/// Abstraction over the external registry that vouches for serial codes.
///
/// The workflow never calls this with a blank code (that is rejected locally
/// first) and never has more than one verification outstanding per form.
pub trait SerialVerifier: Send + Sync {
    /// Check `serial` against the registry. May take observable latency.
    fn verify(&self, serial: &str) -> BoxFuture<'static, VerifierDecision>;
}

/// Stand-in registry that accepts every code after a short, jittered delay.
///
/// The real registry is an external system; until it is wired in, this
/// mirrors the original behavior of accepting any non-blank code.
#[derive(Debug, Clone)]
pub struct SimulatedVerifier {
    base_latency: Duration,
}

impl SimulatedVerifier {
    /// Verifier responding after roughly `base_latency`.
    pub fn new(base_latency: Duration) -> Self {
        Self { base_latency }
    }
}

impl SerialVerifier for SimulatedVerifier {
    fn verify(&self, serial: &str) -> BoxFuture<'static, VerifierDecision> {
        let serial = serial.to_owned();
        let jitter = rand::rng().random_range(0..250);
        let latency = self.base_latency + Duration::from_millis(jitter);
        Box::pin(async move {
            sleep(latency).await;
            debug!(%serial, latency_ms = latency.as_millis() as u64, "simulated registry accepted serial");
            VerifierDecision::Verified
        })
    }
}

#[cfg(test)]
pub use test_support::ScriptedVerifier;

#[cfg(test)]
mod test_support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::BoxFuture;

    use super::{SerialVerifier, VerifierDecision};

    /// Verifier returning a fixed decision immediately, for service tests.
    /// Also counts how often it was consulted.
    #[derive(Debug, Clone)]
    pub struct ScriptedVerifier {
        decision: VerifierDecision,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedVerifier {
        /// Verifier that always answers with `decision`.
        pub fn always(decision: VerifierDecision) -> Self {
            Self {
                decision,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Number of verification requests received so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SerialVerifier for ScriptedVerifier {
        fn verify(&self, _serial: &str) -> BoxFuture<'static, VerifierDecision> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let decision = self.decision;
            Box::pin(async move { decision })
        }
    }
}
