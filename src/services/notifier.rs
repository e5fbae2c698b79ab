//! Receipt notification boundary, invoked once per committed play.

use tracing::info;

use crate::dao::play_store::Play;

/// Fire-and-forget collaborator told about each committed play.
///
/// The workflow guarantees exactly one call per successful commit; no return
/// value is consumed and failures are the implementation's concern.
pub trait ReceiptNotifier: Send + Sync {
    /// Deliver the receipt for a freshly committed play.
    fn notify(&self, play: &Play);
}

/// Default notifier that records the receipt in the log instead of sending
/// a real email.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReceiptNotifier;

impl ReceiptNotifier for LogReceiptNotifier {
    fn notify(&self, play: &Play) {
        info!(
            owner = %play.user_email(),
            play_id = %play.id(),
            serial = %play.serial_number(),
            "receipt sent to participant"
        );
    }
}

#[cfg(test)]
pub use test_support::RecordingNotifier;

#[cfg(test)]
mod test_support {
    use std::sync::Mutex;

    use uuid::Uuid;

    use super::{Play, ReceiptNotifier};

    /// Notifier that records every delivered receipt, for service tests.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        delivered: Mutex<Vec<Uuid>>,
    }

    impl RecordingNotifier {
        /// Ids of the plays notified so far, in delivery order.
        pub fn delivered(&self) -> Vec<Uuid> {
            self.delivered.lock().expect("notifier poisoned").clone()
        }
    }

    impl ReceiptNotifier for RecordingNotifier {
        fn notify(&self, play: &Play) {
            self.delivered
                .lock()
                .expect("notifier poisoned")
                .push(play.id());
        }
    }
}
