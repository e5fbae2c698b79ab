//! Request and response types exposed over HTTP.

use std::time::SystemTime;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Health check payloads.
pub mod health;
/// Play workflow payloads (form snapshots, score edits, receipts).
pub mod play;
/// Session lifecycle payloads.
pub mod session;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
