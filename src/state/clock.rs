//! Injectable time source so window checks and commit timestamps are testable.

use std::time::SystemTime;

/// Source of the current instant consulted by the gate and the play store.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> SystemTime;
}

/// Production clock backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
pub use test_support::ManualClock;
