//! Append-only, per-session collection of committed plays.

use std::time::SystemTime;

use uuid::Uuid;

use crate::state::prediction::MatchPrediction;

/// Committed, immutable prediction receipt for one serial code and one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    id: Uuid,
    serial_number: String,
    prediction: MatchPrediction,
    timestamp: SystemTime,
    user_email: String,
}

impl Play {
    /// Unique identifier assigned at commit time.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Serial code the play was committed under.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Prediction snapshot taken at commit time.
    pub fn prediction(&self) -> &MatchPrediction {
        &self.prediction
    }

    /// Commit timestamp assigned by the store.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Owner key the play is visible to.
    pub fn user_email(&self) -> &str {
        &self.user_email
    }
}

/// Ordered collection of plays, newest first, scoped to one session.
///
/// Commit timestamps are monotonic non-decreasing: if the wall clock steps
/// backwards between commits the new play reuses the previous timestamp, so
/// insertion order and timestamp order always coincide.
#[derive(Debug, Default)]
pub struct PlayStore {
    plays: Vec<Play>,
    last_commit: Option<SystemTime>,
}

impl PlayStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a play. Always succeeds: a fresh unique id is assigned and the
    /// play is prepended so listings come out newest first.
    pub fn create(
        &mut self,
        serial_number: String,
        prediction: MatchPrediction,
        user_email: String,
        now: SystemTime,
    ) -> Play {
        let timestamp = match self.last_commit {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_commit = Some(timestamp);

        let play = Play {
            id: Uuid::new_v4(),
            serial_number,
            prediction,
            timestamp,
            user_email,
        };
        self.plays.insert(0, play.clone());
        play
    }

    /// All plays owned by `owner_email`, in store order (newest first). An
    /// empty result is not an error.
    pub fn list_for(&self, owner_email: &str) -> Vec<Play> {
        self.plays
            .iter()
            .filter(|play| play.user_email == owner_email)
            .cloned()
            .collect()
    }

    /// Number of committed plays across all owners.
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    /// Whether the store holds no plays at all.
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Drop every play. Invoked wholesale on logout or a new registration.
    pub fn clear(&mut self) {
        self.plays.clear();
        self.last_commit = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    fn prediction() -> MatchPrediction {
        MatchPrediction::new("Atlético Tucumán", "San Martín")
    }

    fn t(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn listing_is_newest_first_and_idempotent() {
        let mut store = PlayStore::new();
        let first = store.create("S-1".into(), prediction(), "ana@example.com".into(), t(100));
        let second = store.create("S-2".into(), prediction(), "ana@example.com".into(), t(200));

        let listed = store.list_for("ana@example.com");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), second.id());
        assert_eq!(listed[1].id(), first.id());
        assert!(listed[0].timestamp() >= listed[1].timestamp());

        assert_eq!(store.list_for("ana@example.com"), listed);
    }

    #[test]
    fn owners_only_see_their_own_plays() {
        let mut store = PlayStore::new();
        store.create("S-1".into(), prediction(), "ana@example.com".into(), t(100));

        assert!(store.list_for("bruno@example.com").is_empty());
        assert_eq!(store.list_for("ana@example.com").len(), 1);
    }

    #[test]
    fn ids_are_unique_across_commits() {
        let mut store = PlayStore::new();
        let a = store.create("S-1".into(), prediction(), "ana@example.com".into(), t(100));
        let b = store.create("S-1".into(), prediction(), "ana@example.com".into(), t(100));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn timestamps_never_decrease_even_if_the_clock_does() {
        let mut store = PlayStore::new();
        let first = store.create("S-1".into(), prediction(), "ana@example.com".into(), t(500));
        let second = store.create("S-2".into(), prediction(), "ana@example.com".into(), t(400));

        assert_eq!(second.timestamp(), first.timestamp());
        assert!(store.list_for("ana@example.com")[0].timestamp() >= first.timestamp());
    }

    #[test]
    fn clear_empties_the_store_wholesale() {
        let mut store = PlayStore::new();
        store.create("S-1".into(), prediction(), "ana@example.com".into(), t(100));
        store.clear();

        assert!(store.is_empty());
        assert!(store.list_for("ana@example.com").is_empty());
    }
}
