//! Keyed chat-history store shared by every session in the process.
//!
//! `HistoryStore` is a concurrent map backed by `DashMap`. Reads return
//! cloned snapshots so no `DashMap` guard is held across `.await` points.
//! Each entry records when it was last touched; [`HistoryStore::evict_idle`]
//! drops entries nobody has used within a TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use stayon_types::chat::ChatTurn;

#[derive(Debug)]
struct HistoryEntry {
    turns: Vec<ChatTurn>,
    last_access: Instant,
}

impl HistoryEntry {
    fn empty() -> Self {
        Self {
            turns: Vec::new(),
            last_access: Instant::now(),
        }
    }
}

/// Process-wide mapping from a history key to an ordered list of turns.
///
/// Cloning produces a shared view of the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    inner: Arc<DashMap<String, HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the history for `key`, creating an empty entry if absent.
    pub fn get_history(&self, key: &str) -> Vec<ChatTurn> {
        let mut entry = self
            .inner
            .entry(key.to_string())
            .or_insert_with(HistoryEntry::empty);
        entry.last_access = Instant::now();
        entry.turns.clone()
    }

    /// Replace the history for `key` with an empty list.
    pub fn reset_history(&self, key: &str) {
        self.inner.insert(key.to_string(), HistoryEntry::empty());
    }

    /// Reset the history for `key` and rebuild it from `turns`.
    pub fn replace_history(&self, key: &str, turns: Vec<ChatTurn>) {
        self.inner.insert(
            key.to_string(),
            HistoryEntry {
                turns,
                last_access: Instant::now(),
            },
        );
    }

    /// Append turns to the end of the history for `key`.
    pub fn append(&self, key: &str, turns: impl IntoIterator<Item = ChatTurn>) {
        let mut entry = self
            .inner
            .entry(key.to_string())
            .or_insert_with(HistoryEntry::empty);
        entry.turns.extend(turns);
        entry.last_access = Instant::now();
    }

    /// Drop the entry for `key`. Returns whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every entry idle for at least `ttl`. Returns how many were dropped.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        self.evict_idle_at(Instant::now(), ttl, |_| false)
    }

    /// Remove entries idle for at least `ttl` as of `now`, except keys for
    /// which `pinned` returns true.
    pub fn evict_idle_at(
        &self,
        now: Instant,
        ttl: Duration,
        pinned: impl Fn(&str) -> bool,
    ) -> usize {
        let before = self.inner.len();
        self.inner.retain(|key, entry| {
            pinned(key) || now.saturating_duration_since(entry.last_access) < ttl
        });
        before - self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_history_creates_empty_entry() {
        let store = HistoryStore::new();
        assert!(store.get_history("s1").is_empty());
        assert!(store.contains("s1"));
    }

    #[test]
    fn append_preserves_order() {
        let store = HistoryStore::new();
        store.append("s1", [ChatTurn::user("q1"), ChatTurn::assistant("a1")]);
        store.append("s1", [ChatTurn::user("q2")]);
        let history = store.get_history("s1");
        assert_eq!(
            history,
            vec![ChatTurn::user("q1"), ChatTurn::assistant("a1"), ChatTurn::user("q2")]
        );
    }

    #[test]
    fn reset_history_empties_entry() {
        let store = HistoryStore::new();
        store.append("s1", [ChatTurn::user("q1")]);
        store.reset_history("s1");
        assert!(store.get_history("s1").is_empty());
    }

    #[test]
    fn replace_history_does_not_append() {
        let store = HistoryStore::new();
        store.append("s1", [ChatTurn::user("old")]);
        store.replace_history("s1", vec![ChatTurn::assistant("loaded")]);
        assert_eq!(store.get_history("s1"), vec![ChatTurn::assistant("loaded")]);
    }

    #[test]
    fn keys_are_partitioned() {
        let store = HistoryStore::new();
        store.append("a", [ChatTurn::user("for a")]);
        assert!(store.get_history("b").is_empty());
        assert_eq!(store.get_history("a").len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = HistoryStore::new();
        let other = store.clone();
        other.append("s1", [ChatTurn::user("q")]);
        assert_eq!(store.get_history("s1").len(), 1);
    }

    #[test]
    fn remove_drops_entry() {
        let store = HistoryStore::new();
        store.append("s1", [ChatTurn::user("q")]);
        assert!(store.remove("s1"));
        assert!(!store.remove("s1"));
        assert!(store.is_empty());
    }

    #[test]
    fn evict_idle_drops_only_stale_entries() {
        let store = HistoryStore::new();
        store.append("stale", [ChatTurn::user("q")]);
        store.append("fresh", [ChatTurn::user("q")]);

        let later = Instant::now() + Duration::from_secs(120);
        // Touch "fresh" so it is newer than the cutoff relative to `later`.
        store
            .inner
            .get_mut("fresh")
            .unwrap()
            .last_access = later;

        let evicted = store.evict_idle_at(later, Duration::from_secs(60), |_| false);
        assert_eq!(evicted, 1);
        assert!(!store.contains("stale"));
        assert!(store.contains("fresh"));
    }

    #[test]
    fn pinned_entries_survive_eviction() {
        let store = HistoryStore::new();
        store.append("live", [ChatTurn::user("q")]);
        store.append("gone", [ChatTurn::user("q")]);

        let later = Instant::now() + Duration::from_secs(120);
        let evicted = store.evict_idle_at(later, Duration::from_secs(60), |key| key == "live");

        assert_eq!(evicted, 1);
        assert_eq!(store.get_history("live"), vec![ChatTurn::user("q")]);
        assert!(!store.contains("gone"));
    }

    #[test]
    fn evict_idle_keeps_recent_entries() {
        let store = HistoryStore::new();
        store.append("s1", [ChatTurn::user("q")]);
        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);
    }
}
