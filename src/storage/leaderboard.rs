use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorConversion, Result};
use crate::storage::{KvStore, LEADERBOARD_KEY};

/// Stored entries are capped across all board sizes, the displayed
/// top list is capped per board size
pub const STORED_CAP: usize = 50;
pub const DISPLAY_CAP: usize = 10;

pub const MAX_NAME_LEN: usize = 16;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub score: u32,
    /// Board-size bucket, e.g. "10x10"
    pub board_size: String,
    /// ISO-8601 creation timestamp
    pub date: String,
}

impl Entry {
    pub fn new(name: &str, score: u32, board_size: String) -> Self {
        Self {
            name: name.chars().take(MAX_NAME_LEN).collect(),
            score,
            board_size,
            date: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    /// Corrupt or missing data degrades to an empty leaderboard
    pub fn load(store: &impl KvStore) -> Self {
        let entries = match store.read(LEADERBOARD_KEY) {
            None => vec![],
            Some(json) => match serde_json::from_str(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("warning: discarding corrupt leaderboard: {e}");
                    vec![]
                }
            },
        };
        Self { entries }
    }

    /// Insert, re-sort descending by score, truncate to the stored cap.
    /// Ties keep insertion order (older entries rank higher).
    pub fn record(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(STORED_CAP);
    }

    pub fn top_n(&self, board_size_key: &str, n: usize) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.board_size == board_size_key)
            .sorted_by(|a, b| b.score.cmp(&a.score))
            .take(n)
            .collect()
    }

    pub fn best(&self, board_size_key: &str) -> Option<u32> {
        self.top_n(board_size_key, 1).first().map(|entry| entry.score)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn persist(&self, store: &mut impl KvStore) -> Result {
        let json = serde_json::to_string(&self.entries).map_err(crate::error::Error::from)?;
        store.write(LEADERBOARD_KEY, &json).with_trace_step("Leaderboard::persist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mem::MemStore;

    fn entry(score: u32, size: &str) -> Entry {
        Entry::new("tester", score, size.to_owned())
    }

    #[test]
    fn top_list_is_capped_and_sorted() {
        let mut lb = Leaderboard { entries: vec![] };
        for score in [30, 10, 80, 20, 50, 60, 40, 90, 70, 0, 55] {
            lb.record(entry(score, "10x10"));
        }

        let top = lb.top_n("10x10", DISPLAY_CAP);
        assert_eq!(top.len(), DISPLAY_CAP);
        assert_eq!(top[0].score, 90);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn buckets_are_independent(){
        let mut lb = Leaderboard { entries: vec![] };
        lb.record(entry(10, "5x5"));
        lb.record(entry(20, "10x10"));
        lb.record(entry(30, "5x5"));

        assert_eq!(lb.best("5x5"), Some(30));
        assert_eq!(lb.best("10x10"), Some(20));
        assert_eq!(lb.best("15x15"), None);
        assert_eq!(lb.top_n("5x5", DISPLAY_CAP).len(), 2);
    }

    #[test]
    fn stored_entries_are_capped() {
        let mut lb = Leaderboard { entries: vec![] };
        for score in 0..60 {
            lb.record(entry(score, "10x10"));
        }
        assert_eq!(lb.entries.len(), STORED_CAP);
        // the lowest scores were pruned
        assert!(lb.entries.iter().all(|e| e.score >= 10));
    }

    #[test]
    fn round_trip_through_store() {
        let mut store = MemStore::default();
        let mut lb = Leaderboard { entries: vec![] };
        lb.record(entry(42, "10x10"));
        lb.persist(&mut store).unwrap();

        let loaded = Leaderboard::load(&store);
        assert_eq!(loaded.entries, lb.entries);
    }

    #[test]
    fn corrupt_store_degrades_to_empty() {
        let mut store = MemStore::default();
        store.write(LEADERBOARD_KEY, "{not json!").unwrap();
        let lb = Leaderboard::load(&store);
        assert!(lb.entries.is_empty());
    }

    #[test]
    fn missing_store_degrades_to_empty() {
        let store = MemStore::default();
        assert!(Leaderboard::load(&store).entries.is_empty());
    }

    #[test]
    fn names_are_truncated() {
        let e = Entry::new("a-very-long-nickname-indeed", 1, "5x5".to_owned());
        assert_eq!(e.name.chars().count(), MAX_NAME_LEN);
    }
}
