//! High score leaderboard
//!
//! Persisted under [`LEADERBOARD_KEY`] in the same storage as the saved game,
//! tracks the top 10 scores.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::persist::{SnapshotError, Storage, LEADERBOARD_KEY};

/// Maximum number of entries kept
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Unix timestamp (ms) of the submission
    pub created_at_ms: u64,
}

/// Top scores, sorted by descending score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a score. Returns the 1-based rank, or `None` when the name is
    /// blank or the score does not qualify.
    pub fn submit(
        &mut self,
        name: &str,
        score: u32,
        level: u32,
        lines: u32,
        created_at_ms: u64,
    ) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() || !self.qualifies(score) {
            return None;
        }

        // Equal scores keep submission order.
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            LeaderboardEntry {
                name: name.to_string(),
                score,
                level,
                lines,
                created_at_ms,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }

    /// Load from storage, starting fresh if nothing usable is stored
    pub fn load(storage: &impl Storage) -> Self {
        let json = match storage.get(LEADERBOARD_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Self::new(),
            Err(err) => {
                warn!("leaderboard unavailable: {err}");
                return Self::new();
            }
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(mut board) => {
                board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                board.entries.truncate(MAX_ENTRIES);
                info!("loaded {} leaderboard entries", board.entries.len());
                board
            }
            Err(err) => {
                warn!("discarding malformed leaderboard: {err}");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut impl Storage) -> Result<(), SnapshotError> {
        let json = serde_json::to_string(self)?;
        storage.set(LEADERBOARD_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStorage;

    #[test]
    fn test_zero_and_blank_do_not_qualify() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("ann", 0, 1, 0, 0), None);
        assert_eq!(board.submit("   ", 500, 1, 0, 0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_and_trimmed() {
        let mut board = Leaderboard::new();
        for i in 1..=12u32 {
            board.submit("p", i * 100, 1, i, i as u64);
        }
        assert_eq!(board.entries().len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(1200));
        assert_eq!(board.entries().last().map(|e| e.score), Some(300));
        assert!(!board.qualifies(300));
        assert!(board.qualifies(301));
    }

    #[test]
    fn test_rank_and_tie_order() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("a", 500, 1, 0, 1), Some(1));
        assert_eq!(board.submit("b", 900, 1, 0, 2), Some(1));
        assert_eq!(board.submit("c", 500, 1, 0, 3), Some(3));

        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut board = Leaderboard::new();
        board.submit(" zoe ", 1500, 2, 12, 42);
        board.save(&mut storage).unwrap();

        let loaded = Leaderboard::load(&storage);
        assert_eq!(loaded, board);
        assert_eq!(loaded.entries()[0].name, "zoe");
    }

    #[test]
    fn test_load_malformed_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.set(LEADERBOARD_KEY, "{oops").unwrap();
        assert!(Leaderboard::load(&storage).is_empty());
    }
}
