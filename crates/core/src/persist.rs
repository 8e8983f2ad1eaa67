//! Persistence - storage capability and the saved-game format
//!
//! The engine never touches the filesystem. It is handed a [`Storage`]: a
//! string key-value store with one slot per key. [`MemoryStorage`] lives here
//! for tests and headless hosts; durable stores live in other crates.
//!
//! The saved game leaves out the falling piece. Loading spawns a
//! fresh one.

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardRows};
use crate::scoring::level_for_lines;
use crate::types::PieceKind;

/// Storage key of the single saved game
pub const SNAPSHOT_KEY: &str = "tetris-game-state";

/// Storage key of the leaderboard
pub const LEADERBOARD_KEY: &str = "tetris-leaderboard";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key `{key}`")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no saved game")]
    Missing,
    #[error("saved game is malformed")]
    Parse(#[from] serde_json::Error),
    #[error("saved board cell ({row}, {col}) holds invalid code {value}")]
    InvalidCell { row: usize, col: usize, value: u8 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Key-value durable store
///
/// Writing a key replaces its previous value; reading an absent key is `Ok(None)`.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saved game, stored as JSON under [`SNAPSHOT_KEY`]
///
/// ```json
/// {"board":[[0,0,...],...],"score":0,"linesCleared":0,"nextPiece":"T","heldPiece":null,"canHold":true,"level":1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub board: BoardRows,
    pub score: u32,
    pub lines_cleared: u32,
    pub next_piece: PieceKind,
    pub held_piece: Option<PieceKind>,
    pub can_hold: bool,
    /// Written for readers of the raw save; recomputed from `lines_cleared` on load
    #[serde(default, skip_deserializing)]
    pub level: u32,
}

impl PersistedSnapshot {
    pub fn new(
        board: &Board,
        score: u32,
        lines_cleared: u32,
        next_piece: PieceKind,
        held_piece: Option<PieceKind>,
        can_hold: bool,
    ) -> Self {
        Self {
            board: board.to_rows(),
            score,
            lines_cleared,
            next_piece,
            held_piece,
            can_hold,
            level: level_for_lines(lines_cleared),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a saved game
    ///
    /// The board must be exactly 20 rows of 10 cells (enforced by the array
    /// type) and every cell a valid code.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        snapshot.level = level_for_lines(snapshot.lines_cleared);
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for (row, cells) in self.board.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !Board::is_valid_code(value) {
                    return Err(SnapshotError::InvalidCell { row, col, value });
                }
            }
        }
        Ok(())
    }

    /// Read the saved game from `storage`
    pub fn load(storage: &impl Storage) -> Result<Self, SnapshotError> {
        let json = storage.get(SNAPSHOT_KEY)?.ok_or(SnapshotError::Missing)?;
        Self::from_json(&json)
    }

    /// Overwrite the saved game in `storage`
    pub fn store(&self, storage: &mut impl Storage) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        storage.set(SNAPSHOT_KEY, &json)?;
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::from_rows(&self.board)
    }
}
