//! Core game logic - deterministic and free of UI or platform concerns
//!
//! This crate holds the rules of the game: the board, the seven pieces and their
//! rotation, scoring and levels, and the [`GameEngine`] state machine that ties
//! them together. Durable storage is injected through the [`Storage`] trait;
//! rendering hosts read a [`GameSnapshot`] and never reach into the engine.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision detection and line clearing
//! - [`pieces`]: shape matrices, clockwise rotation, wall kicks
//! - [`rng`]: seedable uniform piece generator
//! - [`scoring`]: line clear and hard drop points, levels, gravity interval
//! - [`game_state`]: the engine itself
//! - [`snapshot`]: render snapshot for hosts
//! - [`persist`]: storage trait and the saved-game format
//! - [`leaderboard`]: top 10 scores
//! - [`config`]: environment-driven engine settings
//!
//! # Game Rules
//!
//! - Pieces spawn at column 3, row 0 and are drawn uniformly at random
//! - Rotation is clockwise only, with horizontal kicks of +1, -1, +2, -2 columns
//! - Clearing 1-4 lines scores 100/300/500/800 times the level before the clear
//! - Hard drop scores 2 points per row travelled
//! - Level is `lines / 10 + 1`; gravity is `1000 / level` ms
//! - One hold per lock
//! - The game ends when the top row is filled or a new piece has no room
//!
//! # Example
//!
//! ```
//! use blocktris_core::{EngineConfig, GameEngine};
//! use blocktris_core::types::{GameAction, GamePhase};
//!
//! let mut game = GameEngine::in_memory(EngineConfig::seeded(12345));
//! game.reset();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.phase(), GamePhase::Running);
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod leaderboard;
pub mod persist;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardRows};
pub use config::EngineConfig;
pub use game_state::{ActivePiece, GameEngine, LockEvent};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use persist::{
    MemoryStorage, PersistedSnapshot, SnapshotError, Storage, StorageError, LEADERBOARD_KEY,
    SNAPSHOT_KEY,
};
pub use pieces::{try_rotate, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
