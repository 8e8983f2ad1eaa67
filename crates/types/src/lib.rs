//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data: the core rules, the persisted save format and
//! any rendering host agree on these definitions.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), the top-left of the piece's shape matrix
//!
//! # Cell Codes
//!
//! Board cells store a small integer code rather than an enum so the grid can be
//! written straight into the save format:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | empty |
//! | 1 | I |
//! | 2 | J |
//! | 3 | L |
//! | 4 | O |
//! | 5 | S |
//! | 6 | T |
//! | 7 | Z |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.code(), 6);
//! assert_eq!(PieceKind::from_code(6), Some(PieceKind::T));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the shape matrix's left edge when a piece spawns
pub const SPAWN_X: i8 = 3;

/// Row of the shape matrix's top edge when a piece spawns
pub const SPAWN_Y: i8 = 0;

/// Gravity interval at level 1 (ms per row). Level `n` falls every `BASE_DROP_MS / n`.
pub const BASE_DROP_MS: u32 = 1000;

/// Cleared lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// Points are multiplied by the level in effect before the clear.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Horizontal offsets tried, in order, when a rotation is blocked in place
pub const WALL_KICKS: [(i8, i8); 4] = [(1, 0), (-1, 0), (2, 0), (-2, 0)];

/// A cell on the game board: 0 = empty, 1-7 = [`PieceKind::code`]
pub type Cell = u8;

/// Empty board cell
pub const EMPTY_CELL: Cell = 0;

/// The seven tetromino piece kinds
///
/// Declaration order matches the cell codes: `I` = 1 through `Z` = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in cell-code order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Board cell code for this kind (1-7)
    pub fn code(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Kind for a board cell code, `None` for empty or out-of-range codes
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_code(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_code(0), None);
    /// assert_eq!(PieceKind::from_code(8), None);
    /// ```
    pub fn from_code(code: Cell) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Display identity, the same letter the save format uses
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Board coordinate of a shape's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Fixed spawn position for every new piece
    pub const fn spawn() -> Self {
        Self::new(SPAWN_X, SPAWN_Y)
    }

    /// Position shifted by `(dx, dy)`
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Lifecycle of a single game
///
/// `NotStarted → Running ⇄ Paused → GameOver`; `GameOver` holds until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "notStarted",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }

    /// Whether movement operations are accepted
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }
}

/// Game actions that input handlers and timers may apply
///
/// This is the complete input surface of the engine: none of these carry
/// coordinates, every effect is derived from the engine's own state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Swap the active piece into the hold slot
    Hold,
    /// Toggle pause
    Pause,
    /// Start a fresh game
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// ```
    /// use blocktris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("holdPiece"), Some(GameAction::Hold));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" | "holdpiece" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "holdPiece",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
        }
    }
}
