//! Render snapshot - the read-only view handed to rendering hosts
//!
//! `GameSnapshot` is a plain `Copy` value: hosts get a fresh one after every
//! mutating operation and never reach back into the engine.

use serde::Serialize;

use crate::board::BoardRows;
use crate::game_state::ActivePiece;
use crate::pieces::{Shape, MAX_SHAPE_SIZE};
use crate::types::{GamePhase, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    /// Shape matrix, `size` x `size` in the top-left corner
    pub shape: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    pub size: u8,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Board coordinates of the piece's filled cells
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                (self.shape[row][col] != 0)
                    .then_some((self.x + col as i8, self.y + row as i8))
            })
        })
    }
}

fn shape_matrix(shape: &Shape) -> [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE] {
    let mut out = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for (dst, src) in out.iter_mut().zip(shape.rows()) {
        dst[..src.len()].copy_from_slice(src);
    }
    out
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: shape_matrix(&value.shape),
            size: value.shape.size() as u8,
            x: value.position.x,
            y: value.position.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: BoardRows,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<Position>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub phase: GamePhase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase.is_running()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            next: None,
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            phase: GamePhase::NotStarted,
        }
    }
}
