//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of cell codes (0 = empty, 1-7 = piece kind).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! [`Board::collides`] is the single legality predicate every movement relies on.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row-major grid view used by snapshots and the save format
pub type BoardRows = [[Cell; WIDTH]; HEIGHT];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cell codes, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; BOARD_SIZE],
        }
    }

    /// Build a board from row-major rows
    ///
    /// Codes outside 0-7 are read as empty.
    pub fn from_rows(rows: &BoardRows) -> Self {
        let mut board = Self::new();
        for (dst, &src) in board.cells.iter_mut().zip(rows.iter().flatten()) {
            *dst = if Self::is_valid_code(src) { src } else { EMPTY_CELL };
        }
        board
    }

    /// Whether `cell` is empty or a piece code
    pub fn is_valid_code(cell: Cell) -> bool {
        cell == EMPTY_CELL || PieceKind::from_code(cell).is_some()
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or `cell` is not a valid code
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if !Self::is_valid_code(cell) {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// Whether `shape` placed with its top-left at `(x, y)` is illegal.
    ///
    /// A filled shape cell collides when it lands left of column 0, right of
    /// column 9, at or below row 20, or on an occupied board cell. Cells above the
    /// board (negative rows) only get the wall and floor checks.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.cells().any(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            bx < 0
                || bx >= BOARD_WIDTH as i8
                || by >= BOARD_HEIGHT as i8
                || (by >= 0 && self.is_occupied(bx, by))
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Check if any cell of a row is filled
    pub fn is_row_occupied(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .any(|&cell| cell != EMPTY_CELL)
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Remaining rows keep their relative order and settle at the bottom; the
    /// freed rows at the top come back empty. Uses a two-pointer pass with zero
    /// allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    let dst_start = write_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, dst_start);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(EMPTY_CELL);

        cleared_rows
    }

    /// Write the filled cells of `shape` at `(x, y)` using `code`.
    ///
    /// Cells that fall outside the board are skipped. Returns the number of
    /// cells written.
    pub fn lock_shape(&mut self, shape: &Shape, x: i8, y: i8, code: Cell) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.cells() {
            if self.set(x + dx, y + dy, code) {
                written += 1;
            }
        }
        written
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the grid into a row-major array
    pub fn write_rows(&self, out: &mut BoardRows) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    pub fn to_rows(&self) -> BoardRows {
        let mut rows = [[EMPTY_CELL; WIDTH]; HEIGHT];
        self.write_rows(&mut rows);
        rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
