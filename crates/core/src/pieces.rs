//! Pieces module - tetromino shape matrices and rotation with wall kicks
//!
//! Every piece is a small square matrix (2x2 for O, 4x4 for I, 3x3 for the
//! rest) whose filled cells carry the piece's cell code. Rotation is a plain
//! clockwise matrix turn; there is no per-orientation table.

use crate::types::{Cell, PieceKind, EMPTY_CELL, WALL_KICKS};

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a filled cell relative to the shape's top-left
pub type CellOffset = (i8, i8);

/// A square piece matrix of side [`Shape::size`], stored in a fixed 4x4 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from square rows. Rows longer than 4 are truncated.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Self {
        let size = rows.len().min(MAX_SHAPE_SIZE);
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (dst, src) in cells.iter_mut().zip(rows.iter().take(size)) {
            for (d, &s) in dst.iter_mut().zip(src.as_ref().iter().take(size)) {
                *d = s;
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Spawn orientation for a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        let c = kind.code();
        match kind {
            PieceKind::I => Self::from_rows(&[
                [0, 0, 0, 0],
                [c, c, c, c],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]),
            PieceKind::J => Self::from_rows(&[[0, 0, 0], [c, c, c], [0, 0, c]]),
            PieceKind::L => Self::from_rows(&[[0, 0, 0], [c, c, c], [c, 0, 0]]),
            PieceKind::O => Self::from_rows(&[[c, c], [c, c]]),
            PieceKind::S => Self::from_rows(&[[0, 0, 0], [0, c, c], [c, c, 0]]),
            PieceKind::T => Self::from_rows(&[[0, 0, 0], [c, c, c], [0, c, 0]]),
            PieceKind::Z => Self::from_rows(&[[0, 0, 0], [c, c, 0], [0, c, c]]),
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at `(row, col)`, empty outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.size() || col >= self.size() {
            return EMPTY_CELL;
        }
        self.cells[row][col]
    }

    /// Matrix rows (only the first `size` columns of each)
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Offsets `(dx, dy)` of every filled cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        let n = self.size();
        (0..n).flat_map(move |row| {
            (0..n).filter_map(move |col| {
                (self.cells[row][col] != EMPTY_CELL).then_some((col as i8, row as i8))
            })
        })
    }

    /// Number of filled cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// The matrix turned 90° clockwise: transpose, then reverse each row.
    ///
    /// `rotated[r][c] = self[n - 1 - c][r]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// Try to rotate a shape clockwise with wall kicks
///
/// The rotated shape is tried in place first, then shifted by each of
/// [`WALL_KICKS`] in order. `collides(shape, x, y)` decides legality.
/// Returns `Some((rotated_shape, kick_offset))` for the first legal placement,
/// `None` if every placement collides.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = shape.rotated_cw();

    std::iter::once((0, 0))
        .chain(WALL_KICKS)
        .find(|&(dx, dy)| !collides(&rotated, x + dx, y + dy))
        .map(|kick| (rotated, kick))
}
