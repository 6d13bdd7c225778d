//! Pieces module - tetromino shapes and naive pivot rotation
//!
//! Shapes are four cell offsets relative to a pivot at the origin (x right,
//! y down). Rotation turns every offset 90° around the pivot with
//! `(x, y) -> (-y, x)`. There are no wall kicks: a rotation either fits where
//! the piece is or it is rejected by the caller.

use crate::types::{PieceKind, SPAWN_ROW};

/// Offset of a single mino relative to the piece pivot
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the pivot
pub type PieceShape = [MinoOffset; 4];

/// Canonical (spawn) shape for a piece kind.
pub fn canonical_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::S => [(0, 0), (1, 0), (0, 1), (-1, 1)],
        PieceKind::T => [(-1, 0), (0, 0), (1, 0), (0, -1)],
        PieceKind::Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
    }
}

/// Rotate every offset 90° around the pivot.
///
/// Symmetric shapes such as O wobble around their geometric center instead of
/// staying in place; that is how this rotation behaves.
pub fn rotate_shape(shape: &PieceShape) -> PieceShape {
    shape.map(|(x, y)| (-y, x))
}

/// A falling piece: kind, pivot position on the board and current offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub shape: PieceShape,
}

impl Tetromino {
    /// Create a piece of `kind` with its canonical shape at (`spawn_x`, row 0).
    pub fn spawn(kind: PieceKind, spawn_x: i8) -> Self {
        Self {
            kind,
            x: spawn_x,
            y: SPAWN_ROW,
            shape: canonical_shape(kind),
        }
    }

    /// Candidate offsets after one rotation. Does not modify the piece.
    pub fn rotated(&self) -> PieceShape {
        rotate_shape(&self.shape)
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.kind.color()
    }
}
