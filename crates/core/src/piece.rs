//! Active piece - the falling piece the player controls

use arrayvec::ArrayVec;

use crate::pieces::{Mask, MAX_MASK_SIZE};
use crate::types::{PieceKind, Pos};

/// Occupied cells of a piece in arena coordinates
pub type PieceCells = ArrayVec<Pos, { MAX_MASK_SIZE * MAX_MASK_SIZE }>;

/// Mutable piece state: its own mask copy and an anchor.
///
/// `translate` and `rotate_cw` never check anything; legality is decided by the
/// caller through [`crate::collision::collides`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    mask: Mask,
    anchor: Pos,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, mask: Mask, anchor: Pos) -> Self {
        Self { kind, mask, anchor }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn anchor(&self) -> Pos {
        self.anchor
    }

    /// Move the anchor by (dx, dy), unconditionally
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.anchor = self.anchor.offset(dx, dy);
    }

    /// Rotate the owned mask a quarter turn clockwise in place
    pub fn rotate_cw(&mut self) {
        self.mask = self.mask.rotated_cw();
    }

    /// Occupied cells at the current anchor
    pub fn cells(&self) -> PieceCells {
        self.mask
            .cells()
            .map(|(x, y)| self.anchor.offset(x, y))
            .collect()
    }
}
