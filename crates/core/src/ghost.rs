//! Ghost projector - where the active piece would come to rest

use crate::arena::Arena;
use crate::collision::collides;
use crate::piece::ActivePiece;
use crate::pieces::Mask;
use crate::types::Pos;

/// Resting-position preview. Borrows the active piece's mask; never fed back
/// into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostPiece<'a> {
    pub mask: &'a Mask,
    pub anchor: Pos,
}

/// Project the piece down from row 0 in its current column.
///
/// The search starts at the top of the arena, not at the piece, and stops one
/// row above the first colliding position.
pub fn project_ghost<'a>(piece: &'a ActivePiece, arena: &Arena) -> GhostPiece<'a> {
    let mask = piece.mask();
    let mut anchor = Pos::new(piece.anchor().x, 0);
    let floor = arena.height() as i32;

    while anchor.y <= floor && !collides(mask, anchor, arena) {
        anchor = anchor.offset(0, 1);
    }

    GhostPiece {
        mask,
        anchor: anchor.offset(0, -1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog_mask;
    use crate::types::PieceKind;

    fn piece_at(kind: PieceKind, x: i32, y: i32) -> ActivePiece {
        ActivePiece::new(kind, catalog_mask(kind), Pos::new(x, y))
    }

    #[test]
    fn test_ghost_rests_on_floor() {
        let arena = Arena::new(12, 20).unwrap();
        let piece = piece_at(PieceKind::T, 4, 0);
        let ghost = project_ghost(&piece, &arena);
        // T occupies mask rows 0 and 1, so it rests with its anchor at row 18
        assert_eq!(ghost.anchor, Pos::new(4, 18));
        assert_eq!(piece.anchor(), Pos::new(4, 0));
    }

    #[test]
    fn test_ghost_stops_on_stack() {
        let mut arena = Arena::new(12, 20).unwrap();
        arena.set(5, 10, 1);
        let piece = piece_at(PieceKind::O, 4, 2);
        let ghost = project_ghost(&piece, &arena);
        assert_eq!(ghost.anchor, Pos::new(4, 8));
    }

    #[test]
    fn test_ghost_searches_from_top_not_from_piece() {
        let mut arena = Arena::new(12, 20).unwrap();
        // Shelf at row 3 above a piece that has already slipped past it.
        for x in 0..12 {
            if x != 0 {
                arena.set(x, 3, 1);
            }
        }
        let piece = piece_at(PieceKind::O, 4, 10);
        let ghost = project_ghost(&piece, &arena);
        assert_eq!(ghost.anchor, Pos::new(4, 1));
    }

    #[test]
    fn test_ghost_shares_mask() {
        let arena = Arena::new(12, 20).unwrap();
        let piece = piece_at(PieceKind::I, 4, 0);
        let ghost = project_ghost(&piece, &arena);
        assert!(std::ptr::eq(ghost.mask, piece.mask()));
        assert_eq!(ghost.anchor, Pos::new(4, 18));
    }
}
