//! Collision oracle - the single authority on movement and rotation legality

use crate::arena::Arena;
use crate::pieces::Mask;
use crate::types::Pos;

/// True if any occupied mask cell at `anchor` lies outside the arena (in any
/// direction) or lands on an occupied arena cell.
pub fn collides(mask: &Mask, anchor: Pos, arena: &Arena) -> bool {
    mask.cells().any(|(x, y)| {
        let ax = anchor.x + x;
        let ay = anchor.y + y;
        arena.is_out_of_bounds(ax, ay) || arena.is_occupied(ax, ay)
    })
}
