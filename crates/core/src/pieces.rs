//! Pieces module - the piece catalog and square cell masks
//!
//! Every shape is padded to a square bounding box (2x2 for O, 4x4 for I, 3x3 for
//! the rest) so a clockwise rotation is a uniform transpose followed by a
//! reversal of each row.

use crate::types::{Cell, PieceKind, EMPTY};

/// Largest mask edge in the catalog
pub const MAX_MASK_SIZE: usize = 4;

/// Square grid of cells describing a piece.
///
/// Storage is always 4x4; only the top-left `size x size` block is meaningful.
/// The type is `Copy`, so every piece owns its own mask and rotating it can never
/// touch the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    size: u8,
    cells: [[Cell; MAX_MASK_SIZE]; MAX_MASK_SIZE],
}

impl Mask {
    /// Build a mask from square rows.
    ///
    /// The edge is `rows.len()` capped at 4. Longer rows are cut to the edge and
    /// shorter ones padded with empty cells.
    pub(crate) fn from_rows(rows: &[&[Cell]]) -> Self {
        let size = rows.len().min(MAX_MASK_SIZE);

        let mut cells = [[EMPTY; MAX_MASK_SIZE]; MAX_MASK_SIZE];
        for (dst, row) in cells.iter_mut().zip(rows) {
            let n = row.len().min(size);
            dst[..n].copy_from_slice(&row[..n]);
        }

        Self {
            size: size as u8,
            cells,
        }
    }

    /// Edge length of the square
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell value at (x, y); 0 outside the square
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Offsets of every occupied (nonzero) cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| (self.cells[y][x] != EMPTY).then_some((x as i32, y as i32)))
        })
    }

    /// Rows of the meaningful block, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Clockwise quarter turn: transpose, then reverse each row
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY; MAX_MASK_SIZE]; MAX_MASK_SIZE];

        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[x][y];
            }
            row[..n].reverse();
        }

        Self {
            size: self.size,
            cells,
        }
    }

    /// Copy with every occupied cell set to `tag`
    pub fn painted(&self, tag: Cell) -> Self {
        let mut out = *self;
        for row in out.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell != EMPTY {
                    *cell = tag;
                }
            }
        }
        out
    }
}

/// Get the catalog mask (0/1 cells) for a piece kind
pub fn catalog_mask(kind: PieceKind) -> Mask {
    match kind {
        PieceKind::T => Mask::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::S => Mask::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::Z => Mask::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Mask::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::J => Mask::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::O => Mask::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::I => Mask::from_rows(&[
            &[0, 0, 0, 0],
            &[1, 1, 1, 1],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        for kind in PieceKind::ALL {
            let expected = match kind {
                PieceKind::O => 2,
                PieceKind::I => 4,
                _ => 3,
            };
            assert_eq!(catalog_mask(kind).size(), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_catalog_piece_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(catalog_mask(kind).cells().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_from_rows_clips_ragged_input() {
        let ragged: [&[Cell]; 3] = [&[1, 1, 1], &[1], &[0, 1, 0, 1]];
        let mask = Mask::from_rows(&ragged);
        assert_eq!(mask.size(), 3);
        assert_eq!(mask, Mask::from_rows(&[&[1, 1, 1], &[1, 0, 0], &[0, 1, 0]]));

        let big = Mask::from_rows(&[&[1], &[1], &[1], &[1], &[1]]);
        assert_eq!(big.size(), MAX_MASK_SIZE);
        assert_eq!(big.cells().count(), 4);
    }

    #[test]
    fn test_rotate_t() {
        let rotated = catalog_mask(PieceKind::T).rotated_cw();
        let expected = Mask::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let mask = catalog_mask(kind);
            let back = mask.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, mask, "{:?}", kind);
        }
    }

    #[test]
    fn test_painted_keeps_shape() {
        let mask = catalog_mask(PieceKind::S).painted(9);
        let cells: Vec<_> = mask.cells().collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
        assert!(cells.iter().all(|&(x, y)| mask.get(x as usize, y as usize) == 9));
    }

    #[test]
    fn test_get_outside_square_is_empty() {
        let mask = catalog_mask(PieceKind::O);
        assert_eq!(mask.get(2, 0), EMPTY);
        assert_eq!(mask.get(0, 3), EMPTY);
    }
}
