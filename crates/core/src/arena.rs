//! Arena module - the persistent grid of locked cells
//!
//! Cells are stored in a flat row-major vector (`y * width + x`). Row 0 is the
//! top row. Dimensions are fixed when the arena is built; clearing rows and
//! collapsing the stack never changes the row count or the row width.

use tracing::debug;

use crate::error::CoreError;
use crate::piece::ActivePiece;
use crate::types::{Cell, EMPTY};

/// The locked-cell grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Arena {
    /// Create an empty arena. Both dimensions must be positive and fit in an `i16`.
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        let limit = i16::MAX as usize;
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(CoreError::InvalidConfiguration { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        })
    }

    /// Build an arena from explicit rows (all rows must have the same, nonzero length)
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, CoreError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(CoreError::InvalidConfiguration { width, height });
        }

        let mut arena = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            arena.row_mut(y).copy_from_slice(row.as_ref());
        }
        Ok(arena)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and nonzero)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Cells of one row. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Zero-fill a row
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        self.row_mut(y).fill(EMPTY);
    }

    /// Slide every row above `y` down by one into `y`, then zero-fill row 0
    pub fn collapse_above(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;
        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.row_mut(0).fill(EMPTY);
    }

    /// Clear every full row and collapse the stack above it.
    ///
    /// One forward pass from the top; a cleared index is not revisited. Returns
    /// the number of rows cleared.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.clear_row(y);
                self.collapse_above(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Write the piece's occupied cells into the arena, then clear completed lines.
    ///
    /// No collision check happens here; cells that fall outside the arena are
    /// dropped. Returns the number of rows cleared.
    pub fn merge(&mut self, piece: &ActivePiece) -> usize {
        let anchor = piece.anchor();
        let mask = piece.mask();
        for (x, y) in mask.cells() {
            let value = mask.get(x as usize, y as usize);
            self.set(anchor.x + x, anchor.y + y, value);
        }

        let cleared = self.clear_completed_lines();
        debug!(
            kind = piece.kind().as_str(),
            x = anchor.x,
            y = anchor.y,
            cleared,
            "piece merged"
        );
        cleared
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Flat row-major view of the cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }
}
