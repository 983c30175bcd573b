//! GameView: maps a core [`Frame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::Mask;
use crate::core::{Arena, Frame};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, Pos, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the arena.
pub struct GameView {
    /// Arena cell width in terminal columns.
    cell_w: u16,
    /// Arena cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Board placement inside the viewport
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, frame: &Frame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let arena = frame.arena;
        let board_px_w = (arena.width() as u16).saturating_mul(self.cell_w);
        let board_px_h = (arena.height() as u16).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);
        let layout = Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        fb.fill_rect(layout.start_x + 1, layout.start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, layout);

        // Locked cells.
        for (y, row) in arena.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == EMPTY {
                    self.draw_empty_cell(fb, layout, x as u16, y as u16);
                } else {
                    self.draw_block(fb, layout, x as u16, y as u16, cell);
                }
            }
        }

        // Ghost below the active piece.
        let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
        for (x, y, _) in visible_cells(arena, frame.ghost.mask, frame.ghost.anchor) {
            self.fill_cell_rect(fb, layout, x, y, '░', ghost_style);
        }

        // Active piece on top.
        for (x, y, cell) in visible_cells(arena, frame.active.mask(), frame.active.anchor()) {
            self.draw_block(fb, layout, x, y, cell);
        }

        self.draw_side_panel(fb, frame, viewport, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout) {
        let Layout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell_rect(fb, layout, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, cell: Cell) {
        let style = CellStyle::new(block_color(cell), PLAYFIELD_BG).bold();
        self.fill_cell_rect(fb, layout, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = (layout.start_x + 1).saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = (layout.start_y + 1).saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame<'_>,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, frame.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, frame.lines_cleared, value);
        y = y.saturating_add(2);

        let dim = value.dim();
        for line in ["←/→ move", "↑ rotate", "↓ soft drop", "space drop", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }
}

/// Mask cells that land inside the arena, in arena coordinates, with their values
fn visible_cells<'a>(
    arena: &'a Arena,
    mask: &'a Mask,
    anchor: Pos,
) -> impl Iterator<Item = (u16, u16, Cell)> + 'a {
    mask.cells().filter_map(move |(dx, dy)| {
        let x = anchor.x + dx;
        let y = anchor.y + dy;
        if arena.is_out_of_bounds(x, y) {
            return None;
        }
        Some((x as u16, y as u16, mask.get(dx as usize, dy as usize)))
    })
}

fn block_color(cell: Cell) -> Rgb {
    match PieceKind::from_tag(cell) {
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        None => Rgb::new(200, 200, 200),
    }
}
