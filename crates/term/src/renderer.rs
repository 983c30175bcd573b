//! TerminalRenderer: pushes framebuffers to a terminal through crossterm.
//!
//! The first frame after `enter`, a resize or `invalidate` is sent in full.
//! Later frames only send the runs of cells that changed since the last one.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns the terminal session. Output goes to stdout unless another sink is given.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// What the terminal currently shows
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor, no line wrap.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.shown = None;
        self.flush_scratch()
    }

    /// Restore the terminal to the state `enter` found it in.
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_scratch()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer writing escape sequences to `out` (no terminal mode changes)
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Make the next `draw` a full redraw (after a resize, for instance).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Send `fb` to the terminal.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match self.shown.as_mut() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(shown, fb, &mut self.scratch)?;
                shown.clone_from(fb);
            }
            _ => {
                encode_full_into(fb, &mut self.scratch)?;
                self.shown = Some(fb.clone());
            }
        }
        self.flush_scratch()
    }

    /// The sink, for inspection
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_scratch(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Escape-sequence writer that only switches style when it has to
struct Encoder<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Encoder<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            self.out
                .queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(color(style.fg)))?
                .queue(SetBackgroundColor(color(style.bg)))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a clear-screen plus every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut enc = Encoder::new(out);
    for y in 0..fb.height() {
        enc.move_to(0, y)?;
        for x in 0..fb.width() {
            enc.put(fb.get(x, y).unwrap_or_default())?;
        }
    }
    enc.finish()
}

/// Encode the cells of `next` that differ from `prev` into `out`.
///
/// Both frames must have the same size; a size mismatch redraws every row of `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = Encoder::new(out);
    let same_size = prev.width() == next.width() && prev.height() == next.height();

    for y in 0..next.height() {
        let runs = if same_size {
            row_runs(prev, next, y)
        } else {
            vec![(0, next.width())]
        };
        for (start, end) in runs {
            enc.move_to(start, y)?;
            for x in start..end {
                enc.put(next.get(x, y).unwrap_or_default())?;
            }
        }
    }
    enc.finish()
}

/// Half-open column ranges of row `y` where the two frames differ
fn row_runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<(u16, u16)> {
    let mut runs: Vec<(u16, u16)> = Vec::new();
    for x in 0..next.width() {
        if prev.get(x, y) == next.get(x, y) {
            continue;
        }
        match runs.last_mut() {
            Some((_, end)) if *end == x => *end = x + 1,
            _ => runs.push((x, x + 1)),
        }
    }
    runs
}
