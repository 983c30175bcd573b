//! Terminal rendering for the falling-block game.
//!
//! Rendering is split in two: [`GameView`] turns a read-only core `Frame` into
//! a [`FrameBuffer`] (pure, testable), and [`TerminalRenderer`] flushes that
//! framebuffer to the terminal with crossterm.
//!
//! Each arena cell is drawn 2 characters wide by default to make up for the
//! usual terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
