//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else. It
//! never touches the terminal, the clock or the keyboard: the caller supplies
//! timestamps and commands, and reads back a [`Frame`] to draw.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven catalog masks and the clockwise rotation
//! - [`rng`]: seeded LCG and the uniform [`PieceSpawner`]
//! - [`piece`]: the [`ActivePiece`] (owned mask + anchor)
//! - [`arena`]: the locked-cell grid, line clearing and the collapse cascade
//! - [`collision`]: the one predicate deciding every move and rotation
//! - [`ghost`]: landing-position preview
//! - [`progression`]: level and gravity interval
//! - [`controller`]: [`GameController`], which ties it all together
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each spawn picks one of seven shapes with equal odds
//! - **Rotation**: clockwise only, with a horizontal kick search of up to five steps
//! - **Gravity**: one row per second at level 1, `1000 * 0.9^level` ms after each level-up
//! - **Levels**: a level is gained when cumulative lines exceed `level * 5`
//! - **Losing**: a spawn that overlaps the stack restarts the game on the spot
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameController, Settings};
//! use blockfall_types::Command;
//!
//! let mut game = GameController::new(Settings::default()).unwrap();
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//! game.apply_command(Command::HardDrop);
//!
//! // The first piece is locked and a second one is in play.
//! assert_eq!(game.arena().occupied_count(), 4);
//! assert_eq!(game.pieces_spawned(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`GameController::tick`] once per frame with a monotonically increasing
//! timestamp in milliseconds. The controller only looks at the difference
//! between consecutive timestamps, so any frame cadence works.

pub mod arena;
pub mod collision;
pub mod controller;
pub mod error;
pub mod ghost;
pub mod piece;
pub mod pieces;
pub mod progression;
pub mod rng;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use arena::Arena;
pub use collision::collides;
pub use controller::{Frame, GameController, RotationOutcome, RotationPolicy, Settings};
pub use error::CoreError;
pub use ghost::{project_ghost, GhostPiece};
pub use piece::ActivePiece;
pub use pieces::{catalog_mask, Mask};
pub use progression::Progression;
pub use rng::{PieceSpawner, SimpleRng};
