//! Game controller - owns the arena and the active piece and runs the game
//!
//! Flow per piece: spawn -> gravity ticks / player commands -> lock -> clear
//! lines -> spawn. Losing is not a state: when a freshly spawned piece already
//! overlaps the stack at the spawn row, the controller wipes the arena and
//! keeps playing.

use tracing::{info, trace};

use crate::arena::Arena;
use crate::collision::collides;
use crate::error::CoreError;
use crate::ghost::{project_ghost, GhostPiece};
use crate::piece::ActivePiece;
use crate::progression::Progression;
use crate::rng::PieceSpawner;
use crate::types::{Command, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_KICK_OFFSET, SPAWN_Y};

/// What to do with a rotation the kick search could not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Keep the rotated mask at the last kick position, even if it overlaps
    #[default]
    Permissive,
    /// Put the piece back the way it was
    Strict,
}

/// Result of a rotate command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The rotated piece fits; `kick` is the net horizontal shift applied
    Resolved { kick: i32 },
    /// No kick position fit
    Unresolved,
}

impl RotationOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, RotationOutcome::Resolved { .. })
    }
}

/// Construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub rotation_policy: RotationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
            rotation_policy: RotationPolicy::Permissive,
        }
    }
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub arena: &'a Arena,
    pub active: &'a ActivePiece,
    pub ghost: GhostPiece<'a>,
    pub level: u32,
    pub lines_cleared: u32,
}

/// The whole simulation state
#[derive(Debug, Clone)]
pub struct GameController {
    arena: Arena,
    active: ActivePiece,
    spawner: PieceSpawner,
    progress: Progression,
    rotation_policy: RotationPolicy,
    drop_counter_ms: f64,
    last_tick_ms: u64,
    /// Number of automatic restarts so far
    episode: u32,
    pieces_spawned: u64,
}

impl GameController {
    /// Create a game and spawn its first piece
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let arena = Arena::new(settings.width, settings.height)?;
        let mut spawner = PieceSpawner::new(settings.seed, settings.width);
        let active = spawner.next();

        Ok(Self {
            arena,
            active,
            spawner,
            progress: Progression::new(),
            rotation_policy: settings.rotation_policy,
            drop_counter_ms: 0.0,
            last_tick_ms: 0,
            episode: 0,
            pieces_spawned: 1,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the arena (puzzle setups and tests)
    #[doc(hidden)]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// Replace the active piece (puzzle setups and tests)
    #[doc(hidden)]
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.progress.lines_cleared()
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.progress.drop_interval_ms()
    }

    pub fn drop_counter_ms(&self) -> f64 {
        self.drop_counter_ms
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation_policy
    }

    /// Where the active piece would land
    pub fn ghost(&self) -> GhostPiece<'_> {
        project_ghost(&self.active, &self.arena)
    }

    /// Everything the renderer needs for one frame
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            arena: &self.arena,
            active: &self.active,
            ghost: self.ghost(),
            level: self.progress.level(),
            lines_cleared: self.progress.lines_cleared(),
        }
    }

    fn active_collides(&self) -> bool {
        collides(self.active.mask(), self.active.anchor(), &self.arena)
    }

    /// Advance the clock to `now_ms`. Returns true if gravity fired.
    ///
    /// Timestamps are expected to be monotonic; a timestamp earlier than the
    /// previous one counts as zero elapsed time.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let dt = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;
        self.drop_counter_ms += dt as f64;

        if self.drop_counter_ms >= self.drop_interval_ms() {
            self.soft_drop();
            self.drop_counter_ms = 0.0;
            return true;
        }

        false
    }

    /// Apply an input command. Returns true if the piece moved, rotated or locked.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(-1),
            Command::MoveRight => self.move_piece(1),
            Command::SoftDrop => {
                self.soft_drop();
                true
            }
            Command::Rotate => {
                let before = self.active;
                self.rotate();
                self.active != before
            }
            Command::HardDrop => {
                self.hard_drop();
                true
            }
        }
    }

    /// Shift one column left (negative) or right (positive); reverted on collision
    pub fn move_piece(&mut self, direction: i32) -> bool {
        let dx = direction.signum();
        self.active.translate(dx, 0);

        if self.active_collides() {
            self.active.translate(-dx, 0);
            return false;
        }

        true
    }

    /// Rotate clockwise, then search for a fitting horizontal kick.
    ///
    /// Kicks alternate right and left with growing steps (+1, -2, +3, -4, +5),
    /// each step taken from the previous attempt, so the net shifts tried are
    /// +1, -1, +2, -2, +3.
    pub fn rotate(&mut self) -> RotationOutcome {
        let before = self.active;
        self.active.rotate_cw();

        if !self.active_collides() {
            return RotationOutcome::Resolved { kick: 0 };
        }

        let mut direction = 1;
        let mut offset = 1;
        while offset <= MAX_KICK_OFFSET {
            self.active.translate(direction * offset, 0);
            if !self.active_collides() {
                let kick = self.active.anchor().x - before.anchor().x;
                return RotationOutcome::Resolved { kick };
            }
            offset += 1;
            direction = -direction;
        }

        trace!(
            kind = self.active.kind().as_str(),
            x = self.active.anchor().x,
            y = self.active.anchor().y,
            policy = ?self.rotation_policy,
            "rotation left unresolved"
        );
        if self.rotation_policy == RotationPolicy::Strict {
            self.active = before;
        }
        RotationOutcome::Unresolved
    }

    /// Move down one row, or lock if that is blocked. Returns true if the piece moved.
    ///
    /// Gravity and the soft-drop command share this path; both reset the drop counter.
    pub fn soft_drop(&mut self) -> bool {
        self.active.translate(0, 1);
        let moved = if self.active_collides() {
            self.active.translate(0, -1);
            self.lock();
            false
        } else {
            true
        };

        self.drop_counter_ms = 0.0;
        moved
    }

    /// Drop straight down and lock. Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        let mut distance: u32 = 0;
        while !self.active_collides() {
            self.active.translate(0, 1);
            distance += 1;
        }

        if !self.check_game_over() {
            self.active.translate(0, -1);
            self.lock();
        }

        self.drop_counter_ms = 0.0;
        distance.saturating_sub(1)
    }

    /// Merge the active piece, clear lines and bring in the next piece.
    /// Returns the number of rows cleared.
    ///
    /// This is the only place a regular spawn happens.
    pub fn lock(&mut self) -> usize {
        let cleared = self.arena.merge(&self.active);
        self.progress.record_lines(cleared);

        self.spawn_next();
        self.check_game_over();
        cleared
    }

    fn spawn_next(&mut self) {
        self.active = self.spawner.next();
        self.pieces_spawned += 1;
    }

    /// Restart if the active piece sits on the spawn row and already overlaps.
    /// Returns true if a restart happened.
    fn check_game_over(&mut self) -> bool {
        if self.active.anchor().y == SPAWN_Y && self.active_collides() {
            self.restart();
            return true;
        }
        false
    }

    /// Empty arena, level 1, base speed, fresh piece. Cleared-line total is kept.
    pub fn restart(&mut self) {
        info!(
            episode = self.episode,
            level = self.progress.level(),
            lines = self.progress.lines_cleared(),
            "game over, restarting"
        );

        self.arena.clear();
        self.progress.reset();
        self.drop_counter_ms = 0.0;
        self.episode = self.episode.wrapping_add(1);
        self.spawn_next();
    }
}
