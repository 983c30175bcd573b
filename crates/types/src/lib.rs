//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so the simulation core,
//! the input mapper and the terminal renderer can all agree on one vocabulary.
//!
//! # Arena Dimensions
//!
//! The default arena is 12 columns by 20 rows. Row 0 is the top row, column 0
//! the leftmost column. Dimensions are a construction parameter of the game
//! controller; the constants below are only defaults.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `LEVEL_SPEEDUP` | 0.9 | Interval multiplier per level (`1000 * 0.9^level`) |
//! | `LINES_PER_LEVEL` | 5 | Level rises once cleared lines exceed `level * 5` |
//! | `FRAME_MS` | 16 | Frame cadence used by the terminal runner |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind};
//!
//! let cmd = Command::from_str("hardDrop").unwrap();
//! assert_eq!(cmd, Command::HardDrop);
//! assert_eq!(Command::from_str("hold"), None);
//!
//! assert_eq!(PieceKind::from_tag(PieceKind::I.tag()), Some(PieceKind::I));
//! ```

/// Default arena width in cells
pub const DEFAULT_WIDTH: usize = 12;
/// Default arena height in cells
pub const DEFAULT_HEIGHT: usize = 20;

/// Spawn row for every new piece
pub const SPAWN_Y: i32 = 0;

/// Gravity interval at level 1 (milliseconds)
pub const BASE_DROP_MS: f64 = 1000.0;
/// Drop interval multiplier applied per level
pub const LEVEL_SPEEDUP: f64 = 0.9;
/// Level-up threshold factor: a level is gained once lines exceed `level * LINES_PER_LEVEL`
pub const LINES_PER_LEVEL: u32 = 5;

/// Largest horizontal kick tried after a colliding rotation
pub const MAX_KICK_OFFSET: i32 = 5;

/// Frame cadence of the terminal runner (milliseconds)
pub const FRAME_MS: u64 = 16;

/// A single arena cell: 0 is empty, anything else is occupied (the value is a piece tag)
pub type Cell = u8;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// Spawn column for an arena of the given width.
///
/// On the default 12-wide arena this is column 4.
pub fn spawn_x(width: usize) -> i32 {
    (width / 2).saturating_sub(2) as i32
}

/// Grid coordinate of a mask's top-left corner.
///
/// Signed: a piece anchor may sit left of or above the arena as long as its
/// occupied cells do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy)
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    S,
    Z,
    L,
    J,
    O,
    I,
}

impl PieceKind {
    /// All kinds in catalog order (index = uniform draw result)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Nonzero cell value written into the arena when this piece locks
    pub fn tag(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::S => 2,
            PieceKind::Z => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::O => 6,
            PieceKind::I => 7,
        }
    }

    /// Reverse of [`PieceKind::tag`]
    pub fn from_tag(tag: Cell) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::S),
            3 => Some(PieceKind::Z),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::O),
            7 => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::O => "o",
            PieceKind::I => "i",
        }
    }
}

/// Commands accepted from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
}

impl Command {
    /// Parse a command name (case-insensitive). Unknown names yield `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
        }
    }
}
