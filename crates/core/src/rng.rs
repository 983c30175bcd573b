//! RNG module - uniform random piece generation
//!
//! Every spawn draws one of the seven catalog shapes uniformly at random.
//! The random source is a seeded LCG so a game can be replayed from its seed.

use crate::piece::ActivePiece;
use crate::pieces::catalog_mask;
use crate::types::{spawn_x, PieceKind, Pos, SPAWN_Y};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces fresh active pieces at the spawn anchor
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: SimpleRng,
    anchor: Pos,
}

impl PieceSpawner {
    /// Spawner for an arena `width` cells wide
    pub fn new(seed: u32, width: usize) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            anchor: Pos::new(spawn_x(width), SPAWN_Y),
        }
    }

    /// Anchor every new piece starts at
    pub fn spawn_anchor(&self) -> Pos {
        self.anchor
    }

    /// Draw the next kind uniformly from the catalog
    pub fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Draw a new piece: a private copy of a random catalog mask at the spawn anchor
    pub fn next(&mut self) -> ActivePiece {
        let kind = self.next_kind();
        ActivePiece::new(kind, catalog_mask(kind).painted(kind.tag()), self.anchor)
    }

    /// RNG state (a seed that continues the current sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
