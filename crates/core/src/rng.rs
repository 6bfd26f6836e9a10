//! RNG module - uniform piece and color selection
//!
//! Every spawn draws a shape uniformly from the seven catalog entries and,
//! independently, a color uniformly from the seven palette entries. The color
//! is not tied to the shape.
//!
//! A small seeded LCG keeps games reproducible for tests and replays.

use crate::types::{PieceColor, PieceKind};

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
    ///
    /// Uses the high bits (multiply-shift); the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws the shape and color for each new piece.
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    seed: u32,
    rng: SimpleRng,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Uniform pick from the shape catalog
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Uniform pick from the palette
    pub fn next_color(&mut self) -> PieceColor {
        PieceColor::ALL[self.rng.next_range(PieceColor::ALL.len() as u32) as usize]
    }

    /// Shape and color for the next spawn, drawn independently
    pub fn draw(&mut self) -> (PieceKind, PieceColor) {
        let kind = self.next_kind();
        let color = self.next_color();
        (kind, color)
    }

    /// The seed this randomizer started from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current RNG state, usable as the seed of a follow-up game
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
