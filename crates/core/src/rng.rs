//! RNG module - token generation for board creation and refills
//!
//! Provides a simple LCG for deterministic play (same seed, same game) and a
//! scripted source for tests that need to know exactly what will fall in.

use crate::types::{Palette, TokenType};

/// Source of uniformly distributed palette indices.
pub trait TokenRng {
    /// Return a value in `[0, len)`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Pick a token from the palette.
    fn pick(&mut self, palette: &Palette) -> TokenType {
        let i = self.next_index(palette.len());
        palette.tokens()[i]
    }
}

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG are weak; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current state (reseeding with it continues the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TokenRng for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
///
/// Indices are reduced modulo the palette length, so any list is valid.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    indices: Vec<usize>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, pos: 0 }
    }

    /// How many indices have been handed out so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl TokenRng for SequenceRng {
    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let v = self.indices[self.pos % self.indices.len()];
        self.pos += 1;
        v % len
    }
}

impl<R: TokenRng + ?Sized> TokenRng for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
