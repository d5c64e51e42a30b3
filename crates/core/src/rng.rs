//! RNG module - piece randomization
//!
//! Every spawn draws independently and uniformly from all seven types. There is
//! deliberately no bag: repeats and droughts are part of classic play.
//!
//! Sources are seeded so a game can be replayed exactly from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::TetrominoType;

/// Supplies the type of each newly drawn piece
pub trait PieceSource {
    fn next_piece(&mut self) -> TetrominoType;

    /// Seed the source was created from, if it has one
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Independent uniform draws over all seven types
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    seed: u64,
    rng: Pcg32,
}

impl UniformRandomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformRandomizer {
    fn next_piece(&mut self) -> TetrominoType {
        let idx = self.rng.random_range(0..TetrominoType::ALL.len());
        TetrominoType::ALL[idx]
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Cycles through a fixed list of types (scripted games and tests)
#[derive(Debug, Clone)]
pub struct SequenceSource {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequenceSource {
    /// An empty list cycles a single I piece
    pub fn new(pieces: impl IntoIterator<Item = TetrominoType>) -> Self {
        let mut pieces: Vec<_> = pieces.into_iter().collect();
        if pieces.is_empty() {
            pieces.push(TetrominoType::I);
        }
        Self { pieces, index: 0 }
    }

    /// Always the same type
    pub fn repeat(kind: TetrominoType) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_piece(&mut self) -> TetrominoType {
        let piece = self.pieces[self.index];
        self.index = (self.index + 1) % self.pieces.len();
        piece
    }
}
