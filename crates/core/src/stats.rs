//! Per-type spawn statistics (the classic side panel)

use serde::{Deserialize, Serialize};

use crate::types::TetrominoType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PieceStats {
    counts: [u32; 7],
}

impl PieceStats {
    pub fn record(&mut self, kind: TetrominoType) {
        self.counts[kind.index()] = self.counts[kind.index()].saturating_add(1);
    }

    pub fn count(&self, kind: TetrominoType) -> u32 {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// (type, count) pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (TetrominoType, u32)> + '_ {
        TetrominoType::ALL
            .iter()
            .map(move |kind| (*kind, self.counts[kind.index()]))
    }

    pub fn reset(&mut self) {
        self.counts = [0; 7];
    }
}
