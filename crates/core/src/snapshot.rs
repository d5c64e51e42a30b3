//! Snapshot module - serializable view of engine state
//!
//! Plain data copied out of the engine for polling hosts and JSON reports.
//! The engine fills one in place with `snapshot_into`.

use serde::{Deserialize, Serialize};

use crate::stats::PieceStats;
use crate::tetromino::Tetromino;
use crate::types::{TetrominoType, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: TetrominoType,
    pub rotation_state: u8,
    pub x: i32,
    pub y: i32,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind(),
            rotation_state: value.rotation_state(),
            x: value.position().x,
            y: value.position().y,
        }
    }
}

/// Timing counters of the engine at snapshot time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub gravity: u32,
    pub soft_drop: u32,
    pub das: u32,
    pub das_direction: i32,
    pub das_charged: bool,
    pub lock_delay: u32,
    pub lock_delay_resets: u32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH]; BOARD_HEIGHT],
    pub current: Option<PieceSnapshot>,
    pub next: Option<TetrominoType>,
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub start_level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    pub frame: u64,
    pub seed: Option<u64>,
    pub stats: PieceStats,
    pub counters: CountersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.current.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH]; BOARD_HEIGHT],
            current: None,
            next: None,
            ghost_y: None,
            score: 0,
            level: 0,
            start_level: 0,
            lines: 0,
            paused: false,
            game_over: false,
            frame: 0,
            seed: None,
            stats: PieceStats::default(),
            counters: CountersSnapshot::default(),
        }
    }
}
