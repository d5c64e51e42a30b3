//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond parsing and lookup, so they
//! can be shared by the simulation, hosts and any consumer reading engine state.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), rotation state 0
//!
//! # Frame Timing Constants
//!
//! All timing is counted in frames of a fixed ~60 Hz clock:
//!
//! | Constant | Frames | Description |
//! |----------|--------|-------------|
//! | `DAS_INITIAL_DELAY` | 16 | Hold time before horizontal auto-repeat starts |
//! | `DAS_REPEAT_RATE` | 6 | Interval between auto-repeat shifts once charged |
//! | `LOCK_DELAY_FRAMES` | 30 | Grounded frames before a piece is forced to lock |
//! | `MAX_LOCK_DELAY_RESETS` | 15 | Moves/rotations allowed to extend lock delay |
//! | `SOFT_DROP_SPEED` | 2 | Frames per row while soft dropping |
//!
//! # Gravity
//!
//! Frames per row by level follow the classic NTSC table: 48 at level 0 down to
//! 1 at level 29 and above. See [`GRAVITY_TABLE`].
//!
//! # Examples
//!
//! ```
//! use feedtris_types::{GameInput, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = TetrominoType::T;
//! assert_eq!(TetrominoType::from_str("t"), Some(piece));
//!
//! assert_eq!(GameInput::from_str("rotateCw"), Some(GameInput::RotateCw));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Spawn column of a new piece's origin
pub const SPAWN_X: i32 = 3;

/// Spawn row of a new piece's origin
pub const SPAWN_Y: i32 = 0;

/// Nominal clock rate driving the engine
pub const FRAMES_PER_SECOND: u32 = 60;

/// Frames a direction must be held before auto-repeat begins
pub const DAS_INITIAL_DELAY: u32 = 16;

/// Frames between auto-repeat shifts once DAS is charged
pub const DAS_REPEAT_RATE: u32 = 6;

/// Grounded frames before a piece locks without further input
pub const LOCK_DELAY_FRAMES: u32 = 30;

/// Successful grounded moves/rotations before the piece locks regardless of delay
pub const MAX_LOCK_DELAY_RESETS: u32 = 15;

/// Frames per row while soft drop is held
pub const SOFT_DROP_SPEED: u32 = 2;

/// Points awarded per row descended by soft drop
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Lines per level once the first level-up from the start level has happened
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames per row by level (classic NTSC values).
///
/// Index 0 = level 0, index 29 = level 29 and every level above it.
pub const GRAVITY_TABLE: [u32; 30] = [
    48, 43, 38, 33, 28, 23, 18, 13, 8, 6, // 0-9
    5, 5, 5, // 10-12
    4, 4, 4, // 13-15
    3, 3, 3, // 16-18
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // 19-28
    1, // 29+
];

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino types
///
/// The set is closed; every table in the engine is indexed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// Every type, in table order
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Position of this type in [`TetrominoType::ALL`]
    pub fn index(self) -> usize {
        match self {
            TetrominoType::I => 0,
            TetrominoType::O => 1,
            TetrominoType::T => 2,
            TetrominoType::S => 3,
            TetrominoType::Z => 4,
            TetrominoType::J => 5,
            TetrominoType::L => 6,
        }
    }

    /// Inverse of [`TetrominoType::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Non-zero cell code used by compact grid encodings (1..=7)
    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use feedtris_types::TetrominoType;
    ///
    /// assert_eq!(TetrominoType::from_str("i"), Some(TetrominoType::I));
    /// assert_eq!(TetrominoType::from_str("O"), Some(TetrominoType::O));
    /// assert_eq!(TetrominoType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoType::I),
            "o" => Some(TetrominoType::O),
            "t" => Some(TetrominoType::T),
            "s" => Some(TetrominoType::S),
            "z" => Some(TetrominoType::Z),
            "j" => Some(TetrominoType::J),
            "l" => Some(TetrominoType::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoType::I => "i",
            TetrominoType::O => "o",
            TetrominoType::T => "t",
            TetrominoType::S => "s",
            TetrominoType::Z => "z",
            TetrominoType::J => "j",
            TetrominoType::L => "l",
        }
    }
}

/// Inputs accepted by the engine's key handlers
///
/// Left/Right/SoftDrop are held inputs and care about release; the rest act on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameInput {
    /// Shift left; auto-repeats while held
    Left,
    /// Shift right; auto-repeats while held
    Right,
    /// Accelerated descent while held
    SoftDrop,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Rotate clockwise
    RotateCw,
    /// Rotate counter-clockwise
    RotateCcw,
    /// Toggle pause
    Pause,
}

impl GameInput {
    /// Parse input from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use feedtris_types::GameInput;
    ///
    /// assert_eq!(GameInput::from_str("left"), Some(GameInput::Left));
    /// assert_eq!(GameInput::from_str("hardDrop"), Some(GameInput::HardDrop));
    /// assert_eq!(GameInput::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(GameInput::Left),
            "right" => Some(GameInput::Right),
            "softdrop" => Some(GameInput::SoftDrop),
            "harddrop" => Some(GameInput::HardDrop),
            "rotatecw" => Some(GameInput::RotateCw),
            "rotateccw" => Some(GameInput::RotateCcw),
            "pause" => Some(GameInput::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameInput::Left => "left",
            GameInput::Right => "right",
            GameInput::SoftDrop => "softDrop",
            GameInput::HardDrop => "hardDrop",
            GameInput::RotateCw => "rotateCw",
            GameInput::RotateCcw => "rotateCcw",
            GameInput::Pause => "pause",
        }
    }

    /// Horizontal direction for Left/Right, `None` otherwise
    pub fn shift(&self) -> Option<i32> {
        match self {
            GameInput::Left => Some(-1),
            GameInput::Right => Some(1),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(TetrominoType)`: occupied by a locked block of that type
pub type Cell = Option<TetrominoType>;
