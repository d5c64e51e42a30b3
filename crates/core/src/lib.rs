//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the piece/board data model and the rule functions the
//! engine is built from. It has **zero dependencies** on UI, timing or I/O:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is a plain function or a method on plain data
//! - **Fast**: Zero-allocation hot paths for collision and line clearing
//!
//! # Module Structure
//!
//! - [`position`]: integer board coordinates
//! - [`pieces`]: per-type rotation-state tables (no wall kicks)
//! - [`tetromino`]: the active piece and its probes
//! - [`board`]: 10x20 grid with collision queries and line clearing
//! - [`scoring`]: classic scoring, level thresholds and gravity table
//! - [`rng`]: uniform per-spawn piece randomization
//! - [`stats`]: per-type spawn counters
//! - [`snapshot`]: serializable copy of a game for polling consumers
//!
//! # Game Rules
//!
//! This implementation follows classic NES-era rules:
//!
//! - **Uniform randomizer**: each piece drawn independently, no bag
//! - **Nintendo rotation**: rotate in place or not at all
//! - **Classic scoring**: 40/100/300/1200 times (level + 1)
//! - **Gravity table**: 48 frames per row at level 0 down to 1 at level 29
//!
//! # Example
//!
//! ```
//! use feedtris_core::{GameBoard, Tetromino};
//! use feedtris_core::types::TetrominoType;
//!
//! let board = GameBoard::new();
//! let piece = Tetromino::new(TetrominoType::T);
//!
//! assert!(board.can_place(&piece));
//! assert!(board.can_rotate(&piece, true));
//! assert_eq!(board.drop_position(&piece), 18);
//! ```

pub mod board;
pub mod pieces;
pub mod position;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;
pub mod tetromino;

pub use feedtris_types as types;

// Re-export commonly used types for convenience
pub use board::GameBoard;
pub use pieces::{get_shape, rotation_count};
pub use position::Position;
pub use rng::{PieceSource, SequenceSource, UniformRandomizer};
pub use scoring::{calculate_drop_score, calculate_score, gravity_frames, lines_for_next_level};
pub use snapshot::{CountersSnapshot, GameSnapshot, PieceSnapshot};
pub use stats::PieceStats;
pub use tetromino::Tetromino;
