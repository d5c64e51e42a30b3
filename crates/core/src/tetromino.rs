//! Active falling piece
//!
//! A `Tetromino` knows only its own geometry. Whether a translation or rotation
//! is legal is the board's call: probe with a copy ([`Tetromino::moved`],
//! [`Tetromino::rotated`]) and mutate only once the board accepts it.

use serde::{Deserialize, Serialize};

use crate::pieces::{get_shape, rotation_count, PieceShape};
use crate::position::Position;
use crate::types::{TetrominoType, SPAWN_X, SPAWN_Y};

/// A piece: fixed type, mutable origin and rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    kind: TetrominoType,
    position: Position,
    rotation_state: u8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: TetrominoType) -> Self {
        Self::at(kind, Position::new(SPAWN_X, SPAWN_Y), 0)
    }

    /// Create a tetromino at an arbitrary origin and rotation state
    pub fn at(kind: TetrominoType, position: Position, rotation_state: u8) -> Self {
        Self {
            kind,
            position,
            rotation_state: rotation_state % rotation_count(kind),
        }
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rotation_state(&self) -> u8 {
        self.rotation_state
    }

    /// Relative block offsets for the current rotation state
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation_state)
    }

    /// Absolute board coordinates of the four blocks
    pub fn block_positions(&self) -> [Position; 4] {
        self.shape()
            .map(|(dx, dy)| self.position.offset(dx, dy))
    }

    /// Translate the origin unconditionally
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation_state = (self.rotation_state + 1) % rotation_count(self.kind);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        let count = rotation_count(self.kind);
        self.rotation_state = (self.rotation_state + count - 1) % count;
    }

    /// Rotate in the given direction
    pub fn rotate(&mut self, clockwise: bool) {
        if clockwise {
            self.rotate_clockwise();
        } else {
            self.rotate_counter_clockwise();
        }
    }

    /// Copy translated by (dx, dy)
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        let mut probe = *self;
        probe.move_by(dx, dy);
        probe
    }

    /// Copy rotated one step
    pub fn rotated(&self, clockwise: bool) -> Self {
        let mut probe = *self;
        probe.rotate(clockwise);
        probe
    }
}
