//! Pieces module - Tetromino rotation-state tables
//!
//! Rotation follows the classic Nintendo rotation system: each type has a fixed
//! list of rotation states and a rotation either fits in place or fails. There
//! are no wall kicks.
//!
//! I, S and Z have two distinct states, O has one, T, J and L have four.
//! Offsets are (dx, dy) from the piece origin inside a 4x4 box, y pointing down.

use crate::types::TetrominoType;

/// Offset of a single block relative to piece origin
pub type BlockOffset = (i32, i32);

/// Shape of a piece - 4 block offsets from piece origin
pub type PieceShape = [BlockOffset; 4];

const I_STATES: [PieceShape; 2] = [
    // horizontal, row 1
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    // vertical, column 2
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_STATES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_STATES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_STATES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_STATES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All rotation states of a type, in clockwise order
pub fn rotation_states(kind: TetrominoType) -> &'static [PieceShape] {
    match kind {
        TetrominoType::I => &I_STATES,
        TetrominoType::O => &O_STATES,
        TetrominoType::T => &T_STATES,
        TetrominoType::S => &S_STATES,
        TetrominoType::Z => &Z_STATES,
        TetrominoType::J => &J_STATES,
        TetrominoType::L => &L_STATES,
    }
}

/// Number of distinct rotation states of a type
pub fn rotation_count(kind: TetrominoType) -> u8 {
    rotation_states(kind).len() as u8
}

/// Get the shape for a type and rotation state (taken modulo the state count)
pub fn get_shape(kind: TetrominoType, rotation_state: u8) -> PieceShape {
    let states = rotation_states(kind);
    states[rotation_state as usize % states.len()]
}

/// Shape a freshly spawned piece has
pub fn get_spawn_shape(kind: TetrominoType) -> PieceShape {
    get_shape(kind, 0)
}
