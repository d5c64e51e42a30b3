//! Autopilot - drives the engine through its key inputs
//!
//! [`place`] turns a target (rotation state, column) into key presses: rotate,
//! tap sideways, hard drop. [`Autopilot`] picks that target by simulating every
//! reachable placement on a copy of the board and scoring the result.
//!
//! The autopilot never writes engine state directly, so everything it does is
//! subject to the same timing and collision rules as a human player.

use serde::{Deserialize, Serialize};

use crate::core::{rotation_count, GameBoard, Position, Tetromino};
use crate::game_engine::{GameEngine, GamePhase};
use crate::types::{GameInput, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
    NotPlayable,
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoActive => "no_active",
            PlaceError::RotationBlocked | PlaceError::XOutOfBounds | PlaceError::XBlocked => {
                "invalid_place"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Direction and number of quarter turns from one rotation state to another
///
/// The shorter way round wins; ties go clockwise.
fn rotation_plan(from: u8, to: u8, states: u8) -> (bool, u8) {
    let states = states.max(1);
    let (from, to) = (from % states, to % states);
    let cw = (to + states - from) % states;
    let ccw = (from + states - to) % states;
    if ccw < cw {
        (false, ccw)
    } else {
        (true, cw)
    }
}

fn press(engine: &mut GameEngine, input: GameInput) {
    engine.on_key_down(input);
    engine.on_key_up(input);
}

/// Rotate, shift and hard drop the current piece
///
/// Stops at the first input that has no effect. A lock forced mid-way (lock
/// delay reset cap) is reported as [`PlaceError::NoActive`].
pub fn place(engine: &mut GameEngine, target_rotation: u8, target_x: i32) -> Result<(), PlaceError> {
    if engine.phase() != GamePhase::Running {
        return Err(PlaceError::NotPlayable);
    }
    let Some(&start) = engine.current_piece() else {
        return Err(PlaceError::NoActive);
    };
    let serial = engine.stats().total();
    let same_piece = |engine: &GameEngine| engine.stats().total() == serial;

    let (clockwise, steps) =
        rotation_plan(start.rotation_state(), target_rotation, rotation_count(start.kind()));
    let input = if clockwise {
        GameInput::RotateCw
    } else {
        GameInput::RotateCcw
    };
    for _ in 0..steps {
        let before = engine.current_piece().map(|p| p.rotation_state());
        press(engine, input);
        if !same_piece(engine) {
            return Err(PlaceError::NoActive);
        }
        if engine.current_piece().map(|p| p.rotation_state()) == before {
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some(&active) = engine.current_piece() else {
        return Err(PlaceError::NoActive);
    };
    let (min_dx, max_dx) = column_span(&active);
    if target_x + min_dx < 0 || target_x + max_dx >= BOARD_WIDTH as i32 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target_x - active.position().x;
    let input = if dx < 0 {
        GameInput::Left
    } else {
        GameInput::Right
    };
    for _ in 0..dx.abs() {
        let before = engine.current_piece().map(|p| p.position().x);
        press(engine, input);
        if !same_piece(engine) {
            return Err(PlaceError::NoActive);
        }
        if engine.current_piece().map(|p| p.position().x) == before {
            return Err(PlaceError::XBlocked);
        }
    }

    press(engine, GameInput::HardDrop);
    Ok(())
}

fn column_span(piece: &Tetromino) -> (i32, i32) {
    piece
        .shape()
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &(dx, _)| (lo.min(dx), hi.max(dx)))
}

/// Linear evaluation weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotWeights {
    pub aggregate_height: f64,
    pub complete_lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for AutopilotWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.510066,
            complete_lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

/// Shape features of a board after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub max_height: u32,
}

impl BoardFeatures {
    pub fn of(board: &GameBoard) -> Self {
        let mut heights = [0u32; BOARD_WIDTH];
        let mut holes = 0;

        for (x, height) in heights.iter_mut().enumerate() {
            let mut seen_block = false;
            for y in 0..BOARD_HEIGHT {
                if board.is_occupied(x as i32, y as i32) {
                    if !seen_block {
                        *height = (BOARD_HEIGHT - y) as u32;
                        seen_block = true;
                    }
                } else if seen_block {
                    holes += 1;
                }
            }
        }

        let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        Self {
            aggregate_height: heights.iter().sum(),
            holes,
            bumpiness,
            max_height: heights.iter().copied().max().unwrap_or(0),
        }
    }
}

/// A chosen target for the current piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rotation: u8,
    pub x: i32,
    /// Landing row of the piece origin
    pub y: i32,
    pub lines: u32,
    pub score: f64,
}

/// Plays by itself, one placement per piece
#[derive(Debug, Clone)]
pub struct Autopilot {
    weights: AutopilotWeights,
    think_frames: u32,
    wait: u32,
    serial: Option<u32>,
}

impl Autopilot {
    pub fn new(think_frames: u32) -> Self {
        Self::with_weights(AutopilotWeights::default(), think_frames)
    }

    pub fn with_weights(weights: AutopilotWeights, think_frames: u32) -> Self {
        Self {
            weights,
            think_frames,
            wait: 0,
            serial: None,
        }
    }

    pub fn weights(&self) -> &AutopilotWeights {
        &self.weights
    }

    /// Best placement for `piece` on `board`, or `None` if nothing is reachable
    ///
    /// Only targets reachable by rotating in place and then shifting along the
    /// piece's current row are considered.
    pub fn best_placement(&self, board: &GameBoard, piece: &Tetromino) -> Option<Placement> {
        let mut best: Option<Placement> = None;
        let states = rotation_count(piece.kind());

        for rotation in 0..states {
            let Some(rotated) = rotate_path(board, piece, rotation) else {
                continue;
            };
            for x in -3..BOARD_WIDTH as i32 + 3 {
                let Some(shifted) = shift_path(board, &rotated, x) else {
                    continue;
                };
                let landed_y = board.drop_position(&shifted);
                let landed = shifted.moved(0, landed_y - shifted.position().y);

                let mut simulated = board.clone();
                simulated.lock_piece(&landed);
                let lines = simulated.clear_lines();
                let score = self.evaluate(&simulated, lines);

                if best.is_none_or(|b| score > b.score) {
                    best = Some(Placement {
                        rotation,
                        x,
                        y: landed_y,
                        lines,
                        score,
                    });
                }
            }
        }
        best
    }

    pub fn evaluate(&self, board: &GameBoard, lines: u32) -> f64 {
        let f = BoardFeatures::of(board);
        self.weights.aggregate_height * f64::from(f.aggregate_height)
            + self.weights.complete_lines * f64::from(lines)
            + self.weights.holes * f64::from(f.holes)
            + self.weights.bumpiness * f64::from(f.bumpiness)
    }

    /// Call once per frame before the engine ticks
    ///
    /// Waits `think_frames` after each spawn, then places the piece in one go.
    /// Returns `None` while waiting or when there is nothing to play.
    pub fn step(&mut self, engine: &mut GameEngine) -> Option<Result<Placement, PlaceError>> {
        if engine.phase() != GamePhase::Running {
            return None;
        }
        let piece = *engine.current_piece()?;

        let serial = engine.stats().total();
        if self.serial != Some(serial) {
            self.serial = Some(serial);
            self.wait = self.think_frames;
        }
        if self.wait > 0 {
            self.wait -= 1;
            return None;
        }

        let Some(target) = self.best_placement(engine.board(), &piece) else {
            // Boxed in: drop where it stands
            press(engine, GameInput::HardDrop);
            return Some(Err(PlaceError::XBlocked));
        };
        let result = place(engine, target.rotation, target.x).map(|()| target);
        if result.is_err() && engine.stats().total() == serial {
            press(engine, GameInput::HardDrop);
        }
        Some(result)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(0)
    }
}

fn rotate_path(board: &GameBoard, piece: &Tetromino, target: u8) -> Option<Tetromino> {
    let (clockwise, steps) = rotation_plan(piece.rotation_state(), target, rotation_count(piece.kind()));
    let mut probe = *piece;
    for _ in 0..steps {
        if !board.can_rotate(&probe, clockwise) {
            return None;
        }
        probe.rotate(clockwise);
    }
    Some(probe)
}

fn shift_path(board: &GameBoard, piece: &Tetromino, target_x: i32) -> Option<Tetromino> {
    let dx = (target_x - piece.position().x).signum();
    let mut probe = *piece;
    while probe.position().x != target_x {
        if !board.can_move(&probe, dx, 0) {
            return None;
        }
        probe.move_by(dx, 0);
    }
    Some(probe)
}

/// Piece at spawn with a given kind and rotation, for planning without an engine
pub fn spawn_probe(kind: TetrominoType, rotation: u8) -> Tetromino {
    Tetromino::at(kind, Position::new(SPAWN_X, SPAWN_Y), rotation)
}
