//! Game engine - the frame-driven state machine
//!
//! Ties together board, pieces, randomizer and scoring. One call to
//! [`GameEngine::tick`] is one frame: horizontal auto-repeat runs first, then
//! gravity or lock delay. Key handlers act immediately between frames.
//!
//! All counters are in frames. Illegal moves and rotations are rejected without
//! touching state; the only terminal condition is game over.

use std::fmt;
use std::time::Duration;

use log::{debug, info, trace};

use crate::clock::FrameClock;
use crate::config::EngineConfig;
use crate::core::scoring::advance_level;
use crate::core::{
    calculate_drop_score, calculate_score, gravity_frames, CountersSnapshot, GameBoard,
    GameSnapshot, PieceSource, PieceStats, Tetromino, UniformRandomizer,
};
use crate::events::{EventBus, GameEvent, GameListener, ListenerId};
use crate::types::GameInput;

/// Coarse lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

pub struct GameEngine {
    config: EngineConfig,
    board: GameBoard,
    current: Option<Tetromino>,
    next: Option<Tetromino>,
    source: Box<dyn PieceSource>,
    events: EventBus,
    clock: FrameClock,
    stats: PieceStats,
    score: u32,
    level: u32,
    start_level: u32,
    lines: u32,
    started: bool,
    paused: bool,
    game_over: bool,
    /// Frames run since the game started
    frame: u64,
    gravity_counter: u32,
    soft_drop_counter: u32,
    soft_dropping: bool,
    das_counter: u32,
    /// -1 left, 1 right, `None` when no direction is held
    das_direction: Option<i32>,
    das_charged: bool,
    lock_delay_counter: u32,
    lock_delay_resets: u32,
    on_ground: bool,
}

impl GameEngine {
    /// Engine drawing pieces uniformly from a seeded randomizer
    pub fn new(seed: u64) -> Self {
        Self::with_source(Box::new(UniformRandomizer::new(seed)))
    }

    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        let config = EngineConfig::default();
        Self {
            config,
            board: GameBoard::new(),
            current: None,
            next: None,
            source,
            events: EventBus::new(),
            clock: FrameClock::new(config.frame_duration()),
            stats: PieceStats::default(),
            score: 0,
            level: 0,
            start_level: 0,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
            frame: 0,
            gravity_counter: 0,
            soft_drop_counter: 0,
            soft_dropping: false,
            das_counter: 0,
            das_direction: None,
            das_charged: false,
            lock_delay_counter: 0,
            lock_delay_resets: 0,
            on_ground: false,
        }
    }

    /// Replace the timing configuration (takes effect immediately)
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        let running = self.clock.is_running();
        self.config = config;
        self.clock = FrameClock::new(config.frame_duration());
        if running {
            self.clock.start();
        }
        self
    }

    pub fn subscribe(&mut self, listener: impl GameListener + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ---- lifecycle ----

    /// Reset everything, spawn the first two pieces and start the clock
    pub fn start_game(&mut self, start_level: u32) {
        self.start_game_with_board(start_level, GameBoard::new());
    }

    /// Like [`GameEngine::start_game`] but on a pre-filled board (challenge setups)
    ///
    /// If the first piece cannot spawn the game is over immediately.
    pub fn start_game_with_board(&mut self, start_level: u32, board: GameBoard) {
        self.board = board;
        self.score = 0;
        self.level = start_level;
        self.start_level = start_level;
        self.lines = 0;
        self.started = true;
        self.paused = false;
        self.game_over = false;
        self.frame = 0;
        self.stats.reset();
        self.soft_dropping = false;
        self.das_direction = None;
        self.das_counter = 0;
        self.das_charged = false;
        self.reset_piece_counters();

        let first = Tetromino::new(self.source.next_piece());
        self.next = Some(Tetromino::new(self.source.next_piece()));
        self.current = Some(first);
        self.stats.record(first.kind());
        self.clock.start();

        info!(
            "game started: level {}, seed {:?}, first {:?}",
            start_level,
            self.source.seed(),
            first.kind()
        );
        self.events.emit(GameEvent::GameStateChanged);
        self.events.emit(GameEvent::BoardChanged);

        if self.board.is_game_over(&first) {
            self.finish_game();
        }
    }

    /// Halt the clock; state is kept as is
    pub fn stop_game(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        self.clock.stop();
        debug!("clock stopped at frame {}", self.frame);
        self.events.emit(GameEvent::GameStateChanged);
    }

    /// Flip pause, stopping or restarting the clock
    ///
    /// Accepted before the first piece exists; no-op after game over. The clock
    /// only restarts once a game has been started.
    pub fn toggle_pause(&mut self) {
        if self.game_over {
            return;
        }
        self.paused = !self.paused;
        if self.paused {
            self.clock.stop();
        } else if self.started {
            self.clock.start();
        }
        debug!("paused: {}", self.paused);
        self.events.emit(GameEvent::GameStateChanged);
    }

    // ---- input ----

    pub fn on_key_down(&mut self, input: GameInput) {
        if input == GameInput::Pause {
            self.toggle_pause();
            return;
        }
        if !self.accepts_input() {
            return;
        }

        match input {
            GameInput::Left | GameInput::Right => {
                let Some(dx) = input.shift() else {
                    return;
                };
                self.das_direction = Some(dx);
                if self.try_shift(dx) {
                    self.das_counter = 0;
                    self.das_charged = false;
                } else {
                    // Blocked press keeps DAS charged so holding continues at repeat cadence
                    self.das_counter = self.config.das_initial_delay;
                    self.das_charged = true;
                }
            }
            GameInput::SoftDrop => {
                self.soft_dropping = true;
                self.soft_drop_counter = 0;
            }
            GameInput::HardDrop => self.hard_drop(),
            GameInput::RotateCw => {
                self.try_rotate(true);
            }
            GameInput::RotateCcw => {
                self.try_rotate(false);
            }
            GameInput::Pause => {}
        }
    }

    /// Releases are honored in any state so held inputs never stick
    pub fn on_key_up(&mut self, input: GameInput) {
        match input {
            GameInput::Left | GameInput::Right => {
                if input.shift() == self.das_direction {
                    self.das_direction = None;
                    self.das_counter = 0;
                }
            }
            GameInput::SoftDrop => {
                self.soft_dropping = false;
                self.soft_drop_counter = 0;
            }
            _ => {}
        }
    }

    fn accepts_input(&self) -> bool {
        self.started && !self.paused && !self.game_over && self.current.is_some()
    }

    // ---- frame loop ----

    /// Run one frame. Returns false when nothing ran (clock stopped, paused, over, no piece).
    pub fn tick(&mut self) -> bool {
        if !self.clock.is_running() || self.paused || self.game_over || self.current.is_none() {
            return false;
        }
        self.frame += 1;

        self.update_das();
        if self.game_over || self.current.is_none() {
            return true;
        }
        self.update_gravity();
        true
    }

    /// Feed wall-clock time; runs every frame that became due. Returns frames run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if self.tick() {
                ran += 1;
            }
        }
        ran
    }

    fn update_das(&mut self) {
        let Some(dx) = self.das_direction else {
            return;
        };

        self.das_counter += 1;
        let threshold = if self.das_charged {
            self.config.das_repeat_rate
        } else {
            self.config.das_initial_delay
        };
        if self.das_counter >= threshold {
            self.das_counter = 0;
            self.das_charged = true;
            self.try_shift(dx);
        }
    }

    fn update_gravity(&mut self) {
        let Some(piece) = self.current else {
            return;
        };

        if !self.board.can_move(&piece, 0, 1) {
            self.on_ground = true;
            self.lock_delay_counter += 1;
            if self.lock_delay_counter >= self.config.lock_delay_frames
                || self.lock_delay_resets >= self.config.max_lock_delay_resets
            {
                self.lock_piece();
            }
            return;
        }

        self.on_ground = false;
        self.lock_delay_counter = 0;

        if self.soft_dropping {
            self.soft_drop_counter += 1;
            if self.soft_drop_counter >= self.config.soft_drop_speed {
                self.soft_drop_counter = 0;
                self.step_down(piece);
                self.score = self.score.saturating_add(calculate_drop_score(1));
            }
        } else {
            self.gravity_counter += 1;
            if self.gravity_counter >= gravity_frames(self.level) {
                self.gravity_counter = 0;
                self.step_down(piece);
            }
        }
    }

    fn step_down(&mut self, piece: Tetromino) {
        self.current = Some(piece.moved(0, 1));
        self.events.emit(GameEvent::BoardChanged);
    }

    // ---- piece manipulation ----

    /// Shift the current piece one column; false if blocked
    fn try_shift(&mut self, dx: i32) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        if !self.board.can_move(&piece, dx, 0) {
            return false;
        }

        self.current = Some(piece.moved(dx, 0));
        self.events.emit(GameEvent::BoardChanged);
        self.extend_lock_delay();
        true
    }

    /// Rotate in place (no kicks); false if the rotated shape does not fit
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        if !self.board.can_rotate(&piece, clockwise) {
            return false;
        }

        self.current = Some(piece.rotated(clockwise));
        self.events.emit(GameEvent::Rotation { clockwise });
        self.events.emit(GameEvent::BoardChanged);
        self.extend_lock_delay();
        true
    }

    /// Grounded moves restart lock delay; the reset cap forces a lock right away
    fn extend_lock_delay(&mut self) {
        if !self.on_ground {
            return;
        }
        self.lock_delay_counter = 0;
        self.lock_delay_resets += 1;

        if self.lock_delay_resets >= self.config.max_lock_delay_resets {
            let still_grounded = self
                .current
                .is_some_and(|piece| !self.board.can_move(&piece, 0, 1));
            if still_grounded {
                self.lock_piece();
            }
        }
    }

    fn hard_drop(&mut self) {
        let Some(mut piece) = self.current else {
            return;
        };

        let target_y = self.board.drop_position(&piece);
        let distance = target_y - piece.position().y;
        if distance > 0 {
            piece.move_by(0, distance);
            self.current = Some(piece);
            self.events.emit(GameEvent::BoardChanged);
        }
        self.lock_piece();
    }

    /// Write the current piece into the board, clear lines, spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.lock_piece(&piece);
        trace!(
            "locked {:?} at {:?} rotation {}",
            piece.kind(),
            piece.position(),
            piece.rotation_state()
        );
        self.events.emit(GameEvent::PieceLocked);

        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.lines = self.lines.saturating_add(cleared);
            self.score = self
                .score
                .saturating_add(calculate_score(cleared as usize, self.level));

            let level = advance_level(self.start_level, self.level, self.lines);
            if level != self.level {
                debug!("level up: {} -> {} at {} lines", self.level, level, self.lines);
                self.level = level;
            }
            debug!("cleared {} lines, score {}", cleared, self.score);

            self.events.emit(GameEvent::LinesCleared(cleared));
            self.events.emit(GameEvent::GameStateChanged);
        }

        self.spawn_piece();
    }

    /// Promote the next piece and draw a new one
    fn spawn_piece(&mut self) {
        let kind = match self.next.take() {
            Some(next) => next.kind(),
            None => self.source.next_piece(),
        };
        let piece = Tetromino::new(kind);
        self.next = Some(Tetromino::new(self.source.next_piece()));
        self.current = Some(piece);
        self.stats.record(kind);
        self.reset_piece_counters();
        trace!("spawned {:?}, next {:?}", kind, self.next.map(|p| p.kind()));

        if self.board.is_game_over(&piece) {
            self.finish_game();
        } else {
            self.events.emit(GameEvent::BoardChanged);
        }
    }

    fn reset_piece_counters(&mut self) {
        self.gravity_counter = 0;
        self.soft_drop_counter = 0;
        self.lock_delay_counter = 0;
        self.lock_delay_resets = 0;
        self.on_ground = false;
    }

    fn finish_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.clock.stop();
        info!(
            "game over: score {}, lines {}, level {}, frame {}",
            self.score, self.lines, self.level, self.frame
        );
        self.events.emit(GameEvent::GameOver);
        self.events.emit(GameEvent::GameStateChanged);
    }

    // ---- read-only state ----

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn current_piece(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    /// Where the current piece would land if dropped now
    pub fn ghost_piece(&self) -> Option<Tetromino> {
        let piece = self.current?;
        let target_y = self.board.drop_position(&piece);
        Some(piece.moved(0, target_y - piece.position().y))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else if !self.started {
            GamePhase::NotStarted
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> &PieceStats {
        &self.stats
    }

    pub fn seed(&self) -> Option<u64> {
        self.source.seed()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn counters(&self) -> CountersSnapshot {
        CountersSnapshot {
            gravity: self.gravity_counter,
            soft_drop: self.soft_drop_counter,
            das: self.das_counter,
            das_direction: self.das_direction.unwrap_or(0),
            das_charged: self.das_charged,
            lock_delay: self.lock_delay_counter,
            lock_delay_resets: self.lock_delay_resets,
            on_ground: self.on_ground,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.current = self.current.map(Into::into);
        out.next = self.next.map(|p| p.kind());
        out.ghost_y = self.ghost_piece().map(|p| p.position().y);
        out.score = self.score;
        out.level = self.level;
        out.start_level = self.start_level;
        out.lines = self.lines;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.frame = self.frame;
        out.seed = self.source.seed();
        out.stats = self.stats;
        out.counters = self.counters();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase())
            .field("current", &self.current)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("frame", &self.frame)
            .field("counters", &self.counters())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
