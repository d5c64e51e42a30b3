//! Engine tests - frame timing and lifecycle through the public API

use feedtris::core::{GameBoard, Position, SequenceSource};
use feedtris::engine::{EngineConfig, EventRecorder, GameEngine, GameEvent, GamePhase};
use feedtris::types::{GameInput, TetrominoType};

fn engine(kind: TetrominoType, level: u32) -> GameEngine {
    let mut engine = GameEngine::with_source(Box::new(SequenceSource::repeat(kind)));
    engine.start_game(level);
    engine
}

fn ticks(engine: &mut GameEngine, n: u32) {
    for _ in 0..n {
        engine.tick();
    }
}

fn pos(engine: &GameEngine) -> Position {
    engine.current_piece().map(|p| p.position()).unwrap_or_default()
}

#[test]
fn test_das_cadence() {
    let mut engine = engine(TetrominoType::O, 0);

    engine.on_key_down(GameInput::Right);
    assert_eq!(pos(&engine).x, 4);

    ticks(&mut engine, 15);
    assert_eq!(pos(&engine).x, 4);
    assert_eq!(engine.counters().das, 15);
    assert!(!engine.counters().das_charged);

    ticks(&mut engine, 1);
    assert_eq!(pos(&engine).x, 5);
    assert!(engine.counters().das_charged);

    ticks(&mut engine, 6);
    assert_eq!(pos(&engine).x, 6);
    ticks(&mut engine, 6);
    assert_eq!(pos(&engine).x, 7);

    // Right wall: O spans columns x+1..x+2
    ticks(&mut engine, 12);
    assert_eq!(pos(&engine).x, 7);
}

#[test]
fn test_custom_das_config() {
    let config = EngineConfig {
        das_initial_delay: 4,
        das_repeat_rate: 2,
        ..EngineConfig::default()
    };
    let mut engine =
        GameEngine::with_source(Box::new(SequenceSource::repeat(TetrominoType::O))).with_config(config);
    engine.start_game(0);

    engine.on_key_down(GameInput::Left);
    ticks(&mut engine, 4);
    assert_eq!(pos(&engine).x, 1);
    ticks(&mut engine, 2);
    assert_eq!(pos(&engine).x, 0);
}

#[test]
fn test_lock_delay_at_max_gravity() {
    let mut engine = engine(TetrominoType::O, 29);

    // One row per frame: O origin reaches row 18 after 18 frames
    ticks(&mut engine, 18);
    assert_eq!(pos(&engine).y, 18);
    assert!(!engine.counters().on_ground);

    ticks(&mut engine, 29);
    assert!(engine.counters().on_ground);
    assert_eq!(engine.counters().lock_delay, 29);
    assert_eq!(engine.board().occupied_count(), 0);

    ticks(&mut engine, 1);
    assert_eq!(engine.board().occupied_count(), 4);
    assert_eq!(pos(&engine), Position::new(3, 0));
}

#[test]
fn test_lock_reset_cap() {
    let mut engine = engine(TetrominoType::O, 29);
    ticks(&mut engine, 19);
    assert!(engine.counters().on_ground);

    for i in 0..14 {
        let input = if i % 2 == 0 { GameInput::Left } else { GameInput::Right };
        engine.on_key_down(input);
        engine.on_key_up(input);
        assert_eq!(engine.counters().lock_delay, 0);
    }
    assert_eq!(engine.counters().lock_delay_resets, 14);
    assert_eq!(engine.board().occupied_count(), 0);

    // Fifteenth grounded move locks on the spot
    engine.on_key_down(GameInput::Left);

    assert_eq!(engine.board().occupied_count(), 4);
    assert!(engine.board().is_occupied(3, 19));
    assert_eq!(pos(&engine), Position::new(3, 0));
}

#[test]
fn test_soft_drop_every_second_frame() {
    let mut engine = engine(TetrominoType::T, 0);

    engine.on_key_down(GameInput::SoftDrop);
    assert!(engine.is_soft_dropping());
    ticks(&mut engine, 20);

    assert_eq!(pos(&engine).y, 10);
    assert_eq!(engine.score(), 10);
}

#[test]
fn test_soft_drop_flag_survives_spawn() {
    let mut engine = engine(TetrominoType::O, 0);

    engine.on_key_down(GameInput::SoftDrop);
    engine.on_key_down(GameInput::HardDrop);

    assert!(engine.is_soft_dropping());
    assert_eq!(engine.counters().soft_drop, 0);
    ticks(&mut engine, 2);
    assert_eq!(pos(&engine).y, 1);
}

#[test]
fn test_ghost_piece_tracks_drop_position() {
    let mut engine = engine(TetrominoType::T, 0);
    assert_eq!(engine.ghost_piece().unwrap().position().y, 18);

    engine.on_key_down(GameInput::HardDrop);
    // Second T rests on the first
    assert_eq!(engine.ghost_piece().unwrap().position().y, 16);
}

#[test]
fn test_stop_game_halts_frames() {
    let recorder = EventRecorder::new();
    let mut engine = engine(TetrominoType::T, 0);
    engine.subscribe(recorder.clone());
    let frame = engine.config().frame_duration();

    engine.stop_game();

    assert!(!engine.is_clock_running());
    assert_eq!(engine.phase(), GamePhase::Running);
    assert_eq!(engine.advance(frame * 5), 0);
    assert!(!engine.tick());
    assert_eq!(recorder.events(), vec![GameEvent::GameStateChanged]);

    // Inputs still apply while the clock is stopped
    engine.on_key_down(GameInput::Left);
    assert_eq!(pos(&engine).x, 2);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let recorder = EventRecorder::new();
    let mut engine = engine(TetrominoType::T, 0);
    let id = engine.subscribe(recorder.clone());

    engine.on_key_down(GameInput::Left);
    assert!(engine.unsubscribe(id));
    engine.on_key_down(GameInput::Left);

    assert_eq!(recorder.events(), vec![GameEvent::BoardChanged]);
}

#[test]
fn test_pause_event_sequence() {
    let recorder = EventRecorder::new();
    let mut engine = engine(TetrominoType::T, 0);
    engine.subscribe(recorder.clone());

    engine.on_key_down(GameInput::Pause);
    engine.on_key_down(GameInput::Pause);

    assert_eq!(
        recorder.events(),
        vec![GameEvent::GameStateChanged, GameEvent::GameStateChanged]
    );
    assert_eq!(engine.phase(), GamePhase::Running);
}

#[test]
fn test_key_up_while_paused_releases_das() {
    let mut engine = engine(TetrominoType::O, 0);
    engine.on_key_down(GameInput::Left);
    engine.toggle_pause();
    engine.on_key_up(GameInput::Left);
    engine.toggle_pause();

    ticks(&mut engine, 40);
    assert_eq!(pos(&engine).x, 2);
    assert_eq!(engine.counters().das_direction, 0);
}

#[test]
fn test_blocked_first_spawn_ends_game() {
    let recorder = EventRecorder::new();
    let mut engine = GameEngine::with_source(Box::new(SequenceSource::repeat(TetrominoType::T)));
    engine.subscribe(recorder.clone());

    let mut board = GameBoard::new();
    board.set(4, 0, Some(TetrominoType::I));
    engine.start_game_with_board(0, board);

    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(recorder.count(GameEvent::GameOver), 1);
    assert!(!engine.tick());
}

#[test]
fn test_inputs_ignored_before_start() {
    let recorder = EventRecorder::new();
    let mut engine = GameEngine::new(3);
    engine.subscribe(recorder.clone());

    for input in [
        GameInput::Left,
        GameInput::Right,
        GameInput::RotateCw,
        GameInput::HardDrop,
        GameInput::SoftDrop,
    ] {
        engine.on_key_down(input);
        engine.on_key_up(input);
    }

    assert!(recorder.events().is_empty());
    assert_eq!(engine.phase(), GamePhase::NotStarted);
}

#[test]
fn test_pause_accepted_before_start() {
    let recorder = EventRecorder::new();
    let mut engine = GameEngine::new(3);
    engine.subscribe(recorder.clone());

    engine.on_key_down(GameInput::Pause);

    assert!(engine.is_paused());
    assert!(engine.current_piece().is_none());
    assert_eq!(recorder.events(), vec![GameEvent::GameStateChanged]);

    engine.start_game(0);
    assert!(!engine.is_paused());
    assert!(engine.is_clock_running());
}
