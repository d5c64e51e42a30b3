//! Frame-driven game engine
//!
//! Builds the classic game loop on top of `feedtris-core`:
//!
//! - [`game_engine`]: the state machine (DAS, gravity, lock delay, scoring, lifecycle)
//! - [`events`]: synchronous listener notifications
//! - [`clock`]: wall-clock to frame conversion
//! - [`config`]: tunable frame counts
//! - [`autopilot`]: a player that drives the engine through key inputs
//!
//! # Example
//!
//! ```
//! use feedtris_engine::{GameEngine, GamePhase};
//! use feedtris_engine::types::GameInput;
//!
//! let mut engine = GameEngine::new(42);
//! engine.start_game(0);
//! engine.on_key_down(GameInput::HardDrop);
//!
//! assert_eq!(engine.phase(), GamePhase::Running);
//! assert_eq!(engine.board().occupied_count(), 4);
//! ```

pub mod autopilot;
pub mod clock;
pub mod config;
pub mod events;
pub mod game_engine;

pub use feedtris_core as core;
pub use feedtris_types as types;

pub use autopilot::{place, Autopilot, AutopilotWeights, BoardFeatures, PlaceError, Placement};
pub use clock::{FrameClock, FRAME_DURATION, MAX_CATCH_UP_FRAMES};
pub use config::EngineConfig;
pub use events::{EventBus, EventRecorder, GameEvent, GameListener, ListenerId};
pub use game_engine::{GameEngine, GamePhase};
