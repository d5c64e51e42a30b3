//! Headless simulation: one autopilot game, reported as JSON.

use std::collections::BTreeMap;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use crate::core::GameSnapshot;
use crate::engine::{Autopilot, EventRecorder, GameEngine, GameEvent};

pub const USAGE: &str =
    "usage: feedtris-sim [--seed <u64>] [--level <u32>] [--frames <u64>] [--think <u32>] [--pretty]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u64,
    pub start_level: u32,
    pub max_frames: u64,
    /// Frames the autopilot waits after each spawn
    pub think_frames: u32,
    pub pretty: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: 0,
            max_frames: 36_000,
            think_frames: 8,
            pretty: false,
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "FEEDTRIS_SEED")? {
            config.seed = v;
        }
        if let Some(v) = parse_var(&lookup, "FEEDTRIS_START_LEVEL")? {
            config.start_level = v;
        }
        if let Some(v) = parse_var(&lookup, "FEEDTRIS_MAX_FRAMES")? {
            config.max_frames = v;
        }
        if let Some(v) = parse_var(&lookup, "FEEDTRIS_THINK_FRAMES")? {
            config.think_frames = v;
        }
        if let Some(v) = lookup("FEEDTRIS_PRETTY") {
            config.pretty = parse_flag("FEEDTRIS_PRETTY", v.trim())?;
        }

        Ok(config)
    }

    /// Apply command-line overrides (program name already stripped)
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    self.seed = parse_arg(args.get(i), "--seed")?;
                }
                "--level" => {
                    i += 1;
                    self.start_level = parse_arg(args.get(i), "--level")?;
                }
                "--frames" => {
                    i += 1;
                    self.max_frames = parse_arg(args.get(i), "--frames")?;
                }
                "--think" => {
                    i += 1;
                    self.think_frames = parse_arg(args.get(i), "--think")?;
                }
                "--pretty" => self.pretty = true,
                other => {
                    return Err(anyhow!("unknown argument: {}\n{}", other, USAGE));
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("{}: invalid value {:?}: {}", name, raw, e)),
        _ => Ok(None),
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(anyhow!("{}: invalid flag value {:?}", name, raw)),
    }
}

fn parse_arg<T>(value: Option<&String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse()
        .map_err(|e| anyhow!("invalid {} value {:?}: {}", flag, v, e))
}

/// Event totals over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub board_changed: usize,
    pub state_changed: usize,
    pub rotations: usize,
    pub pieces_locked: usize,
    pub line_clears: usize,
    pub lines: u32,
    pub game_over: usize,
}

impl EventCounts {
    pub fn from_events(events: &[GameEvent]) -> Self {
        let mut counts = Self::default();
        for event in events {
            match event {
                GameEvent::BoardChanged => counts.board_changed += 1,
                GameEvent::GameStateChanged => counts.state_changed += 1,
                GameEvent::Rotation { .. } => counts.rotations += 1,
                GameEvent::PieceLocked => counts.pieces_locked += 1,
                GameEvent::LinesCleared(n) => {
                    counts.line_clears += 1;
                    counts.lines += n;
                }
                GameEvent::GameOver => counts.game_over += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub start_level: u32,
    pub frames: u64,
    pub game_over: bool,
    pub placement_errors: u32,
    pub events: EventCounts,
    pub stats: BTreeMap<&'static str, u32>,
    pub snapshot: GameSnapshot,
}

impl SimReport {
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        out.map_err(|e| anyhow!("serialize report: {}", e))
    }
}

/// Play one game with the autopilot for at most `config.max_frames` frames
pub fn run(config: &SimConfig) -> SimReport {
    let mut engine = GameEngine::new(config.seed);
    let recorder = EventRecorder::new();
    engine.subscribe(recorder.clone());
    engine.start_game(config.start_level);

    let mut pilot = Autopilot::new(config.think_frames);
    let frame = engine.config().frame_duration();
    let mut placement_errors = 0u32;

    for _ in 0..config.max_frames {
        if engine.is_game_over() {
            break;
        }
        if let Some(Err(err)) = pilot.step(&mut engine) {
            debug!("autopilot placement failed: {}", err);
            placement_errors += 1;
        }
        engine.advance(frame);
    }

    info!(
        "simulation finished after {} frames: score {}, lines {}, level {}",
        engine.frame(),
        engine.score(),
        engine.lines(),
        engine.level()
    );

    SimReport {
        seed: config.seed,
        start_level: config.start_level,
        frames: engine.frame(),
        game_over: engine.is_game_over(),
        placement_errors,
        events: EventCounts::from_events(&recorder.events()),
        stats: engine
            .stats()
            .iter()
            .map(|(kind, count)| (kind.as_str(), count))
            .collect(),
        snapshot: engine.snapshot(),
    }
}
