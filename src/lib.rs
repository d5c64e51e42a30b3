//! Feedtris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so hosts and tests can write
//! `feedtris::{core, engine, types}`. The headless simulator lives in [`sim`].

pub mod sim;

pub use feedtris_core as core;
pub use feedtris_engine as engine;
pub use feedtris_types as types;
