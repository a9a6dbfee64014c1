//! Core building blocks: player identity, RNG, configuration, and errors.
//!
//! `PlayerId`, `PlayerMap` and `GameRng` know nothing about the game. The
//! config and error types name dice and tiles, since they describe a table.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, PlayerSetup};
pub use error::{ActionError, DieError, EngineError};
