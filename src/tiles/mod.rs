//! Tiles and their abilities.
//!
//! - `kind`: the 56-tile catalog (name, level, color, text)
//! - `ability`: hook records and the context ability bodies receive
//! - `catalog`: which hooks each kind carries
//! - `tile`: a player's private copy with its disabled flag and roll counter

pub mod kind;
pub mod ability;
pub mod catalog;
pub mod tile;

pub use kind::{TileColor, TileKind};
pub use ability::{Ability, AbilityContext, ActivationHook, HookFn, Restriction, TurnStartHook};
pub use tile::{Tile, MAX_TILE_VALUE};
