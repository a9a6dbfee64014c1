//! The turn engine.
//!
//! - `player`: per-seat state (dice zones, tokens, pending effects)
//! - `game`: the table, claims, the final roll-off, and the game driver
//! - `turn`: one turn as a state machine, plus the activation plumbing
//! - `powers`: power-face resolution and shared dice helpers
//! - `abilities`: the bodies and restrictions tile abilities point at

pub mod player;
pub mod game;
pub mod turn;
pub mod powers;
pub mod abilities;

pub use player::{PendingEffect, Player, Score, TokenKind, TokenPool, TurnStep, Zone};
pub use game::{ClaimOutcome, Game, GameEvent, GameOutcome, INITIAL_HIGH_SCORE};
pub use turn::{
    activate, active_tiles, available_commands, claim_options, is_active, offer_activations,
    take_turn, TurnCommand, COMPENSATION_TOKENS,
};
