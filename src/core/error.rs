//! Error types.
//!
//! Two layers:
//!
//! - [`ActionError`]: a single player action could not go ahead. The turn
//!   loop logs it and returns to the action menu. Nothing has been mutated.
//! - [`EngineError`]: the calling code broke a structural rule (claiming an
//!   owned tile, an exhausted supply, a face that is not on the die). These
//!   abort the game.
//!
//! [`DieError`] is raised by die mutations and ends up in either layer.

use thiserror::Error;

use crate::core::PlayerId;
use crate::dice::{DieFace, DieType};
use crate::engine::TokenKind;
use crate::tiles::TileKind;

/// A die mutation that the die cannot perform.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DieError {
    #[error("face {face} is not on a {kind} die")]
    FaceNotOnDie { kind: DieType, face: DieFace },

    #[error("cannot pip up {kind} die showing {face:?} by {amount}")]
    PipUp {
        kind: DieType,
        face: Option<DieFace>,
        amount: u8,
    },

    #[error("{kind} die has not been rolled")]
    NotRolled { kind: DieType },
}

/// Structural failures. Always fatal for the game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{player} already owns {tile}")]
    AlreadyOwned { player: PlayerId, tile: TileKind },

    #[error("all copies of {tile} have been claimed")]
    SupplyExhausted { tile: TileKind },

    #[error("{tile} is not on the board")]
    TileNotOnBoard { tile: TileKind },

    #[error("no condition at level {level} slot {slot}")]
    NoCondition { level: u8, slot: usize },

    #[error("{tile} cannot be activated by {player} right now")]
    NotActivatable { player: PlayerId, tile: TileKind },

    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("prompt '{prompt}' offered no options")]
    EmptyChoice { prompt: String },

    #[error("{player} gave no valid answer to '{prompt}'")]
    UnresponsiveAgent { player: PlayerId, prompt: String },

    #[error(transparent)]
    Die(#[from] DieError),
}

/// Why a single action was abandoned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// A required choice was declined, or there was nothing to choose from.
    #[error("selection declined: {0}")]
    Declined(String),

    /// No redistribution of the chosen dice keeps their sum.
    #[error("rearrangement failed: {0}")]
    Rearrangement(String),

    #[error("pip-up failed: {0}")]
    PipUp(DieError),

    #[error("no {0} token to spend")]
    NoToken(TokenKind),

    #[error(transparent)]
    Fatal(#[from] EngineError),
}

impl ActionError {
    /// True if the game cannot continue.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ActionError::Fatal(_))
    }

    pub(crate) fn declined(reason: impl Into<String>) -> Self {
        ActionError::Declined(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_wraps_into_fatal() {
        let err: ActionError = EngineError::SupplyExhausted { tile: TileKind::Farmer }.into();
        assert!(err.is_fatal());
        assert!(!ActionError::declined("nothing picked").is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = DieError::FaceNotOnDie {
            kind: DieType::Voyage,
            face: DieFace::Six,
        };
        assert_eq!(err.to_string(), "face 6 is not on a Voyage die");

        let err = EngineError::AlreadyOwned {
            player: PlayerId::new(0),
            tile: TileKind::Farmer,
        };
        assert_eq!(err.to_string(), "Player 1 already owns FARMER");
    }
}
