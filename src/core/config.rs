//! Game configuration types.
//!
//! Callers configure a game at startup by providing:
//! - `GameConfig`: seed, rule modes, board layout, and driver limits
//! - `PlayerSetup`: one per seat, with a name, starting tiles, and tokens
//!
//! Anything left unset is decided by the game's own seeded RNG, so a
//! default config with a fixed seed always produces the same table.

use serde::{Deserialize, Serialize};

use crate::constraints::RowMode;
use crate::tiles::TileKind;

/// Default cap on malformed agent answers before a prompt gives up.
pub const DEFAULT_MAX_INVALID_RESPONSES: u32 = 16;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Root seed. Dice, tokens, and the tile draft each get their own stream.
    pub seed: u64,

    /// Rule mode per tier 3..=7. `None` picks each tier at random.
    pub modes: Option<[RowMode; 5]>,

    /// Explicit board tiles for tiers 3..=7. `None` drafts at random.
    ///
    /// The Queen is always placed first at tier 7, whether listed or not.
    pub board: Option<Vec<TileKind>>,

    /// How many malformed answers an agent may give to one prompt.
    pub max_invalid_responses: u32,

    /// Stop `Game::play` after this many turns.
    pub turn_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            modes: None,
            board: None,
            max_invalid_responses: DEFAULT_MAX_INVALID_RESPONSES,
            turn_limit: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given seed and everything else default.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the rule mode of every tier, lowest tier first.
    #[must_use]
    pub fn with_modes(mut self, modes: [RowMode; 5]) -> Self {
        self.modes = Some(modes);
        self
    }

    /// Fix the board instead of drafting it.
    #[must_use]
    pub fn with_board(mut self, tiles: Vec<TileKind>) -> Self {
        self.board = Some(tiles);
        self
    }

    #[must_use]
    pub fn with_max_invalid_responses(mut self, limit: u32) -> Self {
        self.max_invalid_responses = limit;
        self
    }

    #[must_use]
    pub fn with_turn_limit(mut self, turns: u32) -> Self {
        self.turn_limit = Some(turns);
        self
    }
}

/// Starting position of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Display name used in logs.
    pub name: String,

    /// Tiles owned before the first turn, in acquisition order.
    pub tiles: Vec<TileKind>,

    /// Tokens drawn before the first turn.
    pub starting_tokens: u32,
}

impl PlayerSetup {
    /// A seat holding only the Start tile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tiles: vec![TileKind::Start],
            starting_tokens: 0,
        }
    }

    /// Replace the starting tiles.
    #[must_use]
    pub fn with_tiles(mut self, tiles: Vec<TileKind>) -> Self {
        self.tiles = tiles;
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.starting_tokens = tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 0);
        assert!(config.modes.is_none());
        assert!(config.board.is_none());
        assert_eq!(config.max_invalid_responses, DEFAULT_MAX_INVALID_RESPONSES);
        assert!(config.turn_limit.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new(7)
            .with_modes([RowMode::A; 5])
            .with_max_invalid_responses(3)
            .with_turn_limit(40);

        assert_eq!(config.seed, 7);
        assert_eq!(config.modes, Some([RowMode::A; 5]));
        assert_eq!(config.max_invalid_responses, 3);
        assert_eq!(config.turn_limit, Some(40));
    }

    #[test]
    fn test_player_setup_defaults_to_start_tile() {
        let setup = PlayerSetup::new("Ada");
        assert_eq!(setup.name, "Ada");
        assert_eq!(setup.tiles, vec![TileKind::Start]);
        assert_eq!(setup.starting_tokens, 0);

        let setup = setup.with_tiles(vec![TileKind::Start, TileKind::Farmer]).with_tokens(2);
        assert_eq!(setup.tiles.len(), 2);
        assert_eq!(setup.starting_tokens, 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(3).with_board(vec![TileKind::Farmer, TileKind::Guard]);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
