//! Owned tile instances.

use serde::{Deserialize, Serialize};

use super::kind::{TileColor, TileKind};
use super::Ability;

/// Highest value the roll counter reaches.
pub const MAX_TILE_VALUE: u8 = 6;

/// A player's private copy of a tile.
///
/// Two tiles are the same tile if they have the same kind; `disabled` and
/// `value` are per-owner state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Set once the activation has been used.
    pub disabled: bool,
    /// Rolls since the last turn start, capped at six.
    pub value: u8,
}

impl Tile {
    #[must_use]
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            disabled: false,
            value: 0,
        }
    }

    #[must_use]
    pub fn color(&self) -> TileColor {
        self.kind.color()
    }

    #[must_use]
    pub fn ability(&self) -> Ability {
        self.kind.ability()
    }

    /// Bump the roll counter.
    pub fn value_up(&mut self) {
        if self.value < MAX_TILE_VALUE {
            self.value += 1;
        }
    }

    /// Turn-start refresh of the activation.
    pub fn refresh(&mut self) {
        if self.color().refreshes() {
            self.disabled = false;
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Tile {}

impl std::hash::Hash for Tile {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.kind.hash(hasher);
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.name())
    }
}
