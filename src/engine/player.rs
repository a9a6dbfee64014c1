//! Per-player state.
//!
//! ## Dice zones
//!
//! - `prepared`: queued for the next roll, always faceless
//! - `available`: rolled this roll, still open to changes
//! - `locked`: committed for this turn, used for the claim
//!
//! A die lives in exactly one zone. Moving a die moves the value; nothing
//! ever holds two handles to the same die.

use serde::{Deserialize, Serialize};

use crate::core::{ActionError, PlayerSetup};
use crate::dice::{Die, DieType};
use crate::tiles::{Tile, TileKind};

/// Where the owner is within their turn. Gates tile activations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStep {
    TurnStart,
    Rolls,
    Claim,
    Lock,
    ClaimEnd,
    RollOffStart,
    RollOffEnd,
    None,
}

/// The two token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Pip up one die by one.
    PipUp,
    /// Reroll one die.
    Reroll,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::PipUp => f.write_str("pip-up"),
            TokenKind::Reroll => f.write_str("reroll"),
        }
    }
}

/// Token counts by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPool {
    pip_up: u32,
    reroll: u32,
}

impl TokenPool {
    #[must_use]
    pub fn new(pip_up: u32, reroll: u32) -> Self {
        Self { pip_up, reroll }
    }

    #[must_use]
    pub fn count(&self, kind: TokenKind) -> u32 {
        match kind {
            TokenKind::PipUp => self.pip_up,
            TokenKind::Reroll => self.reroll,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.pip_up + self.reroll
    }

    pub fn add(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::PipUp => self.pip_up += 1,
            TokenKind::Reroll => self.reroll += 1,
        }
    }

    /// Remove one token of `kind`.
    pub fn spend(&mut self, kind: TokenKind) -> Result<(), ActionError> {
        let slot = match kind {
            TokenKind::PipUp => &mut self.pip_up,
            TokenKind::Reroll => &mut self.reroll,
        };
        if *slot == 0 {
            return Err(ActionError::NoToken(kind));
        }
        *slot -= 1;
        Ok(())
    }
}

/// One-shot effects queued by other players' tiles.
///
/// Applied at the owner's next turn start, after turn-start hooks, then
/// discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingEffect {
    /// Drop one standard die from the prepared zone.
    LoseStandardDie,
    /// Add one standard die to the prepared zone.
    ExtraStandardDie,
}

/// Dice zone selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Prepared,
    Available,
    Locked,
}

/// Final result: the largest n-of-a-kind in a dice set.
///
/// Compared by count first, then by the value of the group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score {
    pub count: u8,
    pub value: u8,
}

impl Score {
    #[must_use]
    pub const fn new(count: u8, value: u8) -> Self {
        Self { count, value }
    }

    /// Best group in `dice`. Ties on size go to the higher value.
    #[must_use]
    pub fn from_dice(dice: &[Die]) -> Self {
        let mut freq = [0u8; 7];
        for value in dice.iter().filter_map(Die::value) {
            freq[usize::from(value)] += 1;
        }
        (1..=6u8)
            .map(|v| Score::new(freq[usize::from(v)], v))
            .filter(|s| s.count > 0)
            .max()
            .unwrap_or_default()
    }

    /// True for an empty dice set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.count, self.value)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Owned tiles in acquisition order. Never two of the same kind.
    pub tiles: Vec<Tile>,
    pub prepared: Vec<Die>,
    pub available: Vec<Die>,
    pub locked: Vec<Die>,
    pub tokens: TokenPool,
    pub effects: Vec<PendingEffect>,
    pub step: TurnStep,
    /// Set while the lock that just happened contained a pair.
    pub locked_pair: bool,
    /// Set once the player has taken part in the final roll-off.
    pub finished: bool,
    pub final_score: Option<Score>,
}

impl Player {
    /// A player with the setup's tiles and no tokens. The game draws the
    /// starting tokens, since token kinds are random.
    pub fn new(setup: &PlayerSetup) -> Self {
        let mut tiles: Vec<Tile> = Vec::with_capacity(setup.tiles.len());
        for &kind in &setup.tiles {
            if !tiles.iter().any(|t| t.kind == kind) {
                tiles.push(Tile::new(kind));
            }
        }
        Self {
            name: setup.name.clone(),
            tiles,
            prepared: Vec::new(),
            available: Vec::new(),
            locked: Vec::new(),
            tokens: TokenPool::default(),
            effects: Vec::new(),
            step: TurnStep::None,
            locked_pair: false,
            finished: false,
            final_score: None,
        }
    }

    #[must_use]
    pub fn owns(&self, kind: TileKind) -> bool {
        self.tiles.iter().any(|t| t.kind == kind)
    }

    #[must_use]
    pub fn tile(&self, kind: TileKind) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.kind == kind)
    }

    pub fn tile_mut(&mut self, kind: TileKind) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.kind == kind)
    }

    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vec<Die> {
        match zone {
            Zone::Prepared => &self.prepared,
            Zone::Available => &self.available,
            Zone::Locked => &self.locked,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vec<Die> {
        match zone {
            Zone::Prepared => &mut self.prepared,
            Zone::Available => &mut self.available,
            Zone::Locked => &mut self.locked,
        }
    }

    /// Queue a fresh die for the next roll.
    pub fn prepare(&mut self, kind: DieType) {
        self.prepared.push(Die::new(kind));
    }

    /// Empty all three zones.
    pub fn clear_dice(&mut self) {
        self.prepared.clear();
        self.available.clear();
        self.locked.clear();
    }

    /// Nothing left to roll or lock.
    #[must_use]
    pub fn locked_all(&self) -> bool {
        self.available.is_empty() && self.prepared.is_empty()
    }

    pub fn add_effect(&mut self, effect: PendingEffect) {
        self.effects.push(effect);
    }

    /// Total dice across all zones.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.prepared.len() + self.available.len() + self.locked.len()
    }
}
