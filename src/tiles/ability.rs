//! Ability records.
//!
//! An `Ability` has up to three hooks:
//!
//! - **turn start**: runs at the start of every turn of the owner, in tile
//!   acquisition order, whether or not the tile is disabled
//! - **activation**: optional, offered while the owner's turn step is in
//!   the window and the restriction holds; disables the tile when used
//! - **on claim**: runs once, right after the claim reward is granted
//!
//! The common shapes are data (`Prepare`, `FixedDie`, ...). Anything else
//! is a `Custom` function pointer into [`crate::engine::abilities`].

use crate::core::{ActionError, PlayerId};
use crate::dice::{DieFace, DieType};
use crate::agent::Agent;
use crate::engine::{Game, TurnStep};
use crate::tiles::TileKind;

/// Everything an ability body may touch.
pub struct AbilityContext<'a> {
    pub game: &'a mut Game,
    pub player: PlayerId,
    pub tile: TileKind,
    pub agent: &'a mut dyn Agent,
}

/// Body of a custom hook.
pub type HookFn = fn(&mut AbilityContext<'_>) -> Result<(), ActionError>;

/// Extra eligibility check for activations.
pub type Restriction = fn(&Game, PlayerId) -> bool;

/// Hook run at the start of each of the owner's turns.
#[derive(Clone, Copy)]
pub enum TurnStartHook {
    /// Queue fresh dice in the prepared zone.
    Prepare(&'static [DieType]),
    /// Draw tokens.
    Tokens(u32),
    PrepareAndTokens(&'static [DieType], u32),
    Custom(HookFn),
}

/// Hook run when the owner activates the tile.
#[derive(Clone, Copy)]
pub enum ActivationHook {
    /// Queue fresh dice in the prepared zone.
    Prepare(&'static [DieType]),
    /// Add a standard die showing this face to the available dice.
    FixedDie(DieFace),
    /// Add a standard die showing the tile's roll counter.
    IncrementingDie,
    Custom(HookFn),
}

/// Hooks and activation rules of one tile kind.
#[derive(Clone, Copy)]
pub struct Ability {
    pub turn_start: Option<TurnStartHook>,
    pub activation: Option<ActivationHook>,
    pub on_claim: Option<HookFn>,
    /// Turn steps in which the activation may be used.
    pub window: &'static [TurnStep],
    pub restriction: Restriction,
}

fn unrestricted(_: &Game, _: PlayerId) -> bool {
    true
}

impl Ability {
    /// No hooks at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            turn_start: None,
            activation: None,
            on_claim: None,
            window: &[],
            restriction: unrestricted,
        }
    }

    /// Only a turn-start hook.
    #[must_use]
    pub fn turn_start(hook: TurnStartHook) -> Self {
        Self {
            turn_start: Some(hook),
            ..Self::none()
        }
    }

    /// Only an activation, usable in `window`.
    #[must_use]
    pub fn activated(hook: ActivationHook, window: &'static [TurnStep]) -> Self {
        Self {
            activation: Some(hook),
            window,
            ..Self::none()
        }
    }

    /// Only an on-claim hook.
    #[must_use]
    pub fn on_claim(hook: HookFn) -> Self {
        Self {
            on_claim: Some(hook),
            ..Self::none()
        }
    }

    #[must_use]
    pub fn with_turn_start(mut self, hook: TurnStartHook) -> Self {
        self.turn_start = Some(hook);
        self
    }

    #[must_use]
    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = restriction;
        self
    }

    /// True if the tile can ever be activated.
    #[must_use]
    pub fn is_activatable(&self) -> bool {
        self.activation.is_some()
    }
}

impl std::fmt::Debug for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ability")
            .field("turn_start", &self.turn_start.is_some())
            .field("activation", &self.activation.is_some())
            .field("on_claim", &self.on_claim.is_some())
            .field("window", &self.window)
            .finish()
    }
}
