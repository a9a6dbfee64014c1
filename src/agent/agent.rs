//! The decision-maker trait.
//!
//! The engine never reads input itself. Every choice goes through an
//! `Agent`, which sees the game read-only and answers with indices into
//! the options it was given. Answers are validated by
//! [`prompt`](super::prompt); a bad answer is logged and asked again.

use crate::core::PlayerId;
use crate::dice::{Die, DieFace};
use crate::engine::{Game, TurnCommand};

// =============================================================================
// Request / Response Types
// =============================================================================

/// Read-only view handed to the agent with every question.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub game: &'a Game,
    /// The player being asked.
    pub player: PlayerId,
}

impl<'a> DecisionContext<'a> {
    pub fn new(game: &'a Game, player: PlayerId) -> Self {
        Self { game, player }
    }
}

/// How many dice to pick, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRequest {
    pub prompt: String,
    pub min: usize,
    pub max: usize,
}

impl DiceRequest {
    /// Pick exactly `count` dice.
    pub fn exactly(count: usize, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            min: count,
            max: count,
        }
    }

    /// Pick between `min` and `max` dice.
    pub fn between(min: usize, max: usize, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            min,
            max,
        }
    }
}

/// Answer to a question the agent may decline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    Chosen(T),
    Declined,
}

impl<T> Decision<T> {
    /// The chosen value, if any.
    pub fn chosen(self) -> Option<T> {
        match self {
            Decision::Chosen(value) => Some(value),
            Decision::Declined => None,
        }
    }

    #[must_use]
    pub fn is_declined(&self) -> bool {
        matches!(self, Decision::Declined)
    }
}

// =============================================================================
// Agent Trait
// =============================================================================

/// Provides every decision a player makes.
pub trait Agent {
    /// Pick one action from the menu. The last command is always `Lock`.
    fn choose_command(&mut self, ctx: &DecisionContext<'_>, commands: &[TurnCommand]) -> usize;

    /// Pick between `request.min` and `request.max` distinct indices into
    /// `pool`.
    fn choose_dice(
        &mut self,
        ctx: &DecisionContext<'_>,
        request: &DiceRequest,
        pool: &[Die],
    ) -> Decision<Vec<usize>>;

    /// Pick one option. `options` is never empty.
    fn choose_item(&mut self, ctx: &DecisionContext<'_>, prompt: &str, options: &[String]) -> usize;

    /// Pick between `min` and `max` distinct options.
    fn choose_items(
        &mut self,
        ctx: &DecisionContext<'_>,
        prompt: &str,
        options: &[String],
        min: usize,
        max: usize,
    ) -> Decision<Vec<usize>>;

    /// Pick one redistribution of faces for `dice`. Each option lists one
    /// face per die, in the same order as `dice`.
    fn choose_rearrangement(
        &mut self,
        ctx: &DecisionContext<'_>,
        dice: &[Die],
        options: &[Vec<DieFace>],
    ) -> Decision<usize>;

    /// Pick a new face for `die`.
    fn choose_face(&mut self, ctx: &DecisionContext<'_>, die: &Die, options: &[DieFace]) -> usize;

    /// Yes or no.
    fn confirm(&mut self, ctx: &DecisionContext<'_>, prompt: &str) -> bool {
        let options = ["Yes".to_string(), "No".to_string()];
        self.choose_item(ctx, prompt, &options) == 0
    }
}
