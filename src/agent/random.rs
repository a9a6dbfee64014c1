//! Agent that answers uniformly at random.
//!
//! Answers are always within the bounds of the question, so the engine
//! never has to re-prompt. Seeded, so a game between random agents is
//! reproducible.

use super::agent::{Agent, Decision, DecisionContext, DiceRequest};
use crate::core::GameRng;
use crate::dice::{Die, DieFace};
use crate::engine::TurnCommand;

#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// A random subset of `0..len` with a size in `min..=max`.
    fn subset(&mut self, len: usize, min: usize, max: usize) -> Vec<usize> {
        let max = max.min(len);
        if min > max {
            return Vec::new();
        }
        let count = min + self.rng.gen_index(max - min + 1);
        let indices: Vec<usize> = (0..len).collect();
        self.rng.sample(&indices, count)
    }
}

impl Agent for RandomAgent {
    fn choose_command(&mut self, _ctx: &DecisionContext<'_>, commands: &[TurnCommand]) -> usize {
        self.rng.gen_index(commands.len())
    }

    fn choose_dice(
        &mut self,
        _ctx: &DecisionContext<'_>,
        request: &DiceRequest,
        pool: &[Die],
    ) -> Decision<Vec<usize>> {
        Decision::Chosen(self.subset(pool.len(), request.min, request.max))
    }

    fn choose_item(&mut self, _ctx: &DecisionContext<'_>, _prompt: &str, options: &[String]) -> usize {
        self.rng.gen_index(options.len())
    }

    fn choose_items(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _prompt: &str,
        options: &[String],
        min: usize,
        max: usize,
    ) -> Decision<Vec<usize>> {
        Decision::Chosen(self.subset(options.len(), min, max))
    }

    fn choose_rearrangement(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _dice: &[Die],
        options: &[Vec<DieFace>],
    ) -> Decision<usize> {
        Decision::Chosen(self.rng.gen_index(options.len()))
    }

    fn choose_face(&mut self, _ctx: &DecisionContext<'_>, _die: &Die, options: &[DieFace]) -> usize {
        self.rng.gen_index(options.len())
    }

    fn confirm(&mut self, _ctx: &DecisionContext<'_>, _prompt: &str) -> bool {
        self.rng.gen_bool(0.5)
    }
}
