//! The decision boundary between the engine and whoever plays.
//!
//! - `agent`: the [`Agent`] trait and its request/answer types
//! - `prompt`: validated, re-prompting wrappers the engine calls
//! - `rearrange`: the pip redistribution search behind rearrangement prompts
//! - `scripted` / `random`: two ready-made agents

pub mod agent;
pub mod prompt;
pub mod rearrange;
pub mod scripted;
pub mod random;

pub use agent::{Agent, Decision, DecisionContext, DiceRequest};
pub use rearrange::rearrangements;
pub use scripted::{Reply, ScriptedAgent};
pub use random::RandomAgent;
