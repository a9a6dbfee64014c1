//! # pharaoh-dice
//!
//! Rules engine for a push-your-luck dice game with claimable tiles.
//!
//! Players roll a personal pool of dice, lock some and reroll the rest,
//! bend the results with tokens and tile abilities, and spend the locked
//! dice on a tile whose condition they satisfy. Claimed tiles add dice and
//! abilities to later turns. Claiming the Queen starts a final roll-off in
//! which every other player gets one last turn to beat her score.
//!
//! ## Design Principles
//!
//! 1. **No I/O**: Every decision goes through the [`Agent`] trait. The
//!    engine validates each answer and re-prompts on bad input.
//!
//! 2. **Deterministic**: One seed drives the draft, the dice, and the token
//!    draws through independent streams. Same seed and same agent answers
//!    give the same game.
//!
//! 3. **Data Over Callbacks**: Tile abilities are records of typed hooks.
//!    Common shapes are enum variants; only unusual bodies are functions.
//!
//! ## Modules
//!
//! - `core`: Player ids, RNG, configuration, errors
//! - `dice`: Faces, values, and the eight die types
//! - `constraints`: Claim conditions and the mode A/B tables
//! - `tiles`: The tile catalog and ability records
//! - `engine`: Game state, the turn state machine, ability bodies
//! - `agent`: The decision boundary and two ready-made agents
//!
//! ## Example
//!
//! ```
//! use pharaoh_dice::{Agent, Game, GameConfig, PlayerMap, PlayerSetup, RandomAgent};
//!
//! let config = GameConfig::new(7).with_turn_limit(30);
//! let mut game = Game::new(config, vec![PlayerSetup::new("Ada"), PlayerSetup::new("Bo")]).unwrap();
//!
//! let mut agents: PlayerMap<Box<dyn Agent>> =
//!     PlayerMap::new(2, |p| Box::new(RandomAgent::new(u64::from(p.0))) as Box<dyn Agent>);
//! let outcome = game.play(&mut agents).unwrap();
//!
//! assert!(outcome.turns <= 30);
//! ```

pub mod core;
pub mod dice;
pub mod constraints;
pub mod tiles;
pub mod engine;
pub mod agent;

// Re-export commonly used types
pub use crate::core::{
    ActionError, DieError, EngineError,
    GameConfig, PlayerSetup,
    GameRng, PlayerId, PlayerMap,
};

pub use crate::dice::{Die, DieFace, DieType, PowerKind};

pub use crate::constraints::{Constraint, NamedConstraint, RowMode, RuleBook, ValueFilter, ValueSet};

pub use crate::tiles::{Ability, Tile, TileColor, TileKind};

pub use crate::engine::{
    ClaimOutcome, Game, GameEvent, GameOutcome,
    PendingEffect, Player, Score, TokenKind, TokenPool, TurnCommand, TurnStep, Zone,
};

pub use crate::agent::{Agent, Decision, DecisionContext, DiceRequest, RandomAgent, Reply, ScriptedAgent};
