//! The shared table.
//!
//! `Game` owns everything that is not an agent: the board, the supply,
//! every player's state, the turn pointer, the final roll-off, and the
//! event history. Agents are passed in per call so ability bodies can
//! borrow the game mutably and the acting agent at the same time.
//!
//! ## Setup
//!
//! ```
//! use pharaoh_dice::core::{GameConfig, PlayerSetup};
//! use pharaoh_dice::engine::Game;
//! use pharaoh_dice::tiles::TileKind;
//!
//! let config = GameConfig::new(42);
//! let game = Game::new(config, vec![PlayerSetup::new("Ada"), PlayerSetup::new("Bo")]).unwrap();
//!
//! // Tier 1 is always the Herder, tier 7 always holds the Queen.
//! assert_eq!(game.board()[&1], vec![TileKind::Herder]);
//! assert_eq!(game.board()[&7][0], TileKind::Queen);
//! assert_eq!(game.supply(TileKind::Queen), 1);
//! ```

use std::collections::BTreeMap;

use im::Vector;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::{PendingEffect, Player, Score, TokenKind};
use super::turn::take_turn;
use crate::agent::Agent;
use crate::constraints::rulebook::{FIRST_TIER, LAST_TIER, SLOTS};
use crate::constraints::{NamedConstraint, RowMode, RuleBook};
use crate::core::{ActionError, EngineError, GameConfig, GameRng, PlayerId, PlayerMap, PlayerSetup};
use crate::tiles::{AbilityContext, Tile, TileColor, TileKind};

/// Score to beat. Only seven or more of a kind can take the lead.
pub const INITIAL_HIGH_SCORE: Score = Score::new(7, 0);

// =============================================================================
// Events and Outcomes
// =============================================================================

/// Something that happened at the table, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted { player: PlayerId, roll_off: bool },
    TileClaimed { player: PlayerId, tile: TileKind },
    TileActivated { player: PlayerId, tile: TileKind },
    /// Nothing could be claimed, tokens were handed out instead.
    Compensated { player: PlayerId, tokens: u32 },
    RollOffBegan,
    ScoreSubmitted {
        player: PlayerId,
        score: Score,
        /// True if the score took the lead.
        lead: bool,
    },
}

/// Result of [`Game::claim_tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed,
    /// The final roll-off is on; nothing was claimed.
    Closed,
}

/// Summary returned by [`Game::play`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The high scorer, if anyone beat the initial high score.
    pub winner: Option<PlayerId>,
    pub high_score: Score,
    /// Submitted score per seat.
    pub scores: Vec<Option<Score>>,
    pub turns: u32,
    /// False if the turn limit stopped the game early.
    pub completed: bool,
}

// =============================================================================
// Game
// =============================================================================

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    rules: RuleBook,
    modes: [RowMode; 5],
    board: BTreeMap<u8, Vec<TileKind>>,
    supply: FxHashMap<TileKind, u32>,
    players: PlayerMap<Player>,
    next_turn: PlayerId,
    final_roll_off: bool,
    high_score: Score,
    high_scorer: Option<PlayerId>,
    turns_taken: u32,
    dice_rng: GameRng,
    token_rng: GameRng,
    history: Vector<GameEvent>,
}

impl Game {
    /// Set up a table for the given seats.
    ///
    /// Modes and board come from `config` when set and are drawn from the
    /// seed otherwise.
    pub fn new(config: GameConfig, setups: Vec<PlayerSetup>) -> Result<Self, EngineError> {
        if setups.is_empty() {
            return Err(EngineError::InvalidSetup("a game needs at least one player".into()));
        }
        if setups.len() > usize::from(u8::MAX) {
            return Err(EngineError::InvalidSetup(format!(
                "{} players is more than a game supports",
                setups.len()
            )));
        }

        let root = GameRng::new(config.seed);
        let modes = match config.modes {
            Some(modes) => modes,
            None => {
                let mut rng = root.for_context("modes");
                std::array::from_fn(|_| if rng.gen_bool(0.5) { RowMode::A } else { RowMode::B })
            }
        };
        let mut board = match &config.board {
            Some(tiles) => fixed_board(tiles)?,
            None => draft_board(&mut root.for_context("draft"))?,
        };
        board.insert(1, vec![TileKind::Herder]);

        let player_count = setups.len() as u32;
        let mut supply = FxHashMap::default();
        for (&level, tiles) in &board {
            for &kind in tiles {
                supply.insert(kind, copies_per_tile(level, player_count));
            }
        }

        let players = PlayerMap::from_vec(setups.iter().map(Player::new).collect());
        let mut game = Self {
            rules: RuleBook::new(),
            modes,
            board,
            supply,
            players,
            next_turn: PlayerId::new(0),
            final_roll_off: false,
            high_score: INITIAL_HIGH_SCORE,
            high_scorer: None,
            turns_taken: 0,
            dice_rng: root.for_context("dice"),
            token_rng: root.for_context("tokens"),
            history: Vector::new(),
            config,
        };
        for (index, setup) in setups.iter().enumerate() {
            game.grant_tokens(PlayerId::new(index as u8), setup.starting_tokens);
        }
        debug!("table ready: modes {:?}, board {:?}", game.modes, game.board);
        Ok(game)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Board tiles by tier, in slot order.
    #[must_use]
    pub fn board(&self) -> &BTreeMap<u8, Vec<TileKind>> {
        &self.board
    }

    /// Copies of `kind` left. Zero for tiles not on the board.
    #[must_use]
    pub fn supply(&self, kind: TileKind) -> u32 {
        self.supply.get(&kind).copied().unwrap_or(0)
    }

    /// Rule mode of a tier in 3..=7.
    #[must_use]
    pub fn mode(&self, level: u8) -> Option<RowMode> {
        (FIRST_TIER..=LAST_TIER)
            .contains(&level)
            .then(|| self.modes[usize::from(level - FIRST_TIER)])
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    #[must_use]
    pub fn final_roll_off(&self) -> bool {
        self.final_roll_off
    }

    #[must_use]
    pub fn high_score(&self) -> Score {
        self.high_score
    }

    #[must_use]
    pub fn high_scorer(&self) -> Option<PlayerId> {
        self.high_scorer
    }

    /// Seat that acts after the current turn.
    #[must_use]
    pub fn next_turn(&self) -> PlayerId {
        self.next_turn
    }

    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// True once every player has finished.
    #[must_use]
    pub fn game_ended(&self) -> bool {
        self.players.iter().all(|(_, p)| p.finished)
    }

    // === Board queries ===

    /// Claim condition of slot `slot` in tier `level`.
    pub fn get_condition(&self, level: u8, slot: usize) -> Result<&NamedConstraint, EngineError> {
        let mode = self.mode(level).unwrap_or(RowMode::A);
        self.rules
            .condition(mode, level, slot)
            .ok_or(EngineError::NoCondition { level, slot })
    }

    /// Every board tile with its claim condition, lowest tier first.
    pub fn tiles_with_conditions(&self) -> Result<Vec<(TileKind, &NamedConstraint)>, EngineError> {
        let mut out = Vec::with_capacity(self.supply.len());
        for (&level, tiles) in &self.board {
            for (slot, &kind) in tiles.iter().enumerate() {
                out.push((kind, self.get_condition(level, slot)?));
            }
        }
        Ok(out)
    }

    /// True if a copy of `kind` is left.
    #[must_use]
    pub fn tile_available(&self, kind: TileKind) -> bool {
        self.supply(kind) > 0
    }

    /// Every other seat.
    #[must_use]
    pub fn get_opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        self.players.player_ids().filter(|&p| p != player).collect()
    }

    /// Board tiles `player` could take right now, ignoring claim conditions.
    pub fn get_available_tiles(
        &self,
        player: PlayerId,
        condition: impl Fn(TileKind) -> bool,
    ) -> Vec<TileKind> {
        let owner = &self.players[player];
        self.board
            .values()
            .flatten()
            .copied()
            .filter(|&kind| !owner.owns(kind) && self.tile_available(kind) && condition(kind))
            .collect()
    }

    // === Mutations ===

    /// Give `player` one tile from the supply.
    ///
    /// Grants the color reward, then runs the tile's on-claim hook. During
    /// the final roll-off nothing happens and `Closed` is returned.
    pub fn claim_tile(
        &mut self,
        player: PlayerId,
        kind: TileKind,
        agent: &mut dyn Agent,
    ) -> Result<ClaimOutcome, EngineError> {
        if self.final_roll_off {
            info!("{player} cannot claim {kind}: the final roll-off has begun");
            return Ok(ClaimOutcome::Closed);
        }
        if self.players[player].owns(kind) {
            return Err(EngineError::AlreadyOwned { player, tile: kind });
        }
        let copies = self
            .supply
            .get_mut(&kind)
            .ok_or(EngineError::TileNotOnBoard { tile: kind })?;
        if *copies == 0 {
            return Err(EngineError::SupplyExhausted { tile: kind });
        }
        *copies -= 1;

        self.players[player].tiles.push(Tile::new(kind));
        info!("{} ({player}) claimed {kind}", self.players[player].name);
        self.history.push_back(GameEvent::TileClaimed { player, tile: kind });
        self.grant_tokens(player, kind.color().claim_reward());

        if let Some(hook) = kind.ability().on_claim {
            let mut ctx = AbilityContext {
                game: self,
                player,
                tile: kind,
                agent,
            };
            if let Err(err) = hook(&mut ctx) {
                match err {
                    ActionError::Fatal(fatal) => return Err(fatal),
                    other => warn!("{player}: {kind} on claim abandoned: {other}"),
                }
            }
        }
        Ok(ClaimOutcome::Claimed)
    }

    /// Draw `amount` tokens of random kind.
    pub fn grant_tokens(&mut self, player: PlayerId, amount: u32) {
        for _ in 0..amount {
            let kind = if self.token_rng.gen_bool(0.5) {
                TokenKind::PipUp
            } else {
                TokenKind::Reroll
            };
            self.players[player].tokens.add(kind);
        }
    }

    /// Make `player` take the next turn.
    pub fn set_next_turn(&mut self, player: PlayerId) {
        debug!("{player} takes the next turn");
        self.next_turn = player;
    }

    /// Start the final roll-off. Later calls do nothing.
    ///
    /// Every player who has not finished gets one extra standard die on
    /// their roll-off turn.
    pub fn begin_final_roll_off(&mut self) {
        if self.final_roll_off {
            return;
        }
        self.final_roll_off = true;
        info!("the final roll-off has begun");
        self.history.push_back(GameEvent::RollOffBegan);
        // Seats before the pointer have already had their turn this round.
        let first = self.next_turn.index();
        for (id, player) in self.players.iter_mut() {
            if id.index() >= first && !player.finished {
                player.add_effect(PendingEffect::ExtraStandardDie);
            }
        }
    }

    /// Record a final score. A score above the high score takes the lead.
    pub fn submit_score(&mut self, player: PlayerId, score: Score) {
        self.players[player].final_score = Some(score);
        if score.is_empty() {
            return;
        }
        let lead = score > self.high_score;
        if lead {
            self.high_score = score;
            self.high_scorer = Some(player);
        }
        info!(
            "{} ({player}) submitted {score}{}",
            self.players[player].name,
            if lead { " and takes the lead" } else { "" }
        );
        self.history.push_back(GameEvent::ScoreSubmitted {
            player,
            score,
            lead,
        });
    }

    /// Mark `player` as done for the game.
    pub fn finish_player(&mut self, player: PlayerId) {
        self.players[player].finished = true;
    }

    pub(crate) fn player_with_rng(&mut self, player: PlayerId) -> (&mut Player, &mut GameRng) {
        (&mut self.players[player], &mut self.dice_rng)
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.history.push_back(event);
    }

    pub(crate) fn count_turn(&mut self) {
        self.turns_taken += 1;
    }

    // === Driver ===

    /// Run turns until every player has finished or the turn limit is hit.
    ///
    /// `agents` holds one agent per seat. Finished players are skipped.
    pub fn play(&mut self, agents: &mut PlayerMap<Box<dyn Agent>>) -> Result<GameOutcome, EngineError> {
        if agents.player_count() != self.player_count() {
            return Err(EngineError::InvalidSetup(format!(
                "{} agents for {} players",
                agents.player_count(),
                self.player_count()
            )));
        }

        while !self.game_ended() {
            if self.config.turn_limit.is_some_and(|limit| self.turns_taken >= limit) {
                warn!("turn limit reached after {} turns", self.turns_taken);
                break;
            }
            let current = self.next_turn;
            self.next_turn = current.next(self.player_count());
            if self.players[current].finished {
                continue;
            }
            take_turn(self, current, agents[current].as_mut())?;
        }

        let outcome = self.outcome();
        match outcome.winner {
            Some(winner) => info!("{} wins with {}", self.players[winner].name, outcome.high_score),
            None => info!("nobody wins"),
        }
        Ok(outcome)
    }

    /// Current standings.
    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            winner: self.high_scorer,
            high_score: self.high_score,
            scores: self.players.iter().map(|(_, p)| p.final_score).collect(),
            turns: self.turns_taken,
            completed: self.game_ended(),
        }
    }
}

// =============================================================================
// Board Setup
// =============================================================================

fn copies_per_tile(level: u8, player_count: u32) -> u32 {
    match level {
        1 | 3 => player_count,
        4 => player_count.saturating_sub(1).max(1),
        5 | 6 => player_count.saturating_sub(2).max(1),
        _ => 1,
    }
}

/// Yellow, then Blue, then Red. The Queen leads tier 7.
fn arrange_tier(level: u8, tiles: impl Iterator<Item = TileKind> + Clone) -> Vec<TileKind> {
    let mut row = Vec::with_capacity(SLOTS);
    if level == LAST_TIER {
        row.push(TileKind::Queen);
    }
    for color in [TileColor::Yellow, TileColor::Blue, TileColor::Red] {
        row.extend(tiles.clone().filter(|k| k.color() == color));
    }
    row
}

fn fixed_board(tiles: &[TileKind]) -> Result<BTreeMap<u8, Vec<TileKind>>, EngineError> {
    let listed: Vec<TileKind> = tiles.iter().copied().filter(|&k| k != TileKind::Queen).collect();
    if let Some(stray) = listed.iter().find(|k| !(FIRST_TIER..=LAST_TIER).contains(&k.level())) {
        return Err(EngineError::InvalidSetup(format!(
            "{stray} is level {} and cannot be placed on the board",
            stray.level()
        )));
    }
    let mut seen = listed.clone();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != listed.len() {
        return Err(EngineError::InvalidSetup("a tile is listed twice".into()));
    }

    let mut board = BTreeMap::new();
    for level in FIRST_TIER..=LAST_TIER {
        let row = arrange_tier(level, listed.iter().copied().filter(|k| k.level() == level));
        if row.len() != SLOTS {
            let names: Vec<&str> = row.iter().map(|k| k.name()).collect();
            return Err(EngineError::InvalidSetup(format!(
                "tier {level} has {} tiles {names:?}, expected {SLOTS}",
                row.len()
            )));
        }
        board.insert(level, row);
    }
    Ok(board)
}

fn draft_board(rng: &mut GameRng) -> Result<BTreeMap<u8, Vec<TileKind>>, EngineError> {
    let mut board = BTreeMap::new();
    for level in FIRST_TIER..=LAST_TIER {
        let yellows = if level == LAST_TIER { 1 } else { 2 };
        let mut picked = Vec::with_capacity(SLOTS);
        for (color, amount) in [(TileColor::Yellow, yellows), (TileColor::Blue, 1), (TileColor::Red, 1)] {
            let pool: Vec<TileKind> = TileKind::draftable(level, color).collect();
            if pool.len() < amount {
                return Err(EngineError::InvalidSetup(format!(
                    "not enough {color:?} tiles to draft tier {level}"
                )));
            }
            picked.extend(rng.sample(&pool, amount));
        }
        board.insert(level, arrange_tier(level, picked.into_iter()));
    }
    Ok(board)
}
