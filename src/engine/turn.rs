//! One player's turn.
//!
//! ## Flow
//!
//! 1. **Turn start**: clear the dice zones, refresh Yellow and Blue tiles,
//!    run turn-start hooks in acquisition order, offer turn-start
//!    activations, then apply and drop pending effects.
//! 2. **Rolls**: while dice are prepared, roll them all, bump every tile's
//!    roll counter, and run the action menu until the player locks.
//! 3. **Claim**: the locked dice claim one tile, or earn two tokens when
//!    nothing qualifies. In the final roll-off they are scored instead.
//!
//! Recoverable failures inside the action menu are logged and the menu is
//! shown again. Only [`EngineError`]s leave a turn.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::game::{Game, GameEvent};
use super::player::{PendingEffect, Score, TokenKind, TurnStep, Zone};
use super::powers;
use crate::agent::{prompt, Agent, Decision, DiceRequest};
use crate::constraints::{Constraint, ValueSet};
use crate::core::{ActionError, EngineError, PlayerId};
use crate::dice::{Die, DieFace, DieType};
use crate::tiles::{AbilityContext, ActivationHook, TileKind, TurnStartHook};

/// Tokens handed out when the locked dice claim nothing.
pub const COMPENSATION_TOKENS: u32 = 2;

/// An entry of the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnCommand {
    /// Spend a pip-up token on one die.
    SpendPipUp,
    /// Spend a reroll token on one die.
    SpendReroll,
    Activate(TileKind),
    /// Commit some dice and send the rest back.
    Lock,
}

impl std::fmt::Display for TurnCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnCommand::SpendPipUp => f.write_str("Use pip-up token"),
            TurnCommand::SpendReroll => f.write_str("Use reroll token"),
            TurnCommand::Activate(kind) => write!(f, "Activate {kind}"),
            TurnCommand::Lock => f.write_str("Lock dice"),
        }
    }
}

// =============================================================================
// Turn Driver
// =============================================================================

/// Play one full turn for `player`.
///
/// While the final roll-off is on, an unfinished player takes a roll-off
/// turn: the locked dice are scored and the player finishes.
pub fn take_turn(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), EngineError> {
    let roll_off = game.final_roll_off() && !game.player(player).finished;
    game.count_turn();
    game.record(GameEvent::TurnStarted { player, roll_off });
    info!(
        "turn {}: {} ({player}){}",
        game.turns_taken(),
        game.player(player).name,
        if roll_off { ", final roll-off" } else { "" }
    );

    start_turn(game, player, agent, roll_off)?;

    while !game.player(player).prepared.is_empty() {
        roll(game, player);
        action_phase(game, player, agent)?;
    }

    if roll_off {
        game.player_mut(player).step = TurnStep::RollOffEnd;
        offer_activations(game, player, agent)?;
        let score = Score::from_dice(&game.player(player).locked);
        game.submit_score(player, score);
        game.finish_player(player);
    } else {
        claim_with_locked(game, player, agent)?;
        game.player_mut(player).step = TurnStep::ClaimEnd;
        offer_activations(game, player, agent)?;
    }

    game.player_mut(player).step = TurnStep::None;
    Ok(())
}

fn start_turn(
    game: &mut Game,
    player: PlayerId,
    agent: &mut dyn Agent,
    roll_off: bool,
) -> Result<(), EngineError> {
    let state = game.player_mut(player);
    state.clear_dice();
    state.locked_pair = false;
    state.step = if roll_off {
        TurnStep::RollOffStart
    } else {
        TurnStep::TurnStart
    };
    for tile in &mut state.tiles {
        tile.refresh();
    }

    let owned: Vec<TileKind> = state.tiles.iter().map(|t| t.kind).collect();
    for kind in owned {
        if let Some(hook) = kind.ability().turn_start {
            run_turn_start(game, player, kind, hook, agent)?;
            if let Some(tile) = game.player_mut(player).tile_mut(kind) {
                tile.value = 0;
            }
        }
    }

    offer_activations(game, player, agent)?;

    let effects = std::mem::take(&mut game.player_mut(player).effects);
    for effect in effects {
        apply_effect(game, player, effect);
    }
    Ok(())
}

fn run_turn_start(
    game: &mut Game,
    player: PlayerId,
    kind: TileKind,
    hook: TurnStartHook,
    agent: &mut dyn Agent,
) -> Result<(), EngineError> {
    match hook {
        TurnStartHook::Prepare(dice) => prepare_all(game, player, dice),
        TurnStartHook::Tokens(amount) => game.grant_tokens(player, amount),
        TurnStartHook::PrepareAndTokens(dice, amount) => {
            prepare_all(game, player, dice);
            game.grant_tokens(player, amount);
        }
        TurnStartHook::Custom(body) => {
            let mut ctx = AbilityContext {
                game,
                player,
                tile: kind,
                agent,
            };
            match body(&mut ctx) {
                Ok(()) => {}
                Err(ActionError::Fatal(err)) => return Err(err),
                Err(err) => warn!("{player}: {kind} turn start abandoned: {err}"),
            }
        }
    }
    Ok(())
}

fn prepare_all(game: &mut Game, player: PlayerId, dice: &[DieType]) {
    let state = game.player_mut(player);
    for &kind in dice {
        state.prepare(kind);
    }
}

fn apply_effect(game: &mut Game, player: PlayerId, effect: PendingEffect) {
    let state = game.player_mut(player);
    match effect {
        PendingEffect::LoseStandardDie => {
            if let Some(pos) = state.prepared.iter().position(|d| d.kind() == DieType::Standard) {
                state.prepared.remove(pos);
            }
        }
        PendingEffect::ExtraStandardDie => state.prepare(DieType::Standard),
    }
    debug!("{player}: applied {effect:?}");
}

fn roll(game: &mut Game, player: PlayerId) {
    let (state, rng) = game.player_with_rng(player);
    state.step = TurnStep::Rolls;
    let mut dice = std::mem::take(&mut state.prepared);
    for die in &mut dice {
        die.roll(rng);
    }
    state.available.extend(dice);
    for tile in &mut state.tiles {
        tile.value_up();
    }
    debug!("{player} rolled {}", show_dice(&state.available));
}

// =============================================================================
// Action Menu
// =============================================================================

fn action_phase(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), EngineError> {
    loop {
        powers::resolve_powers(game, player, agent)?;

        let commands = available_commands(game, player);
        let command = match commands.as_slice() {
            [only] => *only,
            _ => prompt::choose_command(agent, game, player, &commands)?,
        };

        let result = match command {
            TurnCommand::Lock => {
                if lock(game, player, agent)? {
                    return Ok(());
                }
                continue;
            }
            TurnCommand::SpendPipUp => spend_pip_up(game, player, agent),
            TurnCommand::SpendReroll => spend_reroll(game, player, agent),
            TurnCommand::Activate(kind) => activate(game, player, kind, agent),
        };
        match result {
            Ok(()) => {}
            Err(ActionError::Fatal(err)) => return Err(err),
            Err(err) => warn!("{player}: {command} abandoned: {err}"),
        }
    }
}

/// The current menu. `Lock` is always last.
#[must_use]
pub fn available_commands(game: &Game, player: PlayerId) -> Vec<TurnCommand> {
    let tokens = game.player(player).tokens;
    let mut commands = Vec::new();
    if tokens.count(TokenKind::PipUp) > 0 {
        commands.push(TurnCommand::SpendPipUp);
    }
    if tokens.count(TokenKind::Reroll) > 0 {
        commands.push(TurnCommand::SpendReroll);
    }
    commands.extend(active_tiles(game, player).into_iter().map(TurnCommand::Activate));
    commands.push(TurnCommand::Lock);
    commands
}

fn spend_pip_up(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), ActionError> {
    if game.player(player).tokens.count(TokenKind::PipUp) == 0 {
        return Err(ActionError::NoToken(TokenKind::PipUp));
    }
    let request = DiceRequest::exactly(1, "Choose a die to pip up");
    let picks = prompt::choose_dice(agent, game, player, &request, Zone::Available, |_| true)?
        .chosen()
        .ok_or_else(|| ActionError::declined("no die chosen to pip up"))?;

    let state = game.player_mut(player);
    state.available[picks[0]].pipup(1).map_err(ActionError::PipUp)?;
    state.tokens.spend(TokenKind::PipUp)
}

fn spend_reroll(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), ActionError> {
    if game.player(player).tokens.count(TokenKind::Reroll) == 0 {
        return Err(ActionError::NoToken(TokenKind::Reroll));
    }
    powers::reroll_dice(game, player, agent, 1, 1)?;
    game.player_mut(player).tokens.spend(TokenKind::Reroll)
}

/// Lock some of the available dice. Returns false if the lock was refused
/// and the menu should be shown again.
fn lock(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<bool, EngineError> {
    game.player_mut(player).step = TurnStep::Lock;
    let available = game.player(player).available.len();
    let request = DiceRequest::between(0, available, "Choose dice to lock");

    let picks = match prompt::choose_dice(agent, game, player, &request, Zone::Available, |_| true)? {
        Decision::Chosen(picks) => picks,
        Decision::Declined => return Ok(refuse_lock(game, player, "lock cancelled")),
    };

    let state = game.player(player);
    let leaves_immediate = state
        .available
        .iter()
        .enumerate()
        .any(|(i, die)| die.kind().must_lock() && !picks.contains(&i));
    if leaves_immediate {
        return Ok(refuse_lock(game, player, "immediate dice must be locked"));
    }
    if picks.is_empty() && !state.available.is_empty() {
        return Ok(refuse_lock(game, player, "no dice locked"));
    }

    let state = game.player_mut(player);
    let mut locked_now = Vec::with_capacity(picks.len());
    for (i, mut die) in std::mem::take(&mut state.available).into_iter().enumerate() {
        if picks.contains(&i) {
            locked_now.push(die);
        } else {
            die.reset();
            state.prepared.push(die);
        }
    }
    state.locked_pair = Constraint::x_of_a_kind(2).evaluate(&ValueSet::from_dice(&locked_now));
    debug!(
        "{player} locked {}, rerolling {}",
        show_dice(&locked_now),
        state.prepared.len()
    );
    state.locked.extend(locked_now);

    offer_activations(game, player, agent)?;
    game.player_mut(player).locked_pair = false;
    Ok(true)
}

fn refuse_lock(game: &mut Game, player: PlayerId, reason: &str) -> bool {
    warn!("{player}: {reason}");
    game.player_mut(player).step = TurnStep::Rolls;
    false
}

// =============================================================================
// Claims
// =============================================================================

/// Board tiles `dice` could claim for `player`.
///
/// A tile qualifies if the player does not own it, a copy is left, there
/// are at least as many dice as its level, its condition holds, and
/// `restriction` accepts it.
pub fn claim_options(
    game: &Game,
    player: PlayerId,
    dice: &[Die],
    restriction: &dyn Fn(TileKind) -> bool,
) -> Result<Vec<TileKind>, EngineError> {
    let values = ValueSet::from_dice(dice);
    let owner = game.player(player);
    let mut options = Vec::new();
    for (kind, condition) in game.tiles_with_conditions()? {
        if owner.owns(kind)
            || !game.tile_available(kind)
            || dice.len() < usize::from(kind.level())
            || !restriction(kind)
        {
            continue;
        }
        if condition.evaluate(&values) {
            options.push(kind);
        }
    }
    Ok(options)
}

fn claim_with_locked(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), EngineError> {
    game.player_mut(player).step = TurnStep::Claim;
    if game.final_roll_off() {
        info!("{player}: no claims during the final roll-off");
        return Ok(());
    }

    let locked = game.player(player).locked.clone();
    let options = claim_options(game, player, &locked, &|_: TileKind| true)?;
    if options.is_empty() {
        info!(
            "{player} claimed nothing with {} and takes {COMPENSATION_TOKENS} tokens",
            show_dice(&locked)
        );
        game.grant_tokens(player, COMPENSATION_TOKENS);
        game.record(GameEvent::Compensated {
            player,
            tokens: COMPENSATION_TOKENS,
        });
        return Ok(());
    }

    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let index = prompt::choose_item(agent, game, player, "Choose a tile to claim", &labels)?;
    game.claim_tile(player, options[index], agent)?;
    offer_activations(game, player, agent)
}

// =============================================================================
// Activations
// =============================================================================

/// True if `kind` can be activated by `player` right now.
#[must_use]
pub fn is_active(game: &Game, player: PlayerId, kind: TileKind) -> bool {
    let state = game.player(player);
    let Some(tile) = state.tile(kind) else {
        return false;
    };
    let ability = kind.ability();
    ability.is_activatable()
        && !tile.disabled
        && ability.window.contains(&state.step)
        && (ability.restriction)(game, player)
}

/// Owned tiles that can be activated right now, in acquisition order.
#[must_use]
pub fn active_tiles(game: &Game, player: PlayerId) -> Vec<TileKind> {
    game.player(player)
        .tiles
        .iter()
        .map(|t| t.kind)
        .filter(|&kind| is_active(game, player, kind))
        .collect()
}

/// Use a tile's activation and disable the tile.
pub fn activate(
    game: &mut Game,
    player: PlayerId,
    kind: TileKind,
    agent: &mut dyn Agent,
) -> Result<(), ActionError> {
    if !is_active(game, player, kind) {
        return Err(EngineError::NotActivatable { player, tile: kind }.into());
    }
    let Some(hook) = kind.ability().activation else {
        return Err(EngineError::NotActivatable { player, tile: kind }.into());
    };

    match hook {
        ActivationHook::Prepare(dice) => prepare_all(game, player, dice),
        ActivationHook::FixedDie(face) => add_standard_die(game, player, face)?,
        ActivationHook::IncrementingDie => {
            let value = game.player(player).tile(kind).map_or(0, |t| t.value);
            let face = DieFace::from_value(value)
                .ok_or_else(|| ActionError::declined(format!("{kind} has no value yet")))?;
            add_standard_die(game, player, face)?;
        }
        ActivationHook::Custom(body) => {
            let mut ctx = AbilityContext {
                game: &mut *game,
                player,
                tile: kind,
                agent,
            };
            body(&mut ctx)?;
        }
    }

    if let Some(tile) = game.player_mut(player).tile_mut(kind) {
        tile.disabled = true;
    }
    game.record(GameEvent::TileActivated { player, tile: kind });
    debug!("{player} activated {kind}");
    Ok(())
}

/// Ask about every tile that can be activated now, one at a time.
pub fn offer_activations(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), EngineError> {
    for kind in active_tiles(game, player) {
        // An earlier activation may have changed what is eligible.
        if !is_active(game, player, kind) {
            continue;
        }
        if !prompt::confirm(agent, game, player, &format!("Activate {kind}?")) {
            continue;
        }
        match activate(game, player, kind, agent) {
            Ok(()) => {}
            Err(ActionError::Fatal(err)) => return Err(err),
            Err(err) => warn!("{player}: {kind} abandoned: {err}"),
        }
    }
    Ok(())
}

pub(crate) fn add_standard_die(game: &mut Game, player: PlayerId, face: DieFace) -> Result<(), ActionError> {
    let die = Die::showing(DieType::Standard, face).map_err(EngineError::from)?;
    game.player_mut(player).available.push(die);
    Ok(())
}

fn show_dice(dice: &[Die]) -> String {
    let shown: Vec<String> = dice.iter().map(ToString::to_string).collect();
    format!("[{}]", shown.join(", "))
}
