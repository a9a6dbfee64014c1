//! Ability bodies and activation restrictions.
//!
//! Bodies follow one rule: ask every question first, mutate last. A body
//! that returns a recoverable [`ActionError`] has changed nothing, so the
//! tile stays enabled and the player is back at the menu.

use log::debug;

use super::game::Game;
use super::player::{PendingEffect, Score, Zone};
use super::powers::{adjust_dice, reroll_dice};
use super::turn::{add_standard_die, claim_options};
use crate::agent::{prompt, rearrangements, DiceRequest};
use crate::core::{ActionError, EngineError, PlayerId};
use crate::dice::{Die, DieFace, DieType};
use crate::tiles::{AbilityContext, TileColor, TileKind};

// =============================================================================
// Restrictions
// =============================================================================

pub fn has_available_dice(game: &Game, player: PlayerId) -> bool {
    !game.player(player).available.is_empty()
}

pub fn has_valued_die(game: &Game, player: PlayerId) -> bool {
    game.player(player).available.iter().any(|d| d.value().is_some())
}

pub fn has_two_valued_dice(game: &Game, player: PlayerId) -> bool {
    game.player(player)
        .available
        .iter()
        .filter(|d| d.value().is_some())
        .count()
        >= 2
}

pub fn can_pip_up_one(game: &Game, player: PlayerId) -> bool {
    game.player(player).available.iter().any(|d| d.can_pipup(1))
}

pub fn can_pip_up_two(game: &Game, player: PlayerId) -> bool {
    game.player(player).available.iter().any(|d| d.can_pipup(2))
}

/// The lock that just happened contained a pair.
pub fn locked_a_pair(game: &Game, player: PlayerId) -> bool {
    game.player(player).locked_pair
}

/// Everything is locked, and there are at least two dice to split.
pub fn all_dice_locked(game: &Game, player: PlayerId) -> bool {
    let state = game.player(player);
    state.locked_all() && state.locked.len() >= 2
}

/// Secret Passage claims, so it is closed once the roll-off starts.
pub fn can_use_secret_passage(game: &Game, player: PlayerId) -> bool {
    all_dice_locked(game, player) && not_in_roll_off(game, player)
}

pub fn has_opponent(game: &Game, player: PlayerId) -> bool {
    !game.get_opponents(player).is_empty()
}

pub fn not_in_roll_off(game: &Game, _player: PlayerId) -> bool {
    !game.final_roll_off()
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Pick dice from a zone, turning a refusal into [`ActionError::Declined`].
fn pick(
    ctx: &mut AbilityContext<'_>,
    request: DiceRequest,
    zone: Zone,
    filter: impl Fn(&Die) -> bool,
) -> Result<Vec<usize>, ActionError> {
    let prompt_text = request.prompt.clone();
    prompt::choose_dice(ctx.agent, ctx.game, ctx.player, &request, zone, filter)?
        .chosen()
        .ok_or_else(|| ActionError::declined(prompt_text))
}

fn pip_up(ctx: &mut AbilityContext<'_>, min: usize, max: usize, amount: u8) -> Result<(), ActionError> {
    let request = DiceRequest::between(min, max, format!("Choose dice to pip up by {amount}"));
    let picks = pick(ctx, request, Zone::Available, |d| d.can_pipup(amount))?;

    let available = &mut ctx.game.player_mut(ctx.player).available;
    let mut changed = Vec::with_capacity(picks.len());
    for &i in &picks {
        let mut die = available[i].clone();
        die.pipup(amount).map_err(ActionError::PipUp)?;
        changed.push((i, die));
    }
    for (i, die) in changed {
        available[i] = die;
    }
    Ok(())
}

fn flip(ctx: &mut AbilityContext<'_>, min: usize, max: usize) -> Result<(), ActionError> {
    let request = DiceRequest::between(min, max, "Choose dice to flip");
    let picks = pick(ctx, request, Zone::Available, |d| d.face().is_some())?;

    let available = &mut ctx.game.player_mut(ctx.player).available;
    for i in picks {
        available[i].flip().map_err(EngineError::from)?;
    }
    Ok(())
}

/// Redistribute the values of `min..=max` chosen dice, keeping their sum.
fn rearrange(ctx: &mut AbilityContext<'_>, min: usize, max: usize) -> Result<(), ActionError> {
    let request = DiceRequest::between(min, max, "Choose dice to rearrange");
    let picks = pick(ctx, request, Zone::Available, |d| d.value().is_some())?;

    let available = &ctx.game.player(ctx.player).available;
    let dice: Vec<Die> = picks.iter().map(|&i| available[i].clone()).collect();
    let target: u16 = dice.iter().filter_map(Die::value).map(u16::from).sum();
    let options = rearrangements(&dice, target)?;

    let choice = prompt::choose_rearrangement(ctx.agent, ctx.game, ctx.player, &dice, &options)?
        .chosen()
        .ok_or_else(|| ActionError::declined("no rearrangement chosen"))?;

    let available = &mut ctx.game.player_mut(ctx.player).available;
    for (&i, &face) in picks.iter().zip(&options[choice]) {
        available[i].set_face(face).map_err(EngineError::from)?;
    }
    Ok(())
}

// =============================================================================
// Rolls Window
// =============================================================================

pub fn pip_up_one(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    pip_up(ctx, 1, 1, 1)
}

pub fn pip_up_one_by_two(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    pip_up(ctx, 1, 1, 2)
}

pub fn pip_up_up_to_two(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    pip_up(ctx, 1, 2, 1)
}

pub fn flip_one(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    flip(ctx, 1, 1)
}

pub fn flip_up_to_two(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    flip(ctx, 1, 2)
}

pub fn reroll_one(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    reroll_dice(ctx.game, ctx.player, ctx.agent, 1, 1)
}

pub fn reroll_many(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    reroll_dice(ctx.game, ctx.player, ctx.agent, 1, usize::MAX)
}

pub fn adjust_one(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    adjust_dice(ctx.game, ctx.player, ctx.agent, 1, 1)
}

pub fn adjust_up_to_two(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    adjust_dice(ctx.game, ctx.player, ctx.agent, 1, 2)
}

pub fn rearrange_two(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    rearrange(ctx, 2, 2)
}

pub fn rearrange_up_to_three(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    rearrange(ctx, 2, 3)
}

pub fn rearrange_many(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    rearrange(ctx, 2, usize::MAX)
}

/// Add a standard die showing any face the player names.
pub fn pharaohs_gift(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let template = Die::new(DieType::Standard);
    let face = prompt::choose_face(ctx.agent, ctx.game, ctx.player, &template, &DieFace::NUMERIC)?;
    add_standard_die(ctx.game, ctx.player, face)
}

/// Add a standard die showing the value of a chosen die.
pub fn royal_mother(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let request = DiceRequest::exactly(1, "Choose a die to copy");
    let picks = pick(ctx, request, Zone::Available, |d| d.value().is_some())?;
    let value = ctx.game.player(ctx.player).available[picks[0]].value();
    let face = value
        .and_then(DieFace::from_value)
        .ok_or_else(|| ActionError::declined("the chosen die has no value"))?;
    add_standard_die(ctx.game, ctx.player, face)
}

// =============================================================================
// Turn Start
// =============================================================================

/// One extra standard die for every spent Red tile.
pub fn priest_of_the_dead(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let state = ctx.game.player_mut(ctx.player);
    let spent = state
        .tiles
        .iter()
        .filter(|t| t.color() == TileColor::Red && t.disabled)
        .count();
    for _ in 0..spent {
        state.prepare(DieType::Standard);
    }
    debug!("{}: {} prepares {spent} dice", ctx.player, ctx.tile);
    Ok(())
}

// =============================================================================
// Lock and Claim Windows
// =============================================================================

/// Claim a second tile (level six or lower) with part of the locked dice.
///
/// The dice used are removed; the rest go on to the normal claim.
pub fn secret_passage(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    if ctx.game.final_roll_off() {
        return Err(ActionError::declined("no claims during the final roll-off"));
    }
    let locked = ctx.game.player(ctx.player).locked.len();
    let request = DiceRequest::between(1, locked.saturating_sub(1), "Choose dice for the secret passage");
    let mut picks = pick(ctx, request, Zone::Locked, |_| true)?;

    let locked_dice = &ctx.game.player(ctx.player).locked;
    let subset: Vec<Die> = picks.iter().map(|&i| locked_dice[i].clone()).collect();
    let options = claim_options(ctx.game, ctx.player, &subset, &|kind: TileKind| kind.level() <= 6)?;
    if options.is_empty() {
        return Err(ActionError::declined("those dice claim nothing"));
    }
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let index = prompt::choose_item(ctx.agent, ctx.game, ctx.player, "Choose a tile to claim", &labels)?;

    picks.sort_unstable_by(|a, b| b.cmp(a));
    let state = ctx.game.player_mut(ctx.player);
    for i in picks {
        state.locked.remove(i);
    }
    ctx.game.claim_tile(ctx.player, options[index], ctx.agent)?;
    Ok(())
}

/// Every chosen opponent loses a standard die on their next turn.
pub fn bad_omen(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let opponents = ctx.game.get_opponents(ctx.player);
    let labels: Vec<String> = opponents
        .iter()
        .map(|&p| ctx.game.player(p).name.clone())
        .collect();
    let picks = prompt::choose_items(
        ctx.agent,
        ctx.game,
        ctx.player,
        "Choose opponents to curse",
        &labels,
        1,
        labels.len(),
    )?
    .chosen()
    .ok_or_else(|| ActionError::declined("no opponent chosen"))?;

    for i in picks {
        ctx.game
            .player_mut(opponents[i])
            .add_effect(PendingEffect::LoseStandardDie);
    }
    Ok(())
}

/// Take another turn right after this one.
pub fn royal_power(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    ctx.game.set_next_turn(ctx.player);
    Ok(())
}

// =============================================================================
// On Claim
// =============================================================================

/// Take a free level 3 or 4 tile, no dice needed.
pub fn treasure(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let options = ctx
        .game
        .get_available_tiles(ctx.player, |kind| (3..=4).contains(&kind.level()));
    if options.is_empty() {
        debug!("{}: no free tile left for {}", ctx.player, ctx.tile);
        return Ok(());
    }
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let index = prompt::choose_item(ctx.agent, ctx.game, ctx.player, "Choose a free tile", &labels)?;
    ctx.game.claim_tile(ctx.player, options[index], ctx.agent)?;
    Ok(())
}

/// Score the claiming dice, finish, and open the final roll-off.
pub fn queen(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    let score = Score::from_dice(&ctx.game.player(ctx.player).locked);
    ctx.game.submit_score(ctx.player, score);
    ctx.game.finish_player(ctx.player);
    ctx.game.begin_final_roll_off();
    Ok(())
}

pub fn royal_death(ctx: &mut AbilityContext<'_>) -> Result<(), ActionError> {
    ctx.game.begin_final_roll_off();
    Ok(())
}
