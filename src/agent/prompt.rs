//! Validated agent prompts.
//!
//! Each helper asks the agent, checks the answer against the options it
//! was shown, and asks again on a malformed answer. After
//! `GameConfig::max_invalid_responses` bad answers a declinable prompt
//! counts as declined and a mandatory one fails with
//! [`EngineError::UnresponsiveAgent`].

use log::warn;

use super::agent::{Agent, Decision, DecisionContext, DiceRequest};
use crate::core::{EngineError, PlayerId};
use crate::dice::{Die, DieFace};
use crate::engine::{Game, TurnCommand, Zone};

/// Ask until `attempt` accepts an answer or the retry budget runs out.
fn ask<T>(
    game: &Game,
    player: PlayerId,
    prompt: &str,
    mut attempt: impl FnMut(&DecisionContext<'_>) -> Result<T, String>,
) -> Result<T, EngineError> {
    let ctx = DecisionContext::new(game, player);
    let limit = game.config().max_invalid_responses.max(1);
    for _ in 0..limit {
        match attempt(&ctx) {
            Ok(answer) => return Ok(answer),
            Err(reason) => warn!("{player}: invalid answer to '{prompt}': {reason}"),
        }
    }
    Err(EngineError::UnresponsiveAgent {
        player,
        prompt: prompt.to_string(),
    })
}

/// Declinable prompts treat an unresponsive agent as a refusal.
fn or_declined<T>(result: Result<Decision<T>, EngineError>) -> Result<Decision<T>, EngineError> {
    match result {
        Err(EngineError::UnresponsiveAgent { player, prompt }) => {
            warn!("{player}: giving up on '{prompt}', treating it as declined");
            Ok(Decision::Declined)
        }
        other => other,
    }
}

fn check_picks(picks: &[usize], len: usize, min: usize, max: usize) -> Result<(), String> {
    if picks.len() < min || picks.len() > max {
        return Err(format!("expected {min} to {max} picks, got {}", picks.len()));
    }
    if let Some(&bad) = picks.iter().find(|&&p| p >= len) {
        return Err(format!("pick {bad} is out of range 0..{len}"));
    }
    let mut sorted = picks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != picks.len() {
        return Err("duplicate picks".to_string());
    }
    Ok(())
}

/// Pick a turn command.
pub fn choose_command(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    commands: &[TurnCommand],
) -> Result<TurnCommand, EngineError> {
    const PROMPT: &str = "Choose an action";
    if commands.is_empty() {
        return Err(EngineError::EmptyChoice {
            prompt: PROMPT.to_string(),
        });
    }
    ask(game, player, PROMPT, |ctx| {
        let index = agent.choose_command(ctx, commands);
        commands
            .get(index)
            .copied()
            .ok_or_else(|| format!("command {index} is out of range"))
    })
}

/// Pick dice from one of the player's zones.
///
/// Only dice passing `filter` are offered. The result holds positions in
/// the zone, not in the filtered pool. If fewer dice pass than
/// `request.min`, the agent is not asked and the prompt is declined.
pub fn choose_dice(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    request: &DiceRequest,
    zone: Zone,
    filter: impl Fn(&Die) -> bool,
) -> Result<Decision<Vec<usize>>, EngineError> {
    let zone_dice = game.player(player).zone(zone);
    let candidates: Vec<usize> = zone_dice
        .iter()
        .enumerate()
        .filter(|(_, die)| filter(die))
        .map(|(i, _)| i)
        .collect();

    if candidates.len() < request.min {
        warn!(
            "{player}: '{}' needs {} dice but only {} qualify",
            request.prompt,
            request.min,
            candidates.len()
        );
        return Ok(Decision::Declined);
    }

    let request = DiceRequest::between(
        request.min,
        request.max.min(candidates.len()),
        request.prompt.clone(),
    );
    let pool: Vec<Die> = candidates.iter().map(|&i| zone_dice[i].clone()).collect();

    or_declined(ask(game, player, &request.prompt, |ctx| {
        match agent.choose_dice(ctx, &request, &pool) {
            Decision::Declined => Ok(Decision::Declined),
            Decision::Chosen(picks) => {
                check_picks(&picks, pool.len(), request.min, request.max)?;
                Ok(Decision::Chosen(picks.iter().map(|&p| candidates[p]).collect()))
            }
        }
    }))
}

/// Pick exactly one option.
pub fn choose_item(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    prompt: &str,
    options: &[String],
) -> Result<usize, EngineError> {
    if options.is_empty() {
        return Err(EngineError::EmptyChoice {
            prompt: prompt.to_string(),
        });
    }
    ask(game, player, prompt, |ctx| {
        let index = agent.choose_item(ctx, prompt, options);
        if index < options.len() {
            Ok(index)
        } else {
            Err(format!("option {index} is out of range"))
        }
    })
}

/// Pick between `min` and `max` distinct options.
pub fn choose_items(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    prompt: &str,
    options: &[String],
    min: usize,
    max: usize,
) -> Result<Decision<Vec<usize>>, EngineError> {
    if options.len() < min {
        return Ok(Decision::Declined);
    }
    let max = max.min(options.len()).max(min);
    or_declined(ask(game, player, prompt, |ctx| {
        match agent.choose_items(ctx, prompt, options, min, max) {
            Decision::Declined => Ok(Decision::Declined),
            Decision::Chosen(picks) => {
                check_picks(&picks, options.len(), min, max)?;
                Ok(Decision::Chosen(picks))
            }
        }
    }))
}

/// Pick one of the precomputed rearrangements.
pub fn choose_rearrangement(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    dice: &[Die],
    options: &[Vec<DieFace>],
) -> Result<Decision<usize>, EngineError> {
    const PROMPT: &str = "Choose a rearrangement";
    if options.is_empty() {
        return Ok(Decision::Declined);
    }
    or_declined(ask(game, player, PROMPT, |ctx| {
        match agent.choose_rearrangement(ctx, dice, options) {
            Decision::Chosen(index) if index >= options.len() => {
                Err(format!("rearrangement {index} is out of range"))
            }
            answer => Ok(answer),
        }
    }))
}

/// Pick a face for `die` out of `options`.
pub fn choose_face(
    agent: &mut dyn Agent,
    game: &Game,
    player: PlayerId,
    die: &Die,
    options: &[DieFace],
) -> Result<DieFace, EngineError> {
    const PROMPT: &str = "Choose a new face";
    if options.is_empty() {
        return Err(EngineError::EmptyChoice {
            prompt: PROMPT.to_string(),
        });
    }
    ask(game, player, PROMPT, |ctx| {
        let index = agent.choose_face(ctx, die, options);
        options
            .get(index)
            .copied()
            .ok_or_else(|| format!("face {index} is out of range"))
    })
}

/// Yes or no.
pub fn confirm(agent: &mut dyn Agent, game: &Game, player: PlayerId, prompt: &str) -> bool {
    agent.confirm(&DecisionContext::new(game, player), prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_picks() {
        assert!(check_picks(&[0, 2], 3, 1, 2).is_ok());
        assert!(check_picks(&[], 3, 0, 2).is_ok());
        assert!(check_picks(&[0, 0], 3, 1, 2).is_err());
        assert!(check_picks(&[3], 3, 1, 1).is_err());
        assert!(check_picks(&[0, 1, 2], 3, 1, 2).is_err());
        assert!(check_picks(&[], 3, 1, 2).is_err());
    }
}
