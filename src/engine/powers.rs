//! Power-face resolution and the dice helpers ability bodies share.
//!
//! A die that lands on a power face is flagged. Before each action menu
//! the flagged dice are resolved one at a time, the agent choosing the
//! order when several are waiting. A flag is cleared before its power
//! runs, and a declined power is simply skipped. Powers can raise new
//! flags (a reroll may land on another power face), so resolution loops
//! until none are left.

use log::{debug, warn};

use super::game::Game;
use super::player::Zone;
use crate::agent::{prompt, Agent, Decision, DiceRequest};
use crate::core::{ActionError, EngineError, PlayerId};
use crate::dice::{DieFace, PowerKind};

/// Resolve every flagged die among `player`'s available dice.
pub fn resolve_powers(game: &mut Game, player: PlayerId, agent: &mut dyn Agent) -> Result<(), EngineError> {
    loop {
        let available = &game.player(player).available;
        let flagged: Vec<usize> = available
            .iter()
            .enumerate()
            .filter(|(_, die)| die.power_triggered())
            .map(|(i, _)| i)
            .collect();

        let index = match flagged.as_slice() {
            [] => return Ok(()),
            [only] => *only,
            _ => {
                let labels: Vec<String> = flagged.iter().map(|&i| available[i].to_string()).collect();
                let pick = prompt::choose_item(agent, game, player, "Choose a die power to resolve", &labels)?;
                flagged[pick]
            }
        };

        let die = &mut game.player_mut(player).available[index];
        die.clear_power();
        let Some(power) = die.face().and_then(DieFace::power) else {
            continue;
        };
        debug!("{player} resolves {power:?} from {die}");

        let result = match power {
            PowerKind::Reroll => reroll_dice(game, player, agent, 1, 1),
            PowerKind::Adjust(most) => adjust_dice(game, player, agent, 0, usize::from(most)),
        };
        match result {
            Ok(()) => {}
            Err(ActionError::Fatal(err)) => return Err(err),
            Err(err) => warn!("{player}: {power:?} power skipped: {err}"),
        }
    }
}

/// Reroll between `min` and `max` available dice of the player's choice.
pub fn reroll_dice(
    game: &mut Game,
    player: PlayerId,
    agent: &mut dyn Agent,
    min: usize,
    max: usize,
) -> Result<(), ActionError> {
    let label = if max == 1 {
        "Choose a die to reroll"
    } else {
        "Choose dice to reroll"
    };
    let request = DiceRequest::between(min, max, label);
    let picks = prompt::choose_dice(agent, game, player, &request, Zone::Available, |d| d.face().is_some())?
        .chosen()
        .ok_or_else(|| ActionError::declined("no dice chosen to reroll"))?;

    let (state, rng) = game.player_with_rng(player);
    for i in picks {
        let face = state.available[i].roll(rng);
        debug!("{player} rerolled into {face}");
    }
    Ok(())
}

/// Set between `min` and `max` available dice to another face of their own.
///
/// Every face is chosen before any die changes. With `min` zero a declined
/// choice does nothing.
pub fn adjust_dice(
    game: &mut Game,
    player: PlayerId,
    agent: &mut dyn Agent,
    min: usize,
    max: usize,
) -> Result<(), ActionError> {
    let label = if max == 1 {
        "Choose a die to adjust"
    } else {
        "Choose dice to adjust"
    };
    let request = DiceRequest::between(min, max, label);
    let picks = match prompt::choose_dice(agent, game, player, &request, Zone::Available, |d| d.face().is_some())? {
        Decision::Chosen(picks) => picks,
        Decision::Declined if min == 0 => return Ok(()),
        Decision::Declined => return Err(ActionError::declined("no dice chosen to adjust")),
    };

    let mut changes = Vec::with_capacity(picks.len());
    for i in picks {
        let die = game.player(player).available[i].clone();
        let options: Vec<DieFace> = die
            .distinct_faces()
            .into_iter()
            .filter(|&f| Some(f) != die.face())
            .collect();
        let face = prompt::choose_face(agent, game, player, &die, &options)?;
        changes.push((i, face));
    }

    let state = game.player_mut(player);
    for (i, face) in changes {
        state.available[i].set_face(face).map_err(EngineError::from)?;
    }
    Ok(())
}
