//! Ability table: which hooks each tile kind carries.

use super::ability::{Ability, ActivationHook, TurnStartHook};
use super::kind::TileKind;
use crate::dice::{DieFace, DieType};
use crate::engine::abilities as body;
use crate::engine::TurnStep;

use ActivationHook::{Custom, FixedDie, IncrementingDie};
use DieType::{Artisan, Decree, Immediate, Intrigue, Noble, Serf, Standard, Voyage};

const ROLLS: &[TurnStep] = &[TurnStep::Rolls];
const TURN_START: &[TurnStep] = &[TurnStep::TurnStart];
const ROLL_OFF_START: &[TurnStep] = &[TurnStep::RollOffStart];
const LOCK: &[TurnStep] = &[TurnStep::Lock];
const AFTER_CLAIM: &[TurnStep] = &[TurnStep::Claim, TurnStep::ClaimEnd];

fn prepare(dice: &'static [DieType]) -> Ability {
    Ability::turn_start(TurnStartHook::Prepare(dice))
}

fn on_roll(hook: ActivationHook) -> Ability {
    Ability::activated(hook, ROLLS)
}

fn on_dice(hook: ActivationHook) -> Ability {
    on_roll(hook).with_restriction(body::has_available_dice)
}

impl TileKind {
    /// The ability record of this kind.
    #[must_use]
    pub fn ability(self) -> Ability {
        match self {
            TileKind::Start => prepare(&[Standard, Standard, Standard]),
            TileKind::Herder => Ability::none(),

            TileKind::Farmer => prepare(&[Standard]),
            TileKind::Guard => on_roll(FixedDie(DieFace::Two)),
            TileKind::IndenturedWorker => prepare(&[Immediate]),
            TileKind::Serf => prepare(&[Serf]),
            TileKind::Worker => on_roll(FixedDie(DieFace::One)),
            TileKind::Beggar => Ability::turn_start(TurnStartHook::Tokens(1)),
            TileKind::Servant => {
                on_dice(Custom(body::pip_up_one)).with_restriction(body::can_pip_up_one)
            }
            TileKind::Soothsayer => on_dice(Custom(body::flip_one)),
            TileKind::Ankh => on_dice(Custom(body::reroll_many)),
            TileKind::Omen => Ability::activated(ActivationHook::Prepare(&[Standard]), TURN_START),
            TileKind::AncestralGuidance => on_dice(Custom(body::adjust_one)),

            TileKind::Artisan => prepare(&[Artisan]),
            TileKind::Builder => Ability::turn_start(TurnStartHook::PrepareAndTokens(&[Immediate], 1)),
            TileKind::NobleAdoption => prepare(&[Noble]),
            TileKind::PalaceServants => prepare(&[Immediate, Immediate]),
            TileKind::Soldier => on_roll(FixedDie(DieFace::Three)),
            TileKind::GrainMerchant => {
                on_dice(Custom(body::rearrange_two)).with_restriction(body::has_two_valued_dice)
            }
            TileKind::Entertainer => on_dice(Custom(body::reroll_one)),
            TileKind::Matchmaker => Ability::activated(ActivationHook::Prepare(&[Standard]), LOCK)
                .with_restriction(body::locked_a_pair),
            TileKind::GoodOmen => on_dice(Custom(body::adjust_up_to_two)),
            TileKind::PalaceKey => {
                Ability::activated(ActivationHook::Prepare(&[Standard, Standard]), TURN_START)
            }
            TileKind::SpiritOfTheDead => {
                on_dice(Custom(body::rearrange_many)).with_restriction(body::has_two_valued_dice)
            }

            TileKind::Charioteer => on_roll(FixedDie(DieFace::Five)),
            TileKind::Conspirator => prepare(&[Intrigue]),
            TileKind::Overseer => on_roll(FixedDie(DieFace::Four)),
            TileKind::ShipCaptain => prepare(&[Voyage]),
            TileKind::TombBuilder => Ability::turn_start(TurnStartHook::PrepareAndTokens(&[Standard], 1)),
            TileKind::HeadServant => {
                on_dice(Custom(body::pip_up_one_by_two)).with_restriction(body::can_pip_up_two)
            }
            TileKind::MasterArtisan => {
                on_dice(Custom(body::rearrange_up_to_three)).with_restriction(body::has_two_valued_dice)
            }
            TileKind::Priest => on_dice(Custom(body::flip_up_to_two)),
            TileKind::BadOmen => Ability::activated(Custom(body::bad_omen), AFTER_CLAIM)
                .with_restriction(body::has_opponent),
            TileKind::BurialMask => on_roll(FixedDie(DieFace::Six)),
            TileKind::RoyalDecree => {
                Ability::activated(ActivationHook::Prepare(&[Decree]), TURN_START)
            }

            TileKind::Embalmer => on_roll(FixedDie(DieFace::Six)),
            TileKind::EstateOverseer => {
                on_roll(IncrementingDie).with_turn_start(TurnStartHook::Tokens(1))
            }
            TileKind::GrainTrader => Ability::turn_start(TurnStartHook::PrepareAndTokens(&[Standard], 2)),
            TileKind::PriestOfTheDead => {
                Ability::turn_start(TurnStartHook::Custom(body::priest_of_the_dead))
            }
            TileKind::RoyalAttendants => prepare(&[Standard, Immediate]),
            TileKind::Astrologer => on_dice(Custom(body::adjust_one)),
            TileKind::Priestess => {
                on_dice(Custom(body::pip_up_up_to_two)).with_restriction(body::can_pip_up_one)
            }
            TileKind::Surveyor => on_dice(Custom(body::reroll_many)),
            TileKind::PharaohsGift => on_roll(Custom(body::pharaohs_gift)),
            TileKind::SecretPassage => Ability::activated(Custom(body::secret_passage), LOCK)
                .with_restriction(body::can_use_secret_passage),
            TileKind::Treasure => Ability::on_claim(body::treasure),

            TileKind::Queen => Ability::on_claim(body::queen),
            TileKind::General => prepare(&[Standard, Standard]),
            TileKind::GrandVizier => prepare(&[Decree]),
            TileKind::GranaryMaster => {
                on_roll(IncrementingDie).with_turn_start(TurnStartHook::Prepare(&[Standard]))
            }
            TileKind::Heir => on_dice(Custom(body::adjust_up_to_two)),
            TileKind::RoyalAstrologer => {
                on_dice(Custom(body::rearrange_many)).with_restriction(body::has_two_valued_dice)
            }
            TileKind::RoyalMother => {
                on_dice(Custom(body::royal_mother)).with_restriction(body::has_valued_die)
            }
            TileKind::QueensFavor => {
                Ability::activated(ActivationHook::Prepare(&[Standard, Standard]), ROLL_OFF_START)
            }
            TileKind::RoyalDeath => Ability::on_claim(body::royal_death),
            TileKind::RoyalPower => Ability::activated(Custom(body::royal_power), AFTER_CLAIM)
                .with_restriction(body::not_in_roll_off),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::TileColor;

    #[test]
    fn test_every_red_tile_does_something() {
        for kind in TileKind::ALL {
            if kind.color() == TileColor::Red {
                let ability = kind.ability();
                assert!(
                    ability.activation.is_some() || ability.on_claim.is_some(),
                    "{kind}"
                );
            }
        }
    }

    #[test]
    fn test_activations_have_windows() {
        for kind in TileKind::ALL {
            let ability = kind.ability();
            assert_eq!(ability.activation.is_some(), !ability.window.is_empty(), "{kind}");
        }
    }

    #[test]
    fn test_start_prepares_three_standard() {
        match TileKind::Start.ability().turn_start {
            Some(TurnStartHook::Prepare(dice)) => assert_eq!(dice, &[Standard; 3]),
            _ => panic!("START should prepare dice"),
        }
    }
}
