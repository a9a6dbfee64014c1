//! Whole turns driven by scripted agents.
//!
//! Dice are random, so these tests either script answers that hold for
//! any roll or set the dice by hand and call the turn pieces directly.

use pharaoh_dice::agent::{Reply, ScriptedAgent};
use pharaoh_dice::constraints::RowMode;
use pharaoh_dice::core::{GameConfig, PlayerId, PlayerSetup};
use pharaoh_dice::dice::{Die, DieFace, DieType};
use pharaoh_dice::engine::{
    activate, available_commands, claim_options, is_active, take_turn, Game, GameEvent,
    PendingEffect, TurnCommand, TurnStep, COMPENSATION_TOKENS,
};
use pharaoh_dice::tiles::TileKind;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn board() -> Vec<TileKind> {
    use TileKind::*;
    vec![
        Farmer, Guard, Servant, Ankh,
        Artisan, Soldier, GrainMerchant, GoodOmen,
        Charioteer, Overseer, Priest, BadOmen,
        Embalmer, GrainTrader, Astrologer, Treasure,
        General, Heir, RoyalDeath,
    ]
}

fn game_with(setups: Vec<PlayerSetup>) -> Game {
    let config = GameConfig::new(23).with_board(board()).with_modes([RowMode::A; 5]);
    Game::new(config, setups).unwrap()
}

fn standard(faces: &[DieFace]) -> Vec<Die> {
    faces
        .iter()
        .map(|&f| Die::showing(DieType::Standard, f).unwrap())
        .collect()
}

#[test]
fn test_immediate_die_must_be_locked() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::IndenturedWorker]);
    let mut game = game_with(vec![seat]);
    // Leave the immediate die (index 3) out, then lock only it.
    let mut agent = ScriptedAgent::new([Reply::Dice(vec![0]), Reply::Dice(vec![3])]);

    take_turn(&mut game, P0, &mut agent).unwrap();

    let locked = &game.player(P0).locked;
    assert_eq!(agent.remaining(), 0);
    assert_eq!(locked.len(), 4);
    assert_eq!(locked[0].kind(), DieType::Immediate);
    assert_eq!(locked.iter().filter(|d| d.kind() == DieType::Immediate).count(), 1);
    assert_eq!(game.player(P0).step, TurnStep::None);
}

#[test]
fn test_nothing_to_claim_pays_compensation() {
    // One die, and the only single-die tile is already owned.
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Herder, TileKind::Farmer]);
    let mut game = game_with(vec![seat]);
    let mut agent = ScriptedAgent::default();

    take_turn(&mut game, P0, &mut agent).unwrap();

    assert_eq!(game.player(P0).locked.len(), 1);
    assert_eq!(game.player(P0).tokens.total(), COMPENSATION_TOKENS);
    assert_eq!(
        game.history().last(),
        Some(&GameEvent::Compensated { player: P0, tokens: COMPENSATION_TOKENS })
    );
    assert_eq!(game.player(P0).tiles.len(), 2);
}

#[test]
fn test_single_die_claims_the_herder() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Farmer]);
    let mut game = game_with(vec![seat]);
    let mut agent = ScriptedAgent::default();

    take_turn(&mut game, P0, &mut agent).unwrap();

    assert!(game.player(P0).owns(TileKind::Herder));
    assert_eq!(game.supply(TileKind::Herder), 0);
}

#[test]
fn test_full_house_offers_pair_and_three_of_a_kind() {
    let game = game_with(vec![PlayerSetup::new("Ada"), PlayerSetup::new("Bo")]);
    let dice = standard(&[DieFace::Three, DieFace::Three, DieFace::Three, DieFace::Two, DieFace::Two]);

    let options = claim_options(&game, P0, &dice, &|_: TileKind| true).unwrap();

    // Tier 5 slot 2 in mode A is "Pair & 3 of a Kind".
    assert_eq!(game.get_condition(5, 2).unwrap().name, "Pair & 3 of a Kind");
    assert_eq!(game.board()[&5][2], TileKind::Priest);
    assert_eq!(
        options,
        vec![
            TileKind::Herder,
            TileKind::Farmer,
            TileKind::Guard,
            TileKind::Ankh,
            TileKind::GrainMerchant,
            TileKind::Priest,
        ]
    );

    let capped = claim_options(&game, P0, &dice, &|kind: TileKind| kind.level() <= 4).unwrap();
    assert!(!capped.contains(&TileKind::Priest));
}

#[test]
fn test_claim_options_skip_owned_tiles() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::Herder, TileKind::Guard]);
    let game = game_with(vec![seat]);
    // A pair summing to nine: only GUARD's condition holds, and it is owned.
    let dice = standard(&[DieFace::Four, DieFace::Four, DieFace::One]);

    let options = claim_options(&game, P0, &dice, &|_: TileKind| true).unwrap();
    assert!(options.is_empty());
}

#[test]
fn test_red_tiles_stay_spent() {
    let tiles = vec![TileKind::Start, TileKind::Servant, TileKind::Ankh, TileKind::Guard];
    let mut game = game_with(vec![PlayerSetup::new("Ada").with_tiles(tiles)]);
    for tile in &mut game.player_mut(P0).tiles {
        tile.disabled = true;
    }
    let mut agent = ScriptedAgent::default();

    take_turn(&mut game, P0, &mut agent).unwrap();

    let state = game.player(P0);
    assert!(!state.tile(TileKind::Servant).unwrap().disabled);
    assert!(!state.tile(TileKind::Guard).unwrap().disabled);
    assert!(state.tile(TileKind::Ankh).unwrap().disabled);
}

#[test]
fn test_fixed_die_activation() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::Guard]);
    let mut game = game_with(vec![seat]);
    let mut agent = ScriptedAgent::default();
    game.player_mut(P0).step = TurnStep::Rolls;

    assert_eq!(
        available_commands(&game, P0),
        vec![TurnCommand::Activate(TileKind::Guard), TurnCommand::Lock]
    );
    activate(&mut game, P0, TileKind::Guard, &mut agent).unwrap();

    let state = game.player(P0);
    assert_eq!(state.available, standard(&[DieFace::Two]));
    assert!(state.tile(TileKind::Guard).unwrap().disabled);
    assert!(!is_active(&game, P0, TileKind::Guard));
    assert!(activate(&mut game, P0, TileKind::Guard, &mut agent).is_err());
}

#[test]
fn test_declined_activation_keeps_tile_ready() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::Servant]);
    let mut game = game_with(vec![seat]);
    let mut agent = ScriptedAgent::new([Reply::Decline]);
    let state = game.player_mut(P0);
    state.step = TurnStep::Rolls;
    state.available = standard(&[DieFace::Four, DieFace::Six]);

    assert!(activate(&mut game, P0, TileKind::Servant, &mut agent).is_err());
    assert!(!game.player(P0).tile(TileKind::Servant).unwrap().disabled);
    assert_eq!(game.player(P0).available, standard(&[DieFace::Four, DieFace::Six]));

    // Only the four can go up; the six is never offered.
    let mut agent = ScriptedAgent::new([Reply::Dice(vec![0])]);
    activate(&mut game, P0, TileKind::Servant, &mut agent).unwrap();
    assert_eq!(game.player(P0).available, standard(&[DieFace::Five, DieFace::Six]));
}

#[test]
fn test_rearrangement_keeps_the_sum() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::GrainMerchant]);
    let mut game = game_with(vec![seat]);
    let state = game.player_mut(P0);
    state.step = TurnStep::Rolls;
    state.available = standard(&[DieFace::Two, DieFace::Five]);
    // Same-typed dice split seven three ways: 1+6, 2+5, 3+4.
    let mut agent = ScriptedAgent::new([Reply::Dice(vec![0, 1]), Reply::Rearrangement(2)]);

    activate(&mut game, P0, TileKind::GrainMerchant, &mut agent).unwrap();

    assert_eq!(game.player(P0).available, standard(&[DieFace::Three, DieFace::Four]));
    assert!(game.player(P0).tile(TileKind::GrainMerchant).unwrap().disabled);
}

#[test]
fn test_pending_effects_apply_once() {
    let mut game = game_with(vec![PlayerSetup::new("Ada")]);
    let mut agent = ScriptedAgent::default();
    game.player_mut(P0).add_effect(PendingEffect::LoseStandardDie);

    take_turn(&mut game, P0, &mut agent).unwrap();
    assert_eq!(game.player(P0).dice_count(), 2);
    assert!(game.player(P0).effects.is_empty());

    take_turn(&mut game, P0, &mut agent).unwrap();
    assert_eq!(game.player(P0).dice_count(), 3);
}

#[test]
fn test_bad_omen_curses_opponents() {
    let mut game = game_with(vec![PlayerSetup::new("Ada"), PlayerSetup::new("Bo")]);
    let mut agent = ScriptedAgent::default();
    game.claim_tile(P0, TileKind::BadOmen, &mut agent).unwrap();
    game.player_mut(P0).step = TurnStep::ClaimEnd;

    let mut agent = ScriptedAgent::new([Reply::Items(vec![0])]);
    activate(&mut game, P0, TileKind::BadOmen, &mut agent).unwrap();
    assert_eq!(game.player(P1).effects, vec![PendingEffect::LoseStandardDie]);

    take_turn(&mut game, P1, &mut ScriptedAgent::default()).unwrap();
    assert_eq!(game.player(P1).dice_count(), 2);
}

#[test]
fn test_roll_off_turn_scores_and_finishes() {
    let mut game = game_with(vec![PlayerSetup::new("Ada"), PlayerSetup::new("Bo")]);
    let mut agent = ScriptedAgent::default();
    game.player_mut(P0).locked = vec![Die::showing(DieType::Standard, DieFace::Six).unwrap(); 7];
    game.claim_tile(P0, TileKind::Queen, &mut agent).unwrap();

    take_turn(&mut game, P1, &mut agent).unwrap();

    let bo = game.player(P1);
    assert!(bo.finished);
    // Three from START plus the roll-off die.
    assert_eq!(bo.locked.len(), 4);
    assert!(bo.final_score.is_some());
    assert!(bo.tiles.iter().all(|t| t.kind == TileKind::Start));
    assert!(game.game_ended());
    assert_eq!(game.high_scorer(), Some(P0));
    assert!(game
        .history()
        .iter()
        .any(|e| *e == GameEvent::TurnStarted { player: P1, roll_off: true }));
}

#[test]
fn test_royal_power_grants_another_turn() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::RoyalPower]);
    let mut game = game_with(vec![seat, PlayerSetup::new("Bo")]);
    let mut agent = ScriptedAgent::default();
    game.set_next_turn(P1);

    game.player_mut(P0).step = TurnStep::Rolls;
    assert!(!is_active(&game, P0, TileKind::RoyalPower));

    game.player_mut(P0).step = TurnStep::ClaimEnd;
    activate(&mut game, P0, TileKind::RoyalPower, &mut agent).unwrap();
    assert_eq!(game.next_turn(), P0);
}

#[test]
fn test_royal_power_is_off_during_roll_off() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::RoyalPower]);
    let mut game = game_with(vec![seat, PlayerSetup::new("Bo")]);
    game.begin_final_roll_off();
    game.player_mut(P0).step = TurnStep::ClaimEnd;

    assert!(!is_active(&game, P0, TileKind::RoyalPower));
}

#[test]
fn test_secret_passage_claims_with_part_of_the_lock() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::SecretPassage]);
    let mut game = game_with(vec![seat]);
    let state = game.player_mut(P0);
    state.step = TurnStep::Lock;
    state.locked = standard(&[DieFace::Four, DieFace::Four, DieFace::One]);
    let mut agent = ScriptedAgent::new([Reply::Dice(vec![2]), Reply::Item(0)]);

    assert!(is_active(&game, P0, TileKind::SecretPassage));
    activate(&mut game, P0, TileKind::SecretPassage, &mut agent).unwrap();

    let state = game.player(P0);
    assert_eq!(agent.remaining(), 0);
    assert!(state.owns(TileKind::Herder));
    assert_eq!(state.locked, standard(&[DieFace::Four, DieFace::Four]));
    assert!(state.tile(TileKind::SecretPassage).unwrap().disabled);
}

#[test]
fn test_secret_passage_needs_everything_locked() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::SecretPassage]);
    let mut game = game_with(vec![seat]);
    let state = game.player_mut(P0);
    state.step = TurnStep::Lock;
    state.locked = standard(&[DieFace::Four, DieFace::One]);
    state.prepared = vec![Die::new(DieType::Standard)];

    assert!(!is_active(&game, P0, TileKind::SecretPassage));
}

#[test]
fn test_secret_passage_is_closed_in_the_roll_off() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::SecretPassage]);
    let mut game = game_with(vec![seat, PlayerSetup::new("Bo")]);
    game.begin_final_roll_off();
    let state = game.player_mut(P0);
    state.step = TurnStep::Lock;
    state.locked = standard(&[DieFace::Six, DieFace::Six, DieFace::One]);

    assert!(!is_active(&game, P0, TileKind::SecretPassage));
    let mut agent = ScriptedAgent::new([Reply::Dice(vec![2]), Reply::Item(0)]);
    assert!(activate(&mut game, P0, TileKind::SecretPassage, &mut agent).is_err());
    assert_eq!(game.player(P0).locked.len(), 3);
    assert!(!game.player(P0).tile(TileKind::SecretPassage).unwrap().disabled);
}

#[test]
fn test_roll_off_turn_keeps_every_locked_die() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::SecretPassage]);
    let mut game = game_with(vec![seat, PlayerSetup::new("Bo")]);
    game.begin_final_roll_off();
    // Would use the passage with the first die if it were offered.
    let mut agent = ScriptedAgent::new([Reply::Confirm(true), Reply::Dice(vec![0])]);

    take_turn(&mut game, P0, &mut agent).unwrap();

    let ada = game.player(P0);
    assert_eq!(agent.remaining(), 2);
    // Three from START plus the roll-off die.
    assert_eq!(ada.locked.len(), 4);
    assert!(!ada.owns(TileKind::Herder));
    assert!(!ada.tile(TileKind::SecretPassage).unwrap().disabled);
    assert!(ada.final_score.is_some());
    assert!(ada.finished);
}

#[test]
fn test_incrementing_die_follows_the_roll_count() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::EstateOverseer]);
    let mut game = game_with(vec![seat]);
    let mut agent = ScriptedAgent::default();
    game.player_mut(P0).step = TurnStep::Rolls;

    // No rolls yet, so there is no die to add.
    assert!(activate(&mut game, P0, TileKind::EstateOverseer, &mut agent).is_err());
    assert!(game.player(P0).available.is_empty());
    assert!(!game.player(P0).tile(TileKind::EstateOverseer).unwrap().disabled);

    let tile = game.player_mut(P0).tile_mut(TileKind::EstateOverseer).unwrap();
    for _ in 0..8 {
        tile.value_up();
    }
    assert_eq!(tile.value, 6);

    activate(&mut game, P0, TileKind::EstateOverseer, &mut agent).unwrap();
    assert_eq!(game.player(P0).available, standard(&[DieFace::Six]));
    assert!(game.player(P0).tile(TileKind::EstateOverseer).unwrap().disabled);
}

#[test]
fn test_incrementing_die_counter_resets_each_turn() {
    let seat = PlayerSetup::new("Ada").with_tiles(vec![TileKind::Start, TileKind::EstateOverseer]);
    let mut game = game_with(vec![seat]);
    game.player_mut(P0).tile_mut(TileKind::EstateOverseer).unwrap().value = 5;

    take_turn(&mut game, P0, &mut ScriptedAgent::default()).unwrap();

    // Everything was locked on the first roll.
    assert_eq!(game.player(P0).tile(TileKind::EstateOverseer).unwrap().value, 1);
}
