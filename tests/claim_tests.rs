//! Tile claiming: exclusivity, supply, rewards, and the roll-off.

use pharaoh_dice::agent::{Agent, Decision, DecisionContext, DiceRequest, ScriptedAgent};
use pharaoh_dice::core::{EngineError, GameConfig, PlayerId, PlayerSetup};
use pharaoh_dice::dice::{Die, DieFace, DieType};
use pharaoh_dice::engine::{ClaimOutcome, Game, GameEvent, PendingEffect, Score, TurnCommand};
use pharaoh_dice::tiles::TileKind;

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

fn table(players: usize) -> Game {
    let setups = (0..players).map(|i| PlayerSetup::new(format!("P{i}"))).collect();
    Game::new(GameConfig::new(17).with_board(board()), setups).unwrap()
}

fn sixes(count: usize) -> Vec<Die> {
    (0..count)
        .map(|_| Die::showing(DieType::Standard, DieFace::Six).unwrap())
        .collect()
}

/// Records the claimer's token count whenever it is asked to pick an item.
#[derive(Default)]
struct TokenWitness {
    seen: Vec<u32>,
}

impl Agent for TokenWitness {
    fn choose_command(&mut self, _ctx: &DecisionContext<'_>, commands: &[TurnCommand]) -> usize {
        commands.len() - 1
    }

    fn choose_dice(&mut self, _ctx: &DecisionContext<'_>, _request: &DiceRequest, _pool: &[Die]) -> Decision<Vec<usize>> {
        Decision::Declined
    }

    fn choose_item(&mut self, ctx: &DecisionContext<'_>, _prompt: &str, _options: &[String]) -> usize {
        self.seen.push(ctx.game.player(ctx.player).tokens.total());
        0
    }

    fn choose_items(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _prompt: &str,
        _options: &[String],
        _min: usize,
        _max: usize,
    ) -> Decision<Vec<usize>> {
        Decision::Declined
    }

    fn choose_rearrangement(&mut self, _ctx: &DecisionContext<'_>, _dice: &[Die], _options: &[Vec<DieFace>]) -> Decision<usize> {
        Decision::Declined
    }

    fn choose_face(&mut self, _ctx: &DecisionContext<'_>, _die: &Die, _options: &[DieFace]) -> usize {
        0
    }
}

#[test]
fn test_one_copy_per_player() {
    let mut game = table(3);
    let mut agent = ScriptedAgent::default();
    let p0 = PlayerId::new(0);

    assert_eq!(game.supply(TileKind::Farmer), 3);
    assert_eq!(game.claim_tile(p0, TileKind::Farmer, &mut agent), Ok(ClaimOutcome::Claimed));
    assert_eq!(
        game.claim_tile(p0, TileKind::Farmer, &mut agent),
        Err(EngineError::AlreadyOwned { player: p0, tile: TileKind::Farmer })
    );
    assert_eq!(game.supply(TileKind::Farmer), 2);
    assert!(game.get_available_tiles(p0, |_| true).iter().all(|&k| k != TileKind::Farmer));
}

#[test]
fn test_supply_runs_out() {
    let mut game = table(3);
    let mut agent = ScriptedAgent::default();

    // Level 6 has one copy for three players.
    assert_eq!(game.supply(TileKind::Embalmer), 1);
    game.claim_tile(PlayerId::new(0), TileKind::Embalmer, &mut agent).unwrap();
    assert_eq!(
        game.claim_tile(PlayerId::new(1), TileKind::Embalmer, &mut agent),
        Err(EngineError::SupplyExhausted { tile: TileKind::Embalmer })
    );
    assert!(!game.tile_available(TileKind::Embalmer));
}

#[test]
fn test_color_rewards() {
    let mut game = table(2);
    let mut agent = ScriptedAgent::default();
    let p0 = PlayerId::new(0);

    game.claim_tile(p0, TileKind::Farmer, &mut agent).unwrap();
    assert_eq!(game.player(p0).tokens.total(), 0);
    game.claim_tile(p0, TileKind::Servant, &mut agent).unwrap();
    assert_eq!(game.player(p0).tokens.total(), 1);
    game.claim_tile(p0, TileKind::Ankh, &mut agent).unwrap();
    assert_eq!(game.player(p0).tokens.total(), 3);
}

#[test]
fn test_reward_is_granted_before_on_claim() {
    let mut game = table(2);
    let mut agent = TokenWitness::default();
    let p0 = PlayerId::new(0);

    game.claim_tile(p0, TileKind::Treasure, &mut agent).unwrap();

    // The free-tile prompt already saw the two tokens from the red tile.
    assert_eq!(agent.seen, vec![2]);
    assert!(game.player(p0).owns(TileKind::Farmer));
    let claimed: Vec<TileKind> = game
        .history()
        .iter()
        .filter_map(|e| match e {
            GameEvent::TileClaimed { tile, .. } => Some(*tile),
            _ => None,
        })
        .collect();
    assert_eq!(claimed, vec![TileKind::Treasure, TileKind::Farmer]);
}

#[test]
fn test_treasure_with_nothing_left_still_claims() {
    let mut game = table(1);
    let mut agent = ScriptedAgent::default();
    let solo = PlayerId::new(0);
    for kind in [
        TileKind::Farmer, TileKind::Guard, TileKind::Servant, TileKind::Ankh,
        TileKind::Artisan, TileKind::Soldier, TileKind::GrainMerchant, TileKind::GoodOmen,
    ] {
        game.claim_tile(solo, kind, &mut agent).unwrap();
    }

    let before = game.player(solo).tiles.len();
    assert_eq!(game.claim_tile(solo, TileKind::Treasure, &mut agent), Ok(ClaimOutcome::Claimed));
    assert_eq!(game.player(solo).tiles.len(), before + 1);
}

#[test]
fn test_queen_scores_and_starts_roll_off() {
    let mut game = table(3);
    let mut agent = ScriptedAgent::default();
    let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));

    // P0 is playing, so the pointer has moved on to P1.
    game.set_next_turn(p1);
    game.player_mut(p0).locked = sixes(7);
    game.claim_tile(p0, TileKind::Queen, &mut agent).unwrap();

    assert!(game.final_roll_off());
    assert!(game.player(p0).finished);
    assert_eq!(game.player(p0).final_score, Some(Score::new(7, 6)));
    assert_eq!(game.high_scorer(), Some(p0));
    assert!(game.player(p0).effects.is_empty());
    for p in [p1, p2] {
        assert_eq!(game.player(p).effects, vec![PendingEffect::ExtraStandardDie]);
    }
}

#[test]
fn test_roll_off_die_only_for_seats_from_the_pointer() {
    let mut game = table(3);
    let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));

    game.set_next_turn(p2);
    game.begin_final_roll_off();

    assert!(game.player(p0).effects.is_empty());
    assert!(game.player(p1).effects.is_empty());
    assert_eq!(game.player(p2).effects, vec![PendingEffect::ExtraStandardDie]);

    // A second call changes nothing.
    game.set_next_turn(p0);
    game.begin_final_roll_off();
    assert!(game.player(p0).effects.is_empty());
}

#[test]
fn test_royal_death_starts_roll_off_without_finishing() {
    let mut game = table(2);
    let mut agent = ScriptedAgent::default();
    let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

    game.set_next_turn(p1);
    game.claim_tile(p0, TileKind::RoyalDeath, &mut agent).unwrap();

    assert!(game.final_roll_off());
    assert!(!game.player(p0).finished);
    // The claimer has already had this round's turn.
    assert!(game.player(p0).effects.is_empty());
    assert_eq!(game.player(p1).effects, vec![PendingEffect::ExtraStandardDie]);
    assert_eq!(game.high_scorer(), None);
}

#[test]
fn test_claims_are_closed_during_roll_off() {
    let mut game = table(2);
    let mut agent = ScriptedAgent::default();
    let p1 = PlayerId::new(1);

    game.begin_final_roll_off();
    assert_eq!(game.claim_tile(p1, TileKind::Farmer, &mut agent), Ok(ClaimOutcome::Closed));
    assert!(!game.player(p1).owns(TileKind::Farmer));
    assert_eq!(game.supply(TileKind::Farmer), 2);
}
