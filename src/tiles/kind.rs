//! The tile catalog.
//!
//! A tile's identity is its `TileKind`. Name, level, color and text are
//! fixed per kind; per-player state lives on [`Tile`](super::Tile).

use serde::{Deserialize, Serialize};

/// Tile color. Decides the claim reward and whether activations come back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileColor {
    /// No reward. Re-enabled every turn.
    Yellow,
    /// One token on claim. Re-enabled every turn.
    Blue,
    /// Two tokens on claim. One use per game.
    Red,
}

impl TileColor {
    /// Tokens granted when a tile of this color is claimed.
    #[must_use]
    pub const fn claim_reward(self) -> u32 {
        match self {
            TileColor::Yellow => 0,
            TileColor::Blue => 1,
            TileColor::Red => 2,
        }
    }

    /// True if a used tile of this color comes back at turn start.
    #[must_use]
    pub const fn refreshes(self) -> bool {
        !matches!(self, TileColor::Red)
    }
}

/// Every tile in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    Start,
    Herder,
    // Level 3
    Farmer,
    Guard,
    IndenturedWorker,
    Serf,
    Worker,
    Beggar,
    Servant,
    Soothsayer,
    Ankh,
    Omen,
    AncestralGuidance,
    // Level 4
    Artisan,
    Builder,
    NobleAdoption,
    PalaceServants,
    Soldier,
    GrainMerchant,
    Entertainer,
    Matchmaker,
    GoodOmen,
    PalaceKey,
    SpiritOfTheDead,
    // Level 5
    Charioteer,
    Conspirator,
    Overseer,
    ShipCaptain,
    TombBuilder,
    HeadServant,
    MasterArtisan,
    Priest,
    BadOmen,
    BurialMask,
    RoyalDecree,
    // Level 6
    Embalmer,
    EstateOverseer,
    GrainTrader,
    PriestOfTheDead,
    RoyalAttendants,
    Astrologer,
    Priestess,
    Surveyor,
    PharaohsGift,
    SecretPassage,
    Treasure,
    // Level 7
    Queen,
    General,
    GrandVizier,
    GranaryMaster,
    Heir,
    RoyalAstrologer,
    RoyalMother,
    QueensFavor,
    RoyalDeath,
    RoyalPower,
}

use TileColor::{Blue, Red, Yellow};

impl TileKind {
    pub const ALL: [TileKind; 56] = [
        TileKind::Start,
        TileKind::Herder,
        TileKind::Farmer,
        TileKind::Guard,
        TileKind::IndenturedWorker,
        TileKind::Serf,
        TileKind::Worker,
        TileKind::Beggar,
        TileKind::Servant,
        TileKind::Soothsayer,
        TileKind::Ankh,
        TileKind::Omen,
        TileKind::AncestralGuidance,
        TileKind::Artisan,
        TileKind::Builder,
        TileKind::NobleAdoption,
        TileKind::PalaceServants,
        TileKind::Soldier,
        TileKind::GrainMerchant,
        TileKind::Entertainer,
        TileKind::Matchmaker,
        TileKind::GoodOmen,
        TileKind::PalaceKey,
        TileKind::SpiritOfTheDead,
        TileKind::Charioteer,
        TileKind::Conspirator,
        TileKind::Overseer,
        TileKind::ShipCaptain,
        TileKind::TombBuilder,
        TileKind::HeadServant,
        TileKind::MasterArtisan,
        TileKind::Priest,
        TileKind::BadOmen,
        TileKind::BurialMask,
        TileKind::RoyalDecree,
        TileKind::Embalmer,
        TileKind::EstateOverseer,
        TileKind::GrainTrader,
        TileKind::PriestOfTheDead,
        TileKind::RoyalAttendants,
        TileKind::Astrologer,
        TileKind::Priestess,
        TileKind::Surveyor,
        TileKind::PharaohsGift,
        TileKind::SecretPassage,
        TileKind::Treasure,
        TileKind::Queen,
        TileKind::General,
        TileKind::GrandVizier,
        TileKind::GranaryMaster,
        TileKind::Heir,
        TileKind::RoyalAstrologer,
        TileKind::RoyalMother,
        TileKind::QueensFavor,
        TileKind::RoyalDeath,
        TileKind::RoyalPower,
    ];

    fn info(self) -> (&'static str, u8, TileColor, &'static str) {
        match self {
            TileKind::Start => ("START", 0, Yellow, "Roll 3 standard dice each turn."),
            TileKind::Herder => ("HERDER", 1, Yellow, "No ability."),

            TileKind::Farmer => ("FARMER", 3, Yellow, "Roll an extra standard die."),
            TileKind::Guard => ("GUARD", 3, Yellow, "Add a standard die showing 2."),
            TileKind::IndenturedWorker => ("INDENTURED WORKER", 3, Yellow, "Roll an immediate die."),
            TileKind::Serf => ("SERF", 3, Yellow, "Roll a serf die."),
            TileKind::Worker => ("WORKER", 3, Yellow, "Add a standard die showing 1."),
            TileKind::Beggar => ("BEGGAR", 3, Blue, "Gain a token at the start of each turn."),
            TileKind::Servant => ("SERVANT", 3, Blue, "Pip up one die by 1."),
            TileKind::Soothsayer => ("SOOTHSAYER", 3, Blue, "Flip one die."),
            TileKind::Ankh => ("ANKH", 3, Red, "Reroll any number of dice."),
            TileKind::Omen => ("OMEN", 3, Red, "At turn start, roll an extra standard die."),
            TileKind::AncestralGuidance => {
                ("ANCESTRAL GUIDANCE", 3, Red, "Adjust one die to any other face.")
            }

            TileKind::Artisan => ("ARTISAN", 4, Yellow, "Roll an artisan die."),
            TileKind::Builder => ("BUILDER", 4, Yellow, "Roll an immediate die and gain a token."),
            TileKind::NobleAdoption => ("NOBLE ADOPTION", 4, Yellow, "Roll a noble die."),
            TileKind::PalaceServants => ("PALACE SERVANTS", 4, Yellow, "Roll 2 immediate dice."),
            TileKind::Soldier => ("SOLDIER", 4, Yellow, "Add a standard die showing 3."),
            TileKind::GrainMerchant => {
                ("GRAIN MERCHANT", 4, Blue, "Rearrange the pips of two dice.")
            }
            TileKind::Entertainer => ("ENTERTAINER", 4, Blue, "Reroll one die."),
            TileKind::Matchmaker => {
                ("MATCHMAKER", 4, Blue, "After locking a pair, roll an extra standard die.")
            }
            TileKind::GoodOmen => ("GOOD OMEN", 4, Red, "Adjust up to two dice to any other face."),
            TileKind::PalaceKey => {
                ("PALACE KEY", 4, Red, "At turn start, roll 2 extra standard dice.")
            }
            TileKind::SpiritOfTheDead => {
                ("SPIRIT OF THE DEAD", 4, Red, "Rearrange the pips of two or more dice.")
            }

            TileKind::Charioteer => ("CHARIOTEER", 5, Yellow, "Add a standard die showing 5."),
            TileKind::Conspirator => ("CONSPIRATOR", 5, Yellow, "Roll an intrigue die."),
            TileKind::Overseer => ("OVERSEER", 5, Yellow, "Add a standard die showing 4."),
            TileKind::ShipCaptain => ("SHIP CAPTAIN", 5, Yellow, "Roll a voyage die."),
            TileKind::TombBuilder => {
                ("TOMB BUILDER", 5, Yellow, "Roll an extra standard die and gain a token.")
            }
            TileKind::HeadServant => ("HEAD SERVANT", 5, Blue, "Pip up one die by 2."),
            TileKind::MasterArtisan => {
                ("MASTER ARTISAN", 5, Blue, "Rearrange the pips of two or three dice.")
            }
            TileKind::Priest => ("PRIEST", 5, Blue, "Flip one or two dice."),
            TileKind::BadOmen => {
                ("BAD OMEN", 5, Red, "Chosen opponents roll one fewer standard die next turn.")
            }
            TileKind::BurialMask => ("BURIAL MASK", 5, Red, "Add a standard die showing 6."),
            TileKind::RoyalDecree => ("ROYAL DECREE", 5, Red, "At turn start, roll a decree die."),

            TileKind::Embalmer => ("EMBALMER", 6, Yellow, "Add a standard die showing 6."),
            TileKind::EstateOverseer => (
                "ESTATE OVERSEER",
                6,
                Yellow,
                "Gain a token each turn. Add a die showing the number of rolls so far.",
            ),
            TileKind::GrainTrader => {
                ("GRAIN TRADER", 6, Yellow, "Roll an extra standard die and gain 2 tokens.")
            }
            TileKind::PriestOfTheDead => (
                "PRIEST OF THE DEAD",
                6,
                Yellow,
                "Roll a standard die for each red tile you have used.",
            ),
            TileKind::RoyalAttendants => {
                ("ROYAL ATTENDANTS", 6, Yellow, "Roll a standard die and an immediate die.")
            }
            TileKind::Astrologer => ("ASTROLOGER", 6, Blue, "Adjust one die to any other face."),
            TileKind::Priestess => ("PRIESTESS", 6, Blue, "Pip up one or two dice by 1."),
            TileKind::Surveyor => ("SURVEYOR", 6, Blue, "Reroll any number of dice."),
            TileKind::PharaohsGift => {
                ("PHARAOH'S GIFT", 6, Red, "Add a standard die showing any number.")
            }
            TileKind::SecretPassage => (
                "SECRET PASSAGE",
                6,
                Red,
                "With all dice locked, claim a tile of level 6 or lower with some of them.",
            ),
            TileKind::Treasure => {
                ("TREASURE", 6, Red, "When claimed, also claim a level 3 or 4 tile.")
            }

            TileKind::Queen => {
                ("QUEEN", 7, Yellow, "When claimed, score your dice and start the roll-off.")
            }
            TileKind::General => ("GENERAL", 7, Yellow, "Roll 2 extra standard dice."),
            TileKind::GrandVizier => ("GRAND VIZIER", 7, Yellow, "Roll a decree die."),
            TileKind::GranaryMaster => (
                "GRANARY MASTER",
                7,
                Yellow,
                "Roll an extra standard die. Add a die showing the number of rolls so far.",
            ),
            TileKind::Heir => ("HEIR", 7, Blue, "Adjust one or two dice to any other face."),
            TileKind::RoyalAstrologer => {
                ("ROYAL ASTROLOGER", 7, Blue, "Rearrange the pips of two or more dice.")
            }
            TileKind::RoyalMother => {
                ("ROYAL MOTHER", 7, Blue, "Add a standard die matching one of your dice.")
            }
            TileKind::QueensFavor => {
                ("QUEEN'S FAVOR", 7, Red, "In the roll-off, roll 2 extra standard dice.")
            }
            TileKind::RoyalDeath => ("ROYAL DEATH", 7, Red, "When claimed, start the roll-off."),
            TileKind::RoyalPower => ("ROYAL POWER", 7, Red, "Take another turn after this one."),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().0
    }

    /// Tier, and the number of locked dice needed to claim.
    #[must_use]
    pub fn level(self) -> u8 {
        self.info().1
    }

    #[must_use]
    pub fn color(self) -> TileColor {
        self.info().2
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        self.info().3
    }

    /// Look a tile up by its printed name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<TileKind> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Tiles that can be drafted onto a tier in a given color.
    ///
    /// The Queen is never drafted; she is always placed at tier 7.
    pub fn draftable(level: u8, color: TileColor) -> impl Iterator<Item = TileKind> {
        Self::ALL.into_iter().filter(move |k| {
            *k != TileKind::Queen && k.level() == level && k.color() == color
        })
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = TileKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TileKind::ALL.len());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TileKind::from_name("PHARAOH'S GIFT"), Some(TileKind::PharaohsGift));
        assert_eq!(TileKind::from_name("nobody"), None);
    }

    #[test]
    fn test_tier_composition() {
        // Levels 3..=6: five yellows, three blues, three reds each.
        for level in 3..=6 {
            assert_eq!(TileKind::draftable(level, TileColor::Yellow).count(), 5, "{level}");
            assert_eq!(TileKind::draftable(level, TileColor::Blue).count(), 3, "{level}");
            assert_eq!(TileKind::draftable(level, TileColor::Red).count(), 3, "{level}");
        }
        assert_eq!(TileKind::draftable(7, TileColor::Yellow).count(), 3);
        assert!(TileKind::draftable(7, TileColor::Yellow).all(|k| k != TileKind::Queen));
    }

    #[test]
    fn test_color_rewards() {
        assert_eq!(TileColor::Yellow.claim_reward(), 0);
        assert_eq!(TileColor::Blue.claim_reward(), 1);
        assert_eq!(TileColor::Red.claim_reward(), 2);
        assert!(TileColor::Blue.refreshes());
        assert!(!TileColor::Red.refreshes());
    }
}
