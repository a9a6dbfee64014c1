//! The two claim-condition tables.
//!
//! Tiers 3 to 7 each have four slots. The board places tiles in slot order
//! within a tier, and the tier's active mode decides which condition each
//! slot carries. Tier 1 always takes "Any Roll".

use serde::{Deserialize, Serialize};

use super::constraint::{Constraint, NamedConstraint, ValueFilter};

/// Which side of the rule table a tier uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowMode {
    A,
    B,
}

/// Lowest tier with a full row of conditions.
pub const FIRST_TIER: u8 = 3;
/// Highest tier.
pub const LAST_TIER: u8 = 7;
/// Conditions per tier.
pub const SLOTS: usize = 4;

type Row = [NamedConstraint; SLOTS];

/// Immutable condition tables, built once per game.
#[derive(Clone, Debug)]
pub struct RuleBook {
    a_rows: Vec<Row>,
    b_rows: Vec<Row>,
    any_roll: NamedConstraint,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBook {
    /// Build the standard tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            a_rows: a_rows(),
            b_rows: b_rows(),
            any_roll: NamedConstraint::new("Any Roll", Constraint::Any),
        }
    }

    /// Condition for `slot` of tier `level` under `mode`.
    ///
    /// Tier 1 ignores mode and slot.
    #[must_use]
    pub fn condition(&self, mode: RowMode, level: u8, slot: usize) -> Option<&NamedConstraint> {
        if level == 1 {
            return Some(&self.any_roll);
        }
        if !(FIRST_TIER..=LAST_TIER).contains(&level) {
            return None;
        }
        let rows = match mode {
            RowMode::A => &self.a_rows,
            RowMode::B => &self.b_rows,
        };
        rows[usize::from(level - FIRST_TIER)].get(slot)
    }

    /// The whole row for a tier.
    #[must_use]
    pub fn row(&self, mode: RowMode, level: u8) -> Option<&[NamedConstraint]> {
        if !(FIRST_TIER..=LAST_TIER).contains(&level) {
            return None;
        }
        let rows = match mode {
            RowMode::A => &self.a_rows,
            RowMode::B => &self.b_rows,
        };
        Some(&rows[usize::from(level - FIRST_TIER)])
    }
}

fn named(name: &'static str, constraint: Constraint) -> NamedConstraint {
    NamedConstraint::new(name, constraint)
}

fn of_a_kind(x: u8) -> NamedConstraint {
    const NAMES: [&str; 8] = [
        "0 of a Kind",
        "1 of a Kind",
        "Pair",
        "3 of a Kind",
        "4 of a Kind",
        "5 of a Kind",
        "6 of a Kind",
        "7 of a Kind",
    ];
    named(NAMES[usize::from(x)], Constraint::x_of_a_kind(x))
}

fn sum(total: u16, name: &'static str) -> NamedConstraint {
    named(name, Constraint::sum_at_least(total))
}

fn all_different() -> NamedConstraint {
    named("All Different", Constraint::all_different())
}

fn a_rows() -> Vec<Row> {
    vec![
        [
            of_a_kind(3),
            of_a_kind(2),
            named("All Even", Constraint::all_condition(ValueFilter::Even)),
            sum(10, "10+"),
        ],
        [
            of_a_kind(4),
            named(
                "1234/2345/3456",
                Constraint::union([
                    Constraint::contains(&[1, 2, 3, 4]),
                    Constraint::contains(&[2, 3, 4, 5]),
                    Constraint::contains(&[3, 4, 5, 6]),
                ]),
            ),
            named("2 Pairs", Constraint::x_y_z_of_a_kind(&[2, 2])),
            sum(20, "20+"),
        ],
        [
            of_a_kind(5),
            named(
                "12345/23456",
                Constraint::union([
                    Constraint::contains(&[1, 2, 3, 4, 5]),
                    Constraint::contains(&[2, 3, 4, 5, 6]),
                ]),
            ),
            named("Pair & 3 of a Kind", Constraint::x_y_z_of_a_kind(&[3, 2])),
            sum(25, "25+"),
        ],
        [
            of_a_kind(6),
            named("3 Pairs", Constraint::x_y_z_of_a_kind(&[2, 2, 2])),
            named("Pair & 4 of a Kind", Constraint::x_y_z_of_a_kind(&[4, 2])),
            sum(30, "30+"),
        ],
        [
            of_a_kind(7),
            named("3 of a Kind & 2 Pairs", Constraint::x_y_z_of_a_kind(&[3, 3, 2])),
            named("3 of a Kind & 4 of a Kind", Constraint::x_y_z_of_a_kind(&[4, 3])),
            sum(40, "40+"),
        ],
    ]
}

fn b_rows() -> Vec<Row> {
    vec![
        [
            of_a_kind(3),
            named("All Dice ≥ 4", Constraint::all_condition(ValueFilter::AtLeast(4))),
            named("All Odd", Constraint::all_condition(ValueFilter::Odd)),
            sum(15, "15+"),
        ],
        [
            of_a_kind(4),
            named("All Dice ≥ 5", Constraint::all_condition(ValueFilter::AtLeast(5))),
            named("Pair of 6s & Pair of 1s", Constraint::contains(&[6, 6, 1, 1])),
            all_different(),
        ],
        [
            of_a_kind(5),
            named("All Dice ≤ 2", Constraint::all_condition(ValueFilter::AtMost(2))),
            named("3 6s & Pair of 1s", Constraint::contains(&[6, 6, 6, 1, 1])),
            all_different(),
        ],
        [
            of_a_kind(6),
            named("123456", Constraint::contains(&[1, 2, 3, 4, 5, 6])),
            named("2 3 of a Kinds", Constraint::x_y_z_of_a_kind(&[3, 3])),
            sum(35, "35+"),
        ],
        [
            of_a_kind(7),
            named("4 of a Kind & 3 1s", Constraint::four_of_a_kind_and_three_ones()),
            named("Pair & 5 of a Kind", Constraint::x_y_z_of_a_kind(&[5, 2])),
            sum(45, "45+"),
        ],
    ]
}
