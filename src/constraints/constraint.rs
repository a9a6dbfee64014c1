//! Claim conditions over a multiset of dice values.
//!
//! A `Constraint` is plain data: the rule tables are built from it once
//! and evaluated against a [`ValueSet`] extracted from the locked dice.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::dice::Die;

/// Values of a dice set, ready for constraint checks.
///
/// Dice without a value contribute nothing except a possible sum bonus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSet {
    values: SmallVec<[u8; 8]>,
    sum_bonus: u16,
}

impl ValueSet {
    /// Collect values and sum bonuses from dice.
    pub fn from_dice<'a>(dice: impl IntoIterator<Item = &'a Die>) -> Self {
        let mut set = Self::default();
        for die in dice {
            if let Some(value) = die.value() {
                set.values.push(value);
            }
            set.sum_bonus += u16::from(die.sum_bonus());
        }
        set
    }

    /// A set of plain values with no bonus.
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            sum_bonus: 0,
        }
    }

    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of values plus bonuses.
    #[must_use]
    pub fn sum(&self) -> u16 {
        self.values.iter().map(|&v| u16::from(v)).sum::<u16>() + self.sum_bonus
    }

    /// Occurrences of each value, indexed by value. Index 0 is unused.
    #[must_use]
    pub fn frequencies(&self) -> [u8; 7] {
        let mut freq = [0u8; 7];
        for &v in &self.values {
            if let Some(slot) = freq.get_mut(usize::from(v)) {
                *slot += 1;
            }
        }
        freq
    }

    /// Non-zero frequencies, largest first.
    fn buckets(&self) -> SmallVec<[u8; 6]> {
        let mut buckets: SmallVec<[u8; 6]> =
            self.frequencies().iter().copied().filter(|&n| n > 0).collect();
        buckets.sort_unstable_by(|a, b| b.cmp(a));
        buckets
    }
}

/// Filter applied to every value by [`Constraint::All`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFilter {
    Even,
    Odd,
    AtLeast(u8),
    AtMost(u8),
}

impl ValueFilter {
    #[must_use]
    pub fn accepts(self, value: u8) -> bool {
        match self {
            ValueFilter::Even => value % 2 == 0,
            ValueFilter::Odd => value % 2 == 1,
            ValueFilter::AtLeast(min) => value >= min,
            ValueFilter::AtMost(max) => value <= max,
        }
    }
}

/// A predicate over a dice value multiset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    // === Primitives ===

    /// Always true.
    Any,

    /// Some value appears at least this many times.
    OfAKind(u8),

    /// Disjoint groups of equal values, e.g. `[3, 2]` for a full house.
    ///
    /// Requirements are matched largest first, each taken from the
    /// largest remaining frequency bucket.
    Groups(SmallVec<[u8; 4]>),

    /// The values contain this sub-multiset.
    Contains(SmallVec<[u8; 6]>),

    /// Every value passes the filter. True for an empty set.
    All(ValueFilter),

    /// Values plus bonuses sum to at least this.
    SumAtLeast(u16),

    /// No value appears twice.
    AllDifferent,

    /// At least `ones` ones, and `kind` of a kind among what is left.
    OfAKindPlusOnes { kind: u8, ones: u8 },

    // === Combinators ===

    /// At least one sub-constraint holds.
    Union(Vec<Constraint>),

    /// Every sub-constraint holds.
    Intersection(Vec<Constraint>),
}

impl Constraint {
    pub fn x_of_a_kind(x: u8) -> Self {
        Self::OfAKind(x)
    }

    pub fn x_y_z_of_a_kind(groups: &[u8]) -> Self {
        Self::Groups(groups.iter().copied().collect())
    }

    pub fn contains(values: &[u8]) -> Self {
        Self::Contains(values.iter().copied().collect())
    }

    pub fn all_condition(filter: ValueFilter) -> Self {
        Self::All(filter)
    }

    pub fn sum_at_least(total: u16) -> Self {
        Self::SumAtLeast(total)
    }

    pub fn union(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self::Union(constraints.into_iter().collect())
    }

    pub fn intersection(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self::Intersection(constraints.into_iter().collect())
    }

    pub fn all_different() -> Self {
        Self::AllDifferent
    }

    pub fn four_of_a_kind_and_three_ones() -> Self {
        Self::OfAKindPlusOnes { kind: 4, ones: 3 }
    }

    /// Check the constraint against a value set.
    #[must_use]
    pub fn evaluate(&self, set: &ValueSet) -> bool {
        match self {
            Constraint::Any => true,

            Constraint::OfAKind(x) => set.frequencies().iter().any(|n| n >= x),

            Constraint::Groups(groups) => {
                let mut required: SmallVec<[u8; 4]> = groups.clone();
                required.sort_unstable_by(|a, b| b.cmp(a));
                let mut buckets = set.buckets();
                for need in required {
                    match buckets.first_mut() {
                        Some(largest) if *largest >= need => *largest -= need,
                        _ => return false,
                    }
                    buckets.sort_unstable_by(|a, b| b.cmp(a));
                }
                true
            }

            Constraint::Contains(required) => {
                let have = set.frequencies();
                let need = ValueSet::from_values(required).frequencies();
                need.iter().zip(have.iter()).all(|(n, h)| n <= h)
            }

            Constraint::All(filter) => set.values().iter().all(|&v| filter.accepts(v)),

            Constraint::SumAtLeast(total) => set.sum() >= *total,

            Constraint::AllDifferent => set.frequencies().iter().all(|&n| n <= 1),

            Constraint::OfAKindPlusOnes { kind, ones } => {
                let mut freq = set.frequencies();
                if freq[1] < *ones {
                    return false;
                }
                freq[1] -= ones;
                freq.iter().any(|n| n >= kind)
            }

            Constraint::Union(constraints) => constraints.iter().any(|c| c.evaluate(set)),

            Constraint::Intersection(constraints) => constraints.iter().all(|c| c.evaluate(set)),
        }
    }
}

/// A constraint with the label shown on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedConstraint {
    pub name: &'static str,
    pub constraint: Constraint,
}

impl NamedConstraint {
    pub fn new(name: &'static str, constraint: Constraint) -> Self {
        Self { name, constraint }
    }

    #[must_use]
    pub fn evaluate(&self, set: &ValueSet) -> bool {
        self.constraint.evaluate(set)
    }
}

impl std::fmt::Display for NamedConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}
