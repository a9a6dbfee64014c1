//! Claim condition properties.
//!
//! The unit tests in `constraints` pin down each table entry. These check
//! the relations between constraints over arbitrary value multisets.

use pharaoh_dice::constraints::{Constraint, RowMode, RuleBook, ValueFilter, ValueSet};
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 0..=9)
}

proptest! {
    #[test]
    fn test_of_a_kind_is_monotone(values in values(), x in 1u8..=7) {
        let set = ValueSet::from_values(&values);
        if Constraint::x_of_a_kind(x + 1).evaluate(&set) {
            prop_assert!(Constraint::x_of_a_kind(x).evaluate(&set));
        }
    }

    #[test]
    fn test_groups_imply_their_largest_group(values in values(), a in 1u8..=4, b in 1u8..=4) {
        let set = ValueSet::from_values(&values);
        if Constraint::x_y_z_of_a_kind(&[a, b]).evaluate(&set) {
            prop_assert!(Constraint::x_of_a_kind(a.max(b)).evaluate(&set));
            prop_assert!(set.values().len() >= usize::from(a + b));
        }
    }

    #[test]
    fn test_value_order_is_irrelevant(mut values in values()) {
        let book = RuleBook::new();
        let before = ValueSet::from_values(&values);
        values.reverse();
        let after = ValueSet::from_values(&values);
        for level in 3..=7 {
            for mode in [RowMode::A, RowMode::B] {
                for condition in book.row(mode, level).unwrap() {
                    prop_assert_eq!(condition.evaluate(&before), condition.evaluate(&after));
                }
            }
        }
    }

    #[test]
    fn test_contains_itself(values in values()) {
        let set = ValueSet::from_values(&values);
        prop_assert!(Constraint::contains(&values).evaluate(&set));
    }

    #[test]
    fn test_union_and_intersection(values in values()) {
        let set = ValueSet::from_values(&values);
        let pair = Constraint::x_of_a_kind(2);
        let even = Constraint::all_condition(ValueFilter::Even);
        let (p, e) = (pair.evaluate(&set), even.evaluate(&set));
        prop_assert_eq!(Constraint::union([pair.clone(), even.clone()]).evaluate(&set), p || e);
        prop_assert_eq!(Constraint::intersection([pair, even]).evaluate(&set), p && e);
    }
}

#[test]
fn test_greedy_groups_on_four_fours_and_two_twos() {
    let set = ValueSet::from_values(&[4, 4, 4, 4, 2, 2]);

    assert!(Constraint::x_y_z_of_a_kind(&[4, 2]).evaluate(&set));
    assert!(Constraint::x_y_z_of_a_kind(&[3, 2]).evaluate(&set));
    assert!(Constraint::x_y_z_of_a_kind(&[2, 2, 2]).evaluate(&set));
    // The spare four cannot make a second three of a kind.
    assert!(!Constraint::x_y_z_of_a_kind(&[3, 3]).evaluate(&set));
    assert!(!Constraint::x_y_z_of_a_kind(&[4, 3]).evaluate(&set));
}

#[test]
fn test_contains_counts_multiplicity() {
    let pairs = Constraint::contains(&[6, 6, 1, 1]);
    assert!(pairs.evaluate(&ValueSet::from_values(&[1, 6, 2, 1, 6])));
    assert!(!pairs.evaluate(&ValueSet::from_values(&[1, 6, 2, 1, 5])));
    assert!(Constraint::contains(&[]).evaluate(&ValueSet::from_values(&[])));
}

#[test]
fn test_sum_thresholds_per_tier() {
    let book = RuleBook::new();
    let ten_plus = book.condition(RowMode::A, 3, 3).unwrap();
    assert!(ten_plus.evaluate(&ValueSet::from_values(&[4, 3, 3])));
    assert!(!ten_plus.evaluate(&ValueSet::from_values(&[4, 3, 2])));

    let forty_five = book.condition(RowMode::B, 7, 3).unwrap();
    assert!(forty_five.evaluate(&ValueSet::from_values(&[6, 6, 6, 6, 6, 6, 6, 3])));
    assert!(!forty_five.evaluate(&ValueSet::from_values(&[6, 6, 6, 6, 6, 6, 6])));
}
