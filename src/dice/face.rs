//! Die faces and value arithmetic.

use serde::{Deserialize, Serialize};

/// A physical die face.
///
/// Declaration order doubles as display order when faces are offered as
/// choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieFace {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    /// Power face that counts as a one.
    StarOne,
    /// Power face: adjust up to two dice.
    TwoStar,
    /// Power face: adjust up to one die.
    Star,
    /// Power face: reroll one die.
    Reroll,
    /// Adds two to the sum of a claim. No value of its own.
    AddTwo,
    Blank,
    /// Decree die power face: adjust up to one die.
    StarDecree,
}

/// What a power face lets the player do when it comes up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    /// Reroll exactly one available die.
    Reroll,
    /// Set up to this many dice to any other face they carry.
    Adjust(u8),
}

impl DieFace {
    /// The six numeric faces, lowest first.
    pub const NUMERIC: [DieFace; 6] = [
        DieFace::One,
        DieFace::Two,
        DieFace::Three,
        DieFace::Four,
        DieFace::Five,
        DieFace::Six,
    ];

    /// Effective value, if the face has one.
    #[must_use]
    pub const fn to_value(self) -> Option<u8> {
        match self {
            DieFace::One | DieFace::StarOne => Some(1),
            DieFace::Two => Some(2),
            DieFace::Three => Some(3),
            DieFace::Four => Some(4),
            DieFace::Five => Some(5),
            DieFace::Six => Some(6),
            DieFace::TwoStar
            | DieFace::Star
            | DieFace::Reroll
            | DieFace::AddTwo
            | DieFace::Blank
            | DieFace::StarDecree => None,
        }
    }

    /// The plain numeric face for a value in 1..=6.
    #[must_use]
    pub fn from_value(value: u8) -> Option<DieFace> {
        match value {
            1..=6 => Some(Self::NUMERIC[usize::from(value - 1)]),
            _ => None,
        }
    }

    /// The power this face triggers when it comes up.
    #[must_use]
    pub const fn power(self) -> Option<PowerKind> {
        match self {
            DieFace::Reroll => Some(PowerKind::Reroll),
            DieFace::Star | DieFace::StarOne | DieFace::StarDecree => Some(PowerKind::Adjust(1)),
            DieFace::TwoStar => Some(PowerKind::Adjust(2)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_power(self) -> bool {
        self.power().is_some()
    }

    /// Bonus this face adds to a sum condition on top of its value.
    #[must_use]
    pub const fn sum_bonus(self) -> u8 {
        match self {
            DieFace::AddTwo => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DieFace::One => "1",
            DieFace::Two => "2",
            DieFace::Three => "3",
            DieFace::Four => "4",
            DieFace::Five => "5",
            DieFace::Six => "6",
            DieFace::StarOne => "*1",
            DieFace::TwoStar => "2*",
            DieFace::Star => "*",
            DieFace::Reroll => "reroll",
            DieFace::AddTwo => "+2",
            DieFace::Blank => "blank",
            DieFace::StarDecree => "*decree",
        };
        f.write_str(label)
    }
}

/// Free-function form of [`DieFace::to_value`].
#[must_use]
pub const fn to_value(face: DieFace) -> Option<u8> {
    face.to_value()
}

/// `value + x`, or `None` if there is no value or the result passes six.
///
/// ```
/// use pharaoh_dice::dice::x_higher;
///
/// assert_eq!(x_higher(2, Some(3)), Some(5));
/// assert_eq!(x_higher(1, Some(6)), None);
/// assert_eq!(x_higher(1, None), None);
/// ```
#[must_use]
pub fn x_higher(x: u8, value: Option<u8>) -> Option<u8> {
    let raised = value?.checked_add(x)?;
    (raised <= 6).then_some(raised)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_faces_map_to_themselves() {
        for (i, face) in DieFace::NUMERIC.iter().enumerate() {
            assert_eq!(face.to_value(), Some(i as u8 + 1));
            assert_eq!(DieFace::from_value(i as u8 + 1), Some(*face));
        }
        assert_eq!(DieFace::from_value(0), None);
        assert_eq!(DieFace::from_value(7), None);
    }

    #[test]
    fn test_star_one_counts_as_one() {
        assert_eq!(to_value(DieFace::StarOne), Some(1));
        assert!(DieFace::StarOne.is_power());
    }

    #[test]
    fn test_valueless_faces() {
        for face in [
            DieFace::TwoStar,
            DieFace::Star,
            DieFace::Reroll,
            DieFace::AddTwo,
            DieFace::Blank,
            DieFace::StarDecree,
        ] {
            assert_eq!(face.to_value(), None, "{face:?}");
        }
    }

    #[test]
    fn test_power_classification() {
        assert_eq!(DieFace::Reroll.power(), Some(PowerKind::Reroll));
        assert_eq!(DieFace::Star.power(), Some(PowerKind::Adjust(1)));
        assert_eq!(DieFace::StarDecree.power(), Some(PowerKind::Adjust(1)));
        assert_eq!(DieFace::TwoStar.power(), Some(PowerKind::Adjust(2)));
        assert_eq!(DieFace::AddTwo.power(), None);
        assert_eq!(DieFace::Blank.power(), None);
        assert_eq!(DieFace::Six.power(), None);

        let powers = [
            DieFace::One,
            DieFace::Two,
            DieFace::Three,
            DieFace::Four,
            DieFace::Five,
            DieFace::Six,
            DieFace::StarOne,
            DieFace::TwoStar,
            DieFace::Star,
            DieFace::Reroll,
            DieFace::AddTwo,
            DieFace::Blank,
            DieFace::StarDecree,
        ]
        .iter()
        .filter(|f| f.is_power())
        .count();
        assert_eq!(powers, 5);
    }

    #[test]
    fn test_x_higher_bounds() {
        assert_eq!(x_higher(0, Some(6)), Some(6));
        assert_eq!(x_higher(5, Some(1)), Some(6));
        assert_eq!(x_higher(6, Some(1)), None);
        assert_eq!(x_higher(255, Some(1)), None);
    }
}
