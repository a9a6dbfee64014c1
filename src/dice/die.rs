//! Die types and die state.
//!
//! Every die type carries an ordered list of face pairs. Flipping a die
//! swaps to the other face of the first pair holding the current face.
//! Rolling draws uniformly from the flattened pair list, so a face listed
//! twice comes up twice as often.

use serde::{Deserialize, Serialize};

use super::face::{x_higher, DieFace};
use crate::core::{DieError, GameRng};

use DieFace::*;

const STANDARD_PAIRS: &[(DieFace, DieFace)] = &[(One, Six), (Two, Five), (Three, Four)];
const SERF_PAIRS: &[(DieFace, DieFace)] = &[(One, Two), (Two, One), (Three, Four)];
const NOBLE_PAIRS: &[(DieFace, DieFace)] = &[(Three, Four), (Five, Six), (Six, Five)];
const ARTISAN_PAIRS: &[(DieFace, DieFace)] = &[(StarOne, Six), (Two, Five), (Three, Four)];
const INTRIGUE_PAIRS: &[(DieFace, DieFace)] = &[(One, TwoStar), (Two, Five), (Three, Four)];
const VOYAGE_PAIRS: &[(DieFace, DieFace)] = &[(Star, AddTwo), (Reroll, Blank), (Reroll, Blank)];
const DECREE_PAIRS: &[(DieFace, DieFace)] = &[(StarDecree, Six), (Two, Five), (Three, Four)];

/// The eight kinds of die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieType {
    Standard,
    /// Same faces as Standard, but must be locked on the roll it appears.
    Immediate,
    /// Pairs one with two in both directions.
    Serf,
    Noble,
    Artisan,
    Intrigue,
    Voyage,
    Decree,
}

impl DieType {
    pub const ALL: [DieType; 8] = [
        DieType::Standard,
        DieType::Immediate,
        DieType::Serf,
        DieType::Noble,
        DieType::Artisan,
        DieType::Intrigue,
        DieType::Voyage,
        DieType::Decree,
    ];

    /// Ordered face pairs of this type.
    #[must_use]
    pub fn face_pairs(self) -> &'static [(DieFace, DieFace)] {
        match self {
            DieType::Standard | DieType::Immediate => STANDARD_PAIRS,
            DieType::Serf => SERF_PAIRS,
            DieType::Noble => NOBLE_PAIRS,
            DieType::Artisan => ARTISAN_PAIRS,
            DieType::Intrigue => INTRIGUE_PAIRS,
            DieType::Voyage => VOYAGE_PAIRS,
            DieType::Decree => DECREE_PAIRS,
        }
    }

    /// Flattened face list, duplicates included.
    pub fn faces(self) -> impl Iterator<Item = DieFace> {
        self.face_pairs().iter().flat_map(|&(a, b)| [a, b])
    }

    /// Dice of this type may not be sent back to be rerolled.
    #[must_use]
    pub const fn must_lock(self) -> bool {
        matches!(self, DieType::Immediate)
    }
}

impl std::fmt::Display for DieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One physical die.
///
/// A die enters a player's prepared zone with no face and gets one when
/// it is rolled.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    kind: DieType,
    face: Option<DieFace>,
    power_triggered: bool,
}

impl Die {
    /// A fresh, unrolled die.
    #[must_use]
    pub const fn new(kind: DieType) -> Self {
        Self {
            kind,
            face: None,
            power_triggered: false,
        }
    }

    /// A die already showing `face`.
    pub fn showing(kind: DieType, face: DieFace) -> Result<Self, DieError> {
        let mut die = Self::new(kind);
        die.set_face(face)?;
        Ok(die)
    }

    #[must_use]
    pub const fn kind(&self) -> DieType {
        self.kind
    }

    #[must_use]
    pub const fn face(&self) -> Option<DieFace> {
        self.face
    }

    /// Set when the die lands on a power face, cleared when it resolves.
    #[must_use]
    pub const fn power_triggered(&self) -> bool {
        self.power_triggered
    }

    pub fn clear_power(&mut self) {
        self.power_triggered = false;
    }

    /// Flattened face list, duplicates included.
    #[must_use]
    pub fn faces(&self) -> Vec<DieFace> {
        self.kind.faces().collect()
    }

    /// Distinct faces in display order.
    #[must_use]
    pub fn distinct_faces(&self) -> Vec<DieFace> {
        let mut faces = self.faces();
        faces.sort_unstable();
        faces.dedup();
        faces
    }

    /// Distinct faces that carry a value, in display order.
    #[must_use]
    pub fn numeric_faces(&self) -> Vec<DieFace> {
        let mut faces = self.distinct_faces();
        faces.retain(|f| f.to_value().is_some());
        faces
    }

    #[must_use]
    pub fn has_face(&self, face: DieFace) -> bool {
        self.kind.faces().any(|f| f == face)
    }

    /// True if some face of this die is worth `value`.
    #[must_use]
    pub fn has_value(&self, value: u8) -> bool {
        self.kind.faces().any(|f| f.to_value() == Some(value))
    }

    /// Value of the current face.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        self.face.and_then(DieFace::to_value)
    }

    /// Sum bonus of the current face.
    #[must_use]
    pub fn sum_bonus(&self) -> u8 {
        self.face.map_or(0, DieFace::sum_bonus)
    }

    /// Roll the die and return the new face.
    pub fn roll(&mut self, rng: &mut GameRng) -> DieFace {
        let pairs = self.kind.face_pairs();
        let pick = rng.gen_index(pairs.len() * 2);
        let (a, b) = pairs[pick / 2];
        let face = if pick % 2 == 0 { a } else { b };
        self.show(face);
        face
    }

    /// The partner of `face` in the first pair that holds it.
    pub fn get_flipped(&self, face: DieFace) -> Result<DieFace, DieError> {
        self.kind
            .face_pairs()
            .iter()
            .find_map(|&(a, b)| {
                if a == face {
                    Some(b)
                } else if b == face {
                    Some(a)
                } else {
                    None
                }
            })
            .ok_or(DieError::FaceNotOnDie {
                kind: self.kind,
                face,
            })
    }

    /// Turn the die over.
    pub fn flip(&mut self) -> Result<(), DieError> {
        let face = self.face.ok_or(DieError::NotRolled { kind: self.kind })?;
        let flipped = self.get_flipped(face)?;
        self.show(flipped);
        Ok(())
    }

    /// Set the die to `face`, which must be one of its faces.
    pub fn set_face(&mut self, face: DieFace) -> Result<(), DieError> {
        if !self.has_face(face) {
            return Err(DieError::FaceNotOnDie {
                kind: self.kind,
                face,
            });
        }
        self.show(face);
        Ok(())
    }

    /// True if the die has a face worth exactly `x` more than it shows now.
    #[must_use]
    pub fn can_pipup(&self, x: u8) -> bool {
        x_higher(x, self.value()).is_some_and(|target| self.has_value(target))
    }

    /// Raise the shown value by `x`, switching to the first face in pair
    /// order with the target value.
    pub fn pipup(&mut self, x: u8) -> Result<(), DieError> {
        let error = DieError::PipUp {
            kind: self.kind,
            face: self.face,
            amount: x,
        };
        let target = x_higher(x, self.value()).ok_or_else(|| error.clone())?;
        let face = self
            .kind
            .faces()
            .find(|f| f.to_value() == Some(target))
            .ok_or(error)?;
        self.show(face);
        Ok(())
    }

    /// Clear the face, as when the die goes back to be rerolled.
    pub fn reset(&mut self) {
        self.face = None;
        self.power_triggered = false;
    }

    fn show(&mut self, face: DieFace) {
        self.face = Some(face);
        if face.is_power() {
            self.power_triggered = true;
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            Some(face) => write!(f, "{} {}", self.kind, face),
            None => write!(f, "{} -", self.kind),
        }
    }
}
