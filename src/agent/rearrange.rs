//! Pip redistribution search.
//!
//! Given some dice and a target sum, list every way to set each die to one
//! of its numeric faces so that the values add up to the target. Dice of
//! the same type are interchangeable, so assignments that only swap faces
//! between same-typed dice are listed once.

use crate::core::ActionError;
use crate::dice::{Die, DieFace};

/// Every distinct rearrangement of `dice` summing to `target`.
///
/// Each result holds one face per die, in the order of `dice`.
pub fn rearrangements(dice: &[Die], target: u16) -> Result<Vec<Vec<DieFace>>, ActionError> {
    let options: Vec<Vec<DieFace>> = dice.iter().map(Die::numeric_faces).collect();
    if let Some((die, _)) = dice.iter().zip(&options).find(|(_, faces)| faces.is_empty()) {
        return Err(ActionError::Rearrangement(format!("{die} has no numeric faces")));
    }

    // Search same-typed dice next to each other and keep their faces
    // non-decreasing, so each multiset is produced once.
    let mut order: Vec<usize> = (0..dice.len()).collect();
    order.sort_by_key(|&i| dice[i].kind());

    let value = |face: DieFace| u16::from(face.to_value().unwrap_or(0));
    let mut min_rest = vec![0u16; order.len() + 1];
    let mut max_rest = vec![0u16; order.len() + 1];
    for pos in (0..order.len()).rev() {
        let faces = &options[order[pos]];
        min_rest[pos] = min_rest[pos + 1] + faces.iter().map(|&f| value(f)).min().unwrap_or(0);
        max_rest[pos] = max_rest[pos + 1] + faces.iter().map(|&f| value(f)).max().unwrap_or(0);
    }

    let search = Search {
        dice,
        options: &options,
        order: &order,
        min_rest: &min_rest,
        max_rest: &max_rest,
        target,
    };
    let mut picked = Vec::with_capacity(order.len());
    let mut found = Vec::new();
    search.run(0, 0, &mut picked, &mut found);

    if found.is_empty() {
        return Err(ActionError::Rearrangement(format!(
            "no faces of the chosen dice sum to {target}"
        )));
    }
    Ok(found)
}

struct Search<'a> {
    dice: &'a [Die],
    options: &'a [Vec<DieFace>],
    order: &'a [usize],
    min_rest: &'a [u16],
    max_rest: &'a [u16],
    target: u16,
}

impl Search<'_> {
    fn run(&self, pos: usize, sum: u16, picked: &mut Vec<DieFace>, found: &mut Vec<Vec<DieFace>>) {
        if sum + self.min_rest[pos] > self.target || sum + self.max_rest[pos] < self.target {
            return;
        }
        if pos == self.order.len() {
            let mut faces = vec![DieFace::Blank; self.order.len()];
            for (&die, &face) in self.order.iter().zip(picked.iter()) {
                faces[die] = face;
            }
            found.push(faces);
            return;
        }

        let die = self.order[pos];
        let floor = (pos > 0 && self.dice[self.order[pos - 1]].kind() == self.dice[die].kind())
            .then(|| picked[pos - 1]);
        for &face in &self.options[die] {
            if floor.is_some_and(|f| face < f) {
                continue;
            }
            picked.push(face);
            self.run(pos + 1, sum + u16::from(face.to_value().unwrap_or(0)), picked, found);
            picked.pop();
        }
    }
}
