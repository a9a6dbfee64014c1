//! Dice: faces, values, and the eight die types.
//!
//! A face is the symbol a die shows. Its value is the number it counts as
//! for claims and scoring, if any. `StarOne` counts as a one; power faces
//! other than `StarOne` and the blank faces count as nothing.

pub mod face;
pub mod die;

pub use face::{to_value, x_higher, DieFace, PowerKind};
pub use die::{Die, DieType};
