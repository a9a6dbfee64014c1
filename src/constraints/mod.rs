//! Claim conditions.
//!
//! - `constraint`: predicates over dice values and their combinators
//! - `rulebook`: the mode A/B tables indexed by tier and slot

pub mod constraint;
pub mod rulebook;

pub use constraint::{Constraint, NamedConstraint, ValueFilter, ValueSet};
pub use rulebook::{RowMode, RuleBook};
