//! Value objects - Immutable objects defined by their attributes

mod dice;
mod point_budget;
mod progression;

pub use dice::{DiceFormula, DiceParseError, DiceRollResult, MAX_DICE_COUNT, MAX_DIE_SIZE};
pub use point_budget::{PointBudget, PointLimits, PointUsage};
pub use progression::{experience_cost, ProgressionLedger};
