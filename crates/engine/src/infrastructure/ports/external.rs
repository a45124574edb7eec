//! External service ports.

use async_trait::async_trait;
use sheetkeep_domain::{DiceFormula, DiceRollResult};

use super::error::DiceError;

// =============================================================================
// Dice Port
// =============================================================================

/// Rolls an already validated formula.
///
/// Formulas are parsed before this port is reached, so implementations never
/// see malformed input.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiceRollerPort: Send + Sync {
    async fn roll(&self, formula: &DiceFormula) -> Result<DiceRollResult, DiceError>;
}
