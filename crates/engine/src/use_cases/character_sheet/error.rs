//! Character sheet operation errors.

use crate::infrastructure::ports::{DiceError, RepoError};
use sheetkeep_domain::{CharacterId, DiceParseError, DomainError, PointBudget};

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Character sheet not found: {0}")]
    SheetNotFound(CharacterId),

    /// Carries both totals and both limits for an itemized message.
    #[error(
        "Skill point budget exceeded: job {}/{}, interest {}/{}",
        .0.job_total, .0.job_limit, .0.interest_total, .0.interest_limit
    )]
    PointBudgetExceeded(PointBudget),

    #[error("Invalid dice formula for {label}: {source}")]
    InvalidFormula {
        label: String,
        #[source]
        source: DiceParseError,
    },

    #[error("Domain error: {0}")]
    Domain(DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Dice error: {0}")]
    Dice(#[from] DiceError),
}

impl CharacterSheetError {
    /// Budget payload when this is a save rejected for overspent points.
    pub fn budget(&self) -> Option<&PointBudget> {
        match self {
            Self::PointBudgetExceeded(budget) => Some(budget),
            _ => None,
        }
    }
}

impl From<DomainError> for CharacterSheetError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PointBudgetExceeded(budget) => Self::PointBudgetExceeded(budget),
            other => Self::Domain(other),
        }
    }
}
