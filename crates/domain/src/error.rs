//! Unified error types for the domain layer
//!
//! Normalization and derivation never fail; errors only come from edits that
//! cannot be applied, identifiers that cannot be parsed, dice formulas that do
//! not match the accepted grammar, and save-time budget enforcement.

use thiserror::Error;

use crate::game_systems::SystemId;
use crate::value_objects::{DiceParseError, PointBudget};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., an edit referring to a missing entry)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The rule-system identifier is not one this engine knows
    #[error("Unknown game system: {0}")]
    UnknownSystem(String),

    /// An edit was addressed to a sheet of a different rule system
    #[error("Edit for {edit} cannot be applied to a {sheet} sheet")]
    SystemMismatch {
        sheet: SystemId,
        edit: &'static str,
    },

    /// Dice formula rejected before any roll was attempted
    #[error("Invalid dice formula: {0}")]
    InvalidDiceFormula(#[from] DiceParseError),

    /// Skill points exceed the job or interest budget at save time
    #[error(
        "Skill point budget exceeded: job {}/{}, interest {}/{}",
        .0.job_total, .0.job_limit, .0.interest_total, .0.interest_limit
    )]
    PointBudgetExceeded(PointBudget),
}

impl DomainError {
    /// Creates a validation error for edits that cannot be applied.
    ///
    /// # Example
    /// ```ignore
    /// if !sheet.classes.iter().any(|c| c.name == name) {
    ///     return Err(DomainError::validation(format!("class not acquired: {}", name)));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an unknown system error
    pub fn unknown_system(system_id: impl Into<String>) -> Self {
        Self::UnknownSystem(system_id.into())
    }

    /// Returns the offending budget if this is a budget error.
    pub fn point_budget(&self) -> Option<&PointBudget> {
        match self {
            Self::PointBudgetExceeded(budget) => Some(budget),
            _ => None,
        }
    }
}
