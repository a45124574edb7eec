//! Error types for port operations.

/// Sheet storage errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Record not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures of the external dice capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("Dice request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid dice response: {0}")]
    InvalidResponse(String),
    #[error("Dice service unavailable")]
    Unavailable,
}

impl DiceError {
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = RepoError::not_found("CharacterSheet", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "CharacterSheet not found: abc");
    }

    #[test]
    fn test_dice_errors() {
        assert_eq!(
            DiceError::request_failed("timeout").to_string(),
            "Dice request failed: timeout"
        );
        assert_eq!(
            DiceError::invalid_response("missing total").to_string(),
            "Invalid dice response: missing total"
        );
    }
}
