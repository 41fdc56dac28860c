//=========================================================================
// Grid Errors
//=========================================================================
//
// Error taxonomy shared by every grid subsystem.
//
//   Configuration      → missing binding at startup (fatal)
//   NotFound           → index lookup with no matching element
//   InvariantViolation → element set unavailable when required
//   InvalidArgument    → rejected runtime reconfiguration
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== GridError ===========================================================

/// Errors raised by grid lookups, commands and controller wiring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A required collaborator was not supplied at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No element occupies the requested index.
    #[error("no interactable at index {index}")]
    NotFound { index: String },

    /// Internal consistency failure (usually an integration bug).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A runtime reconfiguration input was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GridError {
    /// Builds a `NotFound` from any debuggable index.
    pub fn not_found(index: impl std::fmt::Debug) -> Self {
        Self::NotFound {
            index: format!("{:?}", index),
        }
    }

    /// Returns `true` for lookup misses that a command may absorb.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used across the grid core.
pub type Result<T> = std::result::Result<T, GridError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_index_with_debug() {
        let err = GridError::not_found((3, 4));
        assert_eq!(err.to_string(), "no interactable at index (3, 4)");
        assert!(err.is_not_found());
    }

    #[test]
    fn other_variants_are_not_lookup_misses() {
        assert!(!GridError::Configuration("x".into()).is_not_found());
        assert!(!GridError::InvariantViolation("x".into()).is_not_found());
        assert!(!GridError::InvalidArgument("x".into()).is_not_found());
    }

    #[test]
    fn display_includes_context() {
        let err = GridError::Configuration("controllable missing".into());
        assert!(err.to_string().contains("controllable missing"));
    }
}
