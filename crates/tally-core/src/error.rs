//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Malformed input records                        │
//! │  └── ValidationError  - Field-level rule failures                      │
//! │                                                                         │
//! │  tally-insights errors (separate crate)                                │
//! │  └── InsightError     - Config, snapshot loading, wraps CoreError      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → InsightError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty collections and zero denominators are NOT errors. Only input the
//! reports cannot meaningfully read ends up here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when an input record cannot be used.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record has a shape the reports cannot read.
    ///
    /// ## When This Occurs
    /// - Sale line with a zero or negative quantity
    /// - Negative amount on a sale, expense, purchase order or return
    /// - Blank record identifier
    #[error("Invalid {entity} '{id}': {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Builds an [`CoreError::InvalidRecord`] from a failed field rule.
    pub fn invalid_record(entity: &'static str, id: &str, cause: ValidationError) -> Self {
        CoreError::InvalidRecord {
            entity,
            id: id.to_string(),
            reason: cause.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Values that must increase strictly do not.
    #[error("{field} must be strictly increasing")]
    NotIncreasing { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRecord {
            entity: "sale",
            id: "S-1001".to_string(),
            reason: "quantity must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid sale 'S-1001': quantity must be positive"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::NotIncreasing {
            field: "tax_brackets".to_string(),
        };
        assert_eq!(err.to_string(), "tax_brackets must be strictly increasing");
    }

    #[test]
    fn test_invalid_record_from_validation() {
        let err = CoreError::invalid_record(
            "expense",
            "E-7",
            ValidationError::MustNotBeNegative {
                field: "amount".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Invalid expense 'E-7': amount must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
