//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Coarse classification shown to callers         │
//! │                                                                         │
//! │  bookstore-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── SaleError        - What a ledger operation returns                │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the menu prints                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SaleError → ApiError → Terminal   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse outcome classification for a failed sale operation.
///
/// Every error a ledger operation can return maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Sale date is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate,
    /// Non-numeric or out-of-range quantity/discount (or any other field).
    InvalidInput,
    /// Missing member, book or sale.
    NotFound,
    /// Requested quantity exceeds the book's stock.
    InsufficientStock,
    /// The store could not complete the transaction.
    StorageFailure,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are rejections: they are detected before any write begins, so the
/// store is left untouched when one is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale date failed format or calendar validation.
    #[error("Invalid date '{0}': expected YYYY-MM-DD, e.g. 2024-01-19")]
    InvalidDate(String),

    /// Member id does not resolve to a member row.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// Book id does not resolve to a book row.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Sale id does not resolve to a sale row.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// Insufficient stock to complete sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Add sale (B001, qty: 60)
    ///      │
    ///      ▼
    /// Check stock: available=50
    ///      │
    ///      ▼
    /// InsufficientStock { book_id: "B001", available: 50, requested: 60 }
    ///      │
    ///      ▼
    /// Menu shows: "only 50 in stock"
    /// ```
    #[error("Insufficient stock for {book_id}: available {available}, requested {requested}")]
    InsufficientStock {
        book_id: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the caller-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidDate(_) => ErrorKind::InvalidDate,
            CoreError::MemberNotFound(_)
            | CoreError::BookNotFound(_)
            | CoreError::SaleNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InsufficientStock {
            book_id: "B001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for B001: available 3, requested 5"
        );

        let err = CoreError::SaleNotFound(42);
        assert_eq!(err.to_string(), "Sale not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be greater than 0");

        let err = ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        };
        assert_eq!(err.to_string(), "discount must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "member id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CoreError::InvalidDate("2024/01/19".into()).kind(),
            ErrorKind::InvalidDate
        );
        assert_eq!(
            CoreError::MemberNotFound("M999".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::BookNotFound("B999".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(CoreError::SaleNotFound(7).kind(), ErrorKind::NotFound);
        assert_eq!(
            CoreError::InsufficientStock {
                book_id: "B001".into(),
                available: 1,
                requested: 2,
            }
            .kind(),
            ErrorKind::InsufficientStock
        );
    }

    #[test]
    fn test_error_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorKind::InsufficientStock).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_STOCK\"");
    }
}
