//! # CLI Error Types
//!
//! What the menu prints when an operation fails, and what `run` returns
//! when the program itself cannot continue.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Bookstore CLI                      │
//! │                                                                         │
//! │  Menu choice "1" (add sale)                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  commands::sale::add_sale                                        │  │
//! │  │  Result<AddSaleResponse, ApiError>                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad text? ──── ValidationError ─────────────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Ledger rejects? ── SaleError::Rejected ──── ApiError ──────────►│  │
//! │  │         │                                         ▲              │  │
//! │  │         ▼                                         │              │  │
//! │  │  Store fails? ──── SaleError::Storage ───────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Menu prints:  "Error: Book not found: B999"  and shows the menu again │
//! │                                                                         │
//! │  CliError is different: config, database open or terminal I/O         │
//! │  failures end the program with a non-zero exit code.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use bookstore_core::{CoreError, ErrorKind, ValidationError};
use bookstore_db::{DbError, SaleError};

use crate::config::ConfigError;

// =============================================================================
// API Error
// =============================================================================

/// Error returned by a command and shown to the user.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for B001: available 50, requested 60"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Sale date is malformed
    InvalidDate,

    /// Input validation failed
    ValidationError,

    /// Member, book or sale not found
    NotFound,

    /// Not enough copies in stock
    InsufficientStock,

    /// Database operation failed; nothing was changed
    DatabaseError,
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidDate => ErrorCode::InvalidDate,
            ErrorKind::InvalidInput => ErrorCode::ValidationError,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InsufficientStock => ErrorCode::InsufficientStock,
            ErrorKind::StorageFailure => ErrorCode::DatabaseError,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            // Drop the "Validation error:" prefix; the field message reads better alone
            CoreError::Validation(e) => e.into(),
            other => ApiError::new(other.kind().into(), other.to_string()),
        }
    }
}

/// Storage details are logged, not shown.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!(error = %err, "Database operation failed");
        ApiError::new(
            ErrorCode::DatabaseError,
            "Database operation failed; no changes were saved",
        )
    }
}

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::Rejected(e) => e.into(),
            SaleError::Storage(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// CLI Error
// =============================================================================

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be opened or initialized.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Reading input or writing output failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be serialized.
    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the CLI entry points.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_codes() {
        let err: ApiError = SaleError::Rejected(CoreError::InvalidDate("2024/01/19".into())).into();
        assert_eq!(err.code, ErrorCode::InvalidDate);

        let err: ApiError = SaleError::Rejected(CoreError::BookNotFound("B999".into())).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Book not found: B999");

        let err: ApiError = SaleError::Rejected(CoreError::InsufficientStock {
            book_id: "B001".into(),
            available: 50,
            requested: 60,
        })
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert!(err.message.contains("available 50"));
    }

    #[test]
    fn test_validation_message_unwrapped() {
        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be greater than 0");
    }

    #[test]
    fn test_storage_details_hidden() {
        let err: ApiError =
            SaleError::Storage(DbError::QueryFailed("disk I/O error".into())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::new(ErrorCode::NotFound, "Sale not found: 9");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Sale not found: 9");
    }
}
