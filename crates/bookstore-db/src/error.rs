//! # Database Error Types
//!
//! Error types for database operations and ledger operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleError (this module) ← DbError or a CoreError rejection            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← code + message printed to the terminal            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bookstore_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_one` returns no rows
    /// - An UPDATE/DELETE keyed by id touched zero rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Pool closed, or no connection freed up within the timeout
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration checksum changed after being applied
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed, including constraint violations.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not begin, commit or roll back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Wraps a sqlx error raised by `begin`, `commit` or `rollback`.
    pub fn transaction(err: sqlx::Error) -> Self {
        DbError::TransactionFailed(err.to_string())
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → DbError::QueryFailed (SQLite message kept)
/// sqlx::Error::PoolTimedOut   → DbError::ConnectionFailed
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionFailed("Timed out acquiring a connection".to_string())
            }

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Sale Error
// =============================================================================

/// Error returned by a [`SalesLedger`](crate::SalesLedger) operation.
///
/// Either the request was rejected before any write (`Rejected`), or the
/// store failed and the transaction was rolled back (`Storage`).
#[derive(Debug, Error)]
pub enum SaleError {
    /// Validation, referential or stock rejection. Nothing was written.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store could not complete the operation. Changes were rolled back.
    #[error("Storage failure: {0}")]
    Storage(#[from] DbError),
}

impl SaleError {
    /// Returns the caller-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SaleError::Rejected(e) => e.kind(),
            SaleError::Storage(_) => ErrorKind::StorageFailure,
        }
    }
}

impl From<bookstore_core::ValidationError> for SaleError {
    fn from(err: bookstore_core::ValidationError) -> Self {
        SaleError::Rejected(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for SaleError {
    fn from(err: sqlx::Error) -> Self {
        SaleError::Storage(DbError::from(err))
    }
}

/// Result type for ledger operations.
pub type SaleResult<T> = Result<T, SaleError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::ValidationError;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Sale", "12");
        assert_eq!(err.to_string(), "Sale not found: 12");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_sale_error_kinds() {
        let rejected: SaleError = CoreError::SaleNotFound(3).into();
        assert_eq!(rejected.kind(), ErrorKind::NotFound);
        assert_eq!(rejected.to_string(), "Sale not found: 3");

        let invalid: SaleError = ValidationError::MustNotBeNegative {
            field: "discount".into(),
        }
        .into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidInput);

        let storage: SaleError = DbError::TransactionFailed("disk I/O error".into()).into();
        assert_eq!(storage.kind(), ErrorKind::StorageFailure);
        assert!(storage.to_string().starts_with("Storage failure"));
    }

    #[test]
    fn test_pool_closed_is_storage_failure() {
        let err: SaleError = sqlx::Error::PoolClosed.into();
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_failed() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(
            err.to_string(),
            "Connection failed: Timed out acquiring a connection"
        );
    }
}
