//! # bookstore-db: Storage Layer for the Bookstore Ledger
//!
//! SQLite persistence for members, books and sales, plus the
//! transactional [`SalesLedger`] that every sale mutation goes through.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookstore Data Flow                              │
//! │                                                                         │
//! │  Menu choice (add / list / update / delete)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookstore-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  SalesLedger  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (ledger.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ one tx per    │    │ 001_schema   │  │   │
//! │  │   │ handle        │    │ operation     │    │ + seed pass  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                ▼                                │   │
//! │  │                 Member / Book / Sale repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bookstore.db (SQLite file)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema and seed data
//! - [`ledger`] - Add / list / update / delete sale operations
//! - [`error`] - Storage and ledger error types
//! - [`repository`] - Row-level access per table
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_core::NewSale;
//! use bookstore_db::{Database, DbConfig};
//!
//! // Opens (or creates) the file, then creates tables and seed rows
//! let db = Database::new(DbConfig::new("bookstore.db")).await?;
//!
//! let total = db
//!     .ledger()
//!     .add_sale(&NewSale::new("2024-01-19", "M001", "B001", 2, 100))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, SaleError, SaleResult};
pub use ledger::SalesLedger;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::member::MemberRepository;
pub use repository::sale::SaleRepository;
