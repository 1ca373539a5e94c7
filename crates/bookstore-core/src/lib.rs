//! # bookstore-core: Pure Business Logic for the Bookstore Ledger
//!
//! This crate holds the rules of the sales ledger as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bookstore Ledger Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (menu driver)                       │   │
//! │  │    add sale ──► report ──► update discount ──► delete sale      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Member   │  │   Money   │  │ CoreError │  │   date    │  │   │
//! │  │   │ Book,Sale │  │ sale_total│  │ ErrorKind │  │ qty, disc │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bookstore-db (Database Layer)                   │   │
//! │  │        SQLite, migrations, repositories, SalesLedger            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Member, Book, Sale, SaleDetail)
//! - [`money`] - Integer money and the sale total formula
//! - [`error`] - Domain error types and the caller-facing [`ErrorKind`]
//! - [`validation`] - Input validation run before any store access
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::money::sale_total;
//! use bookstore_core::validation::{validate_date, validate_quantity};
//!
//! assert!(validate_date("2024-01-19"));
//! let qty = validate_quantity("2").unwrap();
//!
//! let total = sale_total(600, qty, 100).unwrap();
//! assert_eq!(total.amount(), 1100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Date format accepted for sale dates (`2024-01-19`).
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Exact length of a valid sale date string.
pub const SALE_DATE_LEN: usize = 10;
