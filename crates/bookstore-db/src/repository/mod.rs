//! # Repository Module
//!
//! Row-level database access for the bookstore ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Ways In                                          │
//! │                                                                         │
//! │  Plain reads (menu, report, tests)                                     │
//! │       │  db.books().get_by_id("B001")                                  │
//! │       ▼                                                                 │
//! │  BookRepository { pool } ──► SqlitePool                                │
//! │                                                                         │
//! │  Reads/writes inside a ledger transaction                              │
//! │       │  BookRepository::fetch_by_id(&mut *tx, "B001")                 │
//! │       ▼                                                                 │
//! │  associated fns generic over SqliteExecutor ──► Transaction            │
//! │                                                                         │
//! │  Both paths share the same SQL, so a decision made inside a            │
//! │  transaction reads exactly what a plain read would.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Mapping
//! The stored columns (`mid`, `btitle`, `sqty`, ...) are aliased to the
//! domain field names in each SELECT so rows decode straight into the
//! `bookstore-core` types.
//!
//! ## Available Repositories
//!
//! - [`member::MemberRepository`] - Member lookups
//! - [`book::BookRepository`] - Book lookups and stock decrement
//! - [`sale::SaleRepository`] - Sale rows and the joined report view

pub mod book;
pub mod member;
pub mod sale;
