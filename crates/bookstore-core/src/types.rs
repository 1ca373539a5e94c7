//! # Domain Types
//!
//! Core domain types used throughout the bookstore ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Member      │   │      Book       │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id  ("M001")   │◄──┼─ member_id      │   │  id (autoinc)   │       │
//! │  │  name           │   │  id  ("B001")   │◄──│  book_id        │       │
//! │  │  phone          │   │  title          │   │  quantity       │       │
//! │  │  email?         │   │  price, stock   │   │  discount,total │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  SaleDetail = Sale ⋈ Member.name ⋈ Book.title/price (report rows)      │
//! │  NewSale    = input to SalesLedger::add_sale                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutability
//! Members and books are seeded once. Only the ledger writes to
//! `Book::stock`; only the ledger creates, updates and deletes sales.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Member
// =============================================================================

/// A registered store member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    /// Business identifier, e.g. `M001`.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

// =============================================================================
// Book
// =============================================================================

/// A book available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Business identifier, e.g. `B001`.
    pub id: String,

    /// Display title shown in the sales report.
    pub title: String,

    /// Current unit price. Always read live; sales keep no price snapshot.
    pub price: i64,

    /// Remaining purchasable copies. Never negative.
    pub stock: i64,
}

impl Book {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_amount(self.price)
    }

    /// Checks if `quantity` copies can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Auto-assigned, monotonic identifier.
    pub id: i64,
    /// Sale date as entered, `YYYY-MM-DD`.
    pub date: String,
    pub member_id: String,
    pub book_id: String,
    /// Copies sold. Immutable after creation.
    pub quantity: i64,
    pub discount: i64,
    /// `price × quantity − discount`, recomputed on every write.
    pub total: i64,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_amount(self.total)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_amount(self.discount)
    }
}

// =============================================================================
// New Sale
// =============================================================================

/// Input for creating a sale.
///
/// Quantity and discount are already parsed; the ledger re-checks their
/// ranges and validates the date before opening a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    pub date: String,
    pub member_id: String,
    pub book_id: String,
    pub quantity: i64,
    pub discount: i64,
}

impl NewSale {
    /// Creates a new sale request.
    pub fn new(
        date: impl Into<String>,
        member_id: impl Into<String>,
        book_id: impl Into<String>,
        quantity: i64,
        discount: i64,
    ) -> Self {
        NewSale {
            date: date.into(),
            member_id: member_id.into(),
            book_id: book_id.into(),
            quantity,
            discount,
        }
    }
}

// =============================================================================
// Sale Detail
// =============================================================================

/// A sale joined with its member name and book title/price.
///
/// This is the read model behind the sales report. `book_price` is the
/// book's current price, which may differ from the price used when the
/// sale's total was last computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleDetail {
    pub id: i64,
    pub date: String,
    pub member_id: String,
    /// Empty when the member row is missing.
    pub member_name: String,
    pub book_id: String,
    /// Empty when the book row is missing.
    pub book_title: String,
    pub book_price: i64,
    pub quantity: i64,
    pub discount: i64,
    pub total: i64,
}

impl SaleDetail {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_amount(self.book_price)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_amount(self.total)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_amount(self.discount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
