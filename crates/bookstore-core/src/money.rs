//! # Money Module
//!
//! Provides the `Money` type and the sale total formula.
//!
//! ## Whole Units Only
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The ledger stores every amount as a whole integer:                    │
//! │                                                                         │
//! │    book.price   600                                                     │
//! │    quantity     2                                                       │
//! │    discount     100                                                     │
//! │    ──────────────────                                                   │
//! │    total        600 × 2 − 100 = 1,100                                   │
//! │                                                                         │
//! │  No fractional units, no currency symbol, no rounding step.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::money::{sale_total, Money};
//!
//! let total = sale_total(600, 2, 100).unwrap();
//! assert_eq!(total.to_string(), "1,100");
//! assert_eq!(total, Money::from_amount(1100));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole store units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the line total yields a
///   negative sale total, which the ledger records as-is
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a plain number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole amount.
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Subtracts another amount, returning `None` on overflow.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }
}

// =============================================================================
// Sale Total
// =============================================================================

/// Computes a sale total: `price × quantity − discount`.
///
/// The result is not clamped: a discount larger than `price × quantity`
/// produces a negative total. Overflow of the i64 range is reported as
/// [`ValidationError::OutOfRange`] on the `total` field.
///
/// ## User Workflow
/// ```text
/// Book B001 @ 600, quantity 2, discount 100
///      │
///      ▼
/// sale_total(600, 2, 100) ← THIS FUNCTION
///      │
///      ▼
/// Total: 1,100 (stored in sale.stotal)
/// ```
pub fn sale_total(price: i64, quantity: i64, discount: i64) -> Result<Money, ValidationError> {
    Money::from_amount(price)
        .checked_multiply_quantity(quantity)
        .and_then(|line| line.checked_sub(Money::from_amount(discount)))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "total".to_string(),
            min: i64::MIN,
            max: i64::MAX,
        })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups digits in thousands (`1,100`, `-2,500`), the way the
/// sales report prints amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            grouped.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        f.pad(&grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
