//! # Validation Module
//!
//! Input validation for the bookstore ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI command (raw strings from the terminal)                  │
//! │  └── THIS MODULE: parse + range checks, no store access                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: SalesLedger (typed input)                                    │
//! │  ├── THIS MODULE again: date + range re-check before `begin`           │
//! │  └── Referential checks: member, book, stock (inside the transaction)  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / PRIMARY KEY constraints                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::validation::{validate_date, validate_discount, validate_quantity};
//!
//! assert!(validate_date("2024-01-19"));
//! assert_eq!(validate_quantity(" 2 ").unwrap(), 2);
//! assert!(validate_discount("-1").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{SALE_DATE_FORMAT, SALE_DATE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Date Validator
// =============================================================================

/// Checks a sale date.
///
/// ## Rules
/// - Exactly 10 characters
/// - `-` at positions 4 and 7, ASCII digits everywhere else
/// - A real calendar date (`2024-02-30` and `2024-13-01` are rejected)
///
/// Returns a plain boolean; nothing is raised for malformed input.
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_date;
///
/// assert!(validate_date("2024-01-19"));
/// assert!(!validate_date("2024/01/19"));
/// assert!(!validate_date("20240119"));
/// ```
pub fn validate_date(s: &str) -> bool {
    let bytes = s.as_bytes();

    if bytes.len() != SALE_DATE_LEN {
        return false;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return false;
    }

    NaiveDate::parse_from_str(s, SALE_DATE_FORMAT).is_ok()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a trimmed integer, naming `field` in the error.
fn parse_integer(raw: &str, field: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        })
}

/// Validates a quantity entered as text.
///
/// ## Rules
/// - Must parse as an integer
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Menu: Add Sale                                                         │
/// │                                                                         │
/// │  User enters quantity: "2"                                             │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity("2") ← THIS FUNCTION                                │
/// │       │                                                                 │
/// │       ├── not a number? → Error: "quantity has invalid format"         │
/// │       │                                                                 │
/// │       ├── qty <= 0?     → Error: "quantity must be greater than 0"     │
/// │       │                                                                 │
/// │       └── OK(2) → continue with discount                               │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(raw: &str) -> ValidationResult<i64> {
    let qty = parse_integer(raw, "quantity")?;
    check_quantity(qty)?;
    Ok(qty)
}

/// Range check for an already-parsed quantity.
pub fn check_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount entered as text.
///
/// ## Rules
/// - Must parse as an integer
/// - Must be zero or positive (>= 0)
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_discount;
///
/// assert_eq!(validate_discount("0").unwrap(), 0);
/// assert_eq!(validate_discount("150").unwrap(), 150);
/// assert!(validate_discount("abc").is_err());
/// ```
pub fn validate_discount(raw: &str) -> ValidationResult<i64> {
    let discount = parse_integer(raw, "discount")?;
    check_discount(discount)?;
    Ok(discount)
}

/// Range check for an already-parsed discount.
pub fn check_discount(discount: i64) -> ValidationResult<()> {
    if discount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "discount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

fn validate_identifier(raw: &str, field: &str) -> ValidationResult<String> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(id.to_string())
}

/// Validates a member id (`M001`). Returns the trimmed id.
pub fn validate_member_id(raw: &str) -> ValidationResult<String> {
    validate_identifier(raw, "member id")
}

/// Validates a book id (`B001`). Returns the trimmed id.
pub fn validate_book_id(raw: &str) -> ValidationResult<String> {
    validate_identifier(raw, "book id")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date_accepts() {
        assert!(validate_date("2024-01-19"));
        assert!(validate_date("2024-02-29")); // leap year
        assert!(validate_date("1999-12-31"));
    }

    #[test]
    fn test_validate_date_rejects() {
        assert!(!validate_date("2024/01/19"));
        assert!(!validate_date("2024-13-01"));
        assert!(!validate_date(""));
        assert!(!validate_date("20240119"));
        assert!(!validate_date("2024-02-30"));
        assert!(!validate_date("2023-02-29")); // not a leap year
        assert!(!validate_date("2024-1-19"));
        assert!(!validate_date("2024-01-1x"));
        assert!(!validate_date("+024-01-19"));
        assert!(!validate_date(" 2024-01-19"));
        assert!(!validate_date("2024-00-10"));
        assert!(!validate_date("２０２４-01-19"));
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("1").unwrap(), 1);
        assert_eq!(validate_quantity(" 42 ").unwrap(), 42);

        assert!(matches!(
            validate_quantity("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity("-3"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity("two"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_quantity("1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_quantity(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_discount() {
        assert_eq!(validate_discount("0").unwrap(), 0);
        assert_eq!(validate_discount("100").unwrap(), 100);

        assert!(matches!(
            validate_discount("-1"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            validate_discount("ten"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_check_ranges() {
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(0).is_err());
        assert!(check_discount(0).is_ok());
        assert!(check_discount(-5).is_err());
    }

    #[test]
    fn test_validate_identifiers() {
        assert_eq!(validate_member_id(" M001 ").unwrap(), "M001");
        assert_eq!(validate_book_id("B002").unwrap(), "B002");
        assert!(validate_member_id("   ").is_err());
        assert!(validate_book_id("").is_err());
    }
}
