//! # Sales Ledger
//!
//! Transactional sale operations: add, list, update, delete.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  add_sale(2024-01-19, M001, B001, 2, 100)               │
//! │                                                                         │
//! │  validate date / quantity / discount ──► reject? nothing was opened    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐  │
//! │  │  member M001 exists?            no → NotFound                    │  │
//! │  │  book B001 exists?              no → NotFound                    │  │
//! │  │  stock 50 >= 2?                 no → InsufficientStock(50)       │  │
//! │  │  total = 600 × 2 − 100 = 1100                                    │  │
//! │  │  INSERT sale                    fail → StorageFailure            │  │
//! │  │  UPDATE book stock − 2          fail → StorageFailure            │  │
//! │  COMMIT ◄── all or nothing ─────────── any error → ROLLBACK ────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(1,100)                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read that informs a decision runs on the same transaction as the
//! writes that follow it.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{error, info, warn};

use crate::error::{DbError, SaleError, SaleResult};
use crate::repository::book::BookRepository;
use crate::repository::member::MemberRepository;
use crate::repository::sale::SaleRepository;
use bookstore_core::money::sale_total;
use bookstore_core::validation::{check_discount, check_quantity, validate_date};
use bookstore_core::{CoreError, Money, NewSale, Sale, SaleDetail};

/// Transactional sale operations over an explicit store handle.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = db.ledger();
///
/// let total = ledger
///     .add_sale(&NewSale::new("2024-01-19", "M001", "B001", 2, 100))
///     .await?;
/// assert_eq!(total.amount(), 1100);
/// ```
#[derive(Debug, Clone)]
pub struct SalesLedger {
    pool: SqlitePool,
}

impl SalesLedger {
    /// Creates a ledger over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        SalesLedger { pool }
    }

    // =========================================================================
    // Add
    // =========================================================================

    /// Records a sale and decrements book stock, returning the sale total.
    ///
    /// ## Errors
    /// - `InvalidDate` - date is not a calendar-valid `YYYY-MM-DD`
    /// - `InvalidInput` - quantity <= 0 or discount < 0
    /// - `NotFound` - unknown member or book
    /// - `InsufficientStock` - quantity exceeds current stock (carries the stock)
    /// - `StorageFailure` - insert or stock update failed; both rolled back
    ///
    /// The total is not clamped: a discount above `price × quantity`
    /// records a negative total.
    pub async fn add_sale(&self, new_sale: &NewSale) -> SaleResult<Money> {
        let sale = self.record_sale(new_sale).await?;
        Ok(sale.total())
    }

    /// Same as [`add_sale`](Self::add_sale) but returns the stored row,
    /// including its assigned id.
    pub async fn record_sale(&self, new_sale: &NewSale) -> SaleResult<Sale> {
        if let Err(err) = Self::check_new_sale(new_sale) {
            warn!(error = %err, "Sale rejected before write");
            return Err(err.into());
        }

        let mut tx = self.begin().await?;
        let outcome = Self::record_sale_in(&mut tx, new_sale).await;
        let sale = Self::finish(tx, outcome, "add_sale").await?;

        info!(
            sale_id = sale.id,
            book_id = %sale.book_id,
            quantity = sale.quantity,
            total = sale.total,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Input checks that need no store access.
    fn check_new_sale(new_sale: &NewSale) -> Result<(), CoreError> {
        if !validate_date(&new_sale.date) {
            return Err(CoreError::InvalidDate(new_sale.date.clone()));
        }
        check_quantity(new_sale.quantity)?;
        check_discount(new_sale.discount)?;
        Ok(())
    }

    async fn record_sale_in(conn: &mut SqliteConnection, new_sale: &NewSale) -> SaleResult<Sale> {
        if MemberRepository::fetch_by_id(&mut *conn, &new_sale.member_id)
            .await?
            .is_none()
        {
            return Err(CoreError::MemberNotFound(new_sale.member_id.clone()).into());
        }

        let book = BookRepository::fetch_by_id(&mut *conn, &new_sale.book_id)
            .await?
            .ok_or_else(|| CoreError::BookNotFound(new_sale.book_id.clone()))?;

        if !book.can_sell(new_sale.quantity) {
            return Err(CoreError::InsufficientStock {
                book_id: book.id,
                available: book.stock,
                requested: new_sale.quantity,
            }
            .into());
        }

        let total = sale_total(book.price, new_sale.quantity, new_sale.discount)?;

        let id = SaleRepository::insert(&mut *conn, new_sale, total.amount()).await?;

        if !BookRepository::decrement_stock(&mut *conn, &book.id, new_sale.quantity).await? {
            // Stock was checked above on this transaction; only a concurrent
            // writer outside this process could get here.
            return Err(CoreError::InsufficientStock {
                book_id: book.id,
                available: book.stock,
                requested: new_sale.quantity,
            }
            .into());
        }

        Ok(Sale {
            id,
            date: new_sale.date.clone(),
            member_id: new_sale.member_id.clone(),
            book_id: new_sale.book_id.clone(),
            quantity: new_sale.quantity,
            discount: new_sale.discount,
            total: total.amount(),
        })
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Lists every sale with member name and book title/price, by ascending id.
    pub async fn list_sales(&self) -> SaleResult<Vec<SaleDetail>> {
        let details = SaleRepository::new(self.pool.clone()).list_details().await?;
        Ok(details)
    }

    /// Gets one sale by id.
    pub async fn get_sale(&self, sale_id: i64) -> SaleResult<Option<Sale>> {
        let sale = SaleRepository::fetch_by_id(&self.pool, sale_id).await?;
        Ok(sale)
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Replaces a sale's discount and recomputes its total.
    ///
    /// The total uses the book's price at update time. Quantity and book
    /// stock are never changed.
    ///
    /// ## Errors
    /// - `InvalidInput` - discount < 0
    /// - `NotFound` - unknown sale, or the sale's book no longer exists
    /// - `StorageFailure` - update failed and was rolled back
    pub async fn update_sale(&self, sale_id: i64, new_discount: i64) -> SaleResult<Money> {
        if let Err(err) = check_discount(new_discount) {
            warn!(sale_id, error = %err, "Sale update rejected before write");
            return Err(err.into());
        }

        let mut tx = self.begin().await?;
        let outcome = Self::update_sale_in(&mut tx, sale_id, new_discount).await;
        let total = Self::finish(tx, outcome, "update_sale").await?;

        info!(sale_id, discount = new_discount, total = total.amount(), "Sale updated");
        Ok(total)
    }

    async fn update_sale_in(
        conn: &mut SqliteConnection,
        sale_id: i64,
        new_discount: i64,
    ) -> SaleResult<Money> {
        let sale = SaleRepository::fetch_by_id(&mut *conn, sale_id)
            .await?
            .ok_or(CoreError::SaleNotFound(sale_id))?;

        let book = BookRepository::fetch_by_id(&mut *conn, &sale.book_id)
            .await?
            .ok_or_else(|| CoreError::BookNotFound(sale.book_id.clone()))?;

        let total = sale_total(book.price, sale.quantity, new_discount)?;

        if !SaleRepository::update_discount(&mut *conn, sale_id, new_discount, total.amount())
            .await?
        {
            return Err(DbError::not_found("Sale", sale_id.to_string()).into());
        }

        Ok(total)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Removes a sale.
    ///
    /// ## Known Limitation
    /// Book stock is **not** restored: the copies taken by the sale stay
    /// deducted after the sale is deleted.
    ///
    /// ## Errors
    /// - `NotFound` - unknown sale (including a second delete of the same id)
    /// - `StorageFailure` - delete failed and was rolled back
    pub async fn delete_sale(&self, sale_id: i64) -> SaleResult<()> {
        let mut tx = self.begin().await?;
        let outcome = Self::delete_sale_in(&mut tx, sale_id).await;
        Self::finish(tx, outcome, "delete_sale").await?;

        info!(sale_id, "Sale deleted");
        Ok(())
    }

    async fn delete_sale_in(conn: &mut SqliteConnection, sale_id: i64) -> SaleResult<()> {
        if SaleRepository::fetch_by_id(&mut *conn, sale_id)
            .await?
            .is_none()
        {
            return Err(CoreError::SaleNotFound(sale_id).into());
        }

        if !SaleRepository::delete(&mut *conn, sale_id).await? {
            return Err(DbError::not_found("Sale", sale_id.to_string()).into());
        }

        Ok(())
    }

    // =========================================================================
    // Transaction Helpers
    // =========================================================================

    async fn begin(&self) -> SaleResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Could not begin transaction");
            SaleError::Storage(DbError::transaction(e))
        })
    }

    /// Commits on success, rolls back on any error.
    async fn finish<T>(
        tx: Transaction<'static, Sqlite>,
        outcome: SaleResult<T>,
        operation: &'static str,
    ) -> SaleResult<T> {
        match outcome {
            Ok(value) => {
                tx.commit().await.map_err(|e| {
                    error!(operation, error = %e, "Commit failed");
                    SaleError::Storage(DbError::transaction(e))
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(operation, error = %rollback_err, "Rollback failed");
                }

                match &err {
                    SaleError::Rejected(reason) => {
                        warn!(operation, error = %reason, "Sale operation rejected")
                    }
                    SaleError::Storage(cause) => {
                        error!(operation, error = %cause, "Sale operation failed, rolled back")
                    }
                }
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
