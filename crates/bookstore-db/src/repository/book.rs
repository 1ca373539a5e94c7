//! # Book Repository
//!
//! Database operations for books.
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                            │
//! │                                                                     │
//! │  ❌ Absolute update (lost update if the read was stale)            │
//! │     UPDATE book SET bstock = 48 WHERE bid = ?                       │
//! │                                                                     │
//! │  ✅ Guarded delta update                                            │
//! │     UPDATE book SET bstock = bstock - 2                             │
//! │     WHERE bid = ? AND bstock >= 2                                   │
//! │                                                                     │
//! │  Zero rows affected means the book vanished or stock ran short;    │
//! │  stock can never be driven below zero by this statement.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bookstore_core::Book;

const SELECT_BOOK: &str = r#"
    SELECT
        bid    AS id,
        btitle AS title,
        bprice AS price,
        bstock AS stock
    FROM book
"#;

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        Self::fetch_by_id(&self.pool, id).await
    }

    /// Lists all books ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let sql = format!("{SELECT_BOOK} ORDER BY bid");
        let books = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;

        Ok(books)
    }

    /// Looks up a book through any executor (pool or open transaction).
    pub async fn fetch_by_id<'e, E>(executor: E, id: &str) -> DbResult<Option<Book>>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(book_id = %id, "Fetching book");

        let sql = format!("{SELECT_BOOK} WHERE bid = ?1");
        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(book)
    }

    /// Removes `quantity` copies from stock.
    ///
    /// ## Returns
    /// * `Ok(true)` - Stock decremented
    /// * `Ok(false)` - Book missing or stock below `quantity`; nothing changed
    pub async fn decrement_stock<'e, E>(executor: E, id: &str, quantity: i64) -> DbResult<bool>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(book_id = %id, quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE book
            SET bstock = bstock - ?2
            WHERE bid = ?1 AND bstock >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_seeded_books() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let book = db.books().get_by_id("B001").await.unwrap().unwrap();
        assert_eq!(book.title, "Python Programming");
        assert_eq!(book.price, 600);
        assert_eq!(book.stock, 50);

        let books = db.books().list().await.unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[2].id, "B003");
        assert_eq!(books[2].price, 1200);

        assert!(db.books().get_by_id("B999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_decrement_stock_guarded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(BookRepository::decrement_stock(db.pool(), "B003", 5).await.unwrap());
        let book = db.books().get_by_id("B003").await.unwrap().unwrap();
        assert_eq!(book.stock, 15);

        // More than remaining stock: no change
        assert!(!BookRepository::decrement_stock(db.pool(), "B003", 16).await.unwrap());
        let book = db.books().get_by_id("B003").await.unwrap().unwrap();
        assert_eq!(book.stock, 15);

        // Unknown book: no change
        assert!(!BookRepository::decrement_stock(db.pool(), "B999", 1).await.unwrap());
    }
}
