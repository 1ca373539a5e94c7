//! # Sale Repository
//!
//! Row operations for the `sale` table and the joined report view.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── insert() → sid assigned by AUTOINCREMENT                       │
//! │         (ledger decrements book stock in the same transaction)         │
//! │                                                                         │
//! │  2. UPDATE (discount only)                                             │
//! │     └── update_discount() → sdiscount, stotal rewritten                │
//! │                                                                         │
//! │  3. DELETE                                                             │
//! │     └── delete() → row removed, stock untouched                        │
//! │                                                                         │
//! │  Ordering and composition live in SalesLedger; this repository         │
//! │  only runs single statements.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bookstore_core::{NewSale, Sale, SaleDetail};

const SELECT_SALE: &str = r#"
    SELECT
        sid       AS id,
        sdate     AS date,
        mid       AS member_id,
        bid       AS book_id,
        sqty      AS quantity,
        sdiscount AS discount,
        stotal    AS total
    FROM sale
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        Self::fetch_by_id(&self.pool, id).await
    }

    /// Lists sale rows ordered by ascending id.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sql = format!("{SELECT_SALE} ORDER BY sid");
        let sales = sqlx::query_as::<_, Sale>(&sql).fetch_all(&self.pool).await?;

        Ok(sales)
    }

    /// Lists sales joined with member name and book title/price.
    ///
    /// ## Ordering
    /// Ascending sale id, i.e. insertion order.
    ///
    /// ## Missing References
    /// LEFT JOINs keep a sale whose member or book row is gone; the name,
    /// title and price come back as empty string / 0.
    pub async fn list_details(&self) -> DbResult<Vec<SaleDetail>> {
        debug!("Listing sale details");

        let details = sqlx::query_as::<_, SaleDetail>(
            r#"
            SELECT
                s.sid                   AS id,
                s.sdate                 AS date,
                s.mid                   AS member_id,
                COALESCE(m.mname, '')   AS member_name,
                s.bid                   AS book_id,
                COALESCE(b.btitle, '')  AS book_title,
                COALESCE(b.bprice, 0)   AS book_price,
                s.sqty                  AS quantity,
                s.sdiscount             AS discount,
                s.stotal                AS total
            FROM sale s
            LEFT JOIN member m ON m.mid = s.mid
            LEFT JOIN book b ON b.bid = s.bid
            ORDER BY s.sid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = details.len(), "Listed sale details");
        Ok(details)
    }

    /// Counts sale rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Looks up a sale through any executor (pool or open transaction).
    pub async fn fetch_by_id<'e, E>(executor: E, id: i64) -> DbResult<Option<Sale>>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(sale_id = id, "Fetching sale");

        let sql = format!("{SELECT_SALE} WHERE sid = ?1");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(sale)
    }

    /// Inserts a sale row and returns the assigned id.
    pub async fn insert<'e, E>(executor: E, sale: &NewSale, total: i64) -> DbResult<i64>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(
            member_id = %sale.member_id,
            book_id = %sale.book_id,
            quantity = sale.quantity,
            "Inserting sale"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sale (sdate, mid, bid, sqty, sdiscount, stotal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sale.date.as_str())
        .bind(sale.member_id.as_str())
        .bind(sale.book_id.as_str())
        .bind(sale.quantity)
        .bind(sale.discount)
        .bind(total)
        .execute(executor)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Rewrites discount and total of one sale.
    ///
    /// ## Returns
    /// `true` if the row existed and was updated.
    pub async fn update_discount<'e, E>(
        executor: E,
        id: i64,
        discount: i64,
        total: i64,
    ) -> DbResult<bool>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(sale_id = id, discount, total, "Updating sale discount");

        let result = sqlx::query(
            r#"
            UPDATE sale SET
                sdiscount = ?2,
                stotal = ?3
            WHERE sid = ?1
            "#,
        )
        .bind(id)
        .bind(discount)
        .bind(total)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Deletes one sale.
    ///
    /// ## Returns
    /// `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: i64) -> DbResult<bool>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(sale_id = id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sale WHERE sid = ?1")
            .bind(id)
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
    async fn test_seeded_sales_in_id_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let sales = db.sales().list().await.unwrap();
        let ids: Vec<i64> = sales.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(sales[2].total, 3400);
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_list_details_joins_names() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let details = db.sales().list_details().await.unwrap();
        assert_eq!(details.len(), 4);
        assert_eq!(details[0].member_name, "Alice");
        assert_eq!(details[0].book_title, "Python Programming");
        assert_eq!(details[0].book_price, 600);
        assert_eq!(details[1].member_name, "Bob");
        assert_eq!(details[3].member_name, "Cathy");
    }

    #[tokio::test]
    async fn test_list_details_keeps_orphaned_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let id = SaleRepository::insert(
            db.pool(),
            &NewSale::new("2024-02-01", "M404", "B404", 1, 0),
            0,
        )
        .await
        .unwrap();

        let details = db.sales().list_details().await.unwrap();
        let orphan = details.iter().find(|d| d.id == id).unwrap();
        assert_eq!(orphan.member_name, "");
        assert_eq!(orphan.book_title, "");
        assert_eq!(orphan.book_price, 0);
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let id = SaleRepository::insert(
            db.pool(),
            &NewSale::new("2024-01-19", "M002", "B002", 1, 0),
            800,
        )
        .await
        .unwrap();
        assert_eq!(id, 5);

        let sale = db.sales().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(sale.member_id, "M002");
        assert_eq!(sale.total, 800);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(SaleRepository::update_discount(db.pool(), 2, 0, 800).await.unwrap());
        assert!(!SaleRepository::update_discount(db.pool(), 99, 0, 0).await.unwrap());

        assert!(SaleRepository::delete(db.pool(), 2).await.unwrap());
        assert!(!SaleRepository::delete(db.pool(), 2).await.unwrap());
    }
}
