//! # Catalog Commands
//!
//! Read-only listings of members and books, shown by the menu before the
//! member and book prompts of "Add sale".

use tracing::debug;

use crate::error::ApiError;
use bookstore_core::{Book, Member};
use bookstore_db::Database;

/// Lists every member, ordered by id.
pub async fn list_members(db: &Database) -> Result<Vec<Member>, ApiError> {
    debug!("list_members command");

    Ok(db.members().list().await?)
}

/// Lists every book with its live price and stock, ordered by id.
pub async fn list_books(db: &Database) -> Result<Vec<Book>, ApiError> {
    debug!("list_books command");

    Ok(db.books().list().await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::NewSale;
    use bookstore_db::DbConfig;

    #[tokio::test]
    async fn test_catalog_lists_seed_rows_in_id_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let members = list_members(&db).await.unwrap();
        let ids: Vec<_> = members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["M001", "M002", "M003"]);

        let books = list_books(&db).await.unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[2].title, "Machine Learning Guide");
        assert_eq!(books[2].price().to_string(), "1,200");
    }

    #[tokio::test]
    async fn test_catalog_reflects_live_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.ledger()
            .add_sale(&NewSale::new("2024-01-19", "M001", "B003", 5, 0))
            .await
            .unwrap();

        let books = list_books(&db).await.unwrap();
        assert_eq!(books[2].stock, 15);
    }
}
