//! # Member Repository
//!
//! Members are seeded by the schema initializer and read-only afterwards,
//! so this repository only reads.

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use bookstore_core::Member;

const SELECT_MEMBER: &str = r#"
    SELECT
        mid    AS id,
        mname  AS name,
        mphone AS phone,
        memail AS email
    FROM member
"#;

/// Repository for member database operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    /// Creates a new MemberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberRepository { pool }
    }

    /// Gets a member by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Member))` - Member found
    /// * `Ok(None)` - Member not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Member>> {
        Self::fetch_by_id(&self.pool, id).await
    }

    /// Lists all members ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Member>> {
        let sql = format!("{SELECT_MEMBER} ORDER BY mid");
        let members = sqlx::query_as::<_, Member>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(members)
    }

    /// Looks up a member through any executor (pool or open transaction).
    pub async fn fetch_by_id<'e, E>(executor: E, id: &str) -> DbResult<Option<Member>>
    where
        E: SqliteExecutor<'e>,
    {
        debug!(member_id = %id, "Fetching member");

        let sql = format!("{SELECT_MEMBER} WHERE mid = ?1");
        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(member)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_seeded_member() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let alice = db.members().get_by_id("M001").await.unwrap().unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.phone, "0912-345678");
        assert_eq!(alice.email.as_deref(), Some("alice@example.com"));

        assert!(db.members().get_by_id("M999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_members_ordered() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let ids: Vec<String> = db
            .members()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["M001", "M002", "M003"]);
    }
}
