//! # Schema Initializer
//!
//! Embedded SQL that creates the ledger tables and restores the seed rows.
//!
//! ## How Initialization Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Startup Initialization                             │
//! │                                                                         │
//! │  Process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MIGRATOR.run (versioned, each runs once)                              │
//! │       └── 001_initial_schema.sql  CREATE TABLE IF NOT EXISTS ×3        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed_data.sql (every call, one transaction)                           │
//! │       └── INSERT OR IGNORE members / books / sales                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Idempotence
//! The migrator skips versions already recorded, and the schema SQL only
//! creates missing tables. The seed pass inserts any seed key that is
//! missing and never touches an existing row, so a seed member, book or
//! sale deleted from the database comes back on the next start. A database file
//! created before the migrator existed (tables present, no
//! `_sqlx_migrations`) is adopted without touching its rows.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. Write idempotent SQL (`IF NOT EXISTS`)
//! 4. **NEVER** modify existing migrations - always add new ones
//!
//! Seed rows are not migrations: edit `migrations/seed_data.sql` instead.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Embedded schema migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Baseline members, books and sales (`INSERT OR IGNORE` only).
const SEED_SQL: &str = include_str!("../../../migrations/seed_data.sql");

/// Runs all pending schema migrations.
///
/// ## Safety
/// - Idempotent: safe to run on every process start
/// - Transactional: each migration runs in its own transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Inserts every seed row whose key is missing. Existing rows are kept as-is.
pub async fn seed(pool: &SqlitePool) -> DbResult<()> {
    let mut tx = pool.begin().await.map_err(DbError::transaction)?;

    sqlx::raw_sql(SEED_SQL).execute(&mut *tx).await?;

    tx.commit().await.map_err(DbError::transaction)?;

    debug!("Seed rows ensured");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
