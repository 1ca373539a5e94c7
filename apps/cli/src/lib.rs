//! # Bookstore CLI Library
//!
//! Everything behind the `bookstore` binary: startup, configuration, the
//! interactive menu and the report renderer.
//!
//! ## Module Organization
//! ```text
//! bookstore_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Defaults, TOML file, environment overrides
//! ├── menu.rs         ◄─── Interactive loop over BufRead / Write
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Member and book listings
//! │   └── sale.rs     ◄─── Add / list / get / update / delete
//! ├── report.rs       ◄─── Sales report (text or JSON)
//! └── error.rs        ◄─── ApiError (shown) and CliError (fatal)
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod report;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bookstore_db::{Database, DbConfig};
use config::CliConfig;
use error::CliResult;
use menu::Menu;

/// Runs the interactive ledger against stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: errors only, override with RUST_LOG                      │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → bookstore.toml → BOOKSTORE_* variables                 │
/// │                                                                         │
/// │  3. Open Database ────────────────────────────────────────────────────► │
/// │     • SQLite file created if missing (WAL mode)                         │
/// │     • Tables and seed rows ensured                                      │
/// │                                                                         │
/// │  4. Run Menu until exit, then close the pool ─────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> CliResult<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting bookstore ledger");

    let config = CliConfig::load(None)?;
    info!(
        path = %config.database_path.display(),
        report_format = %config.report_format,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.max_connections)
        .min_connections(1);
    let db = Database::new(db_config).await?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut menu = Menu::new(&db, stdin.lock(), stdout.lock(), config.report_format);
    let outcome = menu.run().await;

    db.close().await;
    outcome
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=bookstore=info` - Committed sale operations
/// - `RUST_LOG=bookstore=debug` - Every query and menu choice
/// - Default: errors only, so logs do not clutter the menu
///
/// Logs go to stderr; the menu owns stdout.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error,sqlx=error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
