//! # Bookstore Ledger Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bookstore (binary)                               │
//! │                                                                         │
//! │  main.rs ────► current-thread runtime, exit code                       │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, database, menu                         │
//! │                                                                         │
//! │  bookstore.db (local SQLite file, WAL mode)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    match bookstore_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookstore: {err}");
            ExitCode::FAILURE
        }
    }
}
