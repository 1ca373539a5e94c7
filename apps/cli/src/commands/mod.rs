//! # Commands Module
//!
//! The operations the menu can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Member and book listings
//! └── sale.rs     ◄─── Add / list / get / update / delete sales
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Menu Driver                                                           │
//! │  ───────────                                                           │
//! │  reads raw lines: "2024-01-19", "M001", "B001", "2", "100"             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command                                                               │
//! │  ───────                                                               │
//! │  async fn add_sale(                                                    │
//! │      ledger: &SalesLedger,       ◄── explicit store handle             │
//! │      request: &AddSaleRequest,   ◄── raw text, parsed here             │
//! │  ) -> Result<AddSaleResponse, ApiError>                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Menu prints the response, or "Error: <message>"                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never touch the terminal, so they are tested directly against
//! an in-memory database.

pub mod catalog;
pub mod sale;

pub use catalog::{list_books, list_members};
pub use sale::{
    add_sale, delete_sale, get_sale, list_sales, update_sale, AddSaleRequest, AddSaleResponse,
    DeleteSaleResponse, UpdateSaleResponse,
};
