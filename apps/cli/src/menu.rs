//! # Menu Driver
//!
//! The interactive loop: print options, read a choice, run it, repeat.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ************** Menu **************                                    │
//! │  1. Add sale            ──► date, member, book, quantity, discount     │
//! │                             (members and books listed before asking)   │
//! │  2. Show sales report   ──► report::render                             │
//! │  3. Update sale         ──► pick from list, confirm, new discount      │
//! │  4. Delete sale         ──► pick from list, confirm                    │
//! │  5. Exit                                                               │
//! │                                                                         │
//! │  Enter (or end of input) also exits. A failed operation prints         │
//! │  "Error: ..." and the menu comes back; nothing was changed.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use tracing::debug;

use crate::commands::{self, AddSaleRequest};
use crate::config::ReportFormat;
use crate::error::{ApiError, CliResult};
use crate::report;
use bookstore_core::validation::validate_date;
use bookstore_core::CoreError;
use bookstore_db::{Database, SalesLedger};

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddSale,
    ShowReport,
    UpdateSale,
    DeleteSale,
    Exit,
}

impl MenuChoice {
    /// Parses a main-menu line. Empty input means exit.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" | "5" => Some(MenuChoice::Exit),
            "1" => Some(MenuChoice::AddSale),
            "2" => Some(MenuChoice::ShowReport),
            "3" => Some(MenuChoice::UpdateSale),
            "4" => Some(MenuChoice::DeleteSale),
            _ => None,
        }
    }
}

/// Parses a 1-based position in a list of `count` entries.
///
/// ## Returns
/// * `Ok(None)` - empty input (cancel)
/// * `Ok(Some(index))` - 0-based index into the list
pub fn parse_selection(raw: &str, count: usize) -> Result<Option<usize>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let position: usize = raw
        .parse()
        .map_err(|_| ApiError::validation("Please enter a number"))?;

    if position == 0 || position > count {
        return Err(ApiError::validation(format!(
            "Please enter a number from 1 to {}",
            count
        )));
    }

    Ok(Some(position - 1))
}

/// Interactive menu over any line-based input and output.
pub struct Menu<R, W> {
    db: Database,
    ledger: SalesLedger,
    input: R,
    output: W,
    report_format: ReportFormat,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(db: &Database, input: R, output: W, report_format: ReportFormat) -> Self {
        Menu {
            db: db.clone(),
            ledger: db.ledger(),
            input,
            output,
            report_format,
        }
    }

    /// Returns the output sink, consuming the menu.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user exits or input ends.
    pub async fn run(&mut self) -> CliResult<()> {
        loop {
            self.print_menu()?;
            let line = self.prompt("Choose an option (Enter to exit): ")?;

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Error: please enter a number from 1 to 5")?;
                continue;
            };
            debug!(?choice, "Menu choice");

            match choice {
                MenuChoice::AddSale => self.add_sale().await?,
                MenuChoice::ShowReport => self.show_report().await?,
                MenuChoice::UpdateSale => self.update_sale().await?,
                MenuChoice::DeleteSale => self.delete_sale().await?,
                MenuChoice::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    self.output.flush()?;
                    return Ok(());
                }
            }
        }
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "************** Menu **************")?;
        writeln!(self.output, "1. Add sale")?;
        writeln!(self.output, "2. Show sales report")?;
        writeln!(self.output, "3. Update sale")?;
        writeln!(self.output, "4. Delete sale")?;
        writeln!(self.output, "5. Exit")?;
        writeln!(self.output, "**********************************")?;
        Ok(())
    }

    /// Prints a label and reads one line. End of input reads as empty.
    fn prompt(&mut self, label: &str) -> CliResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn print_error(&mut self, err: &ApiError) -> CliResult<()> {
        writeln!(self.output, "Error: {}", err.message)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    async fn add_sale(&mut self) -> CliResult<()> {
        let date = self.prompt("Sale date (YYYY-MM-DD): ")?;
        // Checked again by AddSaleRequest::parse; here it stops before the remaining prompts
        if !validate_date(&date) {
            return self.print_error(&CoreError::InvalidDate(date).into());
        }

        let members = match commands::list_members(&self.db).await {
            Ok(members) => members,
            Err(err) => return self.print_error(&err),
        };
        let members: Vec<_> = members
            .iter()
            .map(|member| format!("{} {}", member.id, member.name))
            .collect();
        writeln!(self.output, "Members: {}", members.join(", "))?;
        let member_id = self.prompt("Member id: ")?;

        let books = match commands::list_books(&self.db).await {
            Ok(books) => books,
            Err(err) => return self.print_error(&err),
        };
        let books: Vec<_> = books
            .iter()
            .map(|book| {
                format!(
                    "{} {} ({}, {} in stock)",
                    book.id,
                    book.title,
                    book.price(),
                    book.stock
                )
            })
            .collect();
        writeln!(self.output, "Books: {}", books.join(", "))?;
        let book_id = self.prompt("Book id: ")?;

        let request = AddSaleRequest {
            date,
            member_id,
            book_id,
            quantity: self.prompt("Quantity: ")?,
            discount: self.prompt("Discount: ")?,
        };

        match commands::add_sale(&self.ledger, &request).await {
            Ok(added) => {
                writeln!(
                    self.output,
                    "Sale {} recorded, total {}",
                    added.sale_id, added.total
                )?;
                Ok(())
            }
            Err(err) => self.print_error(&err),
        }
    }

    async fn show_report(&mut self) -> CliResult<()> {
        match commands::list_sales(&self.ledger).await {
            Ok(sales) => report::render(self.report_format, &sales, &mut self.output),
            Err(err) => self.print_error(&err),
        }
    }

    async fn update_sale(&mut self) -> CliResult<()> {
        let Some(sale_id) = self.choose_sale("update").await? else {
            return Ok(());
        };

        let raw_discount = self.prompt("New discount: ")?;

        match commands::update_sale(&self.ledger, sale_id, &raw_discount).await {
            Ok(updated) => {
                writeln!(
                    self.output,
                    "Sale {} updated, new total {}",
                    updated.sale_id, updated.total
                )?;
                Ok(())
            }
            Err(err) => self.print_error(&err),
        }
    }

    async fn delete_sale(&mut self) -> CliResult<()> {
        let Some(sale_id) = self.choose_sale("delete").await? else {
            return Ok(());
        };

        match commands::delete_sale(&self.ledger, sale_id).await {
            Ok(deleted) => {
                writeln!(self.output, "Sale {} deleted", deleted.sale_id)?;
                Ok(())
            }
            Err(err) => self.print_error(&err),
        }
    }

    /// Lists sales as `n. Sale id - member - date`, reads a position and
    /// echoes the chosen sale as stored.
    ///
    /// Returns the chosen sale id, or `None` when there is nothing to pick,
    /// the user cancelled, or the input was invalid (already reported).
    async fn choose_sale(&mut self, action: &str) -> CliResult<Option<i64>> {
        let sales = match commands::list_sales(&self.ledger).await {
            Ok(sales) => sales,
            Err(err) => {
                self.print_error(&err)?;
                return Ok(None);
            }
        };

        if sales.is_empty() {
            writeln!(self.output, "No sales to {action}.")?;
            return Ok(None);
        }

        writeln!(self.output)?;
        writeln!(self.output, "============ Sales ============")?;
        for (index, sale) in sales.iter().enumerate() {
            writeln!(
                self.output,
                "{}. Sale {} - {} - {}",
                index + 1,
                sale.id,
                sale.member_name,
                sale.date
            )?;
        }
        writeln!(self.output, "===============================")?;

        let raw = self.prompt(&format!(
            "Select a sale to {action} (number, Enter to cancel): "
        ))?;

        let sale_id = match parse_selection(&raw, sales.len()) {
            Ok(Some(index)) => match sales.get(index) {
                Some(sale) => sale.id,
                None => return Ok(None),
            },
            Ok(None) => {
                writeln!(self.output, "Cancelled.")?;
                return Ok(None);
            }
            Err(err) => {
                self.print_error(&err)?;
                return Ok(None);
            }
        };

        match commands::get_sale(&self.ledger, sale_id).await {
            Ok(sale) => {
                writeln!(
                    self.output,
                    "Selected sale {}: {}, {} x {}, discount {}, total {}",
                    sale.id,
                    sale.date,
                    sale.book_id,
                    sale.quantity,
                    sale.discount(),
                    sale.total()
                )?;
                Ok(Some(sale.id))
            }
            Err(err) => {
                self.print_error(&err)?;
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_db::DbConfig;
    use std::io::Cursor;

    async fn drive(db: &Database, input: &str) -> String {
        let mut menu = Menu::new(
            db,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            ReportFormat::Text,
        );
        menu.run().await.unwrap();
        String::from_utf8(menu.into_output()).unwrap()
    }

    async fn seeded() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(""), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddSale));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::DeleteSale));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("", 3).unwrap(), None);
        assert_eq!(parse_selection("1", 3).unwrap(), Some(0));
        assert_eq!(parse_selection(" 3 ", 3).unwrap(), Some(2));
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("-1", 3).is_err());
        assert!(parse_selection("two", 3).is_err());
    }

    #[tokio::test]
    async fn test_exit_paths() {
        let db = seeded().await;

        for input in ["\n", "5\n", ""] {
            let output = drive(&db, input).await;
            assert!(output.contains("1. Add sale"));
            assert!(output.ends_with("Goodbye!\n"));
        }
    }

    #[tokio::test]
    async fn test_invalid_choice_reprompts() {
        let db = seeded().await;

        let output = drive(&db, "9\n5\n").await;
        assert!(output.contains("Error: please enter a number from 1 to 5"));
        assert_eq!(output.matches("************** Menu").count(), 2);
    }

    #[tokio::test]
    async fn test_add_sale_flow() {
        let db = seeded().await;

        let output = drive(&db, "1\n2024-01-19\nM001\nB001\n2\n100\n5\n").await;
        assert!(output.contains(
            "Members: M001 Alice, M002 Bob, M003 Cathy\nMember id: "
        ));
        assert!(output.contains(
            "B003 Machine Learning Guide (1,200, 20 in stock)\nBook id: "
        ));
        assert!(output.contains("Sale 5 recorded, total 1,100"));

        let book = db.books().get_by_id("B001").await.unwrap().unwrap();
        assert_eq!(book.stock, 48);
    }

    #[tokio::test]
    async fn test_add_sale_bad_date_stops_early() {
        let db = seeded().await;

        let output = drive(&db, "1\n2024/01/19\n\n").await;
        assert!(output.contains("Error: Invalid date '2024/01/19'"));
        assert!(!output.contains("Members:"));
        assert!(!output.contains("Member id:"));
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_add_sale_rejection_printed() {
        let db = seeded().await;

        let output = drive(&db, "1\n2024-01-19\nM001\nB001\n99\n0\n\n").await;
        assert!(output.contains("Error: Insufficient stock for B001: available 50"));
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_show_report() {
        let db = seeded().await;

        let output = drive(&db, "2\n\n").await;
        assert!(output.contains("Sale #4"));
        assert!(output.contains("Member:   Cathy"));
        assert!(output.contains("Total:    3,400"));
    }

    #[tokio::test]
    async fn test_update_sale_by_position() {
        let db = seeded().await;

        let output = drive(&db, "3\n2\n0\n\n").await;
        assert!(output.contains("2. Sale 2 - Bob - 2024-01-16"));
        assert!(output.contains(
            "Selected sale 2: 2024-01-16, B002 x 1, discount 50, total 750"
        ));
        assert!(output.contains("Sale 2 updated, new total 800"));

        let sale = db.sales().get_by_id(2).await.unwrap().unwrap();
        assert_eq!(sale.discount, 0);
    }

    #[tokio::test]
    async fn test_update_bad_discount_changes_nothing() {
        let db = seeded().await;

        let output = drive(&db, "3\n1\n-5\n\n").await;
        assert!(output.contains("Error: discount must not be negative"));

        let sale = db.sales().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(sale.discount, 100);
    }

    #[tokio::test]
    async fn test_delete_cancel_and_out_of_range() {
        let db = seeded().await;

        let output = drive(&db, "4\n\n4\n9\n\n").await;
        assert!(output.contains("Cancelled."));
        assert!(output.contains("Error: Please enter a number from 1 to 4"));
        assert_eq!(db.sales().count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_sale_by_position() {
        let db = seeded().await;

        let output = drive(&db, "4\n1\n\n").await;
        assert!(output.contains(
            "Selected sale 1: 2024-01-15, B001 x 2, discount 100, total 1,100"
        ));
        assert!(output.contains("Sale 1 deleted"));
        assert!(db.sales().get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_ledger_messages() {
        let db = seeded().await;
        for sale_id in 1..=4 {
            db.ledger().delete_sale(sale_id).await.unwrap();
        }

        let output = drive(&db, "2\n3\n4\n\n").await;
        assert!(output.contains(report::EMPTY_NOTICE));
        assert!(output.contains("No sales to update."));
        assert!(output.contains("No sales to delete."));
    }
}
