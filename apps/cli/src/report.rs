//! # Sales Report
//!
//! Renders the ledger's sale list as text blocks or JSON.
//!
//! ## Text Layout (one block per sale)
//! ```text
//! ==================== Sales Report ====================
//! Sale #1
//! Sale id:  1
//! Date:     2024-01-15
//! Member:   Alice
//! Book:     Python Programming
//! --------------------------------------------------
//! Price     Qty       Discount  Subtotal
//! --------------------------------------------------
//! 600       2         100       1,100
//! --------------------------------------------------
//! Total:    1,100
//! ==================================================
//! ```

use std::io::Write;

use bookstore_core::SaleDetail;

use crate::config::ReportFormat;
use crate::error::CliResult;

const RULE_WIDTH: usize = 50;

/// Printed instead of a report when there are no sales.
pub const EMPTY_NOTICE: &str = "No sales recorded yet.";

/// Writes the report in the requested format.
pub fn render<W: Write>(
    format: ReportFormat,
    sales: &[SaleDetail],
    out: &mut W,
) -> CliResult<()> {
    match format {
        ReportFormat::Text => render_text(sales, out)?,
        ReportFormat::Json => render_json(sales, out)?,
    }
    Ok(())
}

/// Writes one text block per sale, in the given order.
pub fn render_text<W: Write>(sales: &[SaleDetail], out: &mut W) -> std::io::Result<()> {
    if sales.is_empty() {
        return writeln!(out, "{EMPTY_NOTICE}");
    }

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    for (index, sale) in sales.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{:=^width$}", " Sales Report ", width = RULE_WIDTH + 4)?;
        writeln!(out, "Sale #{}", index + 1)?;
        writeln!(out, "{:<10}{}", "Sale id:", sale.id)?;
        writeln!(out, "{:<10}{}", "Date:", sale.date)?;
        writeln!(out, "{:<10}{}", "Member:", sale.member_name)?;
        writeln!(out, "{:<10}{}", "Book:", sale.book_title)?;
        writeln!(out, "{light}")?;
        writeln!(out, "{:<10}{:<10}{:<10}{}", "Price", "Qty", "Discount", "Subtotal")?;
        writeln!(out, "{light}")?;
        writeln!(
            out,
            "{:<10}{:<10}{:<10}{}",
            sale.unit_price(),
            sale.quantity,
            sale.discount(),
            sale.total()
        )?;
        writeln!(out, "{light}")?;
        writeln!(out, "{:<10}{}", "Total:", sale.total())?;
        writeln!(out, "{heavy}")?;
    }

    Ok(())
}

/// Writes the sale list as a pretty-printed JSON array.
pub fn render_json<W: Write>(sales: &[SaleDetail], out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, sales)?;
    writeln!(out).map_err(serde_json::Error::io)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64, member: &str, title: &str, price: i64, qty: i64, discount: i64) -> SaleDetail {
        SaleDetail {
            id,
            date: "2024-01-15".into(),
            member_id: "M001".into(),
            member_name: member.into(),
            book_id: "B001".into(),
            book_title: title.into(),
            book_price: price,
            quantity: qty,
            discount,
            total: price * qty - discount,
        }
    }

    fn text(sales: &[SaleDetail]) -> String {
        let mut out = Vec::new();
        render_text(sales, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_report_notice() {
        assert_eq!(text(&[]), format!("{EMPTY_NOTICE}\n"));
    }

    #[test]
    fn test_text_block_contents() {
        let output = text(&[detail(3, "Alice", "Machine Learning Guide", 1200, 3, 200)]);

        assert!(output.contains(" Sales Report "));
        assert!(output.contains("Sale #1\n"));
        assert!(output.contains("Sale id:  3\n"));
        assert!(output.contains("Member:   Alice\n"));
        assert!(output.contains("Book:     Machine Learning Guide\n"));
        assert!(output.contains("1,200     3         200       3,400\n"));
        assert!(output.contains("Total:    3,400\n"));
    }

    #[test]
    fn test_text_index_follows_input_order() {
        let output = text(&[
            detail(7, "Bob", "Data Science Basics", 800, 1, 0),
            detail(9, "Cathy", "Python Programming", 600, 1, 0),
        ]);

        let first = output.find("Sale #1").unwrap();
        let second = output.find("Sale #2").unwrap();
        assert!(first < second);
        assert!(output[first..second].contains("Sale id:  7"));
        assert!(output[second..].contains("Sale id:  9"));
    }

    #[test]
    fn test_negative_total_rendered() {
        let output = text(&[detail(1, "Alice", "Python Programming", 600, 1, 1000)]);
        assert!(output.contains("Total:    -400\n"));
    }

    #[test]
    fn test_json_report() {
        let sales = vec![detail(1, "Alice", "Python Programming", 600, 2, 100)];
        let mut out = Vec::new();
        render(ReportFormat::Json, &sales, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["member_name"], "Alice");
        assert_eq!(value[0]["total"], 1100);
    }
}
