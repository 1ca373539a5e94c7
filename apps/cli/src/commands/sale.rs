//! # Sale Commands

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use bookstore_core::validation::{
    validate_book_id, validate_date, validate_discount, validate_member_id, validate_quantity,
};
use bookstore_core::{CoreError, Money, NewSale, Sale, SaleDetail};
use bookstore_db::SalesLedger;

/// A sale as typed at the prompts, before parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSaleRequest {
    pub date: String,
    pub member_id: String,
    pub book_id: String,
    pub quantity: String,
    pub discount: String,
}

impl AddSaleRequest {
    /// Parses every field, stopping at the first bad one.
    ///
    /// Fields are checked in prompt order: date, member, book, quantity,
    /// discount.
    pub fn parse(&self) -> Result<NewSale, ApiError> {
        let date = self.date.trim();
        if !validate_date(date) {
            return Err(CoreError::InvalidDate(date.to_string()).into());
        }

        let member_id = validate_member_id(&self.member_id)?;
        let book_id = validate_book_id(&self.book_id)?;
        let quantity = validate_quantity(&self.quantity)?;
        let discount = validate_discount(&self.discount)?;

        Ok(NewSale::new(date, member_id, book_id, quantity, discount))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSaleResponse {
    pub sale_id: i64,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleResponse {
    pub sale_id: i64,
    pub discount: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSaleResponse {
    pub sale_id: i64,
}

pub async fn add_sale(
    ledger: &SalesLedger,
    request: &AddSaleRequest,
) -> Result<AddSaleResponse, ApiError> {
    debug!(?request, "add_sale command");

    let new_sale = request.parse()?;
    let sale = ledger.record_sale(&new_sale).await?;

    Ok(AddSaleResponse {
        sale_id: sale.id,
        total: sale.total(),
    })
}

pub async fn list_sales(ledger: &SalesLedger) -> Result<Vec<SaleDetail>, ApiError> {
    debug!("list_sales command");

    Ok(ledger.list_sales().await?)
}

/// Fetches one sale, reporting an unknown id as `NotFound`.
pub async fn get_sale(ledger: &SalesLedger, sale_id: i64) -> Result<Sale, ApiError> {
    debug!(sale_id, "get_sale command");

    ledger
        .get_sale(sale_id)
        .await?
        .ok_or_else(|| CoreError::SaleNotFound(sale_id).into())
}

pub async fn update_sale(
    ledger: &SalesLedger,
    sale_id: i64,
    raw_discount: &str,
) -> Result<UpdateSaleResponse, ApiError> {
    debug!(sale_id, raw_discount, "update_sale command");

    let discount = validate_discount(raw_discount)?;
    let total = ledger.update_sale(sale_id, discount).await?;

    Ok(UpdateSaleResponse {
        sale_id,
        discount: Money::from_amount(discount),
        total,
    })
}

pub async fn delete_sale(
    ledger: &SalesLedger,
    sale_id: i64,
) -> Result<DeleteSaleResponse, ApiError> {
    debug!(sale_id, "delete_sale command");

    ledger.delete_sale(sale_id).await?;

    Ok(DeleteSaleResponse { sale_id })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use bookstore_db::{Database, DbConfig};

    fn request(date: &str, member: &str, book: &str, qty: &str, discount: &str) -> AddSaleRequest {
        AddSaleRequest {
            date: date.into(),
            member_id: member.into(),
            book_id: book.into(),
            quantity: qty.into(),
            discount: discount.into(),
        }
    }

    #[test]
    fn test_parse_trims_and_converts() {
        let sale = request(" 2024-01-19 ", " M001", "B001 ", " 2", "100 ")
            .parse()
            .unwrap();
        assert_eq!(sale, NewSale::new("2024-01-19", "M001", "B001", 2, 100));
    }

    #[test]
    fn test_parse_reports_first_bad_field() {
        let err = request("2024-1-19", "", "B001", "x", "-1").parse().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDate);

        let err = request("2024-01-19", "  ", "B001", "x", "-1").parse().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("member"));

        let err = request("2024-01-19", "M001", "B001", "two", "0").parse().unwrap_err();
        assert!(err.message.contains("quantity"));

        let err = request("2024-01-19", "M001", "B001", "0", "0").parse().unwrap_err();
        assert_eq!(err.message, "quantity must be greater than 0");

        let err = request("2024-01-19", "M001", "B001", "1", "-1").parse().unwrap_err();
        assert_eq!(err.message, "discount must not be negative");
    }

    #[tokio::test]
    async fn test_sale_commands_round() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = db.ledger();

        let added = add_sale(&ledger, &request("2024-01-19", "M001", "B001", "2", "100"))
            .await
            .unwrap();
        assert_eq!(added.sale_id, 5);
        assert_eq!(added.total.amount(), 1100);

        let updated = update_sale(&ledger, added.sale_id, "50").await.unwrap();
        assert_eq!(updated.total.amount(), 1150);

        let deleted = delete_sale(&ledger, added.sale_id).await.unwrap();
        assert_eq!(deleted.sale_id, 5);

        let sales = list_sales(&ledger).await.unwrap();
        assert_eq!(sales.len(), 4);
    }

    #[tokio::test]
    async fn test_ledger_rejections_become_api_errors() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = db.ledger();

        let err = add_sale(&ledger, &request("2024-01-19", "M001", "B003", "21", "0"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = update_sale(&ledger, 42, "0").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = update_sale(&ledger, 1, "ten").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = delete_sale(&ledger, 42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_sale() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let ledger = db.ledger();

        let sale = get_sale(&ledger, 2).await.unwrap();
        assert_eq!(sale.member_id, "M002");
        assert_eq!(sale.total, 750);

        delete_sale(&ledger, 2).await.unwrap();
        let err = get_sale(&ledger, 2).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, CoreError::SaleNotFound(2).to_string());
    }
}
