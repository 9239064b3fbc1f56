//! Conversions between backend wire payloads and the domain model.
//!
//! The backend has served two incompatible shapes for the same entities
//! (`code`/`supplierValue`/`stockQuantity` and `name`/`supplierPrice`/
//! `sellingPrice`/`stock` for products; `movementType`/`saleValue` and
//! `type`/`value` for movements). Everything past this module sees only
//! [`Product`](crate::domain::Product) and
//! [`Transaction`](crate::domain::Transaction).

mod error;
mod lenient;
mod product;
mod transaction;

pub use error::*;
pub use lenient::parse_timestamp;
pub use product::*;
pub use transaction::*;

use crate::domain::{Product, Transaction};

/// Parses a legacy catalogue listing (a JSON array) into products.
pub fn products_from_legacy_json(body: &str) -> Result<Vec<Product>, AdapterError> {
    let payloads: Vec<LegacyProductPayload> = serde_json::from_str(body)?;
    Ok(payloads.into_iter().map(product_from_legacy).collect())
}

/// Parses a movement listing (a JSON array) into transactions.
pub fn transactions_from_backend_json(body: &str) -> Result<Vec<Transaction>, AdapterError> {
    let payloads: Vec<StockMovementPayload> = serde_json::from_str(body)?;
    Ok(payloads.into_iter().map(transaction_from_backend).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_product_profit;

    #[test]
    fn listings_feed_the_profit_report() {
        let products = products_from_legacy_json(
            r#"[{"id":1,"code":"TV","description":"Television","type":"Electronics",
                 "supplierValue":1000,"stockQuantity":3}]"#,
        )
        .unwrap();
        let transactions = transactions_from_backend_json(
            r#"[{"id":1,"productId":1,"movementType":"SAIDA","quantity":2,"saleValue":1500},
                {"id":2,"productId":1,"movementType":"ENTRADA","quantity":5,"saleValue":0.01}]"#,
        )
        .unwrap();

        let record = &compute_product_profit(&products, &transactions)[0];
        assert_eq!(record.total_sold, 2);
        assert_eq!(record.total_sales_value, 3000.0);
        assert_eq!(record.total_profit, 1000.0);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(products_from_legacy_json("{not json"), Err(AdapterError::Json(_))));
        assert!(transactions_from_backend_json(r#"{"id":1}"#).is_err());
    }
}
