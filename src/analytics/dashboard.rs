use serde::Serialize;
use tracing::debug;

use super::fifo_profit;
use crate::domain::{Product, Transaction};

/// Number of products shown in the dashboard ranking unless configured otherwise.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfitSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub description: String,
    pub total_profit: f64,
    pub total_sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Σ supplier_price × stock over all products.
    pub total_stock_value: f64,
    /// Most profitable products by FIFO profit, best first.
    pub top_profit_products: Vec<ProductProfitSummary>,
}

/// Headline figures for the inventory dashboard.
///
/// Only products with strictly positive FIFO profit are ranked; products
/// whose FIFO profit cannot be computed are left out.
pub fn dashboard_stats(products: &[Product], transactions: &[Transaction], top_n: usize) -> DashboardStats {
    let total_stock_value: f64 = products
        .iter()
        .map(|p| p.supplier_price * f64::from(p.stock))
        .sum();

    let mut ranked: Vec<ProductProfitSummary> = products
        .iter()
        .filter_map(|product| match fifo_profit(product, transactions) {
            Ok(result) => Some((product, result)),
            Err(e) => {
                debug!(product_id = %product.id, error = %e, "Skipping product in profit ranking");
                None
            }
        })
        .filter(|(_, result)| result.profit > 0.0)
        .map(|(product, result)| ProductProfitSummary {
            id: product.id.clone(),
            code: product.code.clone(),
            description: product.description.clone(),
            total_profit: result.profit,
            total_sold: result.total_sold,
        })
        .collect();

    ranked.sort_by(|a, b| b.total_profit.total_cmp(&a.total_profit));
    ranked.truncate(top_n);

    DashboardStats {
        total_stock_value,
        top_profit_products: ranked,
    }
}
