use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{normalize_id, Product, Transaction};

/// Stock and sales rollup for one product type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_available: u64,
    pub total_sold: u64,
    /// Sold units valued at list price minus supplier price.
    pub total_profit: f64,
}

/// Per-type stock and sales statistics, one entry per distinct product type.
///
/// Profit here uses each product's list `selling_price`, not the realized
/// transaction value used by [`compute_product_profit`](super::compute_product_profit).
/// The two figures are expected to disagree whenever sales happen off list
/// price.
pub fn compute_inventory_stats_by_type(
    products: &[Product],
    transactions: &[Transaction],
) -> HashMap<String, InventoryStats> {
    let mut stats: HashMap<String, InventoryStats> = HashMap::new();
    let mut by_id: HashMap<String, &Product> = HashMap::with_capacity(products.len());

    for product in products {
        stats.entry(product.product_type.clone()).or_default().total_available += u64::from(product.stock);
        by_id.entry(normalize_id(&product.id)).or_insert(product);
    }

    for transaction in transactions.iter().filter(|t| t.is_output()) {
        let Some(product) = by_id.get(&normalize_id(&transaction.product_id)) else {
            continue;
        };
        let entry = stats.entry(product.product_type.clone()).or_default();
        entry.total_sold += u64::from(transaction.quantity);
        entry.total_profit += f64::from(transaction.quantity) * (product.selling_price - product.supplier_price);
    }

    stats
}

/// Distinct product types in first-seen order.
pub fn product_types(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();
    for product in products {
        if seen.insert(product.product_type.as_str()) {
            types.push(product.product_type.clone());
        }
    }
    types
}
