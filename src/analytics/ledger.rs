use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::{normalize_id, Product, Transaction};

pub const UNKNOWN_PRODUCT: &str = "Unknown product";
pub const UNKNOWN_TYPE: &str = "Unknown type";

/// A movement annotated with the name and type of the product it moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithProduct {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub product_name: String,
    pub product_type: String,
}

/// Joins each movement with its product, newest first.
pub fn transactions_with_product_info(products: &[Product], transactions: &[Transaction]) -> Vec<TransactionWithProduct> {
    let mut by_id: HashMap<String, &Product> = HashMap::with_capacity(products.len());
    for product in products {
        by_id.entry(normalize_id(&product.id)).or_insert(product);
    }

    let mut joined: Vec<TransactionWithProduct> = transactions
        .iter()
        .map(|transaction| {
            let product = by_id.get(&normalize_id(&transaction.product_id));
            TransactionWithProduct {
                transaction: transaction.clone(),
                product_name: product.map_or_else(|| UNKNOWN_PRODUCT.to_string(), |p| p.name.clone()),
                product_type: product.map_or_else(|| UNKNOWN_TYPE.to_string(), |p| p.product_type.clone()),
            }
        })
        .collect();
    joined.sort_by(|a, b| b.transaction.date.cmp(&a.transaction.date));
    joined
}

/// Groups movements by normalized product id, keeping their relative order.
pub fn group_by_product(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for transaction in transactions {
        groups
            .entry(normalize_id(&transaction.product_id))
            .or_default()
            .push(transaction.clone());
    }
    groups
}
