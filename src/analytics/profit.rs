use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{normalize_id, Product, Transaction};

/// A product together with the sales figures derived from its movements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfit {
    #[serde(flatten)]
    pub product: Product,
    /// Units leaving stock through output movements.
    pub total_sold: u64,
    /// Σ value × quantity over output movements.
    pub total_sales_value: f64,
    /// Units sold valued at the supplier price.
    pub total_cost: f64,
    pub total_profit: f64,
    /// Realized average, or the list price when nothing was sold.
    pub average_selling_price: f64,
    pub unit_profit: f64,
    pub profit_margin_percent: f64,
    pub roi: f64,
    pub current_stock_value: f64,
    /// Profit if the remaining stock sold at `average_selling_price`.
    pub potential_profit: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct SalesTally {
    sold: u64,
    sales_value: f64,
}

/// Builds one profit record per product, in input order.
///
/// Output movements are matched to products by normalized id. Movements whose
/// product is not in `products` are ignored.
pub fn compute_product_profit(products: &[Product], transactions: &[Transaction]) -> Vec<ProductProfit> {
    let mut tallies: HashMap<String, SalesTally> = HashMap::new();
    for transaction in transactions.iter().filter(|t| t.is_output()) {
        let tally = tallies.entry(normalize_id(&transaction.product_id)).or_default();
        tally.sold += u64::from(transaction.quantity);
        tally.sales_value += transaction.value.unwrap_or(0.0) * f64::from(transaction.quantity);
    }

    products
        .iter()
        .map(|product| {
            let tally = tallies.get(&normalize_id(&product.id)).copied().unwrap_or_default();
            profit_record(product, tally)
        })
        .collect()
}

fn profit_record(product: &Product, tally: SalesTally) -> ProductProfit {
    let supplier_price = product.supplier_price;
    let sold = tally.sold as f64;
    let stock = f64::from(product.stock);

    let total_cost = sold * supplier_price;
    let total_profit = tally.sales_value - total_cost;
    let average_selling_price = if tally.sold > 0 {
        tally.sales_value / sold
    } else {
        product.selling_price
    };
    let unit_profit = average_selling_price - supplier_price;
    let profit_margin_percent = if supplier_price > 0.0 {
        unit_profit / supplier_price * 100.0
    } else {
        0.0
    };
    let roi = if total_cost > 0.0 { total_profit / total_cost * 100.0 } else { 0.0 };

    ProductProfit {
        product: product.clone(),
        total_sold: tally.sold,
        total_sales_value: tally.sales_value,
        total_cost,
        total_profit,
        average_selling_price,
        unit_profit,
        profit_margin_percent,
        roi,
        current_stock_value: stock * supplier_price,
        potential_profit: stock * unit_profit,
    }
}
