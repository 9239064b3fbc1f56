use std::collections::VecDeque;

use serde::Serialize;

use super::AnalyticsError;
use crate::domain::{normalize_id, Product, Transaction, TransactionType};

/// Profit realized by a product under first-in-first-out costing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitResult {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub total_sold: u64,
}

#[derive(Debug, Clone, Copy)]
struct Lot {
    remaining: u32,
    unit_cost: f64,
}

/// Computes the FIFO profit of `product` from its movements in `transactions`.
///
/// All input movements are queued as cost lots in date order before any
/// output is costed, so an entry recorded after a sale still covers it. An
/// input without a purchase value is costed at the product's supplier price;
/// an output without a sale value is priced at the supplier price as well.
///
/// # Errors
/// Returns [`AnalyticsError::InsufficientEntryStock`] when an output cannot be
/// covered by the remaining lots.
pub fn fifo_profit(product: &Product, transactions: &[Transaction]) -> Result<ProfitResult, AnalyticsError> {
    let key = normalize_id(&product.id);
    let mut movements: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| normalize_id(&t.product_id) == key)
        .collect();
    movements.sort_by_key(|t| t.date);

    let mut lots: VecDeque<Lot> = movements
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Input)
        .map(|t| Lot {
            remaining: t.quantity,
            unit_cost: t.purchase_value.unwrap_or(product.supplier_price),
        })
        .collect();

    let mut result = ProfitResult::default();
    for sale in movements.iter().filter(|t| t.is_output()) {
        let sale_value = sale.value.unwrap_or(product.supplier_price);
        result.revenue += sale_value * f64::from(sale.quantity);
        result.total_sold += u64::from(sale.quantity);

        let mut outstanding = sale.quantity;
        while outstanding > 0 {
            let Some(lot) = lots.front_mut() else {
                break;
            };
            let consumed = outstanding.min(lot.remaining);
            result.cost += lot.unit_cost * f64::from(consumed);
            outstanding -= consumed;
            lot.remaining -= consumed;
            if lot.remaining == 0 {
                lots.pop_front();
            }
        }

        if outstanding > 0 {
            return Err(AnalyticsError::InsufficientEntryStock {
                product_id: product.id.clone(),
                sold: sale.quantity,
                covered: sale.quantity - outstanding,
            });
        }
    }

    result.profit = result.revenue - result.cost;
    Ok(result)
}
