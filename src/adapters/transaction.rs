use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::{Transaction, TransactionDraft, TransactionType};

/// Smallest sale value the backend accepts; it rejects anything not strictly positive.
pub const MIN_SALE_VALUE: f64 = 0.01;

/// Movement direction as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "ENTRADA")]
    Entry,
    #[serde(rename = "SAIDA")]
    Exit,
}

impl From<TransactionType> for MovementType {
    fn from(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Input => MovementType::Entry,
            TransactionType::Output => MovementType::Exit,
        }
    }
}

impl From<MovementType> for TransactionType {
    fn from(movement_type: MovementType) -> Self {
        match movement_type {
            MovementType::Entry => TransactionType::Input,
            MovementType::Exit => TransactionType::Output,
        }
    }
}

/// Body accepted by the stock-movement create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementRequest {
    /// Numeric product id; `null` when the draft's id is absent or not numeric.
    pub product_id: Option<i64>,
    pub movement_type: MovementType,
    pub quantity: u32,
    pub sale_value: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRef {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
}

/// Movement as served by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementPayload {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub product_id: Option<String>,
    /// Kept as text: anything other than `ENTRADA` is read as an exit.
    #[serde(default)]
    pub movement_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sale_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub purchase_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub movement_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Movement inside the backend's by-product grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroupedMovement {
    pub product_id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    pub movement_type: MovementType,
    pub value: f64,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The same movement with the direction under `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiGroupedMovement {
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub value: f64,
    pub date: String,
    pub description: Option<String>,
}

impl From<ApiGroupedMovement> for UiGroupedMovement {
    fn from(movement: ApiGroupedMovement) -> Self {
        Self {
            product_id: movement.product_id,
            product_name: movement.product_name,
            quantity: movement.quantity,
            movement_type: movement.movement_type,
            value: movement.value,
            date: movement.date,
            description: movement.description,
        }
    }
}

fn numeric_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

/// Builds the create body for a movement.
///
/// Entries always carry [`MIN_SALE_VALUE`]; exits carry their value when it
/// is positive and [`MIN_SALE_VALUE`] otherwise.
pub fn transaction_to_backend(draft: &TransactionDraft) -> StockMovementRequest {
    let sale_value = match draft.transaction_type {
        TransactionType::Input => MIN_SALE_VALUE,
        TransactionType::Output => draft.value.filter(|v| *v > 0.0).unwrap_or(MIN_SALE_VALUE),
    };

    StockMovementRequest {
        product_id: numeric_id(&draft.product_id),
        movement_type: draft.transaction_type.into(),
        quantity: draft.quantity,
        sale_value,
        description: draft.notes.clone().unwrap_or_default(),
    }
}

/// Reads a backend movement.
///
/// The product id comes from the nested `product` when present. Missing sale
/// values become 0 and a missing date becomes the Unix epoch.
pub fn transaction_from_backend(payload: StockMovementPayload) -> Transaction {
    let transaction_type = match payload.movement_type.as_deref() {
        Some("ENTRADA") => TransactionType::Input,
        _ => TransactionType::Output,
    };
    let product_id = payload
        .product
        .and_then(|product| product.id)
        .or(payload.product_id)
        .unwrap_or_default();
    let value = payload
        .sale_value
        .filter(|v| *v != 0.0)
        .or(payload.value)
        .unwrap_or(0.0);

    Transaction {
        id: payload.id.unwrap_or_default(),
        product_id,
        transaction_type,
        quantity: payload.quantity,
        value: Some(value),
        purchase_value: payload.purchase_value,
        date: payload
            .movement_date
            .or(payload.date)
            .or(payload.created_at)
            .unwrap_or_default(),
        notes: payload.description.or(payload.notes).unwrap_or_default(),
    }
}

/// Renames `movementType` to `type` across a by-product grouping.
pub fn grouped_movements_from_api(
    grouped: BTreeMap<String, Vec<ApiGroupedMovement>>,
) -> BTreeMap<String, Vec<UiGroupedMovement>> {
    grouped
        .into_iter()
        .map(|(product_id, movements)| (product_id, movements.into_iter().map(Into::into).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entries_always_send_minimum_sale_value() {
        let draft = TransactionDraft::input("17", 5).with_notes("restock");
        let body = serde_json::to_value(transaction_to_backend(&draft)).unwrap();
        assert_eq!(
            body,
            json!({
                "productId": 17,
                "movementType": "ENTRADA",
                "quantity": 5,
                "saleValue": 0.01,
                "description": "restock"
            })
        );
    }

    #[test]
    fn exits_without_positive_value_send_minimum() {
        let draft = TransactionDraft::output("3", 1, 0.0);
        assert_eq!(transaction_to_backend(&draft).sale_value, MIN_SALE_VALUE);

        let draft = TransactionDraft::output("3", 1, 25.5);
        let request = transaction_to_backend(&draft);
        assert_eq!(request.sale_value, 25.5);
        assert_eq!(request.movement_type, MovementType::Exit);
        assert_eq!(request.description, "");
    }

    #[test]
    fn non_numeric_product_ids_are_sent_as_null() {
        assert_eq!(transaction_to_backend(&TransactionDraft::input("abc", 1)).product_id, None);
        assert_eq!(transaction_to_backend(&TransactionDraft::input("", 1)).product_id, None);
        assert_eq!(transaction_to_backend(&TransactionDraft::input("8.0", 1)).product_id, Some(8));
    }

    #[test]
    fn backend_movement_with_nested_product() {
        let payload: StockMovementPayload = serde_json::from_value(json!({
            "id": 41,
            "product": {"id": 9, "code": "PROD-9"},
            "movementType": "SAIDA",
            "quantity": 2,
            "saleValue": 30.0,
            "movementDate": "2024-06-01 08:15:00",
            "description": "counter sale"
        }))
        .unwrap();

        let transaction = transaction_from_backend(payload);
        assert_eq!(transaction.id, "41");
        assert_eq!(transaction.product_id, "9");
        assert_eq!(transaction.transaction_type, TransactionType::Output);
        assert_eq!(transaction.value, Some(30.0));
        assert_eq!(transaction.notes, "counter sale");
        assert_eq!(transaction.date.to_rfc3339(), "2024-06-01T08:15:00+00:00");
    }

    #[test]
    fn backend_movement_with_flat_product_id_and_gaps() {
        let payload: StockMovementPayload =
            serde_json::from_value(json!({"id": "m1", "productId": "4", "movementType": "ENTRADA", "quantity": 3}))
                .unwrap();
        let transaction = transaction_from_backend(payload);
        assert_eq!(transaction.product_id, "4");
        assert_eq!(transaction.transaction_type, TransactionType::Input);
        assert_eq!(transaction.value, Some(0.0));
        assert_eq!(transaction.date, DateTime::<Utc>::default());
        assert_eq!(transaction.notes, "");
    }

    #[test]
    fn grouping_renames_movement_type() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            "1".to_string(),
            vec![ApiGroupedMovement {
                product_id: "1".into(),
                product_name: Some("Lamp".into()),
                quantity: 2,
                movement_type: MovementType::Entry,
                value: 0.01,
                date: "2024-06-01".into(),
                description: None,
            }],
        );

        let ui = grouped_movements_from_api(grouped);
        let body = serde_json::to_value(&ui["1"][0]).unwrap();
        assert_eq!(body["type"], json!("ENTRADA"));
        assert!(body.get("movementType").is_none());
    }
}
