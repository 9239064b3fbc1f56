use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::domain::Product;

/// Product as served by the legacy catalogue endpoint
/// (`code`/`supplierValue`/`stockQuantity`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProductPayload {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub supplier_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub selling_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sale_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub stock_quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body accepted by the legacy create/update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProductRequest {
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub supplier_value: f64,
    pub stock_quantity: u32,
}

/// Product in the `name`/`supplierPrice`/`sellingPrice`/`stock` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub product_type: String,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub supplier_price: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub selling_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub stock: u32,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|n| *n != 0.0)
}

/// Reads a legacy catalogue entry.
///
/// `name` falls back to `description`; the list price is `sellingPrice`,
/// then `saleValue`; missing prices and stock become 0. Missing timestamps
/// become the Unix epoch.
pub fn product_from_legacy(payload: LegacyProductPayload) -> Product {
    let description = payload.description.unwrap_or_default();
    let name = non_empty(payload.name)
        .or_else(|| non_empty(Some(description.clone())))
        .unwrap_or_default();

    Product {
        id: payload.id.unwrap_or_default(),
        code: non_empty(payload.code),
        name,
        description,
        product_type: payload.product_type.unwrap_or_default(),
        supplier_price: payload.supplier_value.unwrap_or(0.0),
        selling_price: non_zero(payload.selling_price)
            .or_else(|| non_zero(payload.sale_value))
            .unwrap_or(0.0),
        stock: payload.stock_quantity.unwrap_or(0),
        created_at: payload.created_at.unwrap_or_default(),
        updated_at: payload.updated_at.unwrap_or_default(),
    }
}

/// Builds the legacy create/update body. The legacy schema keys products by
/// `code` and has no separate name, so the name is sent as the code.
pub fn product_to_legacy(product: &Product) -> LegacyProductRequest {
    LegacyProductRequest {
        code: product.name.clone(),
        description: product.description.clone(),
        product_type: product.product_type.clone(),
        supplier_value: product.supplier_price,
        stock_quantity: product.stock,
    }
}

pub fn product_to_backend(product: &Product) -> ProductPayload {
    ProductPayload {
        id: None,
        name: product.name.clone(),
        description: product.description.clone(),
        product_type: product.product_type.clone(),
        supplier_price: product.supplier_price,
        selling_price: Some(product.selling_price),
        stock: product.stock,
    }
}

pub fn product_from_backend(payload: ProductPayload) -> Product {
    Product {
        id: payload.id.unwrap_or_default(),
        code: None,
        name: payload.name,
        description: payload.description,
        product_type: payload.product_type,
        supplier_price: payload.supplier_price,
        selling_price: payload.selling_price.unwrap_or(0.0),
        stock: payload.stock,
        created_at: DateTime::default(),
        updated_at: DateTime::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_entry_with_string_numbers() {
        let payload: LegacyProductPayload = serde_json::from_str(
            r#"{"id":12,"code":"PROD-001","description":"Smartphone","type":"Electronics",
                "supplierValue":"1500.00","stockQuantity":"10","createdAt":"2024-01-02 10:00:00"}"#,
        )
        .unwrap();

        let product = product_from_legacy(payload);
        assert_eq!(product.id, "12");
        assert_eq!(product.code.as_deref(), Some("PROD-001"));
        assert_eq!(product.name, "Smartphone");
        assert_eq!(product.supplier_price, 1500.0);
        assert_eq!(product.selling_price, 0.0);
        assert_eq!(product.stock, 10);
        assert_eq!(product.created_at.to_rfc3339(), "2024-01-02T10:00:00+00:00");
        assert_eq!(product.updated_at, DateTime::<Utc>::default());
    }

    #[test]
    fn legacy_list_price_falls_back_to_sale_value() {
        let payload = LegacyProductPayload {
            selling_price: Some(0.0),
            sale_value: Some(19.9),
            ..Default::default()
        };
        assert_eq!(product_from_legacy(payload).selling_price, 19.9);
    }

    #[test]
    fn legacy_garbage_numbers_become_zero() {
        let payload: LegacyProductPayload =
            serde_json::from_str(r#"{"id":"a1","supplierValue":"n/a","stockQuantity":null}"#).unwrap();
        let product = product_from_legacy(payload);
        assert_eq!(product.supplier_price, 0.0);
        assert_eq!(product.stock, 0);
        assert_eq!(product.name, "");
        assert_eq!(product.code, None);
    }

    #[test]
    fn legacy_request_sends_name_as_code() {
        let product = Product::new("1", "Desk", "Furniture", 80.0, 150.0, 2).with_description("Oak desk");
        let body = serde_json::to_value(product_to_legacy(&product)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "code": "Desk",
                "description": "Oak desk",
                "type": "Furniture",
                "supplierValue": 80.0,
                "stockQuantity": 2
            })
        );
    }

    #[test]
    fn backend_shape_defaults_selling_price() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"id":5,"name":"Fan","type":"Appliance","supplierPrice":30,"stock":4}"#).unwrap();
        let product = product_from_backend(payload);
        assert_eq!(product.id, "5");
        assert_eq!(product.selling_price, 0.0);
        assert_eq!(product.supplier_price, 30.0);

        let outbound = serde_json::to_value(product_to_backend(&product)).unwrap();
        assert_eq!(outbound["sellingPrice"], serde_json::json!(0.0));
        assert!(outbound.get("id").is_none());
    }
}
