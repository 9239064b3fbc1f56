use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub product_type: String,
    /// Unit acquisition cost.
    #[serde(default)]
    pub supplier_price: f64,
    /// Unit list price, 0 when unset.
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub code: Option<String>,
    pub name: String,
    pub description: String,
    pub product_type: String,
    pub supplier_price: f64,
    pub selling_price: f64,
    pub stock: u32,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub supplier_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub stock: Option<u32>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        product_type: impl Into<String>,
        supplier_price: f64,
        selling_price: f64,
        stock: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            code: None,
            name: name.into(),
            description: String::new(),
            product_type: product_type.into(),
            supplier_price,
            selling_price,
            stock,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl ProductCreate {
    pub fn new(
        name: impl Into<String>,
        product_type: impl Into<String>,
        supplier_price: f64,
        selling_price: f64,
        stock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            product_type: product_type.into(),
            supplier_price,
            selling_price,
            stock,
            ..Default::default()
        }
    }
}

/// Search criteria for narrowing a product list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub min_stock: Option<u32>,
    pub max_stock: Option<u32>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            if !product.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(product_type) = self.product_type.as_deref().filter(|t| !t.is_empty()) {
            if product.product_type != product_type {
                return false;
            }
        }
        if self.min_stock.is_some_and(|min| product.stock < min) {
            return false;
        }
        if self.max_stock.is_some_and(|max| product.stock > max) {
            return false;
        }
        true
    }
}

/// Returns the products matching `filter`, preserving input order.
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}
