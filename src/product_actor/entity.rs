use chrono::Utc;

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

fn validate_price(field: &str, price: f64) -> Result<(), ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProductError::ValidationError(format!("{field} must be a non-negative number, got {price}")))
    }
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Rejects a blank name and negative or non-finite prices.
    fn from_create(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name is required".to_string()));
        }
        validate_price("supplier_price", params.supplier_price)?;
        validate_price("selling_price", params.selling_price)?;

        let now = Utc::now();
        Ok(Self {
            id,
            code: params.code,
            name: params.name,
            description: params.description,
            product_type: params.product_type,
            supplier_price: params.supplier_price,
            selling_price: params.selling_price,
            stock: params.stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `patch` and refreshes `updated_at`.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(code) = patch.code {
            self.code = Some(code);
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ProductError::ValidationError("name is required".to_string()));
            }
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(product_type) = patch.product_type {
            self.product_type = product_type;
        }
        if let Some(price) = patch.supplier_price {
            validate_price("supplier_price", price)?;
            self.supplier_price = price;
        }
        if let Some(price) = patch.selling_price {
            validate_price("selling_price", price)?;
            self.selling_price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// A product can only be removed once its stock is depleted.
    fn on_delete(&self) -> Result<(), ProductError> {
        if self.stock > 0 {
            return Err(ProductError::StockNotEmpty { id: self.id.clone(), stock: self.stock });
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `AdjustStock(delta)`: Adds `delta` to the stock level
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::AdjustStock(delta) => {
                let next = i64::from(self.stock)
                    .checked_add(delta)
                    .ok_or_else(|| ProductError::StockOverflow(self.id.clone()))?;
                if next < 0 {
                    return Err(ProductError::InsufficientStock {
                        requested: delta.unsigned_abs(),
                        available: self.stock,
                    });
                }
                self.stock = u32::try_from(next).map_err(|_| ProductError::StockOverflow(self.id.clone()))?;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::Adjusted(self.stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked(stock: u32) -> Product {
        Product::from_create("product_1".into(), ProductCreate::new("Lamp", "Furniture", 5.0, 9.0, stock)).unwrap()
    }

    #[test]
    fn adjust_stock_applies_signed_delta() {
        let mut product = stocked(10);
        assert_eq!(product.handle_action(ProductAction::AdjustStock(5)), Ok(ProductActionResult::Adjusted(15)));
        assert_eq!(product.handle_action(ProductAction::AdjustStock(-15)), Ok(ProductActionResult::Adjusted(0)));
    }

    #[test]
    fn overdrawing_stock_is_rejected() {
        let mut product = stocked(3);
        assert_eq!(
            product.handle_action(ProductAction::AdjustStock(-4)),
            Err(ProductError::InsufficientStock { requested: 4, available: 3 })
        );
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn stock_cannot_overflow() {
        let mut product = stocked(u32::MAX);
        assert!(matches!(
            product.handle_action(ProductAction::AdjustStock(1)),
            Err(ProductError::StockOverflow(_))
        ));
        assert_eq!(product.stock, u32::MAX);
    }

    #[test]
    fn extreme_deltas_fail_without_touching_stock() {
        let mut product = stocked(1);
        assert_eq!(
            product.handle_action(ProductAction::AdjustStock(i64::MAX)),
            Err(ProductError::StockOverflow("product_1".into()))
        );
        assert_eq!(
            product.handle_action(ProductAction::AdjustStock(i64::MIN)),
            Err(ProductError::InsufficientStock { requested: i64::MIN.unsigned_abs(), available: 1 })
        );
        assert_eq!(product.stock, 1);
    }

    #[test]
    fn create_validates_fields() {
        let blank = ProductCreate::new("  ", "Furniture", 1.0, 1.0, 0);
        assert!(matches!(Product::from_create("p".into(), blank), Err(ProductError::ValidationError(_))));

        let negative = ProductCreate::new("Lamp", "Furniture", -1.0, 1.0, 0);
        assert!(matches!(Product::from_create("p".into(), negative), Err(ProductError::ValidationError(_))));
    }

    #[test]
    fn delete_requires_empty_stock() {
        assert_eq!(
            stocked(2).on_delete(),
            Err(ProductError::StockNotEmpty { id: "product_1".into(), stock: 2 })
        );
        assert_eq!(stocked(0).on_delete(), Ok(()));
    }
}
