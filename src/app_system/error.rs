use thiserror::Error;

use crate::product_actor::ProductError;
use crate::transaction_actor::TransactionError;

/// Errors surfaced by [`InventorySystem`](super::InventorySystem).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

/// Invalid configuration values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: String },
}
