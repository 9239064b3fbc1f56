use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while recording or amending stock movements.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransactionError {
    #[error("Transaction not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u32 },
    #[error("Transaction validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<TransactionError>> for TransactionError {
    fn from(error: FrameworkError<TransactionError>) -> Self {
        match error {
            FrameworkError::NotFound(id) => TransactionError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => TransactionError::ActorCommunicationError(other.to_string()),
        }
    }
}
