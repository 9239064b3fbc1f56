use thiserror::Error;

/// Errors raised by reports that cannot degrade gracefully.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("cannot compute profit for product {product_id}: sold {sold} units but recorded entries only cover {covered}")]
    InsufficientEntryStock { product_id: String, sold: u32, covered: u32 },
}
