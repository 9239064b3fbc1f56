use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}
