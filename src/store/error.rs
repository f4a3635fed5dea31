use thiserror::Error;

/// Failures reported across the store boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Store closed")]
    Closed,
    #[error("Store dropped request")]
    Dropped,
}
