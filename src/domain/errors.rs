use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Product {0} not found")]
    ProductNotFound(i32),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Insufficient stock for product {product_id} (only {available} left)")]
    InsufficientStock { product_id: i32, available: i32 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
