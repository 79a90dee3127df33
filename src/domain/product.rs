use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub seller_id: i32,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-editable product fields. `seller_id` is immutable after creation.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub image_url: String,
}
