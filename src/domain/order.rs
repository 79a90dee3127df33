use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

/// Order status is a single-state lifecycle: an order either exists as
/// `PLACED` or does not exist at all.
pub const STATUS_PLACED: &str = "PLACED";

/// One requested cart line: how many units of which product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_id: i32,
    pub quantity: i32,
    /// Catalog price at the moment the order was placed, never re-read.
    pub price_at_time: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}
