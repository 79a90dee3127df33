use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::application::order_service::OrderService;
use crate::domain::order::{CartItem, OrderItemView, OrderView};
use crate::errors::AppError;
use crate::handlers::identity::Identity;
use crate::infrastructure::order_repo::DieselOrderRepository;

pub type Orders = OrderService<DieselOrderRepository>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub quantity: i32,
    /// Price snapshot as a decimal string, e.g. "9.99"
    pub price_at_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    /// Decimal total as a string to avoid floating-point issues, e.g. "24.50"
    pub total_amount: String,
    pub status: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        OrderResponse {
            id: order.id,
            user_id: order.user_id,
            total_amount: order.total_amount.to_string(),
            status: order.status,
            created_at: order.created_at.to_rfc3339(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(item: OrderItemView) -> Self {
        OrderItemResponse {
            product_id: item.product_id,
            quantity: item.quantity,
            price_at_time: item.price_at_time.to_string(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Places an order for the authenticated user. The whole cart commits or
/// rolls back as a unit: stock deductions, line items with their price
/// snapshots, and the order header with its total.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Empty cart or non-positive quantity"),
        (status = 401, description = "Missing identity"),
        (status = 404, description = "Referenced product does not exist"),
        (status = 409, description = "Insufficient stock for a line item"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: web::Data<Orders>,
    identity: Identity,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let items: Vec<CartItem> = body
        .into_inner()
        .items
        .into_iter()
        .map(|i| CartItem {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect();

    let service = service.get_ref().clone();
    let order_id = web::block(move || service.place_order(identity.user_id, &items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": order_id })))
}

/// GET /api/orders/{id}
///
/// Returns one of the caller's orders, with its line items.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing identity"),
        (status = 404, description = "No such order for this user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<Orders>,
    identity: Identity,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let service = service.get_ref().clone();
    let order = web::block(move || service.get_order(identity.user_id, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/orders
///
/// Returns the caller's order history, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated order history", body = ListOrdersResponse),
        (status = 401, description = "Missing identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<Orders>,
    identity: Identity,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let service = service.get_ref().clone();
    let result = web::block(move || service.list_orders(identity.user_id, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}
