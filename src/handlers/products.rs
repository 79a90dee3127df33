use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::application::catalog_service::CatalogService;
use crate::domain::product::{NewProduct, ProductUpdate, ProductView};
use crate::errors::AppError;
use crate::handlers::identity::Identity;
use crate::infrastructure::product_repo::DieselProductRepository;

pub type Catalog = CatalogService<DieselProductRepository>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub stock_quantity: i32,
    #[serde(default)]
    pub image_url: String,
}

impl ProductRequest {
    fn parse_price(&self) -> Result<BigDecimal, AppError> {
        BigDecimal::from_str(&self.price)
            .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", self.price, e)))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub seller_id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: i32,
    pub image_url: String,
    pub created_at: String,
}

impl From<ProductView> for ProductResponse {
    fn from(p: ProductView) -> Self {
        ProductResponse {
            id: p.id,
            seller_id: p.seller_id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            stock_quantity: p.stock_quantity,
            image_url: p.image_url,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/products
///
/// Public catalog listing.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    let service = service.get_ref().clone();
    let products = web::block(move || service.list_products())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ProductResponse> = products.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<Catalog>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();

    let service = service.get_ref().clone();
    let product = web::block(move || service.get_product(product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /api/products
///
/// Lists a new product for sale. The seller is the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreatedResponse),
        (status = 400, description = "Invalid price or stock"),
        (status = 401, description = "Missing identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<Catalog>,
    identity: Identity,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let price = body.parse_price()?;

    let product = NewProduct {
        seller_id: identity.user_id,
        name: body.name,
        description: body.description,
        price,
        stock_quantity: body.stock_quantity,
        image_url: body.image_url,
    };

    let service = service.get_ref().clone();
    let id = web::block(move || service.add_product(product))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// PUT /api/products/{id}
///
/// Updates a product the caller owns.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Invalid price or stock"),
        (status = 401, description = "Missing identity"),
        (status = 403, description = "Caller does not own this product"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn update_product(
    service: web::Data<Catalog>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let body = body.into_inner();
    let price = body.parse_price()?;

    let fields = ProductUpdate {
        name: body.name,
        description: body.description,
        price,
        stock_quantity: body.stock_quantity,
        image_url: body.image_url,
    };

    let service = service.get_ref().clone();
    web::block(move || service.update_product(identity.user_id, product_id, fields))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product updated" })))
}

/// DELETE /api/products/{id}
///
/// Deletes a product the caller owns. Products referenced by existing order
/// lines are protected at the storage level and cannot be removed.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing identity"),
        (status = 403, description = "Caller does not own this product"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<Catalog>,
    identity: Identity,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();

    let service = service.get_ref().clone();
    web::block(move || service.delete_product(identity.user_id, product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
