use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Missing or invalid identity")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    OutOfStock {
        message: String,
        product_id: i32,
        available: i32,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(_) => AppError::BadRequest(e.to_string()),
            DomainError::ProductNotFound(_) | DomainError::OrderNotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::InsufficientStock {
                product_id,
                available,
            } => AppError::OutOfStock {
                message: e.to_string(),
                product_id,
                available,
            },
            DomainError::Forbidden(_) => AppError::Forbidden(e.to_string()),
            DomainError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Unauthorized => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Forbidden(_) => HttpResponse::Forbidden().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            // The offending product and the remaining stock go into the body
            // so clients can correct the cart without another round trip.
            AppError::OutOfStock {
                product_id,
                available,
                ..
            } => HttpResponse::Conflict().json(serde_json::json!({
                "error": self.to_string(),
                "product_id": product_id,
                "available": available
            })),
            // Storage details are logged, never surfaced.
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}
