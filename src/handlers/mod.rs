pub mod identity;
pub mod orders;
pub mod products;

use actix_web::HttpResponse;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Server is healthy")
}
