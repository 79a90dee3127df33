pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::catalog_service::CatalogService;
use application::order_service::OrderService;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::product_repo::DieselProductRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::orders::place_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
    ),
    components(schemas(
        handlers::products::ProductRequest,
        handlers::products::ProductResponse,
        handlers::products::CreatedResponse,
        handlers::orders::OrderItemRequest,
        handlers::orders::PlaceOrderRequest,
        handlers::orders::PlaceOrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
        handlers::orders::ListOrdersResponse,
    )),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order placement and history"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let orders = OrderService::new(DieselOrderRepository::new(pool.clone()));
    let catalog = CatalogService::new(DieselProductRepository::new(pool));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(orders.clone()))
            .app_data(web::Data::new(catalog.clone()))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/products", web::get().to(handlers::products::list_products))
                    .route("/products", web::post().to(handlers::products::create_product))
                    .route("/products/{id}", web::get().to(handlers::products::get_product))
                    .route("/products/{id}", web::put().to(handlers::products::update_product))
                    .route(
                        "/products/{id}",
                        web::delete().to(handlers::products::delete_product),
                    )
                    .route("/orders", web::post().to(handlers::orders::place_order))
                    .route("/orders", web::get().to(handlers::orders::list_orders))
                    .route("/orders/{id}", web::get().to(handlers::orders::get_order)),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
