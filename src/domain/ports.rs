use super::errors::DomainError;
use super::order::{CartItem, ListResult, OrderView};
use super::product::{NewProduct, ProductUpdate, ProductView};

pub trait OrderRepository: Send + Sync + 'static {
    /// Atomically place an order for `user_id`.
    ///
    /// `items` must already be validated and canonicalized (positive
    /// quantities, duplicates merged, sorted by product id); the
    /// implementation locks, deducts stock, snapshots prices and writes the
    /// header plus line items in a single transaction.
    fn place(&self, user_id: i32, items: &[CartItem]) -> Result<i32, DomainError>;

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError>;

    fn list_for_user(&self, user_id: i32, page: i64, limit: i64) -> Result<ListResult, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn insert(&self, product: NewProduct) -> Result<i32, DomainError>;

    fn find_by_id(&self, id: i32) -> Result<Option<ProductView>, DomainError>;

    fn list(&self) -> Result<Vec<ProductView>, DomainError>;

    fn update(&self, id: i32, fields: ProductUpdate) -> Result<(), DomainError>;

    fn delete(&self, id: i32) -> Result<(), DomainError>;
}
