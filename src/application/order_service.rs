use std::collections::BTreeMap;

use crate::domain::errors::DomainError;
use crate::domain::order::{CartItem, ListResult, OrderView};
use crate::domain::ports::OrderRepository;

#[derive(Clone)]
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Place an order for `user_id`.
    ///
    /// Malformed carts are rejected here, before any transaction is opened.
    /// Duplicate product ids are merged by summing their quantities, and the
    /// merged list is handed to the repository sorted by product id so that
    /// row locks are always acquired in the same order regardless of how the
    /// caller arranged the cart.
    pub fn place_order(&self, user_id: i32, items: &[CartItem]) -> Result<i32, DomainError> {
        let canonical = canonicalize(items)?;
        self.repo.place(user_id, &canonical)
    }

    /// Fetch one order. Orders belonging to another user read as not-found
    /// so callers cannot probe for foreign order ids.
    pub fn get_order(&self, user_id: i32, order_id: i32) -> Result<OrderView, DomainError> {
        match self.repo.find_by_id(order_id)? {
            Some(order) if order.user_id == user_id => Ok(order),
            _ => Err(DomainError::OrderNotFound),
        }
    }

    pub fn list_orders(
        &self,
        user_id: i32,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        self.repo.list_for_user(user_id, page, limit)
    }
}

fn canonicalize(items: &[CartItem]) -> Result<Vec<CartItem>, DomainError> {
    if items.is_empty() {
        return Err(DomainError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }

    // BTreeMap both merges duplicates and yields product ids in ascending
    // order, which is the canonical lock-acquisition order.
    let mut merged: BTreeMap<i32, i32> = BTreeMap::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(DomainError::Validation(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }
        let entry = merged.entry(item.product_id).or_insert(0);
        *entry = entry.checked_add(item.quantity).ok_or_else(|| {
            DomainError::Validation(format!(
                "total quantity for product {} is too large",
                item.product_id
            ))
        })?;
    }

    Ok(merged
        .into_iter()
        .map(|(product_id, quantity)| CartItem {
            product_id,
            quantity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::*;
    use crate::domain::order::{OrderItemView, STATUS_PLACED};

    /// Records what the repository was asked to do; never touches a database.
    #[derive(Default)]
    struct RecordingRepo {
        placed: Mutex<Vec<(i32, Vec<CartItem>)>>,
        stored: Mutex<Vec<OrderView>>,
    }

    impl OrderRepository for std::sync::Arc<RecordingRepo> {
        fn place(&self, user_id: i32, items: &[CartItem]) -> Result<i32, DomainError> {
            self.placed.lock().unwrap().push((user_id, items.to_vec()));
            Ok(42)
        }

        fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == id)
                .cloned())
        }

        fn list_for_user(
            &self,
            user_id: i32,
            _page: i64,
            _limit: i64,
        ) -> Result<ListResult, DomainError> {
            let items: Vec<OrderView> = self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect();
            let total = items.len() as i64;
            Ok(ListResult { items, total })
        }
    }

    fn service() -> (std::sync::Arc<RecordingRepo>, OrderService<std::sync::Arc<RecordingRepo>>) {
        let repo = std::sync::Arc::new(RecordingRepo::default());
        (repo.clone(), OrderService::new(repo))
    }

    fn item(product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            product_id,
            quantity,
        }
    }

    fn stored_order(id: i32, user_id: i32) -> OrderView {
        OrderView {
            id,
            user_id,
            total_amount: BigDecimal::from(10),
            status: STATUS_PLACED.to_string(),
            created_at: Utc::now(),
            items: vec![OrderItemView {
                product_id: 1,
                quantity: 1,
                price_at_time: BigDecimal::from(10),
            }],
        }
    }

    #[test]
    fn empty_cart_is_rejected_before_reaching_the_repository() {
        let (repo, svc) = service();

        let err = svc.place_order(1, &[]).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repo.placed.lock().unwrap().is_empty());
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let (repo, svc) = service();

        for qty in [0, -3] {
            let err = svc.place_order(1, &[item(7, qty)]).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "qty {}", qty);
        }
        assert!(repo.placed.lock().unwrap().is_empty());
    }

    #[test]
    fn duplicate_products_are_merged() {
        let (repo, svc) = service();

        svc.place_order(1, &[item(5, 2), item(5, 3)]).unwrap();

        let placed = repo.placed.lock().unwrap();
        assert_eq!(placed[0].1, vec![item(5, 5)]);
    }

    #[test]
    fn items_are_sorted_by_product_id() {
        let (repo, svc) = service();

        svc.place_order(1, &[item(9, 1), item(2, 1), item(4, 1)])
            .unwrap();

        let placed = repo.placed.lock().unwrap();
        assert_eq!(placed[0].1, vec![item(2, 1), item(4, 1), item(9, 1)]);
    }

    #[test]
    fn merged_quantity_overflow_is_a_validation_error() {
        let (repo, svc) = service();

        let err = svc
            .place_order(1, &[item(5, i32::MAX), item(5, 1)])
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repo.placed.lock().unwrap().is_empty());
    }

    #[test]
    fn place_order_returns_repository_order_id() {
        let (_repo, svc) = service();

        let id = svc.place_order(3, &[item(1, 1)]).unwrap();

        assert_eq!(id, 42);
    }

    #[test]
    fn get_order_returns_own_order() {
        let (repo, svc) = service();
        repo.stored.lock().unwrap().push(stored_order(10, 3));

        let order = svc.get_order(3, 10).unwrap();

        assert_eq!(order.id, 10);
    }

    #[test]
    fn get_order_hides_foreign_orders() {
        let (repo, svc) = service();
        repo.stored.lock().unwrap().push(stored_order(10, 3));

        let err = svc.get_order(99, 10).unwrap_err();

        assert!(matches!(err, DomainError::OrderNotFound));
    }

    #[test]
    fn get_order_unknown_id_is_not_found() {
        let (_repo, svc) = service();

        let err = svc.get_order(3, 123).unwrap_err();

        assert!(matches!(err, DomainError::OrderNotFound));
    }

    #[test]
    fn list_orders_only_sees_own_orders() {
        let (repo, svc) = service();
        repo.stored.lock().unwrap().push(stored_order(10, 3));
        repo.stored.lock().unwrap().push(stored_order(11, 4));

        let result = svc.list_orders(3, 1, 20).unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].id, 10);
    }
}
