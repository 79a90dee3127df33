use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, ProductUpdate, ProductView};

#[derive(Clone)]
pub struct CatalogService<R> {
    repo: R,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_product(&self, product: NewProduct) -> Result<i32, DomainError> {
        validate_fields(&product.price, product.stock_quantity)?;
        self.repo.insert(product)
    }

    pub fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        self.repo.list()
    }

    pub fn get_product(&self, id: i32) -> Result<ProductView, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::ProductNotFound(id))
    }

    /// Update a product the caller owns. `seller_id` never changes.
    pub fn update_product(
        &self,
        user_id: i32,
        product_id: i32,
        fields: ProductUpdate,
    ) -> Result<(), DomainError> {
        validate_fields(&fields.price, fields.stock_quantity)?;
        self.check_ownership(user_id, product_id)?;
        self.repo.update(product_id, fields)
    }

    pub fn delete_product(&self, user_id: i32, product_id: i32) -> Result<(), DomainError> {
        self.check_ownership(user_id, product_id)?;
        self.repo.delete(product_id)
    }

    fn check_ownership(&self, user_id: i32, product_id: i32) -> Result<(), DomainError> {
        let existing = self
            .repo
            .find_by_id(product_id)?
            .ok_or(DomainError::ProductNotFound(product_id))?;
        if existing.seller_id != user_id {
            return Err(DomainError::Forbidden(
                "you do not own this product".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_fields(price: &BigDecimal, stock_quantity: i32) -> Result<(), DomainError> {
    if price <= &BigDecimal::from(0) {
        return Err(DomainError::Validation(
            "price must be greater than zero".to_string(),
        ));
    }
    if stock_quantity < 0 {
        return Err(DomainError::Validation(
            "stock cannot be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    struct InMemoryProducts {
        rows: Mutex<Vec<ProductView>>,
        next_id: Mutex<i32>,
    }

    impl ProductRepository for Arc<InMemoryProducts> {
        fn insert(&self, product: NewProduct) -> Result<i32, DomainError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            self.rows.lock().unwrap().push(ProductView {
                id: *next,
                seller_id: product.seller_id,
                name: product.name,
                description: product.description,
                price: product.price,
                stock_quantity: product.stock_quantity,
                image_url: product.image_url,
                created_at: Utc::now(),
            });
            Ok(*next)
        }

        fn find_by_id(&self, id: i32) -> Result<Option<ProductView>, DomainError> {
            Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        fn list(&self) -> Result<Vec<ProductView>, DomainError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        fn update(&self, id: i32, fields: ProductUpdate) -> Result<(), DomainError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|p| p.id == id).unwrap();
            row.name = fields.name;
            row.description = fields.description;
            row.price = fields.price;
            row.stock_quantity = fields.stock_quantity;
            row.image_url = fields.image_url;
            Ok(())
        }

        fn delete(&self, id: i32) -> Result<(), DomainError> {
            self.rows.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    fn service() -> (Arc<InMemoryProducts>, CatalogService<Arc<InMemoryProducts>>) {
        let repo = Arc::new(InMemoryProducts::default());
        (repo.clone(), CatalogService::new(repo))
    }

    fn sample(seller_id: i32, price: &str) -> NewProduct {
        NewProduct {
            seller_id,
            name: "Keyboard".to_string(),
            description: "Mechanical".to_string(),
            price: BigDecimal::from_str(price).unwrap(),
            stock_quantity: 10,
            image_url: String::new(),
        }
    }

    #[test]
    fn add_product_rejects_non_positive_price() {
        let (_repo, svc) = service();

        for price in ["0", "-1.50"] {
            let err = svc.add_product(sample(1, price)).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "price {}", price);
        }
    }

    #[test]
    fn add_product_rejects_negative_stock() {
        let (_repo, svc) = service();
        let mut product = sample(1, "9.99");
        product.stock_quantity = -1;

        let err = svc.add_product(product).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn add_then_get_roundtrip() {
        let (_repo, svc) = service();

        let id = svc.add_product(sample(1, "9.99")).unwrap();
        let found = svc.get_product(id).unwrap();

        assert_eq!(found.name, "Keyboard");
        assert_eq!(found.seller_id, 1);
    }

    #[test]
    fn update_by_non_owner_is_forbidden() {
        let (_repo, svc) = service();
        let id = svc.add_product(sample(1, "9.99")).unwrap();

        let err = svc
            .update_product(
                2,
                id,
                ProductUpdate {
                    name: "Hijacked".to_string(),
                    description: String::new(),
                    price: BigDecimal::from(1),
                    stock_quantity: 0,
                    image_url: String::new(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn owner_can_update() {
        let (_repo, svc) = service();
        let id = svc.add_product(sample(1, "9.99")).unwrap();

        svc.update_product(
            1,
            id,
            ProductUpdate {
                name: "Keyboard v2".to_string(),
                description: "Mechanical".to_string(),
                price: BigDecimal::from_str("12.50").unwrap(),
                stock_quantity: 5,
                image_url: String::new(),
            },
        )
        .unwrap();

        let found = svc.get_product(id).unwrap();
        assert_eq!(found.name, "Keyboard v2");
        assert_eq!(found.stock_quantity, 5);
    }

    #[test]
    fn delete_by_non_owner_is_forbidden() {
        let (_repo, svc) = service();
        let id = svc.add_product(sample(1, "9.99")).unwrap();

        let err = svc.delete_product(2, id).unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(svc.get_product(id).is_ok());
    }

    #[test]
    fn delete_unknown_product_is_not_found() {
        let (_repo, svc) = service();

        let err = svc.delete_product(1, 404).unwrap_err();

        assert!(matches!(err, DomainError::ProductNotFound(404)));
    }
}
