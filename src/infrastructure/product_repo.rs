use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, ProductUpdate, ProductView};
use crate::schema::products;

use super::models::{NewProductRow, ProductRow};

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn insert(&self, product: NewProduct) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(products::table)
            .values(&NewProductRow {
                seller_id: product.seller_id,
                name: product.name,
                description: product.description,
                price: product.price,
                stock_quantity: product.stock_quantity,
                image_url: product.image_url,
            })
            .returning(products::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(to_view))
    }

    fn list(&self) -> Result<Vec<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::id.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(to_view).collect())
    }

    fn update(&self, id: i32, fields: ProductUpdate) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::update(products::table.find(id))
            .set((
                products::name.eq(fields.name),
                products::description.eq(fields.description),
                products::price.eq(fields.price),
                products::stock_quantity.eq(fields.stock_quantity),
                products::image_url.eq(fields.image_url),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(products::table.find(id)).execute(&mut conn)?;

        Ok(())
    }
}

fn to_view(row: ProductRow) -> ProductView {
    ProductView {
        id: row.id,
        seller_id: row.seller_id,
        name: row.name,
        description: row.description,
        price: row.price,
        stock_quantity: row.stock_quantity,
        image_url: row.image_url,
        created_at: row.created_at,
    }
}
