//! Locked access to the per-product price and stock counters.
//!
//! Both functions must run inside the transaction that coordinates the
//! order: `lock_and_read` takes the row lock (`SELECT ... FOR UPDATE`) that
//! makes the subsequent stock check trustworthy, and `decrement` relies on
//! that check having happened under the same lock. A concurrent order for
//! the same product blocks at `lock_and_read` until this transaction commits
//! or rolls back.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::schema::products;

/// Lock the product row and return its current `(price, stock_quantity)`,
/// or `None` when the product does not exist.
pub fn lock_and_read(
    conn: &mut PgConnection,
    product_id: i32,
) -> QueryResult<Option<(BigDecimal, i32)>> {
    products::table
        .find(product_id)
        .select((products::price, products::stock_quantity))
        .for_update()
        .first::<(BigDecimal, i32)>(conn)
        .optional()
}

/// Deduct `quantity` units. The caller has already verified availability
/// under the lock from `lock_and_read`; no re-validation happens here.
pub fn decrement(conn: &mut PgConnection, product_id: i32, quantity: i32) -> QueryResult<()> {
    diesel::update(products::table.find(product_id))
        .set(products::stock_quantity.eq(products::stock_quantity - quantity))
        .execute(conn)?;
    Ok(())
}
