//! Postgres-backed storage implementation.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE products (
//!     id        BIGINT PRIMARY KEY,
//!     name      TEXT NOT NULL,
//!     price     BIGINT NOT NULL,
//!     quantity  BIGINT NOT NULL
//! );
//!
//! CREATE TABLE orders (
//!     id           UUID PRIMARY KEY,
//!     created_on   TIMESTAMPTZ NOT NULL,
//!     items        JSONB NOT NULL,
//!     user_address JSONB NOT NULL,
//!     total_amount BIGINT NOT NULL
//! );
//! ```
//!
//! ## Error mapping
//!
//! | SQLx error | StoreError | Scenario |
//! |------------|------------|----------|
//! | `Io`, `PoolClosed`, `PoolTimedOut` | `Unavailable` | backend unreachable |
//! | anything else | `Backend` | statement rejected or failed |
//!
//! ## Atomicity
//!
//! Each statement is one atomic operation. No cross-statement transaction
//! wraps the checkout sequence — that is the service's documented semantics,
//! not an oversight (see the checkout service and DESIGN.md).

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use storefront_catalog::{PriceFilter, Product};
use storefront_core::ProductId;
use storefront_orders::Order;

use super::r#trait::{Store, StoreError};

/// Postgres-backed store.
///
/// Uses the SQLx connection pool, which is thread-safe (`Send + Sync`);
/// clones share the pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    /// Create a new store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn map_sqlx_error(op: &'static str, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("{op}: {e}"))
        }
        other => StoreError::Backend(format!("{op}: {other}")),
    }
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::new(row.try_get::<i64, _>("id")?),
        name: row.try_get("name")?,
        price: row.try_get::<i64, _>("price")? as u64,
        quantity: row.try_get("quantity")?,
    })
}

#[async_trait]
impl Store for PostgresStore {
    #[instrument(skip(self), err)]
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, name, price, quantity FROM products WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_product", e))?;

        row.map(|r| product_from_row(&r))
            .transpose()
            .map_err(|e| map_sqlx_error("find_product", e))
    }

    #[instrument(skip(self), err)]
    async fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE products SET quantity = quantity - $2 WHERE id = $1")
            .bind(id.value())
            .bind(i64::from(amount))
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("decrement_stock", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!(
                "decrement_stock: no product with id {id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, filter), err)]
    async fn count_and_slice(
        &self,
        filter: &PriceFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        // Count and slice in one statement over one snapshot of the filtered
        // set. The join keeps the total row even when the page is empty, so
        // an offset past the end still reports the real total.
        let rows = sqlx::query(
            r#"
            WITH filtered AS (
                SELECT id, name, price, quantity
                FROM products
                WHERE ($1::float8 IS NULL OR price >= $1)
                  AND ($2::float8 IS NULL OR price <= $2)
            ),
            page AS (
                SELECT id, name, price, quantity
                FROM filtered
                ORDER BY id ASC
                OFFSET $3 LIMIT $4
            )
            SELECT t.total, p.id, p.name, p.price, p.quantity
            FROM (SELECT COUNT(*) AS total FROM filtered) t
            LEFT JOIN page p ON TRUE
            ORDER BY p.id ASC
            "#,
        )
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("count_and_slice", e))?;

        let total = rows
            .first()
            .map(|r| r.try_get::<i64, _>("total"))
            .transpose()
            .map_err(|e| map_sqlx_error("count_and_slice", e))?
            .unwrap_or(0) as u64;

        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            // NULL product columns mean the page was empty for this window.
            let id: Option<i64> = row
                .try_get("id")
                .map_err(|e| map_sqlx_error("count_and_slice", e))?;
            if id.is_none() {
                continue;
            }
            data.push(product_from_row(row).map_err(|e| map_sqlx_error("count_and_slice", e))?);
        }

        Ok((data, total))
    }

    #[instrument(skip(self, order), fields(order_id = %order.id), err)]
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let items = serde_json::to_value(&order.items)
            .map_err(|e| StoreError::Backend(format!("insert_order: {e}")))?;
        let address = serde_json::to_value(&order.user_address)
            .map_err(|e| StoreError::Backend(format!("insert_order: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, created_on, items, user_address, total_amount)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*order.id.as_uuid())
        .bind(order.created_on)
        .bind(items)
        .bind(address)
        .bind(order.total_amount as i64)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_order", e))?;

        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, price = EXCLUDED.price, quantity = EXCLUDED.quantity
            "#,
        )
        .bind(product.id.value())
        .bind(&product.name)
        .bind(product.price as i64)
        .bind(product.quantity)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_product", e))?;

        Ok(())
    }
}
