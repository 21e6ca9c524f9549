//! PostgreSQL product repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::ProductRow;
use crate::repo::{CreateProduct, ProductRepository, UpdateProduct};

/// PostgreSQL product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: CreateProduct) -> DbResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO products (title, price, description, available, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.available)
        .bind(&product.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<ProductRow>> {
        let product = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, description, available, image_url, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self) -> DbResult<Vec<ProductRow>> {
        let products = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, description, available, image_url, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update(&self, id: i64, update: UpdateProduct) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET title = $1, price = $2, description = $3, available = $4, image_url = $5
            WHERE id = $6
            "#,
        )
        .bind(&update.title)
        .bind(update.price)
        .bind(&update.description)
        .bind(update.available)
        .bind(&update.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
