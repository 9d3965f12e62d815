use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{ProductStore, StorageError};
use crate::catalog::product::Product;

// SQLSTATE for a violated unique constraint; the primary key on `id` turns
// concurrent duplicate inserts into this code.
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed store. Uniqueness and existence guarantees come from the
/// database itself: the primary key rejects duplicate ids and
/// `rows_affected` reveals missing rows on update/delete.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the products table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new().connect(database_url).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id BIGINT PRIMARY KEY,
                brand TEXT NOT NULL,
                category TEXT NOT NULL,
                quantity BIGINT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn create(&self, product: Product) -> Result<(), StorageError> {
        let result = sqlx::query(
            "INSERT INTO products (id, brand, category, quantity, price, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(product.id)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.quantity)
        .bind(product.price)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(StorageError::DuplicateId)
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn update(&self, product: Product) -> Result<(), StorageError> {
        // created_at is deliberately absent from the SET list.
        let result = sqlx::query(
            "UPDATE products
             SET brand = $2, category = $3, quantity = $4, price = $5, updated_at = $6
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.quantity)
        .bind(product.price)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StorageError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, brand, category, quantity, price, created_at, updated_at
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Product>, StorageError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, brand, category, quantity, price, created_at, updated_at
             FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
