use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::product::Product;

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("found duplicate id")]
    DuplicateId,

    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence contract the catalog service depends on.
///
/// Implementations own the durable collection exclusively and confine their
/// side effects to it; notifying subscribers is the service's job alone.
/// `get_all` order is backend-defined but stable within one backend.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product; fails with `DuplicateId` if the id is taken.
    async fn create(&self, product: Product) -> Result<(), StorageError>;

    /// Replace all mutable fields for the product's id, preserving the
    /// stored `created_at`. Fails with `NotFound` for an unknown id.
    async fn update(&self, product: Product) -> Result<(), StorageError>;

    async fn get_by_id(&self, id: i64) -> Result<Product, StorageError>;

    async fn get_all(&self) -> Result<Vec<Product>, StorageError>;

    async fn delete(&self, id: i64) -> Result<(), StorageError>;
}
