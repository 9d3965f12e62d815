use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ProductStore, StorageError};
use crate::catalog::product::Product;

/// Vec-backed store in insertion order. One mutex guards each whole
/// operation so the duplicate-id and existence checks stay atomic with the
/// write that follows them.
#[derive(Default)]
pub struct InMemoryStore {
    products: Mutex<Vec<Product>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given products, mainly for tests.
    pub fn seeded(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn create(&self, product: Product) -> Result<(), StorageError> {
        let mut products = self.products.lock().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(StorageError::DuplicateId);
        }
        products.push(product);
        Ok(())
    }

    async fn update(&self, mut product: Product) -> Result<(), StorageError> {
        let mut products = self.products.lock().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                product.created_at = existing.created_at;
                *existing = product;
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StorageError> {
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.products.lock().await.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut products = self.products.lock().await;
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: i64, brand: &str) -> Product {
        Product {
            id,
            brand: brand.to_string(),
            category: brand.to_string(),
            quantity: 1,
            price: 10.0,
            created_at: Utc.with_ymd_and_hms(2023, 4, 26, 15, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 4, 26, 15, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id_and_leaves_store_unchanged() {
        let store = InMemoryStore::seeded(vec![product(1, "A")]);

        let err = store.create(product(1, "Z")).await.unwrap_err();
        assert!(matches!(err, StorageError::DuplicateId));

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].brand, "A");
    }

    #[tokio::test]
    async fn update_preserves_stored_created_at() {
        let store = InMemoryStore::seeded(vec![product(1, "A")]);
        let original_created_at = store.get_by_id(1).await.unwrap().created_at;

        let mut replacement = product(1, "B");
        replacement.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        replacement.updated_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.update(replacement).await.unwrap();

        let updated = store.get_by_id(1).await.unwrap();
        assert_eq!(updated.brand, "B");
        assert_eq!(updated.created_at, original_created_at);
        assert_eq!(
            updated.updated_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.update(product(7, "A")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_product() {
        let store = InMemoryStore::seeded(vec![product(1, "A"), product(2, "B"), product(3, "C")]);

        store.delete(2).await.unwrap();

        let ids: Vec<i64> = store.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let err = store.delete(2).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn get_all_returns_a_detached_copy() {
        let store = InMemoryStore::seeded(vec![product(1, "A")]);

        let mut first = store.get_all().await.unwrap();
        first.clear();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_all_is_idempotent_between_mutations() {
        let store = InMemoryStore::seeded(vec![product(1, "A"), product(2, "B")]);
        assert_eq!(
            store.get_all().await.unwrap(),
            store.get_all().await.unwrap()
        );
    }
}
