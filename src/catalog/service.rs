use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::catalog::error::CatalogError;
use crate::catalog::product::Product;
use crate::catalog::subscriber::Subscriber;
use crate::storage::ProductStore;

/// Orchestrates validation, the storage port, and the subscriber registry.
///
/// Every successful mutation pushes the full current catalog to every
/// registered subscriber before the call returns; failed mutations and reads
/// never notify. The service holds no product state of its own between
/// calls; the store owns the collection exclusively.
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    subscribers: RwLock<Vec<Arc<dyn Subscriber>>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub async fn create(&self, mut product: Product) -> Result<(), CatalogError> {
        product.validate().map_err(CatalogError::Validation)?;

        let now = Utc::now();
        product.created_at = now;
        product.updated_at = now;

        self.store.create(product).await?;
        self.notify().await;
        Ok(())
    }

    pub async fn update(&self, mut product: Product) -> Result<(), CatalogError> {
        product.validate().map_err(CatalogError::Validation)?;

        // The store keeps the original created_at; only updated_at moves.
        product.updated_at = Utc::now();

        self.store.update(product).await?;
        self.notify().await;
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, CatalogError> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.store.delete(id).await?;
        self.notify().await;
        Ok(())
    }

    /// Append a subscriber to the registry. Identities are not deduplicated;
    /// a second registration under the same identity receives its own
    /// deliveries and is removed first by `unsubscribe`.
    pub async fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> Result<(), CatalogError> {
        if subscriber.identity().is_empty() {
            return Err(CatalogError::EmptyIdentity);
        }
        self.subscribers.write().await.push(subscriber);
        Ok(())
    }

    /// Remove the first registry entry matching `identity`, preserving the
    /// relative order of the remainder.
    pub async fn unsubscribe(&self, identity: &str) -> Result<(), CatalogError> {
        if identity.is_empty() {
            return Err(CatalogError::EmptyIdentity);
        }

        let mut subscribers = self.subscribers.write().await;
        match subscribers.iter().position(|s| s.identity() == identity) {
            Some(index) => {
                subscribers.remove(index);
                Ok(())
            }
            None => Err(CatalogError::SubscriberNotFound(identity.to_string())),
        }
    }

    /// Push the current catalog to every registered subscriber. Failures in
    /// here stay in here: the triggering mutation is already committed and
    /// its outcome never depends on delivery.
    async fn notify(&self) {
        let snapshot = match self.store.get_all().await {
            Ok(products) => products,
            Err(err) => {
                error!("failed to fetch catalog for notification: {err}");
                return;
            }
        };

        // Deliver against a point-in-time copy of the registry so concurrent
        // subscribe/unsubscribe calls are not blocked behind deliveries.
        let subscribers: Vec<Arc<dyn Subscriber>> = self.subscribers.read().await.clone();

        join_all(subscribers.iter().map(|subscriber| {
            let snapshot = &snapshot;
            async move {
                if let Err(err) = subscriber.deliver(snapshot).await {
                    warn!(
                        identity = subscriber.identity(),
                        "failed to deliver catalog snapshot: {err}"
                    );
                }
            }
        }))
        .await;
    }

    #[cfg(test)]
    async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}
