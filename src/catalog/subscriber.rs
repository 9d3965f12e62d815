use async_trait::async_trait;

use crate::catalog::product::Product;

/// A live observer of the catalog.
///
/// `deliver` receives the full catalog after every successful mutation, in
/// lieu of incremental diffs, so a freshly connected observer is always
/// consistent with storage. `identity` must be stable for the lifetime of
/// the connection so the registry can remove the entry again.
#[async_trait]
pub trait Subscriber: Send + Sync {
    async fn deliver(&self, snapshot: &[Product]) -> anyhow::Result<()>;

    fn identity(&self) -> &str;
}
