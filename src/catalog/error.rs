use thiserror::Error;

use crate::storage::StorageError;

/// Typed outcomes of catalog service operations. Every variant is a normal
/// result of a call; nothing in here is fatal to the process.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("validation errors: {0:?}")]
    Validation(Vec<String>),

    #[error("found duplicate id")]
    DuplicateId,

    #[error("product not found")]
    NotFound,

    #[error("id should not be empty")]
    EmptyIdentity,

    #[error("subscriber with {0} id not found")]
    SubscriberNotFound(String),

    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateId => CatalogError::DuplicateId,
            StorageError::NotFound => CatalogError::NotFound,
            other => CatalogError::Storage(other),
        }
    }
}
