//! Storage layer
//!
//! - [`KvStore`] - key-value collaborator trait
//! - [`RedbStore`] - redb implementation (file or in-memory)
//! - [`repository`] - typed records over the store

pub mod kv;
pub mod redb_store;
pub mod repository;

use std::sync::Arc;

use thiserror::Error;

use crate::core::{Config, StoreBackend};

pub use kv::{Keys, KvStore};
pub use redb_store::RedbStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Open the store selected by configuration
pub fn open_store(config: &Config) -> StorageResult<Arc<dyn KvStore>> {
    let store = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            RedbStore::open_in_memory()?
        }
        StoreBackend::File => {
            let path = config.database_path();
            tracing::info!(path = %path.display(), "Opening redb store");
            RedbStore::open(path)?
        }
    };
    Ok(Arc::new(store))
}
