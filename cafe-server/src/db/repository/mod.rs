//! Repository Module
//!
//! Typed access to records stored in the [`KvStore`](super::KvStore).

pub mod menu;
pub mod order;
pub mod user;

pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use user::UserRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::StorageError;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Storage(e) => AppError::storage(e.to_string()),
            RepoError::Serialization(e) => {
                AppError::internal(format!("Malformed stored record: {e}"))
            }
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

fn to_value<T: Serialize>(record: &T) -> RepoResult<Value> {
    Ok(serde_json::to_value(record)?)
}

fn from_value<T: DeserializeOwned>(value: Value) -> RepoResult<T> {
    Ok(serde_json::from_value(value)?)
}

/// Decode a prefix scan; one malformed document fails the whole read
fn decode_all<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> RepoResult<Vec<T>> {
    values
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| {
                tracing::error!(kind = kind, error = %e, "Malformed stored record");
                RepoError::Serialization(e)
            })
        })
        .collect()
}
