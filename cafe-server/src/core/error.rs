//! Startup and process-level errors
//!
//! Request handlers use [`shared::AppError`]; this type covers what can go
//! wrong before or around serving.

use thiserror::Error;

use crate::auth::JwtError;
use crate::db::StorageError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
