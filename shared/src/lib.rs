//! Shared types for the cafe service
//!
//! Common types used across cafe-server and cafe-client including wire
//! models, error types, response structures and the client-side cart.

pub mod cart;
pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
