//! Key-value store abstraction
//!
//! Records are JSON documents addressed by prefixed string keys
//! (`user:<id>`, `menu:<id>`, `order:<id>`, `auth:<email>`).

use async_trait::async_trait;
use serde_json::Value;

use super::StorageResult;

/// Key-value collaborator used by repositories and the local identity provider
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug {
    /// Read one document
    async fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Insert or overwrite one document
    async fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Remove one document, returning whether it existed
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// All documents whose key starts with `prefix`, in key order
    async fn get_by_prefix(&self, prefix: &str) -> StorageResult<Vec<Value>>;
}

/// Key builders
pub struct Keys;

impl Keys {
    pub const USER: &'static str = "user:";
    pub const MENU: &'static str = "menu:";
    pub const ORDER: &'static str = "order:";
    pub const AUTH: &'static str = "auth:";

    pub fn user(id: &str) -> String {
        format!("{}{}", Self::USER, id)
    }

    pub fn menu(id: &str) -> String {
        format!("{}{}", Self::MENU, id)
    }

    pub fn order(id: &str) -> String {
        format!("{}{}", Self::ORDER, id)
    }

    /// Credential key; emails are matched case-insensitively
    pub fn auth(email: &str) -> String {
        format!("{}{}", Self::AUTH, email.trim().to_lowercase())
    }
}
