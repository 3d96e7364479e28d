//! Identity provider
//!
//! Account creation, password sign-in and token verification are delegated
//! to an [`IdentityProvider`]. [`LocalIdentityProvider`] keeps credentials in
//! the key-value store under `auth:<email>` and issues JWTs.

use std::sync::Arc;

use argon2::{
    Argon2, Params,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::jwt::{JwtError, JwtService};
use crate::db::{Keys, KvStore, StorageError};

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// Profile hints stored with the credential at signup
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    /// Provider subject, also the profile id
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub metadata: IdentityMetadata,
}

/// Result of a successful sign-in
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub identity: Identity,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("User with this email already exists")]
    AlreadyExists,

    #[error("{0}")]
    Rejected(String),

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

impl From<StorageError> for IdentityError {
    fn from(err: StorageError) -> Self {
        IdentityError::Provider(err.to_string())
    }
}

impl From<JwtError> for IdentityError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => IdentityError::TokenExpired,
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => {
                IdentityError::Provider(msg)
            }
            other => IdentityError::InvalidToken(other.to_string()),
        }
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Authentication collaborator
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Register a confirmed account
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        metadata: IdentityMetadata,
    ) -> IdentityResult<Identity>;

    /// Password sign-in
    async fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Session>;

    /// Resolve an access token to its identity
    async fn verify_token(&self, token: &str) -> IdentityResult<Identity>;
}

/// Stored credential record (`auth:<email>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialRecord {
    user_id: String,
    email: String,
    /// Argon2 PHC string
    password_hash: String,
    #[serde(default)]
    metadata: IdentityMetadata,
    created_at: DateTime<Utc>,
}

impl CredentialRecord {
    fn identity(&self) -> Identity {
        Identity {
            id: self.user_id.clone(),
            email: self.email.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Identity provider backed by the key-value store
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider {
    store: Arc<dyn KvStore>,
    jwt: Arc<JwtService>,
    params: Params,
}

impl LocalIdentityProvider {
    pub fn new(store: Arc<dyn KvStore>, jwt: Arc<JwtService>) -> Self {
        Self {
            store,
            jwt,
            params: Params::default(),
        }
    }

    /// Override Argon2 cost parameters (tests use the minimum)
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    fn hash_password(&self, password: &str) -> IdentityResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        );
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| IdentityError::Provider(format!("Password hashing failed: {e}")))
    }

    fn verify_password(hash: &str, password: &str) -> IdentityResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| IdentityError::Provider(format!("Corrupt password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    async fn load_credential(&self, email: &str) -> IdentityResult<Option<CredentialRecord>> {
        match self.store.get(&Keys::auth(email)).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| IdentityError::Provider(format!("Corrupt credential record: {e}"))),
            None => Ok(None),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        metadata: IdentityMetadata,
    ) -> IdentityResult<Identity> {
        let email = email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            return Err(IdentityError::Rejected(format!("Invalid email address: {email}")));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.load_credential(&email).await?.is_some() {
            return Err(IdentityError::AlreadyExists);
        }

        let record = CredentialRecord {
            user_id: shared::util::new_id(),
            email: email.clone(),
            password_hash: self.hash_password(password)?,
            metadata,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&record)
            .map_err(|e| IdentityError::Provider(e.to_string()))?;
        self.store.set(&Keys::auth(&email), value).await?;

        tracing::info!(user_id = %record.user_id, email = %email, "Identity created");
        Ok(record.identity())
    }

    async fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Session> {
        let record = self
            .load_credential(email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !Self::verify_password(&record.password_hash, password)? {
            return Err(IdentityError::InvalidCredentials);
        }

        let access_token = self.jwt.generate_token(&record.user_id, &record.email)?;
        Ok(Session {
            access_token,
            identity: record.identity(),
        })
    }

    async fn verify_token(&self, token: &str) -> IdentityResult<Identity> {
        let claims = self.jwt.validate_token(token)?;

        // Deleted credentials invalidate outstanding tokens
        let record = self
            .load_credential(&claims.email)
            .await?
            .filter(|r| r.user_id == claims.sub)
            .ok_or_else(|| IdentityError::InvalidToken("Unknown subject".to_string()))?;

        Ok(record.identity())
    }
}
