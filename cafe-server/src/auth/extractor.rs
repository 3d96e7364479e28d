//! Current user context and extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::{AppError, AppResult};
use shared::models::{Role, UserProfile};

use crate::auth::identity::Identity;
use crate::core::ServerState;
use crate::security_log;

/// Authenticated caller, injected by [`require_auth`](super::require_auth)
///
/// `role` is `None` when the identity has no stored profile; such callers are
/// treated as non-admin.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
}

impl CurrentUser {
    pub fn new(identity: Identity, profile: Option<UserProfile>) -> Self {
        match profile {
            Some(profile) => Self {
                id: identity.id,
                email: identity.email,
                name: profile.name,
                role: Some(profile.role),
            },
            None => Self {
                name: identity.metadata.name.unwrap_or_default(),
                id: identity.id,
                email: identity.email,
                role: None,
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// 403 `AdminRequired` for non-admins
    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            return Ok(());
        }
        security_log!(
            "WARN",
            "admin_required",
            user_id = self.id.clone(),
            email = self.email.clone(),
            user_role = format!("{:?}", self.role)
        );
        Err(AppError::admin_required())
    }

    /// Owner or admin may read an order
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin() || self.id == owner_id
    }
}

/// Extract the [`CurrentUser`] placed in request extensions by the auth
/// middleware. Routes skipped by the middleware reject with 401.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}
