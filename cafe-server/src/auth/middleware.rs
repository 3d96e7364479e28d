//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;
use shared::error::{AppError, AppResult};

use crate::auth::identity::IdentityError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;

/// Routes reachable without a token
fn is_public_route(method: &Method, path: &str) -> bool {
    match *method {
        Method::POST => matches!(
            path,
            "/api/auth/signup" | "/api/auth/login" | "/api/init-sample-data"
        ),
        Method::GET => path == "/api/menu" || is_menu_item_path(path),
        _ => false,
    }
}

/// `/api/menu/{id}`
fn is_menu_item_path(path: &str) -> bool {
    path.strip_prefix("/api/menu/")
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

/// Authentication middleware
///
/// Extracts `Authorization: Bearer <token>`, verifies it through the identity
/// provider, loads the caller's profile and inserts [`CurrentUser`] into the
/// request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - public routes: signup, login, menu reads, sample data
///
/// # Errors
///
/// | Condition | Status |
/// |-----------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | malformed header / rejected token | 401 TokenInvalid |
/// | expired token | 401 TokenExpired |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let identity = match state.identity.verify_token(token).await {
        Ok(identity) => identity,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return Err(match e {
                IdentityError::TokenExpired => AppError::token_expired(),
                IdentityError::Provider(msg) => {
                    AppError::with_message(shared::ErrorCode::IdentityProviderError, msg)
                }
                _ => AppError::invalid_token("Unauthorized - Invalid token"),
            });
        }
    };

    let profile = UserRepository::new(state.store.clone())
        .find_by_id(&identity.id)
        .await?;
    if profile.is_none() {
        tracing::warn!(user_id = %identity.id, "Authenticated user has no profile");
    }

    req.extensions_mut()
        .insert(CurrentUser::new(identity, profile));
    Ok(next.run(req).await)
}

/// Admin middleware: requires `role == admin`
///
/// Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> AppResult<Response> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;
    user.ensure_admin()?;

    Ok(next.run(req).await)
}
