//! Authentication Handlers
//!
//! Signup, login and current-profile lookup

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{Role, UserProfile};
use shared::util;

use crate::api::JsonBody;
use crate::auth::{CurrentUser, IdentityError, IdentityMetadata};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};

/// Present, non-blank field value
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /api/auth/signup - register a staff account
///
/// The provider account is created first, then the profile `user:<id>`.
pub async fn signup(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let (Some(email), Some(password), Some(name), Some(role)) = (
        present(req.email),
        present(req.password),
        present(req.name),
        present(req.role),
    ) else {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Missing required fields",
        )
        .with_detail("fields", vec!["email", "password", "name", "role"]));
    };

    let role: Role = role
        .parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidRole).with_detail("role", role.clone()))?;
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    let metadata = IdentityMetadata {
        name: Some(name.clone()),
        role: Some(role.as_str().to_string()),
    };
    let identity = state
        .identity
        .create_user(&email, &password, metadata)
        .await
        .map_err(|e| match e {
            IdentityError::AlreadyExists => AppError::new(ErrorCode::EmailAlreadyExists),
            other => {
                tracing::warn!(error = %other, "Sign up rejected");
                AppError::with_message(ErrorCode::SignupFailed, format!("Sign up failed: {other}"))
            }
        })?;

    let profile = UserProfile {
        id: identity.id,
        email: identity.email,
        name,
        role,
        created_at: util::now(),
    };
    state.user_repo().save(&profile).await?;

    tracing::info!(user_id = %profile.id, role = %profile.role, "User signed up");
    Ok(Json(ApiResponse::success_with_message(
        "User created successfully",
        UserInfo::from(profile),
    )))
}

/// POST /api/auth/login - password sign-in
///
/// Name and role come from the stored profile, falling back to the
/// metadata captured at signup, then to `employee`.
pub async fn login(
    State(state): State<ServerState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Email and password are required",
        ));
    };

    let session = match state.identity.sign_in(&email, &password).await {
        Ok(session) => session,
        Err(IdentityError::Provider(msg)) => {
            return Err(AppError::with_message(ErrorCode::IdentityProviderError, msg));
        }
        Err(e) => {
            security_log!("WARN", "login_failed", email = email.as_str(), error = format!("{}", e));
            return Err(AppError::with_message(
                ErrorCode::InvalidCredentials,
                format!("Login failed: {e}"),
            ));
        }
    };

    let identity = session.identity;
    let profile = state.user_repo().find_by_id(&identity.id).await?;
    let (name, role) = match profile {
        Some(profile) => (profile.name, profile.role),
        None => (
            identity.metadata.name.clone().unwrap_or_default(),
            identity
                .metadata
                .role
                .as_deref()
                .and_then(|r| r.parse().ok())
                .unwrap_or(Role::Employee),
        ),
    };

    tracing::info!(user_id = %identity.id, "User logged in");
    Ok(Json(ApiResponse::success(LoginResponse {
        access_token: session.access_token,
        user: UserInfo {
            id: identity.id,
            email: identity.email,
            name,
            role,
        },
    })))
}

/// GET /api/auth/me - stored profile of the caller
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let profile = state
        .user_repo()
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserProfileNotFound))?;

    Ok(Json(ApiResponse::success(profile)))
}
