//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};
use shared::util;

use crate::api::JsonBody;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_price,
    validate_required_text,
};

fn menu_item_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
}

fn validate_common(
    description: &Option<String>,
    image: &Option<String>,
    price: Option<f64>,
) -> AppResult<()> {
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(image, "image", MAX_URL_LEN)?;
    if let Some(price) = price {
        validate_price(price)?;
    }
    Ok(())
}

/// GET /api/menu - list menu items (`?category=&search=`)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let items = state.menu_repo().find_filtered(&query).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /api/menu/:id - single menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = state
        .menu_repo()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| menu_item_not_found(&id))?;
    Ok(Json(ApiResponse::success(item)))
}

/// POST /api/menu - create a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    JsonBody(payload): JsonBody<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    user.ensure_admin()?;

    let (Some(name), Some(category), Some(_)) = (
        payload.name.as_deref().filter(|n| !n.trim().is_empty()),
        payload.category.as_deref().filter(|c| !c.trim().is_empty()),
        payload.price,
    ) else {
        return Err(AppError::required_fields(&["name", "category", "price"]));
    };
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(category, "category", MAX_NAME_LEN)?;
    validate_common(&payload.description, &payload.image, payload.price)?;

    let item = MenuItem::from_create(util::new_id(), payload, util::now());
    state.menu_repo().save(&item).await?;

    tracing::info!(menu_item_id = %item.id, name = %item.name, admin_id = %user.id, "Menu item created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Menu item created successfully",
            item,
        )),
    ))
}

/// PUT /api/menu/:id - partial update (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    user.ensure_admin()?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
    }
    validate_common(&payload.description, &payload.image, payload.price)?;

    let repo = state.menu_repo();
    let mut item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| menu_item_not_found(&id))?;
    item.apply_update(payload, util::now());
    repo.save(&item).await?;

    tracing::info!(menu_item_id = %item.id, admin_id = %user.id, "Menu item updated");
    Ok(Json(ApiResponse::success_with_message(
        "Menu item updated successfully",
        item,
    )))
}

/// DELETE /api/menu/:id - remove a menu item (admin)
///
/// Existing orders keep their line snapshots.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.ensure_admin()?;

    state.menu_repo().delete(&id).await.map_err(|e| match e {
        RepoError::NotFound(_) => menu_item_not_found(&id),
        other => other.into(),
    })?;

    tracing::info!(menu_item_id = %id, admin_id = %user.id, "Menu item deleted");
    Ok(Json(ApiResponse::ok_with_message(
        "Menu item deleted successfully",
    )))
}
