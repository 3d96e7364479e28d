//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Order, OrderCreate, OrderStatusUpdate};

use crate::api::JsonBody;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    JsonBody(payload): JsonBody<OrderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = state.order_service().create(&user, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Order placed successfully",
            order,
        )),
    ))
}

/// GET /api/orders - newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.order_service().list_for(&user).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.order_service().get_for(&user, &id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// PATCH /api/orders/:id/status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .order_service()
        .update_status(&user, &id, &payload.status)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        "Order status updated successfully",
        order,
    )))
}
