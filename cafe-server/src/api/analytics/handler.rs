//! Analytics API Handlers

use axum::{Json, extract::State};
use shared::error::{ApiResponse, AppResult};
use shared::models::AnalyticsReport;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::analytics;

/// GET /api/analytics - sales dashboard over every stored order
pub async fn report(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<AnalyticsReport>>> {
    user.ensure_admin()?;

    let orders = state.order_repo().find_all().await?;
    let total_menu_items = state.menu_repo().count().await?;
    let report = analytics::build_report(&orders, total_menu_items)?;

    tracing::debug!(orders = report.total_orders, "Analytics report built");
    Ok(Json(ApiResponse::success(report)))
}
