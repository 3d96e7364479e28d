use axum::{Json, extract::State};
use shared::client::SampleDataResult;
use shared::error::{ApiResponse, AppResult};

use crate::core::ServerState;
use crate::services::{SeedOutcome, seed_sample_menu};

/// POST /api/init-sample-data
pub async fn init_sample_data(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<SampleDataResult>>> {
    let response = match seed_sample_menu(&state.menu_repo()).await? {
        SeedOutcome::AlreadySeeded => ApiResponse::success_with_message(
            "Sample data already exists",
            SampleDataResult { item_count: 0 },
        ),
        SeedOutcome::Seeded(item_count) => ApiResponse::success_with_message(
            "Sample data initialized successfully",
            SampleDataResult { item_count },
        ),
    };
    Ok(Json(response))
}
