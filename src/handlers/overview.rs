use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::Overview;
use crate::utils::ApiResult;

// Get workspace overview
#[utoipa::path(
    get,
    path = "/api/overview",
    responses(
        (status = 200, description = "Entity counts and recently updated items", body = Overview)
    ),
    tag = "Overview"
)]
pub async fn get_overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<Overview>> {
    Ok(Json(state.overview_service.overview().await))
}
