use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::{CompatibilityCheckRequest, CompatibilityReport};
use crate::utils::{ApiResult, AppJson};

// Check whether a dimension can group a metric
#[utoipa::path(
    post,
    path = "/api/compatibility/check",
    request_body = CompatibilityCheckRequest,
    responses(
        (status = 200, description = "Compatibility verdict", body = CompatibilityReport),
        (status = 404, description = "Dimension or metric not found")
    ),
    tag = "Compatibility"
)]
pub async fn check_compatibility(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CompatibilityCheckRequest>,
) -> ApiResult<Json<CompatibilityReport>> {
    let report = state.compatibility_service.check(req.dimension_id, req.metric_id).await?;
    tracing::debug!(
        "Compatibility of dimension {} and metric {}: {:?}",
        req.dimension_id,
        req.metric_id,
        report.level
    );
    Ok(Json(report))
}
