use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{LayoutUpdateRequest, Report, ReportLayout, ReportPreview, ReportRequest};
use crate::utils::{ApiResult, AppJson};

// List reports
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Reports in insertion order", body = Vec<Report>)
    ),
    tag = "Reports"
)]
pub async fn list_reports(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(state.report_service.list().await))
}

// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report", body = Report),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Report>> {
    Ok(Json(state.report_service.get(id).await?))
}

// Create a report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report created", body = Report),
        (status = 400, description = "Missing name or data cards")
    ),
    tag = "Reports"
)]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ReportRequest>,
) -> ApiResult<Json<Report>> {
    tracing::debug!("Report creation request: {} with {} cards", req.name, req.data_card_ids.len());
    Ok(Json(state.report_service.create(req).await?))
}

// Update a report
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report updated", body = Report),
        (status = 400, description = "Missing name or data cards"),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<ReportRequest>,
) -> ApiResult<Json<Report>> {
    Ok(Json(state.report_service.update(id, req).await?))
}

// Delete a report
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<()>> {
    state.report_service.delete(id).await?;
    Ok(Json(()))
}

// Report preview
#[utoipa::path(
    get,
    path = "/api/reports/{id}/preview",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report preview with its resolved cards", body = ReportPreview),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn preview_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ReportPreview>> {
    Ok(Json(state.report_service.preview(id).await?))
}

// Grid placement of the report's cards
#[utoipa::path(
    get,
    path = "/api/reports/{id}/layout",
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Card placements", body = ReportLayout),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn get_report_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ReportLayout>> {
    Ok(Json(state.report_service.layout(id).await?))
}

// Reorder and resize the report's cards
#[utoipa::path(
    put,
    path = "/api/reports/{id}/layout",
    params(("id" = i64, Path, description = "Report ID")),
    request_body = LayoutUpdateRequest,
    responses(
        (status = 200, description = "Layout updated", body = ReportLayout),
        (status = 400, description = "Card order is not a permutation of the report's cards"),
        (status = 404, description = "Report not found")
    ),
    tag = "Reports"
)]
pub async fn update_report_layout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<LayoutUpdateRequest>,
) -> ApiResult<Json<ReportLayout>> {
    tracing::info!("Updating layout of report {}: {:?}", id, req.data_card_ids);
    Ok(Json(state.report_service.update_layout(id, req).await?))
}
