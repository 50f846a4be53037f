use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{Dimension, Metric, MetricPreview, MetricQuery, MetricRequest};
use crate::utils::{ApiResult, AppJson, AppQuery};

// List metrics
#[utoipa::path(
    get,
    path = "/api/metrics",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name, display name or formula"),
        ("data_source_id" = Option<i64>, Query, description = "Only metrics of this data source")
    ),
    responses(
        (status = 200, description = "Metrics in insertion order", body = Vec<Metric>)
    ),
    tag = "Metrics"
)]
pub async fn list_metrics(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<MetricQuery>,
) -> ApiResult<Json<Vec<Metric>>> {
    Ok(Json(state.metric_service.list(&query).await))
}

// Get metric by ID
#[utoipa::path(
    get,
    path = "/api/metrics/{id}",
    params(("id" = i64, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Metric", body = Metric),
        (status = 404, description = "Metric not found")
    ),
    tag = "Metrics"
)]
pub async fn get_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Metric>> {
    Ok(Json(state.metric_service.get(id).await?))
}

// Create a metric
#[utoipa::path(
    post,
    path = "/api/metrics",
    request_body = MetricRequest,
    responses(
        (status = 200, description = "Metric created with its generated formula", body = Metric),
        (status = 400, description = "Missing required field, field selection or formula")
    ),
    tag = "Metrics"
)]
pub async fn create_metric(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<MetricRequest>,
) -> ApiResult<Json<Metric>> {
    Ok(Json(state.metric_service.create(req).await?))
}

// Update a metric
#[utoipa::path(
    put,
    path = "/api/metrics/{id}",
    params(("id" = i64, Path, description = "Metric ID")),
    request_body = MetricRequest,
    responses(
        (status = 200, description = "Metric updated", body = Metric),
        (status = 400, description = "Missing required field, field selection or formula"),
        (status = 404, description = "Metric not found")
    ),
    tag = "Metrics"
)]
pub async fn update_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<MetricRequest>,
) -> ApiResult<Json<Metric>> {
    Ok(Json(state.metric_service.update(id, req).await?))
}

// Delete a metric
#[utoipa::path(
    delete,
    path = "/api/metrics/{id}",
    params(("id" = i64, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Metric deleted"),
        (status = 404, description = "Metric not found")
    ),
    tag = "Metrics"
)]
pub async fn delete_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<()>> {
    state.metric_service.delete(id).await?;
    Ok(Json(()))
}

// Metric preview
#[utoipa::path(
    get,
    path = "/api/metrics/{id}/preview",
    params(("id" = i64, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Metric preview", body = MetricPreview),
        (status = 404, description = "Metric not found")
    ),
    tag = "Metrics"
)]
pub async fn preview_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MetricPreview>> {
    Ok(Json(state.metric_service.preview(id).await?))
}

// Dimensions that fit a metric
#[utoipa::path(
    get,
    path = "/api/metrics/{id}/recommended-dimensions",
    params(("id" = i64, Path, description = "Metric ID")),
    responses(
        (status = 200, description = "Dimensions of the same data source, time dimensions first", body = Vec<Dimension>),
        (status = 404, description = "Metric not found")
    ),
    tag = "Metrics"
)]
pub async fn recommended_dimensions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Dimension>>> {
    let metric = state.metric_service.get(id).await?;
    Ok(Json(state.dimension_service.recommend_for(&metric).await))
}
