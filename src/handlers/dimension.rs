use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{Dimension, DimensionPreview, DimensionQuery, DimensionRequest};
use crate::utils::{ApiResult, AppJson, AppQuery};

// List dimensions
#[utoipa::path(
    get,
    path = "/api/dimensions",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name, display name or field"),
        ("type" = Option<String>, Query, description = "time, business, geography or other")
    ),
    responses(
        (status = 200, description = "Dimensions in insertion order", body = Vec<Dimension>)
    ),
    tag = "Dimensions"
)]
pub async fn list_dimensions(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<DimensionQuery>,
) -> ApiResult<Json<Vec<Dimension>>> {
    Ok(Json(state.dimension_service.list(&query).await))
}

// Get dimension by ID
#[utoipa::path(
    get,
    path = "/api/dimensions/{id}",
    params(("id" = i64, Path, description = "Dimension ID")),
    responses(
        (status = 200, description = "Dimension", body = Dimension),
        (status = 404, description = "Dimension not found")
    ),
    tag = "Dimensions"
)]
pub async fn get_dimension(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Dimension>> {
    Ok(Json(state.dimension_service.get(id).await?))
}

// Create a dimension
#[utoipa::path(
    post,
    path = "/api/dimensions",
    request_body = DimensionRequest,
    responses(
        (status = 200, description = "Dimension created", body = Dimension),
        (status = 400, description = "Missing required field or hierarchy fields")
    ),
    tag = "Dimensions"
)]
pub async fn create_dimension(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<DimensionRequest>,
) -> ApiResult<Json<Dimension>> {
    Ok(Json(state.dimension_service.create(req).await?))
}

// Update a dimension
#[utoipa::path(
    put,
    path = "/api/dimensions/{id}",
    params(("id" = i64, Path, description = "Dimension ID")),
    request_body = DimensionRequest,
    responses(
        (status = 200, description = "Dimension updated", body = Dimension),
        (status = 400, description = "Missing required field or hierarchy fields"),
        (status = 404, description = "Dimension not found")
    ),
    tag = "Dimensions"
)]
pub async fn update_dimension(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<DimensionRequest>,
) -> ApiResult<Json<Dimension>> {
    Ok(Json(state.dimension_service.update(id, req).await?))
}

// Delete a dimension
#[utoipa::path(
    delete,
    path = "/api/dimensions/{id}",
    params(("id" = i64, Path, description = "Dimension ID")),
    responses(
        (status = 200, description = "Dimension deleted"),
        (status = 404, description = "Dimension not found")
    ),
    tag = "Dimensions"
)]
pub async fn delete_dimension(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<()>> {
    state.dimension_service.delete(id).await?;
    Ok(Json(()))
}

// Dimension preview with sample values
#[utoipa::path(
    get,
    path = "/api/dimensions/{id}/preview",
    params(("id" = i64, Path, description = "Dimension ID")),
    responses(
        (status = 200, description = "Dimension preview", body = DimensionPreview),
        (status = 404, description = "Dimension not found")
    ),
    tag = "Dimensions"
)]
pub async fn preview_dimension(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DimensionPreview>> {
    Ok(Json(state.dimension_service.preview(id).await?))
}
