use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{
    ConnectionTestResponse, DataSource, DataSourceDetail, DataSourceQuery, DataSourceRequest,
};
use crate::utils::{ApiResult, AppJson, AppQuery};

// List data sources
#[utoipa::path(
    get,
    path = "/api/data-sources",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
        ("type" = Option<String>, Query, description = "Data source type, e.g. mysql or iot")
    ),
    responses(
        (status = 200, description = "Data sources in insertion order", body = Vec<DataSource>)
    ),
    tag = "Data Sources"
)]
pub async fn list_data_sources(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<DataSourceQuery>,
) -> ApiResult<Json<Vec<DataSource>>> {
    Ok(Json(state.data_source_service.list(&query).await))
}

// Get data source by ID
#[utoipa::path(
    get,
    path = "/api/data-sources/{id}",
    params(("id" = i64, Path, description = "Data source ID")),
    responses(
        (status = 200, description = "Data source", body = DataSource),
        (status = 404, description = "Data source not found")
    ),
    tag = "Data Sources"
)]
pub async fn get_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataSource>> {
    Ok(Json(state.data_source_service.get(id).await?))
}

// Register a data source
#[utoipa::path(
    post,
    path = "/api/data-sources",
    request_body = DataSourceRequest,
    responses(
        (status = 200, description = "Data source created", body = DataSource),
        (status = 400, description = "Missing name or mismatched connection config")
    ),
    tag = "Data Sources"
)]
pub async fn create_data_source(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<DataSourceRequest>,
) -> ApiResult<Json<DataSource>> {
    tracing::debug!("Data source creation request: {} ({:?})", req.name, req.source_type);
    Ok(Json(state.data_source_service.create(req).await?))
}

// Update a data source
#[utoipa::path(
    put,
    path = "/api/data-sources/{id}",
    params(("id" = i64, Path, description = "Data source ID")),
    request_body = DataSourceRequest,
    responses(
        (status = 200, description = "Data source updated", body = DataSource),
        (status = 400, description = "Missing name or mismatched connection config"),
        (status = 404, description = "Data source not found")
    ),
    tag = "Data Sources"
)]
pub async fn update_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<DataSourceRequest>,
) -> ApiResult<Json<DataSource>> {
    Ok(Json(state.data_source_service.update(id, req).await?))
}

// Delete a data source
#[utoipa::path(
    delete,
    path = "/api/data-sources/{id}",
    params(("id" = i64, Path, description = "Data source ID")),
    responses(
        (status = 200, description = "Data source deleted"),
        (status = 404, description = "Data source not found")
    ),
    tag = "Data Sources"
)]
pub async fn delete_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<()>> {
    state.data_source_service.delete(id).await?;
    Ok(Json(()))
}

// Data source detail view
#[utoipa::path(
    get,
    path = "/api/data-sources/{id}/preview",
    params(("id" = i64, Path, description = "Data source ID")),
    responses(
        (status = 200, description = "Data source detail", body = DataSourceDetail),
        (status = 404, description = "Data source not found")
    ),
    tag = "Data Sources"
)]
pub async fn preview_data_source(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataSourceDetail>> {
    Ok(Json(state.data_source_service.detail(id).await?))
}

// Simulated connection test
#[utoipa::path(
    post,
    path = "/api/data-sources/{id}/test",
    params(("id" = i64, Path, description = "Data source ID")),
    responses(
        (status = 200, description = "Connection test result", body = ConnectionTestResponse),
        (status = 404, description = "Data source not found")
    ),
    tag = "Data Sources"
)]
pub async fn test_data_source_connection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ConnectionTestResponse>> {
    tracing::info!("Testing connection for data source {}", id);
    Ok(Json(state.data_source_service.test_connection(id).await?))
}
