use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{
    CatalogDataSource, FieldInfo, RelatedTablesResponse, TableLookupRequest, TableLookupResponse,
    TableOption,
};
use crate::utils::{ApiResult, AppJson};

// Data sources known to the catalog
#[utoipa::path(
    get,
    path = "/api/catalog/data-sources",
    responses(
        (status = 200, description = "Catalog data sources", body = Vec<CatalogDataSource>)
    ),
    tag = "Catalog"
)]
pub async fn list_catalog_data_sources(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CatalogDataSource>>> {
    Ok(Json(state.catalog_service.data_sources().to_vec()))
}

#[utoipa::path(
    get,
    path = "/api/catalog/data-sources/{id}/tables",
    params(("id" = i64, Path, description = "Data source ID")),
    responses(
        (status = 200, description = "Table options", body = Vec<TableOption>),
        (status = 404, description = "No tables for this data source")
    ),
    tag = "Catalog"
)]
pub async fn list_catalog_tables(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<TableOption>>> {
    Ok(Json(state.catalog_service.tables_for(id)?))
}

#[utoipa::path(
    get,
    path = "/api/catalog/tables/{table}/fields",
    params(("table" = String, Path, description = "Table name")),
    responses(
        (status = 200, description = "Columns of the table", body = Vec<FieldInfo>),
        (status = 404, description = "Table not found")
    ),
    tag = "Catalog"
)]
pub async fn get_table_fields(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Vec<FieldInfo>>> {
    Ok(Json(state.catalog_service.table_fields(&table)?))
}

#[utoipa::path(
    get,
    path = "/api/catalog/tables/{table}/dimension-fields",
    params(("table" = String, Path, description = "Table name")),
    responses(
        (status = 200, description = "Dimension field candidates", body = Vec<TableOption>),
        (status = 404, description = "Table not found")
    ),
    tag = "Catalog"
)]
pub async fn get_dimension_fields(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> ApiResult<Json<Vec<TableOption>>> {
    Ok(Json(state.catalog_service.dimension_fields(&table)?))
}

#[utoipa::path(
    get,
    path = "/api/catalog/tables/{table}/related",
    params(("table" = String, Path, description = "Table name")),
    responses(
        (status = 200, description = "Tables listed as related", body = RelatedTablesResponse),
        (status = 404, description = "Table not found")
    ),
    tag = "Catalog"
)]
pub async fn get_related_tables(
    State(state): State<Arc<AppState>>,
    Path(table): Path<String>,
) -> ApiResult<Json<RelatedTablesResponse>> {
    // Unknown tables are rejected the same way as the field lookups
    state.catalog_service.table_fields(&table)?;
    let related = state.catalog_service.related_tables(&table);
    Ok(Json(RelatedTablesResponse { table, related }))
}

// Find the table carrying every requested field
#[utoipa::path(
    post,
    path = "/api/catalog/tables/lookup",
    request_body = TableLookupRequest,
    responses(
        (status = 200, description = "First matching table, or null", body = TableLookupResponse)
    ),
    tag = "Catalog"
)]
pub async fn lookup_table(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<TableLookupRequest>,
) -> ApiResult<Json<TableLookupResponse>> {
    let table = state.catalog_service.find_table_with_fields(&req.fields);
    tracing::debug!("Table lookup for {:?}: {:?}", req.fields, table);
    Ok(Json(TableLookupResponse { table }))
}
