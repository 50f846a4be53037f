use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::AppState;
use crate::models::{CardValidation, DataCard, DataCardPreview, DataCardRequest};
use crate::utils::{ApiResult, AppJson};

// List data cards
#[utoipa::path(
    get,
    path = "/api/data-cards",
    responses(
        (status = 200, description = "Data cards in insertion order", body = Vec<DataCard>)
    ),
    tag = "Data Cards"
)]
pub async fn list_data_cards(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DataCard>>> {
    Ok(Json(state.data_card_service.list().await))
}

// Get data card by ID
#[utoipa::path(
    get,
    path = "/api/data-cards/{id}",
    params(("id" = i64, Path, description = "Data card ID")),
    responses(
        (status = 200, description = "Data card", body = DataCard),
        (status = 404, description = "Data card not found")
    ),
    tag = "Data Cards"
)]
pub async fn get_data_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataCard>> {
    Ok(Json(state.data_card_service.get(id).await?))
}

// Create a data card
#[utoipa::path(
    post,
    path = "/api/data-cards",
    request_body = DataCardRequest,
    responses(
        (status = 200, description = "Data card created", body = DataCard),
        (status = 400, description = "Missing name, metric or dimension"),
        (status = 409, description = "Dimension does not fit the selected metrics; resend with confirm")
    ),
    tag = "Data Cards"
)]
pub async fn create_data_card(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<DataCardRequest>,
) -> ApiResult<Json<DataCard>> {
    tracing::debug!(
        "Data card creation request: {} ({:?}, confirm={})",
        req.name,
        req.card_type,
        req.confirm
    );
    Ok(Json(state.data_card_service.create(req).await?))
}

// Update a data card
#[utoipa::path(
    put,
    path = "/api/data-cards/{id}",
    params(("id" = i64, Path, description = "Data card ID")),
    request_body = DataCardRequest,
    responses(
        (status = 200, description = "Data card updated", body = DataCard),
        (status = 400, description = "Missing name, metric or dimension"),
        (status = 404, description = "Data card not found"),
        (status = 409, description = "Dimension does not fit the selected metrics; resend with confirm")
    ),
    tag = "Data Cards"
)]
pub async fn update_data_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<DataCardRequest>,
) -> ApiResult<Json<DataCard>> {
    Ok(Json(state.data_card_service.update(id, req).await?))
}

// Delete a data card
#[utoipa::path(
    delete,
    path = "/api/data-cards/{id}",
    params(("id" = i64, Path, description = "Data card ID")),
    responses(
        (status = 200, description = "Data card deleted"),
        (status = 404, description = "Data card not found")
    ),
    tag = "Data Cards"
)]
pub async fn delete_data_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<()>> {
    state.data_card_service.delete(id).await?;
    Ok(Json(()))
}

// Data card preview with a type-specific placeholder
#[utoipa::path(
    get,
    path = "/api/data-cards/{id}/preview",
    params(("id" = i64, Path, description = "Data card ID")),
    responses(
        (status = 200, description = "Data card preview", body = DataCardPreview),
        (status = 404, description = "Data card not found")
    ),
    tag = "Data Cards"
)]
pub async fn preview_data_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataCardPreview>> {
    Ok(Json(state.data_card_service.preview(id).await?))
}

// Configuration check for a stored card
#[utoipa::path(
    get,
    path = "/api/data-cards/{id}/validation",
    params(("id" = i64, Path, description = "Data card ID")),
    responses(
        (status = 200, description = "Validation issues and warnings", body = CardValidation),
        (status = 404, description = "Data card not found")
    ),
    tag = "Data Cards"
)]
pub async fn validate_data_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CardValidation>> {
    let validation = state.data_card_service.validation(id).await?;
    if validation.has_warnings() {
        tracing::debug!("Data card {} has warnings: {:?}", id, validation.warnings);
    }
    Ok(Json(validation))
}
