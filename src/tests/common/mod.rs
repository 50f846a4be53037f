// Common test utilities and helpers

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use std::sync::Arc;
use tower::ServiceExt;

use crate::models::{
    CalculationType, CardType, DataCard, Dimension, DimensionConfig, DimensionType, HierarchyType,
    Metric,
};
use crate::services::{CatalogService, SeedData};
use crate::{AppState, build_router};

/// Catalog embedded in the binary
pub fn create_test_catalog() -> CatalogService {
    CatalogService::load(None).expect("Failed to load embedded catalog")
}

/// State wired from the embedded catalog and fixtures
pub fn create_test_state() -> Arc<AppState> {
    let seed = SeedData::load(None).expect("Failed to load embedded seed data");
    Arc::new(AppState::from_parts(create_test_catalog(), seed))
}

/// State with the embedded catalog and the given entities only
pub fn create_state_with(seed: SeedData) -> Arc<AppState> {
    Arc::new(AppState::from_parts(create_test_catalog(), seed))
}

pub fn create_test_router() -> Router {
    build_router(create_test_state())
}

pub fn metric(id: i64, data_source_id: i64, formula: &str) -> Metric {
    Metric {
        id,
        name: format!("metric_{}", id),
        display_name: format!("Metric {}", id),
        data_source_id,
        calculation_type: CalculationType::Custom,
        formula: formula.to_string(),
        selected_fields: Vec::new(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn dimension(id: i64, data_source_id: i64, field: &str, dimension_type: DimensionType) -> Dimension {
    Dimension {
        id,
        name: format!("dimension_{}", id),
        display_name: format!("Dimension {}", id),
        dimension_type,
        data_source_id,
        field: field.to_string(),
        hierarchy_type: HierarchyType::Flat,
        config: DimensionConfig::default(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn data_card(id: i64, card_type: CardType, metric_id: i64, dimension_id: Option<i64>) -> DataCard {
    let (metric_id, metric_ids) =
        if card_type.is_table() { (None, vec![metric_id]) } else { (Some(metric_id), Vec::new()) };
    DataCard {
        id,
        name: format!("Card {}", id),
        card_type,
        metric_id,
        metric_ids,
        dimension_id,
        config: card_type.default_config(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Send one request through the router and decode the JSON body (Null when empty or not JSON)
pub async fn send_json(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(router, request).await
}

/// Send a JSON-typed request with an arbitrary raw body
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
