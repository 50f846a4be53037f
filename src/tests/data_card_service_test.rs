use serde_json::json;

use crate::models::{CardPlaceholder, CardType, DataCardRequest, DimensionType};
use crate::services::SeedData;
use crate::tests::common::{
    create_state_with, create_test_state, data_card, dimension, metric,
};
use crate::utils::ApiError;

fn request(body: serde_json::Value) -> DataCardRequest {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_create_kpi_card_without_dimension() {
    let state = create_test_state();

    let card = state
        .data_card_service
        .create(request(json!({ "name": "  Events  ", "type": "kpi", "metric_id": 1 })))
        .await
        .unwrap();

    assert!(card.id > 3, "New ids stay above the seeded ones");
    assert_eq!(card.name, "Events");
    assert_eq!(card.metric_id, Some(1));
    assert!(card.metric_ids.is_empty());
    assert_eq!(card.config, CardType::Kpi.default_config());
}

#[tokio::test]
async fn test_incompatible_card_needs_confirmation() {
    let state = create_test_state();
    let before = state.data_card_service.count().await;

    let body = json!({ "name": "Prevention trend", "type": "line", "metric_id": 4, "dimension_id": 1 });
    let result = state.data_card_service.create(request(body.clone())).await;

    match result {
        Err(ApiError::CompatibilityConflict { message, details }) => {
            assert!(message.contains("different data sources"));
            assert_eq!(details.as_array().map(Vec::len), Some(1));
            assert_eq!(details[0]["level"], "incompatible");
        },
        other => panic!("Expected compatibility conflict, got {:?}", other.map(|c| c.id)),
    }
    assert_eq!(state.data_card_service.count().await, before, "Rejected card must not be stored");

    let mut confirmed = body;
    confirmed["confirm"] = json!(true);
    let card = state.data_card_service.create(request(confirmed)).await.unwrap();
    assert_eq!(card.dimension_id, Some(1));
    assert_eq!(state.data_card_service.count().await, before + 1);
}

#[tokio::test]
async fn test_warning_pair_needs_confirmation() {
    let state = create_state_with(SeedData {
        metrics: vec![metric(1, 1, "COUNT(ecu_id)")],
        dimensions: vec![dimension(1, 1, "sensor_type", DimensionType::Time)],
        ..Default::default()
    });

    let result = state
        .data_card_service
        .create(request(json!({ "name": "ECU", "type": "bar", "metric_id": 1, "dimension_id": 1 })))
        .await;
    assert!(matches!(result, Err(ApiError::CompatibilityConflict { .. })));
}

#[tokio::test]
async fn test_table_card_deduplicates_metrics() {
    let state = create_test_state();

    let card = state
        .data_card_service
        .create(request(json!({
            "name": "Detail",
            "type": "table",
            "metric_id": 5,
            "metric_ids": [2, 1, 2, 3],
            "dimension_id": 1
        })))
        .await
        .unwrap();

    assert_eq!(card.metric_ids, vec![2, 1, 3]);
    assert_eq!(card.metric_id, None);
}

#[tokio::test]
async fn test_create_requires_metric() {
    let state = create_test_state();

    let result = state
        .data_card_service
        .create(request(json!({ "name": "Empty table", "type": "table", "metric_ids": [] })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(msg)) if msg == "Select at least one metric"));

    let result = state
        .data_card_service
        .create(request(json!({ "name": "Empty pie", "type": "pie" })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(msg)) if msg == "Metric is required"));

    let result = state
        .data_card_service
        .create(request(json!({ "name": "   ", "type": "kpi", "metric_id": 1 })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(msg)) if msg == "Card name is required"));
}

#[tokio::test]
async fn test_config_must_match_type() {
    let state = create_test_state();

    let result = state
        .data_card_service
        .create(request(json!({
            "name": "Mismatch",
            "type": "kpi",
            "metric_id": 1,
            "config": { "kind": "table", "columns": 3, "page_size": 10, "dimension_usage": "grouping" }
        })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(_))));
}

#[tokio::test]
async fn test_update_missing_card() {
    let state = create_test_state();

    let result = state
        .data_card_service
        .update(99, request(json!({ "name": "Ghost", "type": "kpi", "metric_id": 1 })))
        .await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound(msg)) if msg == "Data card 99 not found"));
}

#[tokio::test]
async fn test_delete_keeps_other_ids() {
    let state = create_test_state();

    let before = state
        .data_card_service
        .create(request(json!({ "name": "Before", "type": "kpi", "metric_id": 1 })))
        .await
        .unwrap();
    state.data_card_service.delete(2).await.unwrap();
    state.data_card_service.delete(before.id).await.unwrap();

    let ids: Vec<i64> = state.data_card_service.list().await.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(matches!(state.data_card_service.delete(2).await, Err(ApiError::ResourceNotFound(_))));

    let card = state
        .data_card_service
        .create(request(json!({ "name": "Next", "type": "kpi", "metric_id": 1 })))
        .await
        .unwrap();
    assert!(card.id > before.id, "Ids are never reused");
}

#[tokio::test]
async fn test_seed_validation() {
    let state = create_test_state();

    let kpi = state.data_card_service.validation(1).await.unwrap();
    assert!(kpi.is_valid);
    assert!(kpi.issues.is_empty());

    let line = state.data_card_service.validation(2).await.unwrap();
    assert!(!line.is_valid);
    assert_eq!(line.issues, vec!["Dimension does not match the metric's data source".to_string()]);

    let table = state.data_card_service.validation(3).await.unwrap();
    assert!(table.is_valid, "Unexpected issues: {:?}", table.issues);
}

#[tokio::test]
async fn test_validation_flags_missing_metrics_and_dimension_kinds() {
    let state = create_state_with(SeedData {
        metrics: vec![metric(1, 1, "COUNT(vehicle_id)")],
        dimensions: vec![dimension(1, 1, "security_level", DimensionType::Business)],
        data_cards: vec![
            data_card(1, CardType::Kpi, 42, None),
            data_card(2, CardType::Map, 1, Some(1)),
            data_card(3, CardType::Bar, 1, Some(1)),
            {
                let mut table = data_card(4, CardType::Table, 1, Some(1));
                table.metric_ids.push(42);
                table
            },
        ],
        ..Default::default()
    });
    let cards = &state.data_card_service;

    let missing = cards.validation(1).await.unwrap();
    assert_eq!(missing.issues, vec!["Metric does not exist".to_string()]);

    let map = cards.validation(2).await.unwrap();
    assert_eq!(map.issues, vec!["Map cards need a geography dimension".to_string()]);

    let bar = cards.validation(3).await.unwrap();
    assert_eq!(bar.issues, vec!["Trend charts should use a time dimension".to_string()]);

    let table = cards.validation(4).await.unwrap();
    assert_eq!(table.issues, vec!["Some metrics do not exist".to_string()]);
}

#[tokio::test]
async fn test_warning_pair_is_reported_as_warning() {
    let state = create_state_with(SeedData {
        metrics: vec![metric(1, 1, "COUNT(ecu_id)")],
        dimensions: vec![dimension(1, 1, "sensor_type", DimensionType::Time)],
        data_cards: vec![data_card(1, CardType::Line, 1, Some(1))],
        ..Default::default()
    });

    let validation = state.data_card_service.validation(1).await.unwrap();
    assert!(validation.is_valid);
    assert_eq!(validation.warnings.len(), 1);
    assert!(validation.warnings[0].contains("sensor_data vs ecu_communication"));
}

#[tokio::test]
async fn test_preview_placeholders() {
    let state = create_test_state();

    let kpi = state.data_card_service.preview(1).await.unwrap();
    assert_eq!(kpi.metric_names, vec!["安全事件总数".to_string()]);
    assert_eq!(kpi.dimension_name, None);
    match kpi.placeholder {
        CardPlaceholder::Kpi { value, caption, .. } => {
            assert_eq!(value, "1,234");
            assert_eq!(caption, "安全事件总数");
        },
        other => panic!("Expected KPI placeholder, got {:?}", other),
    }

    let table = state.data_card_service.preview(3).await.unwrap();
    match table.placeholder {
        CardPlaceholder::Table { columns, rows } => {
            assert_eq!(columns.len(), 4, "Dimension column plus three metrics");
            assert_eq!(columns[0], "安全事件时间");
            assert_eq!(rows.len(), 3);
            assert!(rows.iter().all(|row| row.len() == 4));
        },
        other => panic!("Expected table placeholder, got {:?}", other),
    }
}

#[tokio::test]
async fn test_preview_names_unknown_metric() {
    let state = create_state_with(SeedData {
        data_cards: vec![data_card(1, CardType::Pie, 7, None)],
        ..Default::default()
    });

    let preview = state.data_card_service.preview(1).await.unwrap();
    assert_eq!(preview.metric_names, vec!["Unknown metric".to_string()]);
    assert!(!preview.validation.is_valid);
    assert_eq!(preview.description, "No description");
}
