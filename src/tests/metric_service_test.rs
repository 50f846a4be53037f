use serde_json::json;

use crate::models::{CalculationType, MetricQuery, MetricRequest};
use crate::tests::common::create_test_state;
use crate::utils::ApiError;

fn request(body: serde_json::Value) -> MetricRequest {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_list_filters_by_search_and_source() {
    let state = create_test_state();

    let all = state.metric_service.list(&MetricQuery::default()).await;
    assert_eq!(all.len(), 5);

    let query = MetricQuery { search: Some("avg(".to_string()), data_source_id: None };
    let by_formula = state.metric_service.list(&query).await;
    let ids: Vec<i64> = by_formula.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 5]);

    let query = MetricQuery { search: None, data_source_id: Some(1) };
    assert_eq!(state.metric_service.list(&query).await.len(), 3);
}

#[tokio::test]
async fn test_create_basic_metric_generates_formula() {
    let state = create_test_state();

    let metric = state
        .metric_service
        .create(request(json!({
            "name": "avg_sensor",
            "display_name": "Average sensor value",
            "data_source_id": 1,
            "calculation_type": "basic",
            "aggregation": "avg",
            "selected_fields": [" sensor_value ", "", "sensor_id"],
            "formula": "ignored"
        })))
        .await
        .unwrap();

    assert!(metric.id > 5);
    assert_eq!(metric.formula, "SUM(sensor_value) / COUNT(sensor_id)");
    assert_eq!(metric.selected_fields, vec!["sensor_value".to_string(), "sensor_id".to_string()]);
}

#[tokio::test]
async fn test_create_custom_metric_keeps_formula() {
    let state = create_test_state();

    let metric = state
        .metric_service
        .create(request(json!({
            "name": "ratio",
            "display_name": "Ratio",
            "data_source_id": 2,
            "calculation_type": "custom",
            "selected_fields": ["ignored"],
            "formula": " COUNT(prevented) / COUNT(attack_id) "
        })))
        .await
        .unwrap();

    assert_eq!(metric.calculation_type, CalculationType::Custom);
    assert_eq!(metric.formula, "COUNT(prevented) / COUNT(attack_id)");
    assert!(metric.selected_fields.is_empty());
}

#[tokio::test]
async fn test_rejected_create_leaves_store_untouched() {
    let state = create_test_state();

    let cases = [
        (json!({ "display_name": "No name", "data_source_id": 1, "aggregation": "sum", "selected_fields": ["a"] }), "Metric name is required"),
        (json!({ "name": "m", "display_name": "M", "aggregation": "sum", "selected_fields": ["a"] }), "Data source is required"),
        (json!({ "name": "m", "display_name": "M", "data_source_id": 1, "aggregation": "sum" }), "Select at least one field"),
        (json!({ "name": "m", "display_name": "M", "data_source_id": 1, "selected_fields": ["a"] }), "Aggregation is required"),
        (json!({ "name": "m", "display_name": "M", "data_source_id": 1, "calculation_type": "custom", "formula": "  " }), "Custom formula is required"),
    ];

    for (body, expected) in cases {
        let result = state.metric_service.create(request(body)).await;
        match result {
            Err(ApiError::ValidationError(msg)) => assert_eq!(msg, expected),
            other => panic!("Expected validation error '{}', got {:?}", expected, other.map(|m| m.id)),
        }
    }
    assert_eq!(state.metric_service.count().await, 5);
}

#[tokio::test]
async fn test_update_keeps_created_at() {
    let state = create_test_state();
    let original = state.metric_service.get(5).await.unwrap();

    let updated = state
        .metric_service
        .update(
            5,
            request(json!({
                "name": "max_uptime",
                "display_name": "Max uptime",
                "data_source_id": 3,
                "aggregation": "max",
                "selected_fields": ["uptime"]
            })),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, 5);
    assert_eq!(updated.formula, "MAX(uptime)");
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    let body = json!({
        "name": "x", "display_name": "X", "data_source_id": 3,
        "aggregation": "max", "selected_fields": ["uptime"]
    });
    let result = state.metric_service.update(77, request(body)).await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_preview_resolves_data_source_name() {
    let state = create_test_state();

    let preview = state.metric_service.preview(4).await.unwrap();
    assert_eq!(preview.data_source_name, "网络安全事件数据源");
    assert_eq!(preview.formula, "COUNT(prevented) / COUNT(detection_id)");

    state.data_source_service.delete(2).await.unwrap();
    let preview = state.metric_service.preview(4).await.unwrap();
    assert_eq!(preview.data_source_name, "Unknown data source");
}

#[tokio::test]
async fn test_recommended_dimensions_order() {
    let state = create_test_state();
    let metric = state.metric_service.get(1).await.unwrap();

    let dimensions = state.dimension_service.recommend_for(&metric).await;
    let ids: Vec<i64> = dimensions.iter().map(|d| d.id).collect();
    // Time dimension first, business dimensions keep insertion order
    assert_eq!(ids, vec![1, 2, 3]);

    let metric = state.metric_service.get(5).await.unwrap();
    let ids: Vec<i64> =
        state.dimension_service.recommend_for(&metric).await.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![6]);
}
