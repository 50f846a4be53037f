use serde_json::json;

use crate::models::{DimensionQuery, DimensionRequest, DimensionType, HierarchyType};
use crate::tests::common::create_test_state;
use crate::utils::ApiError;

fn request(body: serde_json::Value) -> DimensionRequest {
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_list_by_type() {
    let state = create_test_state();

    let query = DimensionQuery { search: None, dimension_type: Some(DimensionType::Time) };
    let ids: Vec<i64> = state.dimension_service.list(&query).await.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 6]);

    let query = DimensionQuery { search: Some("SOURCE_IP".to_string()), dimension_type: None };
    let ids: Vec<i64> = state.dimension_service.list(&query).await.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![5]);
}

#[tokio::test]
async fn test_create_geography_dimension() {
    let state = create_test_state();

    let created = state
        .dimension_service
        .create(request(json!({
            "name": "region",
            "display_name": " Region ",
            "type": "geography",
            "data_source_id": 1,
            "field": "location",
            "hierarchy_type": "hierarchy",
            "config": { "hierarchy_fields": ["province", "city"], "time_format": "date" }
        })))
        .await
        .unwrap();

    assert!(created.id > 6);
    assert_eq!(created.display_name, "Region");
    assert_eq!(created.hierarchy_type, HierarchyType::Hierarchy);
    assert_eq!(created.config.geo_level.as_deref(), Some("province"));
    assert_eq!(created.config.time_format, None);
    assert_eq!(created.config.hierarchy_fields, vec!["province".to_string(), "city".to_string()]);
}

#[tokio::test]
async fn test_rejected_create_leaves_store_untouched() {
    let state = create_test_state();

    let result = state
        .dimension_service
        .create(request(json!({ "name": "d", "display_name": "D", "data_source_id": 1, "field": " " })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(msg)) if msg == "Field is required"));

    let result = state
        .dimension_service
        .create(request(json!({
            "name": "d", "display_name": "D", "data_source_id": 1, "field": "city",
            "hierarchy_type": "hierarchy"
        })))
        .await;
    assert!(matches!(result, Err(ApiError::ValidationError(_))));

    assert_eq!(state.dimension_service.count().await, 6);
}

#[tokio::test]
async fn test_delete_and_preview() {
    let state = create_test_state();

    let preview = state.dimension_service.preview(6).await.unwrap();
    assert_eq!(preview.type_label, "Time");
    assert_eq!(preview.sample_values.len(), 3);

    state.dimension_service.delete(3).await.unwrap();
    assert!(matches!(state.dimension_service.get(3).await, Err(ApiError::ResourceNotFound(_))));
    assert!(state.dimension_service.get(4).await.is_ok());
}
