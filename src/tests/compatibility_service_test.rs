use crate::models::{CompatibilityLevel, Dimension, DimensionType, Metric};
use crate::services::SeedData;
use crate::tests::common::{
    create_state_with, create_test_catalog, create_test_state, dimension, metric,
};
use crate::utils::ApiError;

fn seed(metrics: Vec<Metric>, dimensions: Vec<Dimension>) -> SeedData {
    SeedData { metrics, dimensions, ..Default::default() }
}

#[tokio::test]
async fn test_same_table_is_compatible() {
    let state = create_state_with(seed(
        vec![metric(1, 1, "COUNT(vehicle_id)")],
        vec![dimension(1, 1, "security_level", DimensionType::Business)],
    ));

    let report = state.compatibility_service.check(1, 1).await.unwrap();
    assert_eq!(report.level, CompatibilityLevel::Compatible);
    assert_eq!(report.dimension_table.as_deref(), Some("vehicle_security_status"));
    assert_eq!(report.metric_table.as_deref(), Some("vehicle_security_status"));
    assert!(report.message.is_empty());
}

#[tokio::test]
async fn test_different_data_sources_are_incompatible() {
    let state = create_test_state();

    // Seed metric 4 lives on data source 2, dimension 1 on data source 1
    let report = state.compatibility_service.check(1, 4).await.unwrap();
    assert_eq!(report.level, CompatibilityLevel::Incompatible);
    assert!(report.message.contains("different data sources"));
    assert!(report.message.contains("(1 vs 2)"));
}

#[tokio::test]
async fn test_related_tables_are_compatible_with_note() {
    let state = create_test_state();

    // timestamp -> vehicle_security_status, AVG(confidence_score) -> anomaly_detection
    let report = state.compatibility_service.check(1, 2).await.unwrap();
    assert_eq!(report.level, CompatibilityLevel::Compatible);
    assert!(report.message.contains("related tables"));
    assert!(report.message.contains("vehicle_security_status"));
    assert!(report.message.contains("anomaly_detection"));
}

#[tokio::test]
async fn test_unrelated_tables_warn() {
    let state = create_state_with(seed(
        vec![metric(1, 1, "COUNT(ecu_id)")],
        vec![dimension(1, 1, "sensor_type", DimensionType::Business)],
    ));

    let report = state.compatibility_service.check(1, 1).await.unwrap();
    assert_eq!(report.level, CompatibilityLevel::Warning);
    assert!(!report.is_compatible());
    assert!(report.message.contains("sensor_data vs ecu_communication"));
}

#[test]
fn test_relationship_checked_in_both_directions() {
    let catalog = create_test_catalog();
    // Only diagnostic_codes lists ecu_communication
    assert!(catalog.are_related("diagnostic_codes", "ecu_communication"));
    assert!(catalog.are_related("ecu_communication", "diagnostic_codes"));
    assert!(!catalog.are_related("sensor_data", "ecu_communication"));
}

#[tokio::test]
async fn test_unmapped_fields_fail_open() {
    let state = create_state_with(seed(
        vec![
            metric(1, 1, "COUNT(DISTINCT vehicle_id)"),
            metric(2, 1, "COUNT(event_id)"),
            metric(3, 1, "42"),
        ],
        vec![
            dimension(1, 1, "sensor_type", DimensionType::Business),
            dimension(2, 1, "unknown_field", DimensionType::Other),
        ],
    ));

    for metric_id in 1..=3 {
        let report = state.compatibility_service.check(1, metric_id).await.unwrap();
        assert_eq!(report.level, CompatibilityLevel::Compatible, "metric {}", metric_id);
        assert!(report.metric_table.is_none());
    }

    let report = state.compatibility_service.check(2, 1).await.unwrap();
    assert_eq!(report.level, CompatibilityLevel::Compatible);
    assert!(report.dimension_table.is_none());
}

#[tokio::test]
async fn test_first_function_argument_decides_metric_table() {
    let state = create_state_with(seed(
        vec![metric(1, 3, "SUM(cpu_usage) / COUNT(temperature)")],
        vec![dimension(1, 3, "cpu_usage", DimensionType::Time)],
    ));

    let report = state.compatibility_service.check(1, 1).await.unwrap();
    assert_eq!(report.metric_table.as_deref(), Some("system_performance"));
    assert_eq!(report.level, CompatibilityLevel::Compatible);
}

#[tokio::test]
async fn test_check_unknown_ids() {
    let state = create_test_state();

    let result = state.compatibility_service.check(999, 1).await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound(_))));

    let result = state.compatibility_service.check(1, 999).await;
    assert!(matches!(result, Err(ApiError::ResourceNotFound(_))));
}
