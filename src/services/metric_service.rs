use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::models::{Aggregation, CalculationType, Metric, MetricPreview, MetricQuery, MetricRequest};
use crate::services::{DataSourceService, EntityStore};
use crate::utils::{ApiError, ApiResult, contains_ignore_case};

pub struct MetricService {
    store: EntityStore<Metric>,
    data_sources: Arc<DataSourceService>,
}

/// Formula and selected fields resolved from a request
struct ResolvedFormula {
    formula: String,
    selected_fields: Vec<String>,
}

impl MetricService {
    pub fn new(seed: Vec<Metric>, data_sources: Arc<DataSourceService>) -> Self {
        Self { store: EntityStore::new(seed), data_sources }
    }

    pub async fn list(&self, query: &MetricQuery) -> Vec<Metric> {
        let search = query.search.as_deref().unwrap_or("").trim();
        let metrics: Vec<Metric> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|m| query.data_source_id.is_none_or(|id| m.data_source_id == id))
            .filter(|m| {
                contains_ignore_case(&m.name, search)
                    || contains_ignore_case(&m.display_name, search)
                    || contains_ignore_case(&m.formula, search)
            })
            .collect();
        tracing::debug!("Listed {} metrics (search={:?})", metrics.len(), search);
        metrics
    }

    pub async fn get(&self, id: i64) -> ApiResult<Metric> {
        self.store.get(id).await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    pub async fn create(&self, req: MetricRequest) -> ApiResult<Metric> {
        let req = req.normalized();
        req.validate()?;
        let resolved = resolve_formula(&req)?;
        let data_source_id = required_data_source(&req)?;

        let now = Utc::now();
        let created = self
            .store
            .insert_with(|id| Metric {
                id,
                name: req.name,
                display_name: req.display_name,
                data_source_id,
                calculation_type: req.calculation_type,
                formula: resolved.formula,
                selected_fields: resolved.selected_fields,
                description: req.description,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            "Metric created: {} = {} (ID: {})",
            created.name,
            created.formula,
            created.id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: MetricRequest) -> ApiResult<Metric> {
        let req = req.normalized();
        req.validate()?;
        let resolved = resolve_formula(&req)?;
        let data_source_id = required_data_source(&req)?;

        let updated = self
            .store
            .update_by_id(id, |current| {
                Ok(Metric {
                    id: current.id,
                    name: req.name,
                    display_name: req.display_name,
                    data_source_id,
                    calculation_type: req.calculation_type,
                    formula: resolved.formula,
                    selected_fields: resolved.selected_fields,
                    description: req.description,
                    created_at: current.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!("Metric updated: ID {} = {}", id, updated.formula);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let removed = self.store.remove_by_id(id).await?;
        tracing::info!("Metric deleted: {} (ID: {})", removed.name, id);
        Ok(())
    }

    pub async fn preview(&self, id: i64) -> ApiResult<MetricPreview> {
        let metric = self.store.get(id).await?;
        let data_source_name = self
            .data_sources
            .name_of(metric.data_source_id)
            .await
            .unwrap_or_else(|| "Unknown data source".to_string());

        Ok(MetricPreview {
            id: metric.id,
            display_name: metric.display_name,
            formula: metric.formula,
            description: metric.description.unwrap_or_default(),
            data_source_name,
        })
    }
}

fn required_data_source(req: &MetricRequest) -> ApiResult<i64> {
    req.data_source_id.ok_or_else(|| ApiError::validation_error("Data source is required"))
}

fn resolve_formula(req: &MetricRequest) -> ApiResult<ResolvedFormula> {
    match req.calculation_type {
        CalculationType::Basic => {
            if req.selected_fields.is_empty() {
                return Err(ApiError::validation_error("Select at least one field"));
            }
            let aggregation = req
                .aggregation
                .ok_or_else(|| ApiError::validation_error("Aggregation is required"))?;
            Ok(ResolvedFormula {
                formula: build_formula(aggregation, &req.selected_fields),
                selected_fields: req.selected_fields.clone(),
            })
        },
        CalculationType::Custom => {
            let formula = req
                .formula
                .clone()
                .ok_or_else(|| ApiError::validation_error("Custom formula is required"))?;
            Ok(ResolvedFormula { formula, selected_fields: Vec::new() })
        },
    }
}

/// Generate the formula for a basic metric.
///
/// `fields` must not be empty.
pub fn build_formula(aggregation: Aggregation, fields: &[String]) -> String {
    let function = aggregation.function_name();
    match (aggregation, fields) {
        (Aggregation::Distinct, _) => format!("COUNT(DISTINCT {})", fields.join(", ")),
        (_, [field]) => format!("{}({})", function, field),
        (Aggregation::Avg, [first, second, ..]) => {
            format!("SUM({}) / COUNT({})", first, second)
        },
        _ => format!("{}({})", function, fields.join(" + ")),
    }
}
