use chrono::Utc;
use validator::Validate;

use crate::models::{
    Dimension, DimensionConfig, DimensionPreview, DimensionQuery, DimensionRequest, DimensionType,
    HierarchyType, Metric,
};
use crate::services::EntityStore;
use crate::utils::{ApiError, ApiResult, contains_ignore_case};

pub struct DimensionService {
    store: EntityStore<Dimension>,
}

impl DimensionService {
    pub fn new(seed: Vec<Dimension>) -> Self {
        Self { store: EntityStore::new(seed) }
    }

    pub async fn list(&self, query: &DimensionQuery) -> Vec<Dimension> {
        let search = query.search.as_deref().unwrap_or("").trim();
        let dimensions: Vec<Dimension> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|d| query.dimension_type.is_none_or(|t| d.dimension_type == t))
            .filter(|d| {
                contains_ignore_case(&d.name, search)
                    || contains_ignore_case(&d.display_name, search)
                    || contains_ignore_case(&d.field, search)
            })
            .collect();
        tracing::debug!("Listed {} dimensions (search={:?})", dimensions.len(), search);
        dimensions
    }

    pub async fn get(&self, id: i64) -> ApiResult<Dimension> {
        self.store.get(id).await
    }

    pub async fn find(&self, id: i64) -> Option<Dimension> {
        self.store.find(id).await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    pub async fn create(&self, req: DimensionRequest) -> ApiResult<Dimension> {
        let req = req.normalized();
        req.validate()?;
        let config = resolve_config(&req)?;
        let data_source_id = required_data_source(&req)?;

        let now = Utc::now();
        let created = self
            .store
            .insert_with(|id| Dimension {
                id,
                name: req.name,
                display_name: req.display_name,
                dimension_type: req.dimension_type,
                data_source_id,
                field: req.field,
                hierarchy_type: req.hierarchy_type,
                config,
                description: req.description,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            "Dimension created: {} on field {} (ID: {})",
            created.name,
            created.field,
            created.id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: DimensionRequest) -> ApiResult<Dimension> {
        let req = req.normalized();
        req.validate()?;
        let config = resolve_config(&req)?;
        let data_source_id = required_data_source(&req)?;

        let updated = self
            .store
            .update_by_id(id, |current| {
                Ok(Dimension {
                    id: current.id,
                    name: req.name,
                    display_name: req.display_name,
                    dimension_type: req.dimension_type,
                    data_source_id,
                    field: req.field,
                    hierarchy_type: req.hierarchy_type,
                    config,
                    description: req.description,
                    created_at: current.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!("Dimension updated: ID {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let removed = self.store.remove_by_id(id).await?;
        tracing::info!("Dimension deleted: {} (ID: {})", removed.name, id);
        Ok(())
    }

    pub async fn preview(&self, id: i64) -> ApiResult<DimensionPreview> {
        Ok(DimensionPreview::from(&self.store.get(id).await?))
    }

    /// Dimensions sharing the metric's data source, time first, then geography, business, other
    pub async fn recommend_for(&self, metric: &Metric) -> Vec<Dimension> {
        let mut candidates: Vec<Dimension> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|d| d.data_source_id == metric.data_source_id)
            .collect();
        candidates.sort_by_key(|d| d.dimension_type.priority());
        tracing::debug!(
            "Recommended {} dimensions for metric {}",
            candidates.len(),
            metric.id
        );
        candidates
    }
}

fn required_data_source(req: &DimensionRequest) -> ApiResult<i64> {
    req.data_source_id.ok_or_else(|| ApiError::validation_error("Data source is required"))
}

/// Keep only the settings that apply to the dimension's type
fn resolve_config(req: &DimensionRequest) -> ApiResult<DimensionConfig> {
    let requested = &req.config;
    let mut config = DimensionConfig::default();

    match req.dimension_type {
        DimensionType::Time => {
            config.time_format =
                Some(requested.time_format.clone().unwrap_or_else(|| "datetime".to_string()));
            config.time_granularity =
                Some(requested.time_granularity.clone().unwrap_or_else(|| "day".to_string()));
        },
        DimensionType::Geography => {
            config.geo_level =
                Some(requested.geo_level.clone().unwrap_or_else(|| "province".to_string()));
        },
        DimensionType::Business | DimensionType::Other => {},
    }

    if req.hierarchy_type == HierarchyType::Hierarchy {
        if requested.hierarchy_fields.is_empty() {
            return Err(ApiError::validation_error(
                "Hierarchy dimensions need at least one hierarchy field",
            ));
        }
        config.hierarchy_fields = requested.hierarchy_fields.clone();
    }

    Ok(config)
}
