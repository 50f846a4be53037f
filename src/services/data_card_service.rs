use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    CardConfig, CardPlaceholder, CardType, CardValidation, CompatibilityLevel, CompatibilityReport,
    DataCard, DataCardPreview, DataCardRequest, Dimension, DimensionType, Metric, MetricQuery,
};
use crate::services::{CompatibilityService, DimensionService, EntityStore, MetricService};
use crate::utils::{ApiError, ApiResult, unique_ordered, vec_to_map};

const UNKNOWN_METRIC: &str = "Unknown metric";

pub struct DataCardService {
    store: EntityStore<DataCard>,
    metrics: Arc<MetricService>,
    dimensions: Arc<DimensionService>,
    compatibility: Arc<CompatibilityService>,
}

/// Metric references resolved from a request
struct MetricRefs {
    metric_id: Option<i64>,
    metric_ids: Vec<i64>,
}

impl DataCardService {
    pub fn new(
        seed: Vec<DataCard>,
        metrics: Arc<MetricService>,
        dimensions: Arc<DimensionService>,
        compatibility: Arc<CompatibilityService>,
    ) -> Self {
        Self { store: EntityStore::new(seed), metrics, dimensions, compatibility }
    }

    pub async fn list(&self) -> Vec<DataCard> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<DataCard> {
        self.store.get(id).await
    }

    pub async fn find(&self, id: i64) -> Option<DataCard> {
        self.store.find(id).await
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }

    pub async fn create(&self, req: DataCardRequest) -> ApiResult<DataCard> {
        let req = req.normalized();
        req.validate()?;
        let config = resolve_config(&req)?;
        let refs = resolve_metric_refs(&req)?;
        self.guard_compatibility(&req, &refs).await?;

        let now = Utc::now();
        let created = self
            .store
            .insert_with(|id| DataCard {
                id,
                name: req.name,
                card_type: req.card_type,
                metric_id: refs.metric_id,
                metric_ids: refs.metric_ids,
                dimension_id: req.dimension_id,
                config,
                description: req.description,
                created_at: now,
                updated_at: now,
            })
            .await;

        tracing::info!(
            "Data card created: {} ({:?}, ID: {})",
            created.name,
            created.card_type,
            created.id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, req: DataCardRequest) -> ApiResult<DataCard> {
        let req = req.normalized();
        req.validate()?;
        let config = resolve_config(&req)?;
        let refs = resolve_metric_refs(&req)?;
        self.guard_compatibility(&req, &refs).await?;

        let updated = self
            .store
            .update_by_id(id, |current| {
                Ok(DataCard {
                    id: current.id,
                    name: req.name,
                    card_type: req.card_type,
                    metric_id: refs.metric_id,
                    metric_ids: refs.metric_ids,
                    dimension_id: req.dimension_id,
                    config,
                    description: req.description,
                    created_at: current.created_at,
                    updated_at: Utc::now(),
                })
            })
            .await?;

        tracing::info!("Data card updated: ID {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let removed = self.store.remove_by_id(id).await?;
        tracing::info!("Data card deleted: {} (ID: {})", removed.name, id);
        Ok(())
    }

    pub async fn validation(&self, id: i64) -> ApiResult<CardValidation> {
        let card = self.store.get(id).await?;
        Ok(self.validate_card(&card).await)
    }

    pub async fn preview(&self, id: i64) -> ApiResult<DataCardPreview> {
        let card = self.store.get(id).await?;
        let metrics = self.lookup_metrics(&card.referenced_metric_ids()).await;
        let dimension = self.lookup_dimension(card.dimension_id).await;
        let validation = self.validate_card(&card).await;

        let mut metric_names: Vec<String> = metrics
            .iter()
            .map(|m| m.as_ref().map_or(UNKNOWN_METRIC.to_string(), |m| m.display_name.clone()))
            .collect();
        if metric_names.is_empty() {
            metric_names.push(UNKNOWN_METRIC.to_string());
        }
        let placeholder = placeholder_for(&card, &metric_names, dimension.as_ref());

        Ok(DataCardPreview {
            id: card.id,
            name: card.name,
            description: card.description.unwrap_or_else(|| "No description".to_string()),
            type_label: card.card_type.label().to_string(),
            metric_names,
            dimension_name: dimension.map(|d| d.display_name),
            validation,
            placeholder,
        })
    }

    /// Check a stored card's metric and dimension references
    pub async fn validate_card(&self, card: &DataCard) -> CardValidation {
        let requested = card.referenced_metric_ids();
        let metrics: Vec<Metric> =
            self.lookup_metrics(&requested).await.into_iter().flatten().collect();
        let dimension = self.lookup_dimension(card.dimension_id).await;

        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        if card.card_type.is_table() {
            if metrics.is_empty() {
                issues.push("No metrics selected".to_string());
            } else if metrics.len() != requested.len() {
                issues.push("Some metrics do not exist".to_string());
            }
        } else if metrics.is_empty() {
            issues.push("Metric does not exist".to_string());
        }

        if let Some(dimension) = dimension
            && !metrics.is_empty()
        {
            let reports: Vec<CompatibilityReport> =
                metrics.iter().map(|m| self.compatibility.evaluate(&dimension, m)).collect();

            if card.card_type.is_table() {
                let mismatched = reports.iter().filter(|r| !r.is_compatible()).count();
                if mismatched > 0 {
                    issues.push(format!("Dimension does not match {} metric(s)", mismatched));
                }
            } else if let Some(report) = reports.first() {
                match report.level {
                    CompatibilityLevel::Incompatible => {
                        issues.push("Dimension does not match the metric's data source".to_string())
                    },
                    CompatibilityLevel::Warning => warnings.push(report.message.clone()),
                    CompatibilityLevel::Compatible => {},
                }
            }

            if card.card_type == CardType::Map && dimension.dimension_type != DimensionType::Geography
            {
                issues.push("Map cards need a geography dimension".to_string());
            }
            if matches!(card.card_type, CardType::Line | CardType::Bar)
                && dimension.dimension_type != DimensionType::Time
            {
                issues.push("Trend charts should use a time dimension".to_string());
            }
        }

        CardValidation::from_findings(issues, warnings)
    }

    /// Refuse incompatible or unrelated combinations unless the request confirms them
    async fn guard_compatibility(&self, req: &DataCardRequest, refs: &MetricRefs) -> ApiResult<()> {
        let Some(dimension) = self.lookup_dimension(req.dimension_id).await else {
            return Ok(());
        };

        let ids: Vec<i64> = refs.metric_id.into_iter().chain(refs.metric_ids.iter().copied()).collect();
        let flagged: Vec<CompatibilityReport> = self
            .lookup_metrics(&ids)
            .await
            .into_iter()
            .flatten()
            .map(|metric| self.compatibility.evaluate(&dimension, &metric))
            .filter(|report| !report.is_compatible())
            .collect();

        if flagged.is_empty() {
            return Ok(());
        }

        if req.confirm {
            for report in &flagged {
                tracing::warn!(
                    "Data card {} saved with {:?} pairing of dimension {} and metric {}: {}",
                    req.name,
                    report.level,
                    report.dimension_id,
                    report.metric_id,
                    report.message
                );
            }
            return Ok(());
        }

        let message = flagged
            .iter()
            .map(|r| r.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ApiError::compatibility_conflict(message, serde_json::to_value(&flagged)?))
    }

    /// Metrics in the order of `ids`, `None` where one no longer exists
    async fn lookup_metrics(&self, ids: &[i64]) -> Vec<Option<Metric>> {
        let by_id = vec_to_map(self.metrics.list(&MetricQuery::default()).await, |m| m.id);
        ids.iter().map(|id| by_id.get(id).cloned()).collect()
    }

    async fn lookup_dimension(&self, id: Option<i64>) -> Option<Dimension> {
        match id {
            Some(id) => self.dimensions.find(id).await,
            None => None,
        }
    }
}

fn resolve_config(req: &DataCardRequest) -> ApiResult<CardConfig> {
    req.resolve_config().ok_or_else(|| {
        ApiError::validation_error(format!(
            "Config does not match card type {}",
            req.card_type.label()
        ))
    })
}

fn resolve_metric_refs(req: &DataCardRequest) -> ApiResult<MetricRefs> {
    if req.card_type.is_table() {
        let metric_ids = unique_ordered(req.metric_ids.clone());
        if metric_ids.is_empty() {
            return Err(ApiError::validation_error("Select at least one metric"));
        }
        Ok(MetricRefs { metric_id: None, metric_ids })
    } else {
        let metric_id =
            req.metric_id.ok_or_else(|| ApiError::validation_error("Metric is required"))?;
        Ok(MetricRefs { metric_id: Some(metric_id), metric_ids: Vec::new() })
    }
}

fn placeholder_for(
    card: &DataCard,
    metric_names: &[String],
    dimension: Option<&Dimension>,
) -> CardPlaceholder {
    let first_metric = metric_names.first().cloned().unwrap_or_default();
    match card.card_type {
        CardType::Kpi => CardPlaceholder::Kpi {
            value: "1,234".to_string(),
            change: "↑ 8.2% vs last month".to_string(),
            caption: first_metric,
        },
        CardType::Line => CardPlaceholder::Line {
            x_labels: ["08:00", "10:00", "12:00", "14:00", "16:00"].map(String::from).to_vec(),
            caption: format!("{} over time", first_metric),
        },
        CardType::Bar => CardPlaceholder::Bar {
            categories: ["Vehicle A", "Vehicle B", "Vehicle C", "Vehicle D"]
                .map(String::from)
                .to_vec(),
            caption: format!("{} by category", first_metric),
        },
        CardType::Pie => CardPlaceholder::Pie {
            shares: vec![40, 30, 30],
            caption: format!("{} share", first_metric),
        },
        CardType::Table => {
            let columns: Vec<String> = dimension
                .map(|d| d.display_name.clone())
                .into_iter()
                .chain(metric_names.iter().cloned())
                .collect();
            let rows = (0..3).map(|_| vec!["Sample".to_string(); columns.len()]).collect();
            CardPlaceholder::Table { columns, rows }
        },
        CardType::Map => {
            let map_type = match &card.config {
                CardConfig::Map { map_type, .. } => map_type.clone(),
                _ => "china".to_string(),
            };
            CardPlaceholder::Map { map_type, caption: format!("{} by region", first_metric) }
        },
    }
}
