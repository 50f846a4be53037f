use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::models::{CompatibilityLevel, CompatibilityReport, Dimension, Metric};
use crate::services::{CatalogService, DimensionService, MetricService};
use crate::utils::ApiResult;

/// First field wrapped by a function call, e.g. `amount` in `SUM(amount) / 2`
static FORMULA_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\((\w+)\)").unwrap());

/// Decides whether a dimension can group a metric.
///
/// Dimensions and metrics from different data sources are incompatible.
/// Otherwise both sides are mapped to a catalog table: same or related tables
/// are compatible, unrelated tables produce a warning, and an unmapped side
/// is treated as compatible.
pub struct CompatibilityService {
    catalog: Arc<CatalogService>,
    metrics: Arc<MetricService>,
    dimensions: Arc<DimensionService>,
}

impl CompatibilityService {
    pub fn new(
        catalog: Arc<CatalogService>,
        metrics: Arc<MetricService>,
        dimensions: Arc<DimensionService>,
    ) -> Self {
        Self { catalog, metrics, dimensions }
    }

    /// Look both entities up and evaluate the pair
    pub async fn check(&self, dimension_id: i64, metric_id: i64) -> ApiResult<CompatibilityReport> {
        let dimension = self.dimensions.get(dimension_id).await?;
        let metric = self.metrics.get(metric_id).await?;
        Ok(self.evaluate(&dimension, &metric))
    }

    pub fn evaluate(&self, dimension: &Dimension, metric: &Metric) -> CompatibilityReport {
        let dimension_table = self.dimension_table(dimension);
        let metric_table = self.metric_table(metric);
        let (level, message) =
            self.classify(dimension, metric, dimension_table.as_deref(), metric_table.as_deref());

        CompatibilityReport {
            dimension_id: dimension.id,
            metric_id: metric.id,
            level,
            dimension_table,
            metric_table,
            message,
        }
    }

    pub fn dimension_table(&self, dimension: &Dimension) -> Option<String> {
        self.catalog.table_for_field(&dimension.field).map(str::to_string)
    }

    pub fn metric_table(&self, metric: &Metric) -> Option<String> {
        let field = FORMULA_FIELD.captures(&metric.formula)?.get(1)?.as_str();
        self.catalog.table_for_field(field).map(str::to_string)
    }

    fn classify(
        &self,
        dimension: &Dimension,
        metric: &Metric,
        dimension_table: Option<&str>,
        metric_table: Option<&str>,
    ) -> (CompatibilityLevel, String) {
        if dimension.data_source_id != metric.data_source_id {
            return (
                CompatibilityLevel::Incompatible,
                format!(
                    "Dimension \"{}\" and metric \"{}\" belong to different data sources ({} vs {})",
                    dimension.display_name,
                    metric.display_name,
                    dimension.data_source_id,
                    metric.data_source_id
                ),
            );
        }

        let (Some(dimension_table), Some(metric_table)) = (dimension_table, metric_table) else {
            return (CompatibilityLevel::Compatible, String::new());
        };

        if dimension_table == metric_table {
            (CompatibilityLevel::Compatible, String::new())
        } else if self.catalog.are_related(dimension_table, metric_table) {
            (
                CompatibilityLevel::Compatible,
                format!(
                    "Dimension and metric come from related tables ({} ↔ {})",
                    dimension_table, metric_table
                ),
            )
        } else {
            (
                CompatibilityLevel::Warning,
                format!(
                    "Dimension and metric come from different tables ({} vs {}), the join may not hold",
                    dimension_table, metric_table
                ),
            )
        }
    }
}
