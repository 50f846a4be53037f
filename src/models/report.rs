use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::StringExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Dashboard,
    Summary,
    Detail,
    Comparison,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Summary => "Summary report",
            Self::Detail => "Detail report",
            Self::Comparison => "Comparison report",
        }
    }

    /// Layout a report of this type starts with
    pub fn default_layout(&self) -> LayoutTemplate {
        match self {
            Self::Dashboard => LayoutTemplate::Grid,
            Self::Summary | Self::Detail => LayoutTemplate::Column,
            Self::Comparison => LayoutTemplate::Row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LayoutTemplate {
    Grid,
    Column,
    Row,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimeRange {
    /// e.g. `today`, `last_7_days`, `this_month`
    Relative { unit: String },
    Absolute { start: String, end: String },
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::Relative { unit: "this_month".to_string() }
    }
}

fn default_refresh_interval() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AutoRefresh {
    #[serde(default)]
    pub enabled: bool,
    /// Minutes between refreshes
    #[serde(default = "default_refresh_interval")]
    pub interval: u32,
}

impl Default for AutoRefresh {
    fn default() -> Self {
        Self { enabled: false, interval: default_refresh_interval() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportFilter {
    pub dimension_id: Option<i64>,
    #[serde(default)]
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

/// Width a card occupies on the report grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    #[default]
    Normal,
    Half,
    Full,
}

impl CardSize {
    /// Columns spanned on the four-column grid
    pub fn span(&self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Half => 2,
            Self::Full => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportConfig {
    pub layout: LayoutTemplate,
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default)]
    pub auto_refresh: AutoRefresh,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    /// Card id to size; absent cards are `normal`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub card_sizes: BTreeMap<i64, CardSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub data_card_ids: Vec<i64>,
    pub config: ReportConfig,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn card_size(&self, card_id: i64) -> CardSize {
        self.config.card_sizes.get(&card_id).copied().unwrap_or_default()
    }
}

/// Report settings as submitted; unset values take the defaults
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReportConfigRequest {
    /// Defaults to the report type's layout
    pub layout: Option<LayoutTemplate>,
    pub time_range: Option<TimeRange>,
    pub auto_refresh: Option<AutoRefresh>,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    #[serde(default)]
    pub card_sizes: BTreeMap<i64, CardSize>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReportRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Report name is required"))]
    pub name: String,
    #[serde(default, rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    #[validate(length(min = 1, message = "Select at least one data card"))]
    pub data_card_ids: Vec<i64>,
    #[serde(default)]
    pub config: ReportConfigRequest,
    pub description: Option<String>,
}

impl ReportRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trimmed();
        self.description = self.description.clean();
        self
    }

    pub fn build_config(&self) -> ReportConfig {
        let requested = &self.config;
        ReportConfig {
            layout: requested.layout.unwrap_or_else(|| self.report_type.default_layout()),
            time_range: requested.time_range.clone().unwrap_or_default(),
            auto_refresh: requested.auto_refresh.clone().unwrap_or_default(),
            filters: requested
                .filters
                .iter()
                .filter(|f| f.dimension_id.is_some() && !f.value.trim().is_empty())
                .map(|f| ReportFilter { value: f.value.trimmed(), ..f.clone() })
                .collect(),
            card_sizes: requested
                .card_sizes
                .iter()
                .filter(|(id, _)| self.data_card_ids.contains(id))
                .map(|(id, size)| (*id, *size))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LayoutUpdateRequest {
    /// New card order; must contain exactly the report's card ids
    pub data_card_ids: Vec<i64>,
    #[serde(default)]
    pub card_sizes: BTreeMap<i64, CardSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CardPlacement {
    pub card_id: i64,
    pub size: CardSize,
    /// 1-based
    pub row: u32,
    /// 1-based
    pub column: u32,
    pub span: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportLayout {
    pub report_id: i64,
    pub layout: LayoutTemplate,
    pub columns: u32,
    pub placements: Vec<CardPlacement>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCardPreview {
    pub id: i64,
    pub name: String,
    pub type_label: String,
    pub placeholder: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportPreview {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub type_label: String,
    pub layout: LayoutTemplate,
    pub card_count: usize,
    pub cards: Vec<ReportCardPreview>,
    /// Set when there is nothing to show
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> ReportRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_layout_defaults_to_report_type() {
        let req = request(serde_json::json!({
            "name": "weekly",
            "type": "comparison",
            "data_card_ids": [1]
        }));
        let config = req.build_config();
        assert_eq!(config.layout, LayoutTemplate::Row);
        assert_eq!(config.time_range, TimeRange::Relative { unit: "this_month".into() });
        assert_eq!(config.auto_refresh.interval, 5);
    }

    #[test]
    fn test_incomplete_filters_are_dropped() {
        let req = request(serde_json::json!({
            "name": "weekly",
            "data_card_ids": [1],
            "config": {
                "filters": [
                    { "dimension_id": 2, "operator": ">=", "value": " 3 " },
                    { "dimension_id": null, "operator": "=", "value": "x" },
                    { "dimension_id": 4, "operator": "=", "value": "  " }
                ]
            }
        }));
        let filters = req.build_config().filters;
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].operator, FilterOperator::Ge);
        assert_eq!(filters[0].value, "3");
    }

    #[test]
    fn test_sizes_for_unknown_cards_are_dropped() {
        let req = request(serde_json::json!({
            "name": "weekly",
            "data_card_ids": [1, 2],
            "config": { "card_sizes": { "2": "full", "9": "half" } }
        }));
        let sizes = req.build_config().card_sizes;
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes.get(&2), Some(&CardSize::Full));
    }
}
