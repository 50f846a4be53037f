use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::{StringExt, clean_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    /// Formula generated from an aggregation over selected fields
    #[default]
    Basic,
    /// Free-form formula typed by the user
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Count,
    Avg,
    Max,
    Min,
    Distinct,
}

impl Aggregation {
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Count | Self::Distinct => "COUNT",
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Metric {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub data_source_id: i64,
    pub calculation_type: CalculationType,
    pub formula: String,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MetricRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Metric name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[validate(required(message = "Data source is required"))]
    pub data_source_id: Option<i64>,
    #[serde(default)]
    pub calculation_type: CalculationType,
    /// Used by basic metrics only
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    /// Used by custom metrics only
    pub formula: Option<String>,
    pub description: Option<String>,
}

impl MetricRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trimmed();
        self.display_name = self.display_name.trimmed();
        self.selected_fields = clean_list(&self.selected_fields);
        self.formula = self.formula.clean();
        self.description = self.description.clean();
        self
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MetricQuery {
    pub search: Option<String>,
    pub data_source_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MetricPreview {
    pub id: i64,
    pub display_name: String,
    pub formula: String,
    pub description: String,
    pub data_source_name: String,
}
