use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::{StringExt, clean_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    Time,
    Business,
    Geography,
    #[default]
    Other,
}

impl DimensionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Business => "Business",
            Self::Geography => "Geography",
            Self::Other => "Other",
        }
    }

    /// Ordering used when recommending dimensions; lower comes first
    pub fn priority(&self) -> u8 {
        match self {
            Self::Time => 0,
            Self::Geography => 1,
            Self::Business => 2,
            Self::Other => 3,
        }
    }

    /// Placeholder values shown in a preview
    pub fn sample_values(&self) -> Vec<String> {
        let samples: [&str; 3] = match self {
            Self::Time => ["2024-01-01", "2024-01-02", "2024-01-03"],
            Self::Geography => ["Beijing", "Shanghai", "Guangzhou"],
            Self::Business | Self::Other => ["Category A", "Category B", "Category C"],
        };
        samples.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyType {
    #[default]
    Flat,
    Hierarchy,
}

impl HierarchyType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Hierarchy => "Hierarchical",
        }
    }
}

/// Type-specific settings. Only the keys relevant to the dimension's type are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DimensionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hierarchy_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Dimension {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub dimension_type: DimensionType,
    pub data_source_id: i64,
    pub field: String,
    #[serde(default)]
    pub hierarchy_type: HierarchyType,
    #[serde(default)]
    pub config: DimensionConfig,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DimensionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Dimension name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[serde(default, rename = "type")]
    pub dimension_type: DimensionType,
    #[validate(required(message = "Data source is required"))]
    pub data_source_id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Field is required"))]
    pub field: String,
    #[serde(default)]
    pub hierarchy_type: HierarchyType,
    #[serde(default)]
    pub config: DimensionConfig,
    pub description: Option<String>,
}

impl DimensionRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trimmed();
        self.display_name = self.display_name.trimmed();
        self.field = self.field.trimmed();
        self.description = self.description.clean();
        self.config = DimensionConfig {
            time_format: self.config.time_format.clean(),
            time_granularity: self.config.time_granularity.clean(),
            geo_level: self.config.geo_level.clean(),
            hierarchy_fields: clean_list(&self.config.hierarchy_fields),
        };
        self
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DimensionQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub dimension_type: Option<DimensionType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DimensionPreview {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub type_label: String,
    pub field: String,
    pub hierarchy_label: String,
    pub description: String,
    pub sample_values: Vec<String>,
}

impl From<&Dimension> for DimensionPreview {
    fn from(dimension: &Dimension) -> Self {
        Self {
            id: dimension.id,
            name: dimension.name.clone(),
            display_name: dimension.display_name.clone(),
            type_label: dimension.dimension_type.label().to_string(),
            field: dimension.field.clone(),
            hierarchy_label: dimension.hierarchy_type.label().to_string(),
            description: dimension.description.clone().unwrap_or_else(|| "No description".to_string()),
            sample_values: dimension.dimension_type.sample_values(),
        }
    }
}
