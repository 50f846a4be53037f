use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::CardValidation;
use crate::utils::StringExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    #[default]
    Kpi,
    Line,
    Bar,
    Pie,
    Table,
    Map,
}

impl CardType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kpi => "KPI card",
            Self::Line => "Line chart",
            Self::Bar => "Bar chart",
            Self::Pie => "Pie chart",
            Self::Table => "Data table",
            Self::Map => "Map",
        }
    }

    /// Short placeholder text used where a card is rendered inside a report
    pub fn placeholder_text(&self) -> &'static str {
        match self {
            Self::Kpi => "¥1,234,567",
            Self::Line => "📈 Trend",
            Self::Bar => "📊 Bars",
            Self::Pie => "🥧 Pie",
            Self::Table => "📋 Table",
            Self::Map => "🗺️ Map",
        }
    }

    pub fn is_table(&self) -> bool {
        *self == Self::Table
    }

    pub fn default_config(&self) -> CardConfig {
        match self {
            Self::Kpi => CardConfig::Kpi {
                format: "number".to_string(),
                comparison: "none".to_string(),
            },
            Self::Line | Self::Bar | Self::Pie => CardConfig::Chart {
                title: String::new(),
                x_axis_label: String::new(),
                y_axis_label: String::new(),
                color_scheme: "default".to_string(),
            },
            Self::Table => CardConfig::Table {
                columns: 5,
                page_size: 10,
                dimension_usage: "grouping".to_string(),
            },
            Self::Map => CardConfig::Map { map_type: "china".to_string(), map_dimension: None },
        }
    }

    fn accepts(&self, config: &CardConfig) -> bool {
        matches!(
            (self, config),
            (Self::Kpi, CardConfig::Kpi { .. })
                | (Self::Line | Self::Bar | Self::Pie, CardConfig::Chart { .. })
                | (Self::Table, CardConfig::Table { .. })
                | (Self::Map, CardConfig::Map { .. })
        )
    }
}

/// Chart-specific settings; the variant must match the card type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardConfig {
    Kpi {
        format: String,
        comparison: String,
    },
    Chart {
        #[serde(default)]
        title: String,
        #[serde(default)]
        x_axis_label: String,
        #[serde(default)]
        y_axis_label: String,
        color_scheme: String,
    },
    Table {
        columns: u32,
        page_size: u32,
        dimension_usage: String,
    },
    Map {
        map_type: String,
        map_dimension: Option<i64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataCard {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Set for every type except `table`
    pub metric_id: Option<i64>,
    /// Set for `table` cards only
    #[serde(default)]
    pub metric_ids: Vec<i64>,
    pub dimension_id: Option<i64>,
    pub config: CardConfig,
    pub description: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl DataCard {
    /// Metric ids the card reads, in display order
    pub fn referenced_metric_ids(&self) -> Vec<i64> {
        if self.card_type.is_table() {
            self.metric_ids.clone()
        } else {
            self.metric_id.into_iter().collect()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DataCardRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Card name is required"))]
    pub name: String,
    #[serde(default, rename = "type")]
    pub card_type: CardType,
    pub metric_id: Option<i64>,
    #[serde(default)]
    pub metric_ids: Vec<i64>,
    pub dimension_id: Option<i64>,
    /// Falls back to the type's default config when omitted
    pub config: Option<CardConfig>,
    pub description: Option<String>,
    /// Save even when the dimension and metrics look incompatible
    #[serde(default)]
    pub confirm: bool,
}

impl DataCardRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trimmed();
        self.description = self.description.clean();
        self
    }

    /// Resolve the card config, rejecting one shaped for another card type
    pub fn resolve_config(&self) -> Option<CardConfig> {
        match &self.config {
            Some(config) if self.card_type.accepts(config) => Some(config.clone()),
            Some(_) => None,
            None => Some(self.card_type.default_config()),
        }
    }
}

/// Static visual standing in for real data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardPlaceholder {
    Kpi { value: String, change: String, caption: String },
    Line { x_labels: Vec<String>, caption: String },
    Bar { categories: Vec<String>, caption: String },
    Pie { shares: Vec<u32>, caption: String },
    Table { columns: Vec<String>, rows: Vec<Vec<String>> },
    Map { map_type: String, caption: String },
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DataCardPreview {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub type_label: String,
    pub metric_names: Vec<String>,
    pub dimension_name: Option<String>,
    pub validation: CardValidation,
    pub placeholder: CardPlaceholder,
}
