use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    Compatible,
    /// Tables are unrelated; saving needs explicit confirmation
    Warning,
    /// Different data sources
    Incompatible,
}

/// Outcome of pairing one dimension with one metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompatibilityReport {
    pub dimension_id: i64,
    pub metric_id: i64,
    pub level: CompatibilityLevel,
    pub dimension_table: Option<String>,
    pub metric_table: Option<String>,
    /// Empty for a plain compatible pair
    pub message: String,
}

impl CompatibilityReport {
    pub fn is_compatible(&self) -> bool {
        self.level == CompatibilityLevel::Compatible
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompatibilityCheckRequest {
    pub dimension_id: i64,
    pub metric_id: i64,
}

/// Configuration check shown alongside a data card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CardValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl CardValidation {
    pub fn from_findings(issues: Vec<String>, warnings: Vec<String>) -> Self {
        Self { is_valid: issues.is_empty(), issues, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
