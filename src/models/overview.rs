use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EntityCounts {
    pub data_sources: usize,
    pub metrics: usize,
    pub dimensions: usize,
    pub data_cards: usize,
    pub reports: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentItem {
    pub id: i64,
    pub name: String,
    pub type_label: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub counts: EntityCounts,
    pub recent_reports: Vec<RecentItem>,
    pub recent_data_cards: Vec<RecentItem>,
}
